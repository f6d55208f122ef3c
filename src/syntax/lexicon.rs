//! Fixed type-name and keyword tables
//!
//! Both tables are kept in byte order so lookups can binary search.

use super::tag::StyleTag;

/// Type names, sorted
pub const TYPES: &[&str] = &[
    "Fl_Button",
    "Fl_Double_Window",
    "Fl_File_Chooser",
    "Fl_Gl_Window",
    "Fl_Input",
    "Fl_Menu_Bar",
    "Fl_Text_Buffer",
    "Fl_Text_Editor",
    "Fl_Widget",
    "Fl_Window",
];

/// Keywords, sorted
pub const KEYWORDS: &[&str] = &[
    "and",
    "and_eq",
    "asm",
    "auto",
    "bitand",
    "bitor",
    "bool",
    "break",
    "case",
    "catch",
    "char",
    "class",
    "compl",
    "const",
    "const_cast",
    "continue",
    "default",
    "delete",
    "do",
    "double",
    "dynamic_cast",
    "else",
    "enum",
    "explicit",
    "export",
    "extern",
    "false",
    "float",
    "for",
    "friend",
    "goto",
    "if",
    "inline",
    "int",
    "long",
    "mutable",
    "namespace",
    "new",
    "not",
    "not_eq",
    "operator",
    "or",
    "or_eq",
    "private",
    "protected",
    "public",
    "register",
    "reinterpret_cast",
    "return",
    "short",
    "signed",
    "sizeof",
    "static",
    "static_cast",
    "struct",
    "switch",
    "template",
    "this",
    "throw",
    "true",
    "try",
    "typedef",
    "typeid",
    "typename",
    "union",
    "unsigned",
    "using",
    "virtual",
    "void",
    "volatile",
    "wchar_t",
    "while",
    "xor",
    "xor_eq",
];

fn contains(table: &[&str], word: &[u8]) -> bool {
    table
        .binary_search_by(|entry| entry.as_bytes().cmp(word))
        .is_ok()
}

/// Classify a complete identifier; types win over keywords
pub fn lookup(word: &[u8]) -> Option<StyleTag> {
    if contains(TYPES, word) {
        Some(StyleTag::Type)
    } else if contains(KEYWORDS, word) {
        Some(StyleTag::Keyword)
    } else {
        None
    }
}
