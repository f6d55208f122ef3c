//! Terminal rendering of styled text

use std::io::Write;

use crossterm::queue;
use crossterm::style::{
    Attribute, Color as TermColor, Print, ResetColor, SetAttribute, SetBackgroundColor,
    SetForegroundColor,
};
use unicode_width::UnicodeWidthChar;

use crate::error::{RestyleError, Result};
use crate::syntax::{Color, Style, StyleTable, StyleTag};

/// How to lay out rendered text
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Prefix each line with its number
    pub line_numbers: bool,
    /// Cut lines off after this many display columns
    pub max_width: Option<usize>,
    /// Emit colors and attributes
    pub color: bool,
}

fn term_color(color: Color) -> TermColor {
    match color {
        Color::Default => TermColor::Reset,
        Color::Black => TermColor::Black,
        Color::Red => TermColor::DarkRed,
        Color::Green => TermColor::DarkGreen,
        Color::Yellow => TermColor::DarkYellow,
        Color::Blue => TermColor::DarkBlue,
        Color::Magenta => TermColor::DarkMagenta,
        Color::Cyan => TermColor::DarkCyan,
        Color::White => TermColor::Grey,
        Color::BrightBlack => TermColor::DarkGrey,
        Color::BrightRed => TermColor::Red,
        Color::BrightGreen => TermColor::Green,
        Color::BrightYellow => TermColor::Yellow,
        Color::BrightBlue => TermColor::Blue,
        Color::BrightMagenta => TermColor::Magenta,
        Color::BrightCyan => TermColor::Cyan,
        Color::BrightWhite => TermColor::White,
    }
}

fn apply_style(out: &mut impl Write, style: &Style) -> Result<()> {
    if style.fg != Color::Default {
        queue!(out, SetForegroundColor(term_color(style.fg)))?;
    }
    if style.bg != Color::Default {
        queue!(out, SetBackgroundColor(term_color(style.bg)))?;
    }
    if style.bold {
        queue!(out, SetAttribute(Attribute::Bold))?;
    }
    if style.italic {
        queue!(out, SetAttribute(Attribute::Italic))?;
    }
    if style.underline {
        queue!(out, SetAttribute(Attribute::Underlined))?;
    }
    if style.reverse {
        queue!(out, SetAttribute(Attribute::Reverse))?;
    }
    Ok(())
}

fn reset_style(out: &mut impl Write) -> Result<()> {
    queue!(out, SetAttribute(Attribute::Reset), ResetColor)?;
    Ok(())
}

/// Decode one line into characters paired with the tag of their first byte
///
/// Invalid UTF-8 bytes each become U+FFFD.
fn decode_line(bytes: &[u8], tags: &[StyleTag]) -> Vec<(char, StyleTag)> {
    let mut chars = Vec::with_capacity(bytes.len());
    let mut offset = 0;
    for chunk in bytes.utf8_chunks() {
        for (idx, ch) in chunk.valid().char_indices() {
            chars.push((ch, tags[offset + idx]));
        }
        offset += chunk.valid().len();
        for _ in chunk.invalid() {
            chars.push((char::REPLACEMENT_CHARACTER, tags[offset]));
            offset += 1;
        }
    }
    chars
}

fn check_lengths(text: &[u8], tags: &[StyleTag]) -> Result<()> {
    if text.len() != tags.len() {
        return Err(RestyleError::MalformedSpan {
            text_len: text.len(),
            tags_len: tags.len(),
        });
    }
    Ok(())
}

/// Write `text` styled by `tags`
pub fn render(
    out: &mut impl Write,
    text: &[u8],
    tags: &[StyleTag],
    table: &StyleTable,
    options: &RenderOptions,
) -> Result<()> {
    check_lengths(text, tags)?;

    let line_count = text.split_inclusive(|&b| b == b'\n').count();
    let lnum_width = line_count.to_string().len();

    let mut offset = 0;
    for (line_idx, line) in text.split_inclusive(|&b| b == b'\n').enumerate() {
        let line_tags = &tags[offset..offset + line.len()];
        offset += line.len();

        if options.line_numbers {
            let lnum = format!("{:>lnum_width$} ", line_idx + 1);
            if options.color {
                queue!(out, SetAttribute(Attribute::Dim), Print(lnum), SetAttribute(Attribute::Reset))?;
            } else {
                queue!(out, Print(lnum))?;
            }
        }

        let (body, body_tags) = match line.last() {
            Some(b'\n') => (&line[..line.len() - 1], &line_tags[..line.len() - 1]),
            _ => (line, line_tags),
        };
        render_line(out, body, body_tags, table, options)?;

        if line.last() == Some(&b'\n') {
            queue!(out, Print('\n'))?;
        }
    }

    out.flush()?;
    Ok(())
}

/// Write one line without its newline, grouping runs of equal tags
fn render_line(
    out: &mut impl Write,
    bytes: &[u8],
    tags: &[StyleTag],
    table: &StyleTable,
    options: &RenderOptions,
) -> Result<()> {
    let max_width = options.max_width.unwrap_or(usize::MAX);
    let mut width = 0;
    let mut run = String::new();
    let mut run_tag = None;

    for (ch, tag) in decode_line(bytes, tags) {
        let ch_width = ch.width().unwrap_or(1);
        if width + ch_width > max_width {
            break;
        }
        width += ch_width;

        if run_tag != Some(tag) {
            if let Some(prev) = run_tag {
                flush_run(out, &run, prev, table, options)?;
            }
            run.clear();
            run_tag = Some(tag);
        }
        run.push(ch);
    }

    if let Some(tag) = run_tag {
        flush_run(out, &run, tag, table, options)?;
    }
    Ok(())
}

fn flush_run(
    out: &mut impl Write,
    run: &str,
    tag: StyleTag,
    table: &StyleTable,
    options: &RenderOptions,
) -> Result<()> {
    let style = table.get(tag);
    if !options.color || style.is_default() {
        queue!(out, Print(run))?;
        return Ok(());
    }
    apply_style(out, &style)?;
    queue!(out, Print(run))?;
    reset_style(out)
}

/// Write the dump code of every byte, one output line per document line
pub fn dump(out: &mut impl Write, text: &[u8], tags: &[StyleTag]) -> Result<()> {
    check_lengths(text, tags)?;

    let mut offset = 0;
    for line in text.split_inclusive(|&b| b == b'\n') {
        let codes: String = tags[offset..offset + line.len()]
            .iter()
            .map(|tag| tag.code())
            .collect();
        offset += line.len();
        writeln!(out, "{codes}")?;
    }
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::{classify, LexState};

    fn plain_options() -> RenderOptions {
        RenderOptions {
            color: false,
            ..Default::default()
        }
    }

    fn render_to_string(text: &str, options: &RenderOptions) -> String {
        let tags = classify(text.as_bytes(), LexState::Plain).tags;
        let mut out = Vec::new();
        render(&mut out, text.as_bytes(), &tags, &StyleTable::default(), options).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_render_plain_roundtrips_text() {
        let text = "int main() {\n    return 0; // done\n}\n";
        assert_eq!(render_to_string(text, &plain_options()), text);
    }

    #[test]
    fn test_render_line_numbers() {
        let options = RenderOptions {
            line_numbers: true,
            ..plain_options()
        };
        assert_eq!(render_to_string("a\nb", &options), "1 a\n2 b");
    }

    #[test]
    fn test_render_max_width() {
        let options = RenderOptions {
            max_width: Some(3),
            ..plain_options()
        };
        assert_eq!(render_to_string("abcdef\nxy\n", &options), "abc\nxy\n");
        // wide characters count double
        assert_eq!(render_to_string("日本語\n", &options), "日\n");
    }

    #[test]
    fn test_render_color_emits_escapes() {
        let options = RenderOptions {
            color: true,
            ..Default::default()
        };
        let out = render_to_string("return x;\n", &options);
        assert!(out.contains("return"));
        assert!(out.contains('\u{1b}'));
        assert!(out.ends_with("x;\n"));
    }

    #[test]
    fn test_render_invalid_utf8() {
        let text = [b'a', 0xff, b'\n'];
        let tags = vec![StyleTag::Plain; 3];
        let mut out = Vec::new();
        render(&mut out, &text, &tags, &StyleTable::default(), &plain_options()).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "a\u{fffd}\n");
    }

    #[test]
    fn test_render_rejects_mismatched_tags() {
        let mut out = Vec::new();
        let err = render(&mut out, b"ab", &[StyleTag::Plain], &StyleTable::default(), &plain_options());
        assert!(matches!(err, Err(RestyleError::MalformedSpan { .. })));
    }

    #[test]
    fn test_dump() {
        let text = "#x\nif\n";
        let tags = classify(text.as_bytes(), LexState::Plain).tags;
        let mut out = Vec::new();
        dump(&mut out, text.as_bytes(), &tags).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "EEE\nGGA\n");
    }
}
