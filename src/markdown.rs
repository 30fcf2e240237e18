//! Inline Markdown to ANSI conversion.
//!
//! Converts a markdown-flavored string into plain text interleaved with SGR
//! escape sequences: `**strong**` and `` `code` `` become bold, `*emphasis*`
//! italic, `~~text~~` crossed-out, and `[text](url)` a bold label followed by
//! the underlined raw URL. Everything else passes through as literal text.
//!
//! Nested spans are tracked on an explicit style stack: closing an inner
//! span emits a reset and then re-opens every still-active enclosing
//! sequence, so `~~a **b** c~~` keeps the strikethrough alive across `c`.
//!
//! Conversion is total. Malformed markup never fails, it simply parses as
//! literal text, so the output degrades to the input instead of erroring.

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

use crate::style::RESET;

const BOLD: &str = "\x1b[1m";
const ITALIC: &str = "\x1b[3m";
const UNDERLINE: &str = "\x1b[4m";
const CROSSED_OUT: &str = "\x1b[9m";

/// Tracks the currently open escape sequences during the event walk.
#[derive(Default)]
struct StyleStack(Vec<&'static str>);

impl StyleStack {
    fn open(&mut self, out: &mut String, seq: &'static str) {
        self.0.push(seq);
        out.push_str(seq);
    }

    /// Close the innermost span: reset, then re-open what remains.
    fn close(&mut self, out: &mut String) {
        self.0.pop();
        out.push_str(RESET);
        self.reopen(out);
    }

    fn reopen(&self, out: &mut String) {
        for seq in &self.0 {
            out.push_str(seq);
        }
    }
}

/// Render a markdown-flavored string to text with embedded ANSI escapes.
///
/// Already-converted output contains no markdown syntax, so conversion is
/// idempotent and cells can be re-measured safely.
#[must_use]
pub fn render_markdown(source: &str) -> String {
    let parser = Parser::new_ext(source, Options::ENABLE_STRIKETHROUGH);

    let mut out = String::with_capacity(source.len());
    let mut stack = StyleStack::default();
    // Destination URLs of links currently open, innermost last.
    let mut links: Vec<String> = Vec::new();

    for event in parser {
        match event {
            Event::Start(tag) => match tag {
                Tag::Strong => stack.open(&mut out, BOLD),
                Tag::Emphasis => stack.open(&mut out, ITALIC),
                Tag::Strikethrough => stack.open(&mut out, CROSSED_OUT),
                Tag::Link { dest_url, .. } => {
                    links.push(dest_url.into_string());
                    stack.open(&mut out, BOLD);
                }
                Tag::Paragraph | Tag::Heading { .. } | Tag::Item | Tag::CodeBlock(_) => {
                    if !out.is_empty() {
                        out.push('\n');
                    }
                }
                _ => {}
            },
            Event::End(tag) => match tag {
                TagEnd::Strong | TagEnd::Emphasis | TagEnd::Strikethrough => {
                    stack.close(&mut out);
                }
                TagEnd::Link => {
                    stack.close(&mut out);
                    if let Some(url) = links.pop() {
                        out.push(' ');
                        out.push_str(UNDERLINE);
                        out.push_str(&url);
                        out.push_str(RESET);
                        stack.reopen(&mut out);
                    }
                }
                _ => {}
            },
            // Plain text is copied through verbatim, including any ANSI
            // escapes the caller embedded directly in the source.
            Event::Text(text) => out.push_str(&text),
            // Inline code gets the same visual treatment as strong emphasis.
            Event::Code(code) => {
                out.push_str(BOLD);
                out.push_str(&code);
                out.push_str(RESET);
                stack.reopen(&mut out);
            }
            Event::Html(html) | Event::InlineHtml(html) => out.push_str(&html),
            Event::SoftBreak | Event::HardBreak => out.push('\n'),
            _ => {}
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bold() {
        assert_eq!(render_markdown("**bold**"), "\x1b[1mbold\x1b[0m");
    }

    #[test]
    fn test_italic() {
        assert_eq!(render_markdown("*italic*"), "\x1b[3mitalic\x1b[0m");
        assert_eq!(render_markdown("_italic_"), "\x1b[3mitalic\x1b[0m");
    }

    #[test]
    fn test_strikethrough() {
        assert_eq!(render_markdown("~~strike~~"), "\x1b[9mstrike\x1b[0m");
    }

    #[test]
    fn test_inline_code_renders_bold() {
        assert_eq!(render_markdown("`inline code`"), "\x1b[1minline code\x1b[0m");
    }

    #[test]
    fn test_link() {
        assert_eq!(
            render_markdown("[link](http://example.com)"),
            "\x1b[1mlink\x1b[0m \x1b[4mhttp://example.com\x1b[0m"
        );
    }

    #[test]
    fn test_nested_emphasis_restores_outer_style() {
        assert_eq!(
            render_markdown("This is ~~italic and **bold** text~~"),
            "This is \x1b[9mitalic and \x1b[1mbold\x1b[0m\x1b[9m text\x1b[0m"
        );
    }

    #[test]
    fn test_nested_bold_in_strikethrough() {
        assert_eq!(
            render_markdown("~~**Bold and Strikethrough**~~"),
            "\x1b[9m\x1b[1mBold and Strikethrough\x1b[0m\x1b[9m\x1b[0m"
        );
    }

    #[test]
    fn test_plain_text_unchanged() {
        assert_eq!(render_markdown("Hello World"), "Hello World");
        assert_eq!(render_markdown("Row1Col1"), "Row1Col1");
        assert_eq!(render_markdown(""), "");
    }

    #[test]
    fn test_unmatched_markup_stays_literal() {
        assert_eq!(render_markdown("2 * 3"), "2 * 3");
    }

    #[test]
    fn test_soft_break_becomes_newline() {
        assert_eq!(render_markdown("one\ntwo"), "one\ntwo");
    }

    #[test]
    fn test_paragraphs_separated_by_newline() {
        assert_eq!(render_markdown("one\n\ntwo"), "one\ntwo");
    }

    #[test]
    fn test_embedded_ansi_passes_through() {
        let src = "\x1b[42mgreen\x1b[0m";
        assert_eq!(render_markdown(src), src);
    }

    #[test]
    fn test_idempotent() {
        let once = render_markdown("some **bold** and ~~struck~~ text");
        assert_eq!(render_markdown(&once), once);
    }
}
