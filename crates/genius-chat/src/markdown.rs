//! Markdown to HTML for chat message content.
//!
//! Code blocks are wrapped in a scrollable container and inline code gets its
//! own class, so generated code stands out from prose. Raw HTML in the source
//! is escaped and shown as text.

use pulldown_cmark::{html, CodeBlockKind, Event, Options, Parser, Tag, TagEnd};

/// Class of the `<div>` wrapping every code block.
pub const CODE_BLOCK_CLASS: &str = "code-block";
/// Class of inline `<code>` spans.
pub const INLINE_CODE_CLASS: &str = "inline-code";

/// Renders message `content` to an HTML fragment.
///
/// Empty or whitespace-only content renders to an empty string.
pub fn render_markdown(content: &str) -> String {
    if content.trim().is_empty() {
        return String::new();
    }

    let options = Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH;
    let events = Parser::new_ext(content, options).flat_map(rewrite_event);

    let mut out = String::with_capacity(content.len() * 3 / 2);
    html::push_html(&mut out, events);
    out
}

fn rewrite_event(event: Event<'_>) -> Vec<Event<'_>> {
    match event {
        Event::Start(Tag::CodeBlock(kind)) => {
            let open = match language(&kind) {
                Some(lang) => format!(
                    "<div class=\"{CODE_BLOCK_CLASS}\"><pre><code class=\"language-{lang}\">"
                ),
                None => format!("<div class=\"{CODE_BLOCK_CLASS}\"><pre><code>"),
            };
            vec![Event::Html(open.into())]
        }
        Event::End(TagEnd::CodeBlock) => vec![Event::Html("</code></pre></div>\n".into())],
        Event::Code(code) => vec![
            Event::InlineHtml(format!("<code class=\"{INLINE_CODE_CLASS}\">").into()),
            Event::Text(code),
            Event::InlineHtml("</code>".into()),
        ],
        Event::Html(raw) | Event::InlineHtml(raw) => vec![Event::Text(raw)],
        other => vec![other],
    }
}

/// First word of a fenced block's info string, restricted to characters that
/// are safe inside a class attribute.
fn language(kind: &CodeBlockKind<'_>) -> Option<String> {
    let CodeBlockKind::Fenced(info) = kind else {
        return None;
    };
    let word = info.split_whitespace().next()?;
    let lang: String = word
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+' | '#'))
        .collect();
    (!lang.is_empty()).then_some(lang)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_content_renders_nothing() {
        assert_eq!(render_markdown(""), "");
        assert_eq!(render_markdown("  \n "), "");
    }

    #[test]
    fn fenced_code_is_wrapped_in_container() {
        let html = render_markdown("Here:\n\n```rust\nfn main() {}\n```\n");
        assert!(html.contains("<p>Here:</p>"), "{html}");
        assert!(
            html.contains(
                "<div class=\"code-block\"><pre><code class=\"language-rust\">fn main() {}\n</code></pre></div>"
            ),
            "{html}"
        );
    }

    #[test]
    fn fence_without_language_has_no_language_class() {
        let html = render_markdown("```\nls -la\n```");
        assert!(
            html.contains("<div class=\"code-block\"><pre><code>ls -la\n</code></pre></div>"),
            "{html}"
        );
    }

    #[test]
    fn indented_code_is_wrapped_too() {
        let html = render_markdown("text\n\n    let x = 1;\n");
        assert!(html.contains("<div class=\"code-block\"><pre><code>let x = 1;"), "{html}");
    }

    #[test]
    fn inline_code_gets_inline_class() {
        let html = render_markdown("Use `Vec::new()` here");
        assert_eq!(
            html,
            "<p>Use <code class=\"inline-code\">Vec::new()</code> here</p>\n"
        );
    }

    #[test]
    fn code_contents_are_escaped() {
        let html = render_markdown("`a < b && c`");
        assert!(html.contains("a &lt; b &amp;&amp; c"), "{html}");
    }

    #[test]
    fn raw_html_is_shown_as_text() {
        let html = render_markdown("<script>alert(1)</script>\n\nhi <b>there</b>");
        assert!(!html.contains("<script>"), "{html}");
        assert!(!html.contains("<b>"), "{html}");
        assert!(html.contains("&lt;script&gt;"), "{html}");
    }

    #[test]
    fn language_is_sanitized() {
        let html = render_markdown("```c++\" onclick=\"x\nint a;\n```");
        assert!(html.contains("class=\"language-c++\""), "{html}");
        assert!(!html.contains("onclick"), "{html}");
    }

    #[test]
    fn headings_and_emphasis_render() {
        let html = render_markdown("# Title\n\nSome *emphasis* and **bold**.");
        assert!(html.contains("<h1>Title</h1>"), "{html}");
        assert!(html.contains("<em>emphasis</em>"), "{html}");
        assert!(html.contains("<strong>bold</strong>"), "{html}");
    }
}
