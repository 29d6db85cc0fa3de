//! A deliberately small inline markup language for abstracts.
//!
//! Supported:
//!
//! - `**strong**` and `__strong__`
//! - `*emphasis*` and `_emphasis_`
//! - the raw tags `<strong>`/`<b>` and `<em>`/`<i>`, when opened and closed
//!
//! Everything else is text, and text is always escaped when rendered.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{Markup, escape};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline<'a> {
    Text(&'a str),
    Strong(Vec<Inline<'a>>),
    Emphasis(Vec<Inline<'a>>),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Strong,
    Emphasis,
}

static OPEN_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^<(strong|b|em|i)>").unwrap());
static STRONG_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?(?:strong|b)>").unwrap());
static EMPHASIS_TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"</?(?:em|i)>").unwrap());

/// Parse `src` and render it straight to markup.
pub fn format(src: &str) -> Markup {
    render(&parse(src))
}

/// Parse `src` into a tree of text, strong and emphasis spans.
pub fn parse(src: &str) -> Vec<Inline<'_>> {
    let bytes = src.as_bytes();
    let mut out = Vec::new();
    let mut text_start = 0;
    let mut i = 0;

    while i < bytes.len() {
        // A marker directly after a finished span doesn't count as adjacent.
        let after_span = i == text_start;
        match span_at(src, i, after_span) {
            Some((node, end)) => {
                push_text(&mut out, &src[text_start..i]);
                out.push(node);
                i = end;
                text_start = end;
            }
            None => i += 1,
        }
    }
    push_text(&mut out, &src[text_start..]);
    out
}

pub fn render(nodes: &[Inline<'_>]) -> Markup {
    let mut out = String::new();
    write_nodes(&mut out, nodes);
    Markup(out)
}

fn write_nodes(out: &mut String, nodes: &[Inline<'_>]) {
    for node in nodes {
        match node {
            Inline::Text(text) => out.push_str(&escape(text)),
            Inline::Strong(children) => {
                out.push_str("<strong>");
                write_nodes(out, children);
                out.push_str("</strong>");
            }
            Inline::Emphasis(children) => {
                out.push_str("<em>");
                write_nodes(out, children);
                out.push_str("</em>");
            }
        }
    }
}

fn push_text<'a>(out: &mut Vec<Inline<'a>>, text: &'a str) {
    if !text.is_empty() {
        out.push(Inline::Text(text));
    }
}

/// Try to read a span starting at byte `i`, returning it with the byte offset
/// just past its end.
fn span_at(src: &str, i: usize, after_span: bool) -> Option<(Inline<'_>, usize)> {
    let bytes = src.as_bytes();
    // Only ASCII bytes start a span, so `i` is a char boundary whenever we slice.
    match bytes[i] {
        b'<' => tag_span(&src[i..]).map(|(node, len)| (node, i + len)),
        m @ (b'*' | b'_') => {
            let prev_is_marker = !after_span && bytes[i - 1] == m;
            marker_span(&src[i..], m, prev_is_marker).map(|(node, len)| (node, i + len))
        }
        _ => None,
    }
}

/// `<b>...</b>`, `<em>...</i>` and friends. The span ends at the closing tag
/// that balances the opening one, so same-style tags nest; an unclosed tag is
/// plain text.
fn tag_span(rest: &str) -> Option<(Inline<'_>, usize)> {
    let open = OPEN_TAG_RE.captures(rest)?;
    let open_len = open.get(0)?.end();
    let style = match open.get(1)?.as_str() {
        "strong" | "b" => Style::Strong,
        _ => Style::Emphasis,
    };
    let tag_re = match style {
        Style::Strong => &STRONG_TAG_RE,
        Style::Emphasis => &EMPHASIS_TAG_RE,
    };
    let body = &rest[open_len..];
    let mut depth = 1usize;
    for tag in tag_re.find_iter(body) {
        if tag.as_str().starts_with("</") {
            depth -= 1;
            if depth == 0 {
                let node = styled(style, parse(&body[..tag.start()]));
                return Some((node, open_len + tag.end()));
            }
        } else {
            depth += 1;
        }
    }
    None
}

/// Double (`**`, `__`) or single (`*`, `_`) marker spans.
///
/// Double markers win over single ones. A single marker touching another
/// marker of the same kind never opens or closes a span. Content is at least
/// one character, stays on one line, and ends at the nearest closing marker.
fn marker_span(rest: &str, marker: u8, prev_is_marker: bool) -> Option<(Inline<'_>, usize)> {
    let bytes = rest.as_bytes();
    if bytes.get(1) == Some(&marker) {
        let body = &rest[2..];
        let close = find_close(body, |b, j| b.get(j) == Some(&marker) && b.get(j + 1) == Some(&marker))?;
        let node = styled(Style::Strong, parse(&body[..close]));
        return Some((node, 2 + close + 2));
    }
    if prev_is_marker {
        return None;
    }
    let body = &rest[1..];
    let close = find_close(body, |b, j| {
        b.get(j) == Some(&marker) && b[j - 1] != marker && b.get(j + 1) != Some(&marker)
    })?;
    let node = styled(Style::Emphasis, parse(&body[..close]));
    Some((node, 1 + close + 1))
}

/// Byte offset of the first closing marker in `body` after at least one
/// character of content, without crossing a line break.
fn find_close(body: &str, is_close: impl Fn(&[u8], usize) -> bool) -> Option<usize> {
    let bytes = body.as_bytes();
    for (j, c) in body.char_indices() {
        if j > 0 && is_close(bytes, j) {
            return Some(j);
        }
        if c == '\n' {
            return None;
        }
    }
    None
}

fn styled(style: Style, children: Vec<Inline<'_>>) -> Inline<'_> {
    match style {
        Style::Strong => Inline::Strong(children),
        Style::Emphasis => Inline::Emphasis(children),
    }
}
