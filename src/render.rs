use askama::Template;

use crate::{
    markup::{self, Markup, inline},
    record::Record,
};

const ICON_STATUS: &str = r#"<svg class="i" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true"><path d="M12 20l9-5-9-5-9 5 9 5z"/><path d="M12 12l9-5-9-5-9 5 9 5z"/></svg>"#;
const ICON_YEAR: &str = r#"<svg class="i" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true"><circle cx="12" cy="12" r="10"/><path d="M12 6v6l4 2"/></svg>"#;

/// An outbound link in the title row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link<'a> {
    pub label: &'a str,
    pub href: &'a str,
    /// Emit `itemprop="url"`; only the paper link carries it.
    pub primary: bool,
}

/// A metadata pill under the title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Badge<'a> {
    pub kind: &'static str,
    pub icon: Option<&'static str>,
    pub text: &'a str,
}

/// One entry of the media coverage list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MediaItem<'a> {
    pub label: &'a str,
    pub url: Option<&'a str>,
}

#[derive(Template)]
#[template(path = "paper.html")]
struct PaperTemplate<'a> {
    title: &'a str,
    links: Vec<Link<'a>>,
    cite: Option<Markup>,
    media: Vec<MediaItem<'a>>,
    badges: Vec<Badge<'a>>,
    authors: String,
    comment: Option<&'a str>,
    abstract_: Option<Markup>,
}

/// Render a single publication as an `<article>` fragment.
pub fn paper(record: &Record) -> askama::Result<Markup> {
    let template = PaperTemplate {
        title: &record.title,
        links: links(record),
        cite: non_empty(&record.bibtex).map(markup::citation),
        media: parse_media(&record.media),
        badges: badges(record),
        authors: authorship(&record.authors),
        comment: non_empty(&record.comment),
        abstract_: abstract_body(&record.abstract_),
    };
    template.render().map(Markup::from_rendered)
}

fn non_empty(s: &str) -> Option<&str> {
    let s = s.trim();
    if s.is_empty() { None } else { Some(s) }
}

/// Paper, slides and DOI links, in that order, for whichever URLs are set.
pub fn links(record: &Record) -> Vec<Link<'_>> {
    let mut out = Vec::new();
    if let Some(href) = non_empty(&record.paper_url) {
        out.push(Link {
            label: non_empty(&record.paper_label).unwrap_or("Paper"),
            href,
            primary: true,
        });
    }
    if let Some(href) = non_empty(&record.slides_url) {
        out.push(Link {
            label: "Slides",
            href,
            primary: false,
        });
    }
    if let Some(href) = non_empty(&record.doi_url) {
        out.push(Link {
            label: "DOI",
            href,
            primary: false,
        });
    }
    out
}

pub fn badges(record: &Record) -> Vec<Badge<'_>> {
    [
        ("Status", Some(ICON_STATUS), record.status.as_str()),
        ("Year", Some(ICON_YEAR), record.year.as_str()),
        ("Venue", None, record.venue.as_str()),
    ]
    .into_iter()
    .filter_map(|(kind, icon, text)| non_empty(text).map(|text| Badge { kind, icon, text }))
    .collect()
}

/// `solo` for single-author work, `with <co-authors>` otherwise.
pub fn authorship(authors: &str) -> String {
    let authors = authors.trim();
    if authors.is_empty() || authors.eq_ignore_ascii_case("solo") {
        "solo".to_string()
    } else {
        format!("with {authors}")
    }
}

/// Split a `label|url;label|url` list. The url is optional; entries with no
/// label are dropped.
pub fn parse_media(raw: &str) -> Vec<MediaItem<'_>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Vec::new();
    }
    raw.split(';')
        .filter_map(|item| {
            let (label, url) = item.split_once('|').unwrap_or((item, ""));
            let label = label.trim();
            if label.is_empty() {
                return None;
            }
            Some(MediaItem {
                label,
                url: non_empty(url),
            })
        })
        .collect()
}

fn abstract_body(raw: &str) -> Option<Markup> {
    let text = raw.replace("\r\n", "\n");
    let text = text.trim();
    if text.is_empty() {
        None
    } else {
        Some(inline::format(text))
    }
}
