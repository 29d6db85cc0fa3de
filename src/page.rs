use std::{fs, path::Path};

use anyhow::Context;
use askama::Template;
use tracing::{debug, info};

use crate::{
    config::Site,
    markup::Markup,
    record::{Buckets, Section},
    render,
};

/// One publication section: heading, toggle and the list of papers.
///
/// Rendered even when `papers` is empty so the page layout and the sub-nav
/// anchors stay stable.
#[derive(Template)]
#[template(path = "section.html")]
pub struct SectionTemplate<'a> {
    pub section: Section,
    pub papers: &'a [Markup],
}

/// The whole page, with one named slot per section.
#[derive(Template)]
#[template(path = "publications.html")]
pub struct PageTemplate<'a> {
    pub site: &'a Site,
    pub journal: Markup,
    pub conference: Markup,
    pub working: Markup,
    pub other: Markup,
}

/// The assembled page and how many papers went into it.
#[derive(Debug)]
pub struct Document {
    pub html: Markup,
    pub items: usize,
}

/// Render every record and assemble the page.
pub fn assemble(buckets: &Buckets, site: &Site) -> anyhow::Result<Document> {
    let section = |section: Section| -> anyhow::Result<Markup> {
        let papers = buckets
            .get(section)
            .iter()
            .map(render::paper)
            .collect::<Result<Vec<_>, _>>()
            .with_context(|| format!("failed to render {} section", section.anchor()))?;
        debug!(section = section.anchor(), papers = papers.len(), "rendered section");
        let html = SectionTemplate {
            section,
            papers: &papers,
        }
        .render()?;
        Ok(Markup::from_rendered(html))
    };

    let page = PageTemplate {
        site,
        journal: section(Section::Journal)?,
        conference: section(Section::Conference)?,
        working: section(Section::Working)?,
        other: section(Section::Other)?,
    };
    let html = page.render().context("failed to render page")?;
    Ok(Document {
        html: Markup::from_rendered(html),
        items: buckets.len(),
    })
}

/// Replace whatever is at `path` with the document, creating parent
/// directories as needed.
pub fn write(document: &Document, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    fs::write(path, document.html.as_str())
        .with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), bytes = document.html.as_str().len(), "wrote page");
    Ok(())
}
