//! Extracts the latest patch entry from patch-notes HTML.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use crate::core::models::{ANCHOR_UNKNOWN, DATE_UNKNOWN, PatchRecord, TITLE_UNKNOWN};

fn selector(css: &str) -> Selector {
    Selector::parse(css).expect("static selector compile")
}

static LIVE_CONTAINER: Lazy<Selector> = Lazy::new(|| selector("div.PatchNotes-live"));
static PATCH_CONTAINER: Lazy<Selector> = Lazy::new(|| selector("div.PatchNotes-patch"));
static DATE: Lazy<Selector> = Lazy::new(|| selector("div.PatchNotes-date"));
static TITLE: Lazy<Selector> = Lazy::new(|| selector("h3.PatchNotes-patchTitle"));
static ANCHOR: Lazy<Selector> = Lazy::new(|| selector("div.anchor"));

/// Parses `html` and returns the first live patch entry, falling back to the
/// first regular patch entry. Returns `None` when the page has neither.
///
/// `source_url` is the page the HTML came from; the record's `url` deep-links
/// to the entry when an anchor id is present.
#[must_use]
pub fn extract_latest_patch(html: &str, source_url: &str) -> Option<PatchRecord> {
    let document = Html::parse_document(html);
    let container = document
        .select(&LIVE_CONTAINER)
        .next()
        .or_else(|| document.select(&PATCH_CONTAINER).next())?;

    Some(record_from_container(container, source_url))
}

fn record_from_container(container: ElementRef<'_>, source_url: &str) -> PatchRecord {
    let date = first_text(container, &DATE).unwrap_or_else(|| DATE_UNKNOWN.to_string());
    let title = first_text(container, &TITLE).unwrap_or_else(|| TITLE_UNKNOWN.to_string());
    let anchor = container
        .select(&ANCHOR)
        .next()
        .and_then(|el| el.value().attr("id"))
        .filter(|id| !id.is_empty());

    let (anchor_id, url) = match anchor {
        Some(id) => (id.to_string(), format!("{source_url}#{id}")),
        None => (ANCHOR_UNKNOWN.to_string(), source_url.to_string()),
    };

    PatchRecord {
        date,
        title,
        anchor_id,
        url,
    }
}

fn first_text(container: ElementRef<'_>, selector: &Selector) -> Option<String> {
    container
        .select(selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
}
