//! Timeline pages: `laporan` (activity reports) and `informasi-letusan`
//! (eruption notices).
//!
//! Both pages are a flat run of `.timeline-item` nodes where a
//! `.timeline-day` item opens a new day and every other item belongs to the
//! most recently opened one.

use scraper::{ElementRef, Html};
use tracing::debug;

use crate::dom::{self, Child};
use crate::error::ParseResult;
use crate::normalize::collapse_whitespace;
use crate::types::{
    ActivityReportEntry, EruptionInfoEntry, TimelineDay, TimelineEntry, TimelineKind,
};

/// Group timeline items into days.
///
/// A page without a `.timeline-group` yields an empty list. Items seen before
/// the first day marker have no day to attach to and are dropped.
pub fn extract_timeline(doc: &Html, kind: TimelineKind) -> ParseResult<Vec<TimelineDay>> {
    let Some(group) = dom::first(doc.root_element(), ".timeline-group")? else {
        return Ok(Vec::new());
    };

    let mut days = Vec::new();
    let mut current: Option<TimelineDay> = None;

    for item in dom::all(group, ".timeline-item")? {
        if dom::has_class(item, "timeline-day") {
            if let Some(day) = current.take() {
                days.push(day);
            }
            current = Some(TimelineDay::new(day_label(item)?));
        } else if let Some(day) = current.as_mut() {
            day.children.push(parse_entry(item, kind)?);
        } else {
            debug!("timeline item before first day marker, skipping");
        }
    }

    days.extend(current);
    Ok(days)
}

fn day_label(item: ElementRef<'_>) -> ParseResult<String> {
    Ok(dom::text_of(item, ".timeline-date")?.unwrap_or_else(|| dom::text(item)))
}

fn parse_entry(item: ElementRef<'_>, kind: TimelineKind) -> ParseResult<TimelineEntry> {
    match kind {
        TimelineKind::ActivityReport => activity_report(item).map(TimelineEntry::ActivityReport),
        TimelineKind::EruptionInfo => eruption_info(item).map(TimelineEntry::EruptionInfo),
    }
}

fn activity_report(item: ElementRef<'_>) -> ParseResult<ActivityReportEntry> {
    let time = dom::text(dom::require(item, ".timeline-time", "timeline time")?);
    let title = first_text(dom::require(item, ".timeline-title", "timeline title")?);

    let (author, date) = match dom::first(item, ".timeline-author")? {
        Some(byline) => byline_author_and_date(byline),
        None => (None, None),
    };

    let body = dom::first(item, ".col-xs-12.col-md-12")?;
    let text = match body {
        Some(body) => dom::text_of(body, "p")?,
        None => None,
    };
    let url = match body {
        Some(body) => dom::first(body, "a[href]")?.and_then(|a| dom::attr(a, "href")),
        None => None,
    };

    Ok(ActivityReportEntry {
        time,
        title,
        author,
        date,
        status: dom::text_of(item, ".badge")?,
        text,
        url,
    })
}

fn eruption_info(item: ElementRef<'_>) -> ParseResult<EruptionInfoEntry> {
    let time = dom::text(dom::require(item, ".timeline-time", "timeline time")?);
    let title = dom::text(dom::require(item, ".timeline-title", "timeline title")?);

    let author = dom::first(item, ".timeline-author")?.and_then(last_text);
    let text = dom::text_of(item, ".timeline-text")?.map(|t| collapse_whitespace(&t));
    let image = dom::first(item, ".img-fluid")?.and_then(|img| dom::attr(img, "src"));

    // The second `.row.mg-b-15` holds the "read more" link.
    let url = match dom::all(item, ".row.mg-b-15")?.get(1) {
        Some(row) => dom::first(*row, "a[href]")?.and_then(|a| dom::attr(a, "href")),
        None => None,
    };

    Ok(EruptionInfoEntry {
        time,
        title,
        author,
        text,
        image,
        url,
    })
}

/// `<span>Dibuat oleh</span> <a>Author</a> <span>Date</span>`
fn byline_author_and_date(byline: ElementRef<'_>) -> (Option<String>, Option<String>) {
    let elements = dom::element_children(byline);
    let author = elements
        .iter()
        .find(|el| dom::tag_name(**el) == "a")
        .or(elements.first())
        .map(|el| dom::text(*el));
    let date = match elements.as_slice() {
        [_, .., last] => Some(dom::text(*last)),
        _ => None,
    };
    (author, date)
}

/// Text of the first non-blank child node.
fn first_text(el: ElementRef<'_>) -> String {
    dom::children(el)
        .iter()
        .find(|c| !c.is_blank())
        .map(Child::text)
        .unwrap_or_default()
}

fn last_text(el: ElementRef<'_>) -> Option<String> {
    dom::children(el)
        .iter()
        .rev()
        .find(|c| !c.is_blank())
        .map(Child::text)
}
