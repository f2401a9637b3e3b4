//! Daily report table (`laporan-harian`).
//!
//! Columns are whatever the header row says they are. Each body row becomes
//! an ordered map from normalized header to cell value.

use scraper::{ElementRef, Html};

use crate::dom::{self, Child};
use crate::error::ParseResult;
use crate::normalize::{header_key, strip_ordinals};
use crate::types::{CellValue, DailyReportRow};

pub fn extract_daily_reports(doc: &Html) -> ParseResult<Vec<DailyReportRow>> {
    let root = doc.root_element();
    let thead = dom::require(root, "thead", "daily report header")?;
    let tbody = dom::require(root, "tbody", "daily report body")?;

    let headers: Vec<String> = dom::all(thead, "th")?
        .into_iter()
        .map(|th| header_key(&dom::text(th)))
        .collect();

    dom::all(tbody, "tr")?
        .into_iter()
        .map(|row| -> ParseResult<DailyReportRow> {
            // Extra or missing cells: zip keeps the shorter side.
            let cells = dom::all(row, "td")?;
            let mut record = DailyReportRow::new();
            for (key, cell) in headers.iter().zip(cells) {
                record.insert(key.clone(), cell_value(cell)?);
            }
            Ok(record)
        })
        .collect()
}

fn cell_value(cell: ElementRef<'_>) -> ParseResult<CellValue> {
    let mut parts = Vec::new();
    collect_parts(cell, &mut parts)?;
    Ok(CellValue::from_parts(parts))
}

/// Text runs and list items in document order. Wrappers holding a list are
/// walked so their other text stays alongside the flattened items.
fn collect_parts(el: ElementRef<'_>, parts: &mut Vec<String>) -> ParseResult<()> {
    for child in dom::children(el) {
        if child.is_blank() {
            continue;
        }
        match child {
            Child::Element(inner) if is_list(inner) => parts.extend(list_items(inner)?),
            Child::Element(inner) if dom::first(inner, "ol, ul")?.is_some() => {
                collect_parts(inner, parts)?
            }
            _ => parts.push(child.text()),
        }
    }
    Ok(())
}

fn is_list(el: ElementRef<'_>) -> bool {
    matches!(dom::tag_name(el), "ol" | "ul")
}

fn list_items(list: ElementRef<'_>) -> ParseResult<Vec<String>> {
    Ok(dom::all(list, "li")?
        .into_iter()
        .map(|li| strip_ordinals(&dom::text(li)).trim().to_string())
        .filter(|item| !item.is_empty())
        .collect())
}
