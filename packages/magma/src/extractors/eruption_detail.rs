//! Eruption notice page (`data-laporan-letusan`).

use lazy_static::lazy_static;
use regex::Regex;
use scraper::Html;

use crate::dom;
use crate::error::{ParseError, ParseResult};
use crate::types::EruptionDetailReport;

lazy_static! {
    static ref MOUNTAIN_PREFIX: Regex = Regex::new(r"^Gunung Api\s*").unwrap();
}

const ARTICLE: &str = ".col-md-7.col-lg-6.col-xl-7";

pub fn extract_eruption_detail(doc: &Html) -> ParseResult<EruptionDetailReport> {
    let main = dom::require(doc.root_element(), ".card-blog", "notice card")?;
    let content = dom::require(main, ".card-body", "notice body")?;
    let article = dom::require(main, ARTICLE, "notice article")?;

    // Some notices have no cover image.
    let image = dom::first(content, ".img-fit-cover")?
        .and_then(|img| dom::attr(img, "src"))
        .unwrap_or_default();

    let date = dom::text(dom::require(article, ".blog-category.tx-danger", "notice date")?);
    let title = dom::text(dom::require(article, ".blog-title", "notice title")?);
    let title = MOUNTAIN_PREFIX.replace(&title, "").trim().to_string();

    // "Dibuat oleh, <author>"
    let byline = dom::text(dom::require(article, ".card-subtitle.tx-normal", "notice author")?);
    let author = byline
        .split_once(", ")
        .map(|(_, author)| author.trim().to_string())
        .ok_or_else(|| ParseError::MissingNode {
            context: "notice author name",
            selector: ".card-subtitle.tx-normal".to_string(),
        })?;

    let description = dom::all(article, "p")?
        .get(2)
        .map(|p| dom::text(*p))
        .ok_or_else(|| ParseError::MissingNode {
            context: "notice description",
            selector: "p:nth(2)".to_string(),
        })?;

    let recommendations = dom::children(dom::require(article, ".blog-text", "notice recommendations")?)
        .iter()
        .filter(|c| !c.is_blank())
        .map(|c| c.text())
        .collect();

    Ok(EruptionDetailReport {
        image,
        date,
        title,
        author,
        description,
        recommendations,
        location: None,
    })
}
