//! Mountain activity report page (`data-laporan-aktivitas`).
//!
//! The header card carries the level badge and a `"<name>, <date>, <time>"`
//! title. The narrative lives in an unlabeled `.card-columns` group whose
//! cards are identified only by position.

use lazy_static::lazy_static;
use regex::Regex;
use scraper::{ElementRef, Html};

use crate::dom;
use crate::error::{ParseError, ParseResult};
use crate::normalize::paragraphs;
use crate::types::{DetailBody, DetailMode, MountainDetailReport};

lazy_static! {
    static ref TITLE: Regex = Regex::new(r"^(.+?),\s+(.+?),\s+(.+)$").unwrap();
    static ref AUTHOR_LABEL: Regex = Regex::new(r"^Dibuat oleh,\s+").unwrap();
}

/// `<name>, <date>, <time>` split out of a report title.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTitle {
    pub name: String,
    pub date: String,
    pub time: String,
}

pub fn parse_title(title: &str) -> ParseResult<ReportTitle> {
    let caps = TITLE
        .captures(title.trim())
        .ok_or_else(|| ParseError::TitleMismatch {
            title: title.to_string(),
        })?;

    Ok(ReportTitle {
        name: caps[1].trim().to_string(),
        date: caps[2].trim().to_string(),
        time: caps[3].trim().to_string(),
    })
}

/// Named access to the positional cards of the report.
///
/// The page gives the cards no labels, so the mapping index -> meaning lives
/// here and nowhere else.
pub struct CardDeck<'a> {
    pub visual: ElementRef<'a>,
    /// Present only in [`DetailMode::Full`].
    pub full: Option<FullCards<'a>>,
}

pub struct FullCards<'a> {
    pub climatology: ElementRef<'a>,
    pub seismicity: ElementRef<'a>,
    pub recommendations: ElementRef<'a>,
}

impl<'a> CardDeck<'a> {
    /// Collect the cards and check there are enough for `mode`.
    pub fn locate(doc: &'a Html, mode: DetailMode) -> ParseResult<Self> {
        let group = dom::require(doc.root_element(), ".card-columns", "report card group")?;
        let cards = dom::all(group, ".card")?;

        match (mode, cards.as_slice()) {
            (DetailMode::MapSummary, [visual, ..]) => Ok(Self {
                visual: *visual,
                full: None,
            }),
            (DetailMode::Full, [visual, climatology, seismicity, recommendations, ..]) => Ok(Self {
                visual: *visual,
                full: Some(FullCards {
                    climatology: *climatology,
                    seismicity: *seismicity,
                    recommendations: *recommendations,
                }),
            }),
            _ => Err(ParseError::CardCount {
                expected: match mode {
                    DetailMode::MapSummary => 1,
                    DetailMode::Full => 4,
                },
                found: cards.len(),
            }),
        }
    }
}

pub fn extract_mountain_detail(doc: &Html, mode: DetailMode) -> ParseResult<MountainDetailReport> {
    let main = dom::require(doc.root_element(), ".card-blog", "report header card")?;
    let content = dom::require(main, ".card-body", "report header body")?;

    let level = dom::text(dom::require(content, ".badge", "activity level badge")?);
    let title = parse_title(&dom::text(dom::require(content, ".card-title", "report title")?))?;

    let deck = CardDeck::locate(doc, mode)?;
    let visual = card_paragraph(deck.visual, "visual summary")?;
    let image = dom::require(deck.visual, "img", "visual image")?;
    let image = dom::attr(image, "src").unwrap_or_default();

    let mut report = MountainDetailReport {
        level,
        name: title.name,
        date: None,
        time: None,
        author: None,
        geo: None,
        report: DetailBody {
            image,
            visual,
            climatology: None,
            seismicity: None,
            recommendations: None,
        },
        location: None,
    };

    let Some(cards) = deck.full else {
        return Ok(report);
    };

    let author = dom::text(dom::require(content, ".card-subtitle", "report author")?);
    let geo = dom::text(dom::require(content, ".col-lg-6.pd-0", "report geography")?);

    let climatology = card_paragraph(cards.climatology, "climatology")?;
    let seismicity = dom::all(media_body(cards.seismicity, "seismicity")?, "p")?
        .into_iter()
        .map(dom::text)
        .collect();
    let recommendations = paragraphs(&raw_paragraph(cards.recommendations, "recommendations")?);

    report.date = Some(title.date);
    report.time = Some(title.time);
    report.author = Some(AUTHOR_LABEL.replace(&author, "").trim().to_string());
    report.geo = Some(geo);
    report.report.climatology = Some(climatology);
    report.report.seismicity = Some(seismicity);
    report.report.recommendations = Some(recommendations);

    Ok(report)
}

fn media_body<'a>(card: ElementRef<'a>, context: &'static str) -> ParseResult<ElementRef<'a>> {
    dom::require(card, ".media-body", context)
}

fn card_paragraph(card: ElementRef<'_>, context: &'static str) -> ParseResult<String> {
    Ok(raw_paragraph(card, context)?.trim().to_string())
}

/// First paragraph text with line breaks intact.
fn raw_paragraph(card: ElementRef<'_>, context: &'static str) -> ParseResult<String> {
    let p = dom::require(media_body(card, context)?, "p", context)?;
    Ok(p.text().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse;

    fn card(inner: &str) -> String {
        format!(r#"<div class="card"><div class="media"><div class="media-body">{inner}</div></div></div>"#)
    }

    fn page(title: &str, cards: &[String]) -> String {
        format!(
            r#"<html><body>
            <div class="card card-blog">
                <div class="card-body">
                    <span class="badge badge-warning">Level II (Waspada)</span>
                    <h5 class="card-title">{title}</h5>
                    <p class="card-subtitle">Dibuat oleh,   Ahmad Basuki</p>
                    <div class="row"><div class="col-lg-6 pd-0">Terletak di Kab. Sleman, Jawa Tengah</div></div>
                </div>
            </div>
            <div class="card-columns">{}</div>
            </body></html>"#,
            cards.join("")
        )
    }

    fn full_cards() -> Vec<String> {
        vec![
            r#"<div class="card"><img src=" https://magma/img/merapi.jpg "><div class="media-body"><p> Asap kawah putih tipis. </p></div></div>"#.to_string(),
            card("<p>Cuaca cerah, angin lemah.</p>"),
            card("<p>3 kali gempa guguran</p><p>1 kali gempa vulkanik dangkal</p>"),
            card("<p>1. Tidak beraktivitas di radius 3 km.\n\n2. Waspadai lahar.</p>"),
        ]
    }

    #[test]
    fn test_title_pattern() {
        let title = parse_title("Merapi, 10 Mei 2024, 14:00 WIB").unwrap();
        assert_eq!(title.name, "Merapi");
        assert_eq!(title.date, "10 Mei 2024");
        assert_eq!(title.time, "14:00 WIB");
    }

    #[test]
    fn test_title_missing_second_comma_is_error() {
        let err = parse_title("Merapi, 10 Mei 2024 14:00 WIB").unwrap_err();
        assert!(matches!(err, ParseError::TitleMismatch { .. }));
    }

    #[test]
    fn test_full_report() {
        let html = page("Merapi, 10 Mei 2024, 14:00 WIB", &full_cards());

        let report = extract_mountain_detail(&parse(&html), DetailMode::Full).unwrap();
        assert_eq!(report.level, "Level II (Waspada)");
        assert_eq!(report.name, "Merapi");
        assert_eq!(report.date.as_deref(), Some("10 Mei 2024"));
        assert_eq!(report.time.as_deref(), Some("14:00 WIB"));
        assert_eq!(report.author.as_deref(), Some("Ahmad Basuki"));
        assert_eq!(report.geo.as_deref(), Some("Terletak di Kab. Sleman, Jawa Tengah"));
        assert_eq!(report.report.image, "https://magma/img/merapi.jpg");
        assert_eq!(report.report.visual, "Asap kawah putih tipis.");
        assert_eq!(report.report.climatology.as_deref(), Some("Cuaca cerah, angin lemah."));
        assert_eq!(
            report.report.seismicity,
            Some(vec![
                "3 kali gempa guguran".to_string(),
                "1 kali gempa vulkanik dangkal".to_string(),
            ])
        );
        assert_eq!(
            report.report.recommendations,
            Some(vec![
                "Tidak beraktivitas di radius 3 km.".to_string(),
                "Waspadai lahar.".to_string(),
            ])
        );
    }

    #[test]
    fn test_map_summary_needs_only_visual_card() {
        let cards = vec![
            r#"<div class="card"><img src="/img/ibu.jpg"><div class="media-body"><p>Asap kelabu</p></div></div>"#.to_string(),
        ];
        let html = page("Ibu, 11 Mei 2024, 06:00 WIT", &cards);

        let report = extract_mountain_detail(&parse(&html), DetailMode::MapSummary).unwrap();
        assert_eq!(report.name, "Ibu");
        assert_eq!(report.report.visual, "Asap kelabu");
        assert!(report.date.is_none());
        assert!(report.report.climatology.is_none());

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["laporan"]["image"], "/img/ibu.jpg");
        assert!(json.get("date").is_none());
        assert!(json["laporan"].get("gempa").is_none());
    }

    #[test]
    fn test_full_mode_guards_card_count() {
        let cards = vec![
            r#"<div class="card"><img src="/a.jpg"><div class="media-body"><p>v</p></div></div>"#.to_string(),
            card("<p>k</p>"),
        ];
        let html = page("Ibu, 11 Mei 2024, 06:00 WIT", &cards);

        let err = extract_mountain_detail(&parse(&html), DetailMode::Full).unwrap_err();
        assert!(matches!(err, ParseError::CardCount { expected: 4, found: 2 }));
    }

    #[test]
    fn test_map_summary_deck_skips_full_cards() {
        let doc = parse(&page("Merapi, 10 Mei 2024, 14:00 WIB", &full_cards()));

        let summary = CardDeck::locate(&doc, DetailMode::MapSummary).unwrap();
        assert!(summary.full.is_none());

        let full = CardDeck::locate(&doc, DetailMode::Full).unwrap().full.unwrap();
        assert_eq!(dom::text(full.climatology), "Cuaca cerah, angin lemah.");
        assert!(dom::text(full.seismicity).starts_with("3 kali gempa guguran"));
        assert!(dom::text(full.recommendations).ends_with("Waspadai lahar."));
    }

    #[test]
    fn test_map_summary_without_cards_is_error() {
        let html = page("Merapi, 10 Mei 2024, 14:00 WIB", &[]);
        let err = extract_mountain_detail(&parse(&html), DetailMode::MapSummary).unwrap_err();
        assert!(matches!(err, ParseError::CardCount { expected: 1, found: 0 }));
    }

    #[test]
    fn test_bad_title_is_error() {
        let html = page("Laporan Merapi", &full_cards());
        let err = extract_mountain_detail(&parse(&html), DetailMode::MapSummary).unwrap_err();
        assert!(matches!(err, ParseError::TitleMismatch { .. }));
    }
}
