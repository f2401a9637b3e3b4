//! Text normalization shared by the extractors and registry matching.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `"12. "` at the start of a line
    static ref ORDINAL_PREFIX: Regex = Regex::new(r"(?m)^[ \t]*\d+\.[ \t]+").unwrap();
    /// Paragraph break: an empty (or blank) line
    static ref BLANK_LINE: Regex = Regex::new(r"\n[ \t]*\n").unwrap();
}

/// Key used to match scraped mountain names against the registry.
///
/// Lower-cases and removes every whitespace character, so `"Gunung  Merapi"`
/// and `"gunung merapi"` compare equal. Diacritics and abbreviations are not
/// folded.
pub fn name_key(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect()
}

/// Column key for a daily-report header cell: `"Tingkat Aktivitas"` -> `"tingkat_aktivitas"`.
pub fn header_key(header: &str) -> String {
    header
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
}

/// Collapse runs of whitespace into single spaces and trim.
pub fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strip a leading `"<digits>. "` from every line.
pub fn strip_ordinals(text: &str) -> String {
    ORDINAL_PREFIX.replace_all(text, "").into_owned()
}

/// Split recommendation text into paragraphs on blank lines, dropping ordinals.
pub fn paragraphs(text: &str) -> Vec<String> {
    let text = strip_ordinals(&text.replace("\r\n", "\n"));
    BLANK_LINE
        .split(&text)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect()
}
