//! Activity level table (`tingkat-aktivitas`).
//!
//! Rows with two or more cells are level headers (status, description and
//! the site's mountain count); single-cell rows list one mountain each under
//! the most recent header. Rows whose cells are all blank are skipped.

use scraper::{ElementRef, Html};

use crate::dom;
use crate::error::{ParseError, ParseResult};
use crate::types::{ActivityLevelGroup, MountRef};

pub fn extract_status_table(doc: &Html) -> ParseResult<Vec<ActivityLevelGroup>> {
    let tbody = dom::require(doc.root_element(), "tbody", "status table body")?;

    let mut groups: Vec<ActivityLevelGroup> = Vec::new();

    for row in dom::all(tbody, "tr")? {
        let cells = dom::all(row, "td")?;
        match cells.as_slice() {
            [] => continue,
            // Spacer rows carry no status or mountain.
            blank if blank.iter().all(|cell| dom::text(*cell).is_empty()) => continue,
            [cell] => {
                let mount = mount_row(*cell)?;
                let group = groups
                    .last_mut()
                    .ok_or_else(|| ParseError::OrphanMountRow {
                        text: mount.name.clone(),
                    })?;
                group.mounts.push(mount);
            }
            [head, count, ..] => groups.push(level_row(*head, *count)?),
        }
    }

    Ok(groups)
}

fn level_row(head: ElementRef<'_>, count: ElementRef<'_>) -> ParseResult<ActivityLevelGroup> {
    let status = match dom::first(head, "a")? {
        Some(a) => dom::text(a),
        None => first_label(head),
    };
    let description = dom::text_of(head, "span")?.unwrap_or_default();

    let raw = dom::text(count);
    let count = raw
        .parse::<u32>()
        .map_err(|_| ParseError::InvalidCount { value: raw.clone() })?;

    Ok(ActivityLevelGroup {
        status,
        description,
        count,
        mounts: Vec::new(),
    })
}

/// `<td>Merapi - Jawa Tengah <a href="...">Laporan</a></td>`
fn mount_row(cell: ElementRef<'_>) -> ParseResult<MountRef> {
    let link = dom::first(cell, "a[href]")?
        .and_then(|a| dom::attr(a, "href"))
        .ok_or_else(|| ParseError::MissingNode {
            context: "mountain report link",
            selector: "a[href]".to_string(),
        })?;

    Ok(MountRef::from_label(&first_label(cell), link))
}

fn first_label(cell: ElementRef<'_>) -> String {
    dom::children(cell)
        .into_iter()
        .find(|c| !c.is_blank())
        .map(|c| c.text())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::parse;

    fn level(status: &str, description: &str, count: &str) -> String {
        format!(
            r#"<tr><td><a href="/profil">{status}</a><br><span>{description}</span></td><td>{count}</td></tr>"#
        )
    }

    fn mount(label: &str, link: &str) -> String {
        format!(r#"<tr><td>{label} <a href="{link}">Lihat laporan</a></td></tr>"#)
    }

    fn table(rows: &[String]) -> String {
        format!(
            r#"<html><body><table><thead><tr><th>Status</th><th>Jumlah</th></tr></thead><tbody>{}</tbody></table></body></html>"#,
            rows.join("")
        )
    }

    #[test]
    fn test_groups_and_mounts() {
        let html = table(&[
            level("Level II (Waspada)", "Aktivitas vulkanik meningkat", "3"),
            mount("Merapi - Jawa Tengah", "https://magma/laporan/1"),
            mount("Semeru - Jawa Timur", "https://magma/laporan/2"),
            mount("Ibu - Maluku Utara", "https://magma/laporan/3"),
            level("Level I (Normal)", "Tidak ada gejala", "0"),
        ]);
        let groups = extract_status_table(&parse(&html)).unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].status, "Level II (Waspada)");
        assert_eq!(groups[0].description, "Aktivitas vulkanik meningkat");
        assert_eq!(groups[0].count, 3);
        let names: Vec<&str> = groups[0].mounts.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, vec!["Merapi", "Semeru", "Ibu"]);
        assert_eq!(groups[0].mounts[2].location, "Maluku Utara");
        assert_eq!(groups[0].mounts[0].link, "https://magma/laporan/1");

        assert_eq!(groups[1].count, 0);
        assert!(groups[1].mounts.is_empty());
    }

    #[test]
    fn test_count_is_the_site_tally() {
        let html = table(&[
            level("Level III (Siaga)", "", "5"),
            mount("Lewotobi - NTT", "/l/1"),
        ]);
        let groups = extract_status_table(&parse(&html)).unwrap();
        assert_eq!(groups[0].count, 5);
        assert_eq!(groups[0].mounts.len(), 1);
    }

    #[test]
    fn test_mount_without_delimiter_has_empty_location() {
        let html = table(&[level("Level II", "", "1"), mount("Dempo", "/l/9")]);
        let groups = extract_status_table(&parse(&html)).unwrap();
        assert_eq!(groups[0].mounts[0].name, "Dempo");
        assert_eq!(groups[0].mounts[0].location, "");
    }

    #[test]
    fn test_blank_spacer_rows_are_skipped() {
        let html = table(&[
            level("Level II (Waspada)", "", "1"),
            mount("Merapi - Jawa Tengah", "/l/1"),
            r#"<tr><td colspan="2">&nbsp;</td></tr>"#.to_string(),
            "<tr><td></td><td> </td></tr>".to_string(),
            level("Level I (Normal)", "", "0"),
        ]);
        let groups = extract_status_table(&parse(&html)).unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].mounts.len(), 1);
        assert!(groups[1].mounts.is_empty());
    }

    #[test]
    fn test_mount_row_before_level_is_error() {
        let html = table(&[mount("Merapi - Jawa Tengah", "/l/1"), level("Level II", "", "1")]);
        let err = extract_status_table(&parse(&html)).unwrap_err();
        assert!(matches!(err, ParseError::OrphanMountRow { text } if text == "Merapi"));
    }

    #[test]
    fn test_non_numeric_count_is_error() {
        let html = table(&[level("Level II", "", "tiga")]);
        let err = extract_status_table(&parse(&html)).unwrap_err();
        assert!(matches!(err, ParseError::InvalidCount { value } if value == "tiga"));
    }

    #[test]
    fn test_missing_table_is_error() {
        let err = extract_status_table(&parse("<html><body></body></html>")).unwrap_err();
        assert!(matches!(err, ParseError::MissingNode { .. }));
    }
}
