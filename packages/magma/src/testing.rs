//! Testing utilities: mock collaborators and page fixtures.
//!
//! Useful for exercising the pipeline without network or database access.
//! The fixture builders produce the smallest markup each extractor accepts.

use crate::config::DEFAULT_BASE_URL;
use crate::normalize::name_key;

pub use crate::fetchers::MockFetcher;
pub use crate::registry::MemoryRegistry;

/// Detail link the fixtures use for `name`, under the default source.
pub fn detail_link(name: &str) -> String {
    format!("{DEFAULT_BASE_URL}laporan/{}", name_key(name))
}

/// Status table with one level row per group and one row per mountain.
///
/// Each group is `(status, count, mountains)`. Mountain labels get a
/// `" - Indonesia"` location and a link from [`detail_link`].
pub fn status_table_html(groups: &[(&str, u32, &[&str])]) -> String {
    let mut rows = String::new();
    for (status, count, mounts) in groups {
        rows.push_str(&format!(
            r#"<tr><td><a href="{DEFAULT_BASE_URL}tingkat-aktivitas">{status}</a> <span>{status} description</span></td><td>{count}</td></tr>"#
        ));
        for name in mounts.iter() {
            rows.push_str(&format!(
                r#"<tr><td>{name} - Indonesia <a href="{}">Laporan</a></td></tr>"#,
                detail_link(name)
            ));
        }
    }
    format!(r#"<html><body><table class="table"><tbody>{rows}</tbody></table></body></html>"#)
}

/// Mountain detail page carrying only the visual card.
pub fn map_summary_html(name: &str) -> String {
    detail_html(
        name,
        &[r#"<div class="card"><img src="/img/visual.jpg"><div class="media-body"><p>Asap kawah putih tipis.</p></div></div>"#],
    )
}

/// Mountain detail page with all four cards.
pub fn mountain_detail_html(name: &str) -> String {
    detail_html(
        name,
        &[
            r#"<div class="card"><img src="/img/visual.jpg"><div class="media-body"><p>Asap kawah putih tipis.</p></div></div>"#,
            r#"<div class="card"><div class="media-body"><p>Cuaca cerah, angin lemah ke arah barat.</p></div></div>"#,
            r#"<div class="card"><div class="media-body"><p>2 kali gempa guguran</p><p>1 kali gempa tektonik jauh</p></div></div>"#,
            "<div class=\"card\"><div class=\"media-body\"><p>1. Tidak beraktivitas dalam radius 3 km.\n\n2. Waspadai lahar.</p></div></div>",
        ],
    )
}

fn detail_html(name: &str, cards: &[&str]) -> String {
    format!(
        r#"<html><body>
        <div class="card card-blog">
            <div class="card-body">
                <span class="badge">Level II (Waspada)</span>
                <h5 class="card-title">{name}, 10 Mei 2024, 14:00 WIB</h5>
                <p class="card-subtitle">Dibuat oleh, Petugas Pos</p>
                <div class="col-lg-6 pd-0">Terletak di Indonesia</div>
            </div>
        </div>
        <div class="card-columns">{}</div>
        </body></html>"#,
        cards.join("")
    )
}

/// Eruption notice for the mountain `name`.
pub fn eruption_detail_html(name: &str) -> String {
    format!(
        r#"<html><body>
        <div class="card card-blog">
            <div class="card-body">
                <img class="img-fit-cover" src="/img/letusan.jpg">
                <div class="col-md-7 col-lg-6 col-xl-7">
                    <p class="blog-category tx-danger">Senin, 13 Mei 2024, 09:12 WIT</p>
                    <h5 class="blog-title">Gunung Api {name}</h5>
                    <p class="card-subtitle tx-normal">Dibuat oleh, Petugas Pos</p>
                    <p>Terjadi erupsi G. {name}.</p>
                    <div class="blog-text"><p>Masyarakat tidak beraktivitas dalam radius 4 km.</p></div>
                </div>
            </div>
        </div>
        </body></html>"#
    )
}
