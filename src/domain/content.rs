//! Static dashboard catalog.
//!
//! The catalog is a fixed set of rows, each holding titles named by
//! translation keys. Titles are translated at projection time so a language
//! switch regenerates every row.

/// A single title in the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogItem {
    /// Translation key of the title.
    pub title_key: &'static str,
    /// Visible to kid profiles.
    pub kid_safe: bool,
}

/// A horizontal row on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogRow {
    /// Translation key of the row heading.
    pub title_key: &'static str,
    pub items: &'static [CatalogItem],
}

const fn item(title_key: &'static str, kid_safe: bool) -> CatalogItem {
    CatalogItem { title_key, kid_safe }
}

const EPIC_SERIES: CatalogItem = item("content_epic_series", false);
const MODERN_DRAMA: CatalogItem = item("content_modern_drama", false);
const FAMILY_COMEDY: CatalogItem = item("content_family_comedy", true);
const PSYCH_THRILLER: CatalogItem = item("content_psych_thriller", false);
const NATURE_DOC: CatalogItem = item("content_nature_doc", true);
const SCIFI: CatalogItem = item("content_scifi", true);
const CLASSIC_ROMANCE: CatalogItem = item("content_classic_romance", false);
const EXPLOSIVE_ACTION: CatalogItem = item("content_explosive_action", false);

/// Dashboard rows in display order.
pub const CATALOG: &[CatalogRow] = &[
    CatalogRow {
        title_key: "dashboard_continue_watching",
        items: &[MODERN_DRAMA, NATURE_DOC, EPIC_SERIES],
    },
    CatalogRow {
        title_key: "dashboard_trending",
        items: &[
            EPIC_SERIES,
            MODERN_DRAMA,
            FAMILY_COMEDY,
            PSYCH_THRILLER,
            NATURE_DOC,
            SCIFI,
            CLASSIC_ROMANCE,
            EXPLOSIVE_ACTION,
        ],
    },
    CatalogRow {
        title_key: "dashboard_new_releases",
        items: &[SCIFI, EXPLOSIVE_ACTION, FAMILY_COMEDY, PSYCH_THRILLER],
    },
    CatalogRow {
        title_key: "dashboard_my_list",
        items: &[CLASSIC_ROMANCE, NATURE_DOC],
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_row_has_a_kid_safe_title() {
        for row in CATALOG {
            assert!(row.items.iter().any(|i| i.kid_safe), "{}", row.title_key);
        }
    }
}
