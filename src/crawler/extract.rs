//! Selector-based extraction
//!
//! Every page family is read through an ordered list of strategies tried
//! until one yields a non-empty result: a primary CSS selector, an alternate
//! selector, and finally a generic scan over all anchors. The site reshuffles
//! its markup often enough that the primary selector alone is not reliable;
//! selector robustness beyond this fallback chain is explicitly not a goal.

use crate::model::RawTransferEvent;
use scraper::{ElementRef, Html, Selector};
use std::collections::HashSet;
use url::Url;

/// One attempt at pulling links out of a page.
pub enum LinkStrategy {
    /// Anchor elements matching a CSS selector.
    Selector(&'static str),
    /// Every anchor whose href contains the marker.
    HrefScan(&'static str),
}

/// League-season page → club profile links.
pub const CLUB_LINK_STRATEGIES: &[LinkStrategy] = &[
    LinkStrategy::Selector(r#"a.vereinprofil_tooltip[href*="/startseite/verein/"]"#),
    LinkStrategy::Selector(r#"td.hauptlink a[href*="/startseite/verein/"]"#),
    LinkStrategy::HrefScan("/startseite/verein/"),
];

/// Club squad page → player profile links.
pub const PLAYER_LINK_STRATEGIES: &[LinkStrategy] = &[
    LinkStrategy::Selector(r#"table.items td.hauptlink a[href*="/profil/spieler/"]"#),
    LinkStrategy::Selector(r#"a[href*="/profil/spieler/"]"#),
    LinkStrategy::HrefScan("/profil/spieler/"),
];

/// Extracts absolute, deduplicated link URLs with the first strategy that
/// yields anything. Relative hrefs are resolved against `base_url`; trailing
/// slashes are stripped so the same club never appears twice.
pub fn extract_links(html: &str, base_url: &str, strategies: &[LinkStrategy]) -> Vec<String> {
    let document = Html::parse_document(html);

    for strategy in strategies {
        let hrefs: Vec<String> = match strategy {
            LinkStrategy::Selector(css) => match Selector::parse(css) {
                Ok(selector) => document
                    .select(&selector)
                    .filter_map(|el| el.value().attr("href"))
                    .map(str::to_string)
                    .collect(),
                Err(_) => continue,
            },
            LinkStrategy::HrefScan(marker) => match Selector::parse("a") {
                Ok(anchor) => document
                    .select(&anchor)
                    .filter_map(|el| el.value().attr("href"))
                    .filter(|href| href.contains(marker))
                    .map(str::to_string)
                    .collect(),
                Err(_) => continue,
            },
        };

        let links = normalize_links(&hrefs, base_url);
        if !links.is_empty() {
            return links;
        }
    }

    Vec::new()
}

fn normalize_links(hrefs: &[String], base_url: &str) -> Vec<String> {
    let base = Url::parse(base_url).ok();
    let mut seen = HashSet::new();
    let mut links = Vec::new();

    for href in hrefs {
        let absolute = if href.starts_with("http") {
            href.clone()
        } else if let Some(base) = &base {
            match base.join(href) {
                Ok(joined) => joined.to_string(),
                Err(_) => continue,
            }
        } else {
            continue;
        };

        let trimmed = absolute.trim_end_matches('/').to_string();
        if seen.insert(trimmed.clone()) {
            links.push(trimmed);
        }
    }

    links
}

/// Raw fields lifted from a player profile page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawProfile {
    pub name: String,
    pub birth_date_text: String,
    pub nationality: String,
    pub position_text: String,
}

const NAME_SELECTORS: &[&str] = &[
    "h1.data-header__headline-wrapper",
    r#"h1[itemprop="name"]"#,
    "h1",
];

const BIRTH_DATE_SELECTORS: &[&str] = &[
    r#"span[itemprop="birthDate"]"#,
    "span.data-header__birth-date",
];

const NATIONALITY_SELECTORS: &[&str] = &[
    r#"span[itemprop="nationality"]"#,
    "span.data-header__nationality",
];

const POSITION_SELECTORS: &[&str] = &[
    "dd.detail-position__position",
    "span.data-header__position",
];

/// Extracts the profile fields of a player page.
///
/// Only the name is mandatory — a loaded page without one is structurally
/// broken. Birth date, nationality, and position fall back to empty strings
/// and are validated downstream.
pub fn extract_profile(html: &str) -> Option<RawProfile> {
    let document = Html::parse_document(html);

    let name = clean_name(&first_text(&document, NAME_SELECTORS)?);
    if name.is_empty() {
        return None;
    }

    Some(RawProfile {
        name,
        birth_date_text: first_text(&document, BIRTH_DATE_SELECTORS).unwrap_or_default(),
        nationality: first_text(&document, NATIONALITY_SELECTORS).unwrap_or_default(),
        position_text: first_text(&document, POSITION_SELECTORS).unwrap_or_default(),
    })
}

/// First non-empty collapsed text among the given selectors.
fn first_text(document: &Html, selectors: &[&str]) -> Option<String> {
    for css in selectors {
        let Ok(selector) = Selector::parse(css) else {
            continue;
        };
        if let Some(element) = document.select(&selector).next() {
            let text = collapse_text(element);
            if !text.is_empty() {
                return Some(text);
            }
        }
    }
    None
}

/// Collapses an element's text nodes to single-space-separated words.
fn collapse_text(element: ElementRef) -> String {
    element
        .text()
        .flat_map(str::split_whitespace)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Drops the shirt-number token the site prefixes headline names with
/// ("#10 Lionel Messi").
fn clean_name(raw: &str) -> String {
    raw.split_whitespace()
        .filter(|token| !token.starts_with('#'))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Transfer-history rows of a player page.
///
/// The current markup renders the ledger as a CSS grid, one container per
/// transfer; older cached pages still use a plain table, read positionally
/// as season / date / from / to / fee.
pub fn extract_transfers(html: &str) -> Vec<RawTransferEvent> {
    let document = Html::parse_document(html);

    let grid = grid_transfers(&document);
    if !grid.is_empty() {
        return grid;
    }
    table_transfers(&document)
}

fn grid_transfers(document: &Html) -> Vec<RawTransferEvent> {
    let Ok(row_selector) = Selector::parse("div.tm-player-transfer-history-grid") else {
        return Vec::new();
    };

    document
        .select(&row_selector)
        .filter_map(|row| {
            let cell = |class: &str| -> String {
                Selector::parse(&format!("div.tm-player-transfer-history-grid__{}", class))
                    .ok()
                    .and_then(|selector| row.select(&selector).next())
                    .map(collapse_text)
                    .unwrap_or_default()
            };

            let event = RawTransferEvent {
                season_label: cell("season"),
                date_text: cell("date"),
                from_club_name: cell("old-club"),
                to_club_name: cell("new-club"),
                fee_text: cell("fee"),
            };
            // Header rows render the same grid class with no date cell.
            (!event.date_text.is_empty()).then_some(event)
        })
        .collect()
}

fn table_transfers(document: &Html) -> Vec<RawTransferEvent> {
    let Ok(row_selector) = Selector::parse("table.transferhistorie tr, div#transferhistorie tr")
    else {
        return Vec::new();
    };
    let Ok(cell_selector) = Selector::parse("td") else {
        return Vec::new();
    };

    document
        .select(&row_selector)
        .filter_map(|row| {
            let cells: Vec<String> = row.select(&cell_selector).map(collapse_text).collect();
            if cells.len() < 5 {
                return None;
            }
            Some(RawTransferEvent {
                season_label: cells[0].clone(),
                date_text: cells[1].clone(),
                from_club_name: cells[2].clone(),
                to_club_name: cells[3].clone(),
                fee_text: cells[4].clone(),
            })
        })
        .collect()
}
