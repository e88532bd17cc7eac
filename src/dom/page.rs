// src/dom/page.rs
use super::{Document, Element};
use crate::model::KeyKind;

pub mod ids {
    pub const THEME_TOGGLE: &str = "theme-toggle";
    pub const THEME_ICON: &str = "theme-icon";
    pub const REFRESH_BTN: &str = "refresh-btn";
    pub const CURRENT_YEAR: &str = "current-year";

    pub const TOTAL_DRAWS: &str = "total-draws";
    pub const DATA_SOURCE: &str = "data-source";
    pub const LAST_SCRAPING: &str = "last-scraping";
    pub const LAST_RESULT_BALLS: &str = "last-result-balls";

    pub const TOP_NUMBERS_LIST: &str = "top-numbers-list";
    pub const OVERDUE_NUMBERS_LIST: &str = "overdue-numbers-list";

    pub const HOT_TREND_CARD: &str = "hot-trend-card";
    pub const STARS_TREND_CARD: &str = "stars-trend-card";
    pub const FREQUENCY_TREND_CARD: &str = "frequency-trend-card";
    pub const HOT_TREND_BALLS: &str = "hot-trend-balls";
    pub const STARS_TREND_BALLS: &str = "stars-trend-balls";
    pub const AVG_FREQUENCY: &str = "avg-frequency";

    pub const NUMBERS_CHART: &str = "numbersChart";
    pub const STARS_CHART: &str = "starsChart";
}

pub const KEY_CARD: &str = "key-card";
pub const TREND_CARD: &str = "trend-card";
pub const UPDATING: &str = "updating";
pub const LOADING: &str = "loading";

/// Element ids of one strategic key's card.
#[derive(Debug, Clone, Copy)]
pub struct KeyRegions {
    pub card: &'static str,
    pub numbers: &'static str,
    pub stars: &'static str,
    pub copy_button: &'static str,
}

pub fn key_regions(kind: KeyKind) -> KeyRegions {
    match kind {
        KeyKind::Critical => KeyRegions {
            card: "critical-card",
            numbers: "critical-numbers",
            stars: "critical-stars",
            copy_button: "copy-critical",
        },
        KeyKind::Hot => KeyRegions {
            card: "hot-card",
            numbers: "hot-numbers",
            stars: "hot-stars",
            copy_button: "copy-hot",
        },
        KeyKind::Hybrid => KeyRegions {
            card: "hybrid-card",
            numbers: "hybrid-numbers",
            stars: "hybrid-stars",
            copy_button: "copy-hybrid",
        },
    }
}

impl Document {
    /// Every region of the dashboard, empty, as the page is before the first load.
    pub fn dashboard() -> Self {
        let mut doc = Document::new();

        doc.insert(ids::THEME_TOGGLE, Element::with_class("theme-toggle"));
        doc.insert(ids::THEME_ICON, Element::default());
        doc.insert(ids::REFRESH_BTN, Element::with_class("refresh-btn"));
        doc.insert(ids::CURRENT_YEAR, Element::default());

        doc.insert(ids::TOTAL_DRAWS, Element::default().text("-"));
        doc.insert(ids::DATA_SOURCE, Element::default().text("-"));
        doc.insert(ids::LAST_SCRAPING, Element::default().text("-"));
        doc.insert(ids::LAST_RESULT_BALLS, Element::default().text("-"));

        for kind in KeyKind::ALL {
            let regions = key_regions(kind);
            doc.insert(regions.card, Element::with_class(KEY_CARD));
            doc.insert(regions.numbers, Element::with_class("balls"));
            doc.insert(regions.stars, Element::with_class("balls"));
            doc.insert(regions.copy_button, Element::with_class("copy-btn"));
        }

        doc.insert(ids::TOP_NUMBERS_LIST, Element::with_class("number-list"));
        doc.insert(ids::OVERDUE_NUMBERS_LIST, Element::with_class("number-list"));

        doc.insert(ids::HOT_TREND_CARD, Element::with_class(TREND_CARD));
        doc.insert(ids::STARS_TREND_CARD, Element::with_class(TREND_CARD));
        doc.insert(ids::FREQUENCY_TREND_CARD, Element::with_class(TREND_CARD));
        doc.insert(ids::HOT_TREND_BALLS, Element::with_class("trend-balls"));
        doc.insert(ids::STARS_TREND_BALLS, Element::with_class("trend-balls"));
        doc.insert(ids::AVG_FREQUENCY, Element::default().text("-"));

        doc.insert(ids::NUMBERS_CHART, Element::with_class("chart"));
        doc.insert(ids::STARS_CHART, Element::with_class("chart"));

        doc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_has_all_regions() {
        let doc = Document::dashboard();
        assert_eq!(doc.ids_with_class(KEY_CARD).len(), 3);
        assert_eq!(doc.ids_with_class(TREND_CARD).len(), 3);
        for kind in KeyKind::ALL {
            let regions = key_regions(kind);
            assert!(doc.element(regions.numbers).is_some());
            assert!(doc.element(regions.stars).is_some());
            assert!(doc.element(regions.copy_button).unwrap().has_class("copy-btn"));
        }
        assert_eq!(doc.text_content(ids::TOTAL_DRAWS), "-");
    }
}
