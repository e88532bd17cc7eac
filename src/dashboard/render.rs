// src/dashboard/render.rs
//! Projections of a snapshot onto the element tree. Each one replaces the
//! content of its regions outright, so rendering the same snapshot twice
//! leaves the same tree.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime};

use crate::dom::page::key_regions;
use crate::dom::{ids, Document, Element, Style, Tone};
use crate::model::snapshot::pad2;
use crate::model::{AnalysisSnapshot, DataSource, KeyKind, OverdueNumber, StrategicKeys, TopNumber};

pub const PLACEHOLDER: &str = "-";
pub const NOT_AVAILABLE: &str = "N/A";
pub const LABEL_REAL: &str = "Real";
pub const LABEL_SIMULATED: &str = "Simulado";
pub const LABEL_NEVER: &str = "Nunca";

const RESULT_BALL_STEP: f32 = 0.08;
const BALL_STEP: f32 = 0.1;
const LIST_STEP: f32 = 0.05;

pub fn update_stats(doc: &mut Document, data: &AnalysisSnapshot) {
    let total = data
        .total_draws
        .filter(|n| *n > 0)
        .map(|n| n.to_string())
        .unwrap_or_else(|| PLACEHOLDER.to_string());
    doc.set_text(ids::TOTAL_DRAWS, total);

    let cache_info = data.cache_info.as_ref();

    match cache_info.and_then(|info| info.data_source()) {
        Some(DataSource::Scraping) => {
            doc.set_text(ids::DATA_SOURCE, LABEL_REAL);
            doc.set_style(ids::DATA_SOURCE, Style { color: Some(Tone::Success), ..Default::default() });
        }
        Some(DataSource::Simulated) => {
            doc.set_text(ids::DATA_SOURCE, LABEL_SIMULATED);
            doc.set_style(ids::DATA_SOURCE, Style { color: Some(Tone::Warning), ..Default::default() });
        }
        None => {
            doc.set_text(ids::DATA_SOURCE, PLACEHOLDER);
            doc.set_style(ids::DATA_SOURCE, Style::default());
        }
    }

    match cache_info.and_then(|info| info.last_scraping.as_deref()).filter(|s| !s.is_empty()) {
        Some(stamp) => {
            doc.set_text(ids::LAST_SCRAPING, format_date(stamp));
            doc.set_style(ids::LAST_SCRAPING, Style::default());
        }
        None => {
            doc.set_text(ids::LAST_SCRAPING, LABEL_NEVER);
            doc.set_style(ids::LAST_SCRAPING, Style { opacity: Some(0.6), ..Default::default() });
        }
    }
}

/// `dd/mm/yyyy` in local time. Strings that are not a recognizable timestamp
/// are returned unchanged.
pub fn format_date(value: &str) -> String {
    const FORMAT: &str = "%d/%m/%Y";

    if let Ok(stamp) = DateTime::parse_from_rfc3339(value) {
        return stamp.with_timezone(&Local).format(FORMAT).to_string();
    }
    for pattern in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(stamp) = NaiveDateTime::parse_from_str(value, pattern) {
            return stamp.format(FORMAT).to_string();
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return date.format(FORMAT).to_string();
    }
    value.to_string()
}

pub fn update_last_result(doc: &mut Document, data: &AnalysisSnapshot) {
    let Some(numbers) = data.last_draw_numbers.as_ref() else {
        doc.set_text(ids::LAST_RESULT_BALLS, PLACEHOLDER);
        return;
    };
    let stars = data.last_draw_stars.as_deref().unwrap_or_default();

    let mut children: Vec<Element> = numbers
        .iter()
        .enumerate()
        .map(|(i, n)| {
            Element::with_class("result-ball number")
                .text(pad2(*n))
                .delay(i as f32 * RESULT_BALL_STEP)
        })
        .collect();

    children.push(Element::with_class("result-plus").text("+"));

    children.extend(stars.iter().enumerate().map(|(i, s)| {
        Element::with_class("result-ball star")
            .text(pad2(*s))
            .delay((i + 5) as f32 * RESULT_BALL_STEP)
    }));

    doc.set_children(ids::LAST_RESULT_BALLS, children);
}

pub fn update_strategic_keys(doc: &mut Document, keys: Option<&StrategicKeys>) {
    let Some(keys) = keys else { return };

    for kind in KeyKind::ALL {
        if let Some(key) = keys.get(kind) {
            let regions = key_regions(kind);
            if !key.numbers.is_empty() {
                render_number_balls(doc, regions.numbers, &key.numbers);
            }
            if !key.stars.is_empty() {
                render_star_balls(doc, regions.stars, &key.stars);
            }
        }
    }
}

fn render_balls(doc: &mut Document, id: &str, items: &[u32], class: &str, include_plus: bool, delay_offset: usize) {
    let mut children = Vec::with_capacity(items.len() + 1);
    if include_plus {
        children.push(Element::with_class("plus-sign").text("+"));
    }
    children.extend(items.iter().enumerate().map(|(i, item)| {
        Element::with_class(class)
            .text(pad2(*item))
            .delay((i + delay_offset) as f32 * BALL_STEP)
    }));
    doc.set_children(id, children);
}

fn render_number_balls(doc: &mut Document, id: &str, numbers: &[u32]) {
    render_balls(doc, id, numbers, "number-ball", false, 0);
}

fn render_star_balls(doc: &mut Document, id: &str, stars: &[u32]) {
    render_balls(doc, id, stars, "star-ball", true, 5);
}

/// Renders one list item per present entry. `null` entries are skipped but
/// still count towards the reveal delay of the items after them.
fn update_list<T>(doc: &mut Document, id: &str, items: Option<&[Option<T>]>, format: impl Fn(&T) -> Vec<Element>) {
    let Some(items) = items else { return };

    let children = items
        .iter()
        .enumerate()
        .filter_map(|(i, item)| {
            let item = item.as_ref()?;
            let mut li = Element::with_class("list-item").delay(i as f32 * LIST_STEP);
            li.children = format(item);
            Some(li)
        })
        .collect();

    doc.set_children(id, children);
}

fn number_label(number: Option<u32>) -> String {
    number
        .filter(|n| *n != 0)
        .map(|n| n.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn update_top_numbers(doc: &mut Document, top_numbers: Option<&[Option<TopNumber>]>) {
    update_list(doc, ids::TOP_NUMBERS_LIST, top_numbers, |item| {
        vec![
            Element::default().text(number_label(item.number)),
            Element::with_class("frequency").text(format!("{} vezes", item.frequency.unwrap_or(0))),
        ]
    });
}

pub fn draws_ago_label(draws_ago: Option<u32>) -> String {
    let count = draws_ago.unwrap_or(0);
    let unit = if count == 1 { "sorteio" } else { "sorteios" };
    format!("{} {}", count, unit)
}

pub fn update_overdue_numbers(doc: &mut Document, overdue_numbers: Option<&[Option<OverdueNumber>]>) {
    update_list(doc, ids::OVERDUE_NUMBERS_LIST, overdue_numbers, |item| {
        vec![
            Element::default().text(number_label(item.number)),
            Element::with_class("draws-ago").text(draws_ago_label(item.draws_ago)),
        ]
    });
}

/// Five number slots, a plus sign and two star slots. Hidden or missing
/// values leave their slot marked `empty`.
fn render_trend_balls(doc: &mut Document, id: &str, numbers: &[u32], stars: &[u32], show_numbers: bool, show_stars: bool) {
    let slot = |class: &str, value: Option<&u32>, index: usize| {
        let mut ball = Element::with_class(class).delay(index as f32 * BALL_STEP);
        match value {
            Some(v) => ball.text = pad2(*v),
            None => ball.add_class("empty"),
        }
        ball
    };

    let mut children = Vec::with_capacity(8);
    for i in 0..5 {
        let value = if show_numbers { numbers.get(i) } else { None };
        children.push(slot("trend-ball number", value, i));
    }
    children.push(Element::with_class("plus-sign").text("+"));
    for i in 0..2 {
        let value = if show_stars { stars.get(i) } else { None };
        children.push(slot("trend-ball star", value, i + 5));
    }

    doc.set_children(id, children);
}

/// Average draws per number as a percentage of all draws:
/// `sum(frequencies) / 50 / total_draws * 100`.
pub fn average_frequency_percent(frequencies: &[u32], total_draws: u64) -> Option<f64> {
    if total_draws == 0 {
        return None;
    }
    let sum: u64 = frequencies.iter().map(|f| u64::from(*f)).sum();
    let average = sum as f64 / 50.0;
    Some(average / total_draws as f64 * 100.0)
}

pub fn update_trends(doc: &mut Document, data: &AnalysisSnapshot) {
    if let Some(hot) = data.strategic_keys.as_ref().and_then(|k| k.secundaria.as_ref()) {
        render_trend_balls(doc, ids::HOT_TREND_BALLS, &hot.numbers, &hot.stars, true, false);
        render_trend_balls(doc, ids::STARS_TREND_BALLS, &hot.numbers, &hot.stars, false, true);
    }

    // Independent of the keys: a snapshot without `strategicKeys` still gets
    // its average frequency.
    let percent = match (data.total_draws, data.number_frequencies.as_deref()) {
        (Some(total), Some(frequencies)) => average_frequency_percent(frequencies, total),
        _ => None,
    };
    if let Some(percent) = percent {
        doc.set_children(
            ids::AVG_FREQUENCY,
            vec![
                Element::with_class("freq-percentage").text(format!("{:.1}%", percent)),
                Element::with_class("freq-subtitle").text("por número"),
            ],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CacheInfo, KeyCombination};

    fn snapshot() -> AnalysisSnapshot {
        AnalysisSnapshot {
            total_draws: Some(42),
            last_draw_numbers: Some(vec![3, 14, 15, 26, 50]),
            last_draw_stars: Some(vec![5, 9]),
            cache_info: Some(CacheInfo {
                source: Some("scraping".to_string()),
                last_scraping: Some("2024-03-15T10:20:30.123456".to_string()),
                cache_timestamp: None,
            }),
            strategic_keys: Some(StrategicKeys {
                principal: Some(KeyCombination::new([1, 2, 3, 4, 5], [6, 7])),
                secundaria: Some(KeyCombination::new([8, 9, 10, 11, 12], [1, 2])),
                hibrida: Some(KeyCombination::new([13, 14, 15, 16, 17], [3, 4])),
            }),
            top_numbers: Some(vec![
                Some(TopNumber { number: Some(23), frequency: Some(11) }),
                None,
                Some(TopNumber { number: Some(7), frequency: Some(9) }),
            ]),
            overdue_numbers: Some(vec![
                Some(OverdueNumber { number: Some(31), draws_ago: Some(1) }),
                Some(OverdueNumber { number: Some(40), draws_ago: Some(17) }),
            ]),
            number_frequencies: Some(vec![21; 50]),
            star_frequencies: Some(vec![7; 12]),
            ..Default::default()
        }
    }

    #[test]
    fn test_stats_show_literal_values() {
        let mut doc = Document::dashboard();
        update_stats(&mut doc, &snapshot());

        assert_eq!(doc.text_content(ids::TOTAL_DRAWS), "42");
        assert_eq!(doc.text_content(ids::DATA_SOURCE), LABEL_REAL);
        assert_eq!(doc.element(ids::DATA_SOURCE).unwrap().style.color, Some(Tone::Success));
        assert_eq!(doc.text_content(ids::LAST_SCRAPING), "15/03/2024");
    }

    #[test]
    fn test_stats_placeholders() {
        let mut doc = Document::dashboard();
        update_stats(&mut doc, &AnalysisSnapshot::default());

        assert_eq!(doc.text_content(ids::TOTAL_DRAWS), PLACEHOLDER);
        assert_eq!(doc.text_content(ids::DATA_SOURCE), PLACEHOLDER);
        assert_eq!(doc.text_content(ids::LAST_SCRAPING), LABEL_NEVER);
        assert_eq!(doc.element(ids::LAST_SCRAPING).unwrap().style.opacity, Some(0.6));

        let mut simulated = AnalysisSnapshot::default();
        simulated.cache_info = Some(CacheInfo { source: Some("simulated".into()), ..Default::default() });
        update_stats(&mut doc, &simulated);
        assert_eq!(doc.text_content(ids::DATA_SOURCE), LABEL_SIMULATED);
        assert_eq!(doc.element(ids::DATA_SOURCE).unwrap().style.color, Some(Tone::Warning));
    }

    #[test]
    fn test_format_date() {
        assert_eq!(format_date("2024-01-05"), "05/01/2024");
        assert_eq!(format_date("2024-01-05 21:04:00"), "05/01/2024");
        assert_eq!(format_date("2024-01-05T21:04:00.5"), "05/01/2024");
        assert_eq!(format_date("2024-03-15T12:00:00Z"), "15/03/2024");
        assert_eq!(format_date("yesterday"), "yesterday");
    }

    #[test]
    fn test_last_result_tokens() {
        let mut doc = Document::dashboard();
        update_last_result(&mut doc, &snapshot());

        let balls = doc.element(ids::LAST_RESULT_BALLS).unwrap();
        assert_eq!(balls.children.len(), 8);
        assert_eq!(doc.text_content(ids::LAST_RESULT_BALLS), "03 14 15 26 50 + 05 09");
        assert!(balls.children[0].has_class("number"));
        assert!(balls.children[5].has_class("result-plus"));
        assert!(balls.children[7].has_class("star"));
        assert_eq!(balls.children[7].style.animation_delay, Some(6.0 * 0.08));
    }

    #[test]
    fn test_last_result_absent() {
        let mut doc = Document::dashboard();
        update_last_result(&mut doc, &snapshot());
        update_last_result(&mut doc, &AnalysisSnapshot::default());
        let balls = doc.element(ids::LAST_RESULT_BALLS).unwrap();
        assert!(balls.children.is_empty());
        assert_eq!(balls.text, PLACEHOLDER);
    }

    #[test]
    fn test_strategic_keys_fill_three_regions() {
        let mut doc = Document::dashboard();
        let data = snapshot();
        update_strategic_keys(&mut doc, data.strategic_keys.as_ref());

        assert_eq!(doc.text_content("critical-numbers"), "01 02 03 04 05");
        assert_eq!(doc.text_content("critical-stars"), "+ 06 07");
        assert_eq!(doc.text_content("hot-numbers"), "08 09 10 11 12");
        assert_eq!(doc.text_content("hybrid-stars"), "+ 03 04");

        let stars = doc.element("hybrid-stars").unwrap();
        assert!(stars.children[0].has_class("plus-sign"));
        assert!(stars.children[1].has_class("star-ball"));
        assert_eq!(stars.children[1].style.animation_delay, Some(5.0 * 0.1));
    }

    #[test]
    fn test_missing_key_leaves_region_untouched() {
        let mut doc = Document::dashboard();
        let data = snapshot();
        update_strategic_keys(&mut doc, data.strategic_keys.as_ref());

        let partial = StrategicKeys {
            principal: Some(KeyCombination::new([40, 41, 42, 43, 44], [11, 12])),
            ..Default::default()
        };
        update_strategic_keys(&mut doc, Some(&partial));
        update_strategic_keys(&mut doc, None);

        assert_eq!(doc.text_content("critical-numbers"), "40 41 42 43 44");
        assert_eq!(doc.text_content("hot-numbers"), "08 09 10 11 12");
    }

    #[test]
    fn test_empty_key_lists_leave_regions_untouched() {
        let mut doc = Document::dashboard();
        let data = snapshot();
        update_strategic_keys(&mut doc, data.strategic_keys.as_ref());

        let hollow = StrategicKeys {
            principal: Some(KeyCombination::default()),
            ..Default::default()
        };
        update_strategic_keys(&mut doc, Some(&hollow));

        assert_eq!(doc.text_content("critical-numbers"), "01 02 03 04 05");
        assert_eq!(doc.text_content("critical-stars"), "+ 06 07");
    }

    #[test]
    fn test_lists_preserve_order_and_skip_nulls() {
        let mut doc = Document::dashboard();
        let data = snapshot();
        update_top_numbers(&mut doc, data.top_numbers.as_deref());
        update_overdue_numbers(&mut doc, data.overdue_numbers.as_deref());

        let top = doc.element(ids::TOP_NUMBERS_LIST).unwrap();
        assert_eq!(top.children.len(), 2);
        assert_eq!(top.children[0].text_content(), "23 11 vezes");
        assert_eq!(top.children[1].text_content(), "7 9 vezes");
        assert_eq!(top.children[1].style.animation_delay, Some(2.0 * 0.05));

        let overdue = doc.element(ids::OVERDUE_NUMBERS_LIST).unwrap();
        assert_eq!(overdue.children[0].text_content(), "31 1 sorteio");
        assert_eq!(overdue.children[1].text_content(), "40 17 sorteios");
    }

    #[test]
    fn test_list_item_placeholders() {
        let mut doc = Document::dashboard();
        let items = vec![Some(TopNumber::default())];
        update_top_numbers(&mut doc, Some(items.as_slice()));
        assert_eq!(doc.text_content(ids::TOP_NUMBERS_LIST), "N/A 0 vezes");

        assert_eq!(draws_ago_label(None), "0 sorteios");
        assert_eq!(draws_ago_label(Some(2)), "2 sorteios");
    }

    #[test]
    fn test_rendering_twice_does_not_accumulate() {
        let mut doc = Document::dashboard();
        let data = snapshot();
        for _ in 0..2 {
            update_top_numbers(&mut doc, data.top_numbers.as_deref());
            update_trends(&mut doc, &data);
        }
        assert_eq!(doc.element(ids::TOP_NUMBERS_LIST).unwrap().children.len(), 2);
        assert_eq!(doc.element(ids::HOT_TREND_BALLS).unwrap().children.len(), 8);
    }

    #[test]
    fn test_trend_balls() {
        let mut doc = Document::dashboard();
        update_trends(&mut doc, &snapshot());

        let hot = doc.element(ids::HOT_TREND_BALLS).unwrap();
        assert_eq!(hot.text_content(), "08 09 10 11 12 +");
        assert!(hot.children[6].has_class("empty"));
        assert!(hot.children[7].has_class("empty"));

        let stars = doc.element(ids::STARS_TREND_BALLS).unwrap();
        assert_eq!(stars.text_content(), "+ 01 02");
        assert!(stars.children[..5].iter().all(|b| b.has_class("empty")));
    }

    #[test]
    fn test_short_hot_key_pads_with_empty_slots() {
        let mut doc = Document::dashboard();
        let data = AnalysisSnapshot {
            strategic_keys: Some(StrategicKeys {
                secundaria: Some(KeyCombination::new([4, 5], Vec::<u32>::new())),
                ..Default::default()
            }),
            ..Default::default()
        };
        update_trends(&mut doc, &data);
        let hot = doc.element(ids::HOT_TREND_BALLS).unwrap();
        assert_eq!(hot.children.iter().filter(|b| b.has_class("empty")).count(), 5);
    }

    #[test]
    fn test_average_frequency() {
        // 50 numbers drawn 21 times each over 42 draws: 21 / 42 = 50%.
        assert_eq!(average_frequency_percent(&[21; 50], 42), Some(50.0));
        assert_eq!(average_frequency_percent(&[21; 50], 0), None);

        let mut doc = Document::dashboard();
        update_trends(&mut doc, &snapshot());
        assert_eq!(doc.text_content(ids::AVG_FREQUENCY), "50.0% por número");
    }

    #[test]
    fn test_average_frequency_without_keys() {
        let data = AnalysisSnapshot {
            strategic_keys: None,
            ..snapshot()
        };
        let mut doc = Document::dashboard();
        update_trends(&mut doc, &data);
        assert_eq!(doc.text_content(ids::AVG_FREQUENCY), "50.0% por número");
        assert_eq!(doc.text_content(ids::HOT_TREND_BALLS), "");
    }
}
