// src/model/simulated.rs
use chrono::{SecondsFormat, Utc};
use rand::Rng;

use super::snapshot::{AnalysisSnapshot, KeyCombination, OverdueNumber, StrategicKeys, TopNumber};

pub const SIMULATED_TOTAL_DRAWS: u64 = 1868;

const TOP_NUMBERS: [(u32, u32); 5] = [(50, 187), (19, 185), (44, 182), (37, 179), (33, 178)];
const OVERDUE_NUMBERS: [(u32, u32); 5] = [(26, 50), (4, 45), (18, 42), (29, 38), (12, 35)];

/// Fallback data shown when the backend cannot be reached. The shape is fixed;
/// only the frequency arrays are randomized.
pub fn simulated_snapshot() -> AnalysisSnapshot {
    simulated_snapshot_with(&mut rand::thread_rng())
}

pub fn simulated_snapshot_with<R: Rng + ?Sized>(rng: &mut R) -> AnalysisSnapshot {
    let now = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);

    AnalysisSnapshot {
        total_draws: Some(SIMULATED_TOTAL_DRAWS),
        last_draw_date: Some(now.clone()),
        last_update: Some(now),
        last_draw_numbers: Some(vec![6, 11, 17, 35, 44]),
        last_draw_stars: Some(vec![3, 7]),
        cache_info: None,
        strategic_keys: Some(StrategicKeys {
            principal: Some(KeyCombination::new([19, 23, 28, 34, 44], [2, 11])),
            secundaria: Some(KeyCombination::new([1, 3, 4, 21, 42], [1, 3])),
            hibrida: Some(KeyCombination::new([6, 8, 10, 29, 50], [4, 10])),
        }),
        top_numbers: Some(
            TOP_NUMBERS
                .iter()
                .map(|&(number, frequency)| Some(TopNumber {
                    number: Some(number),
                    frequency: Some(frequency),
                }))
                .collect(),
        ),
        overdue_numbers: Some(
            OVERDUE_NUMBERS
                .iter()
                .map(|&(number, draws_ago)| Some(OverdueNumber {
                    number: Some(number),
                    draws_ago: Some(draws_ago),
                }))
                .collect(),
        ),
        number_frequencies: Some((0..50).map(|_| rng.gen_range(100..200)).collect()),
        star_frequencies: Some((0..12).map(|_| rng.gen_range(50..100)).collect()),
    }
}
