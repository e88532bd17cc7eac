// src/model/mod.rs
pub mod simulated;
pub mod snapshot;

// Re-export commonly used types
pub use simulated::{simulated_snapshot, SIMULATED_TOTAL_DRAWS};
pub use snapshot::{
    AnalysisSnapshot, CacheInfo, DataSource, KeyCombination, KeyKind, OverdueNumber,
    StrategicKeys, TopNumber, UpdateResponse,
};
