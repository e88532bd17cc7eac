// src/model/snapshot.rs
use serde::{Deserialize, Deserializer, Serialize};

/// One complete analysis result as served by `/api/analysis`.
///
/// Every field is optional on the wire: render functions write placeholders
/// for whatever is missing instead of rejecting the snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisSnapshot {
    #[serde(default)]
    pub total_draws: Option<u64>,
    #[serde(default)]
    pub last_draw_date: Option<String>,
    #[serde(default)]
    pub last_update: Option<String>,
    #[serde(default)]
    pub last_draw_numbers: Option<Vec<u32>>,
    #[serde(default)]
    pub last_draw_stars: Option<Vec<u32>>,
    #[serde(default)]
    pub cache_info: Option<CacheInfo>,
    #[serde(default)]
    pub strategic_keys: Option<StrategicKeys>,
    #[serde(default)]
    pub top_numbers: Option<Vec<Option<TopNumber>>>,
    #[serde(default)]
    pub overdue_numbers: Option<Vec<Option<OverdueNumber>>>,
    #[serde(default)]
    pub number_frequencies: Option<Vec<u32>>,
    #[serde(default)]
    pub star_frequencies: Option<Vec<u32>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheInfo {
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub last_scraping: Option<String>,
    #[serde(default)]
    pub cache_timestamp: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Scraping,
    Simulated,
}

impl CacheInfo {
    /// Anything other than `"scraping"` counts as simulated data.
    pub fn data_source(&self) -> Option<DataSource> {
        match self.source.as_deref() {
            None | Some("") => None,
            Some("scraping") => Some(DataSource::Scraping),
            Some(_) => Some(DataSource::Simulated),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrategicKeys {
    #[serde(default)]
    pub principal: Option<KeyCombination>,
    #[serde(default)]
    pub secundaria: Option<KeyCombination>,
    #[serde(default)]
    pub hibrida: Option<KeyCombination>,
}

impl StrategicKeys {
    pub fn get(&self, kind: KeyKind) -> Option<&KeyCombination> {
        match kind {
            KeyKind::Critical => self.principal.as_ref(),
            KeyKind::Hot => self.secundaria.as_ref(),
            KeyKind::Hybrid => self.hibrida.as_ref(),
        }
    }
}

/// Five numbers plus two stars.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct KeyCombination {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub numbers: Vec<u32>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub stars: Vec<u32>,
}

/// `null` reads as an empty list, like a missing field.
fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u32>, D::Error> {
    Ok(Option::<Vec<u32>>::deserialize(deserializer)?.unwrap_or_default())
}

impl KeyCombination {
    pub fn new(numbers: impl Into<Vec<u32>>, stars: impl Into<Vec<u32>>) -> Self {
        Self {
            numbers: numbers.into(),
            stars: stars.into(),
        }
    }

    /// A key with no numbers or no stars has nothing worth copying.
    pub fn is_complete(&self) -> bool {
        !self.numbers.is_empty() && !self.stars.is_empty()
    }

    /// Clipboard form, e.g. `"01 02 03 04 05 + 06 07"`.
    pub fn to_clipboard_text(&self) -> String {
        format!("{} + {}", join_padded(&self.numbers), join_padded(&self.stars))
    }
}

/// The three strategic keys, named after the copy buttons that select them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyKind {
    /// `principal`: overdue, critical numbers.
    Critical,
    /// `secundaria`: recently hot numbers.
    Hot,
    /// `hibrida`: a mix of both.
    Hybrid,
}

impl KeyKind {
    pub const ALL: [KeyKind; 3] = [KeyKind::Critical, KeyKind::Hot, KeyKind::Hybrid];

    pub fn as_str(self) -> &'static str {
        match self {
            KeyKind::Critical => "critical",
            KeyKind::Hot => "hot",
            KeyKind::Hybrid => "hybrid",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            KeyKind::Critical => "Chave Principal",
            KeyKind::Hot => "Chave Quente",
            KeyKind::Hybrid => "Chave Híbrida",
        }
    }
}

impl std::str::FromStr for KeyKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "critical" => Ok(KeyKind::Critical),
            "hot" => Ok(KeyKind::Hot),
            "hybrid" => Ok(KeyKind::Hybrid),
            other => Err(format!("unknown key type: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopNumber {
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default)]
    pub frequency: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OverdueNumber {
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default)]
    pub draws_ago: Option<u32>,
}

/// Body of `/api/update`. Only `status == "success"` means fresh data is ready.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateResponse {
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub total_draws: Option<u64>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl UpdateResponse {
    pub fn is_success(&self) -> bool {
        self.status == "success"
    }
}

pub fn pad2(value: u32) -> String {
    format!("{:02}", value)
}

fn join_padded(values: &[u32]) -> String {
    values.iter().map(|v| pad2(*v)).collect::<Vec<_>>().join(" ")
}
