// src/dashboard/theme.rs
use eframe::egui::Color32;

/// Storage key of the persisted theme.
pub const THEME_KEY: &str = "theme";

/// Tick color used when the theme leaves `--text-primary` empty.
pub const FALLBACK_TEXT_COLOR: Color32 = Color32::from_rgb(0xe4, 0xe7, 0xec);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    /// Anything other than a stored `"light"` starts in dark mode.
    pub fn from_stored(value: Option<&str>) -> Self {
        match value {
            Some("light") => Theme::Light,
            _ => Theme::Dark,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }

    /// Glyph of the toggle button: the mode a click switches to.
    pub fn icon(self) -> &'static str {
        match self {
            Theme::Dark => "☀",
            Theme::Light => "🌙",
        }
    }

    /// Value of a theme custom property, empty when the theme does not define it.
    pub fn property(self, name: &str) -> &'static str {
        let table: &[(&str, &'static str)] = match self {
            Theme::Dark => &[
                ("--bg-primary", "#0f1419"),
                ("--bg-card", "#1a1f2e"),
                ("--text-primary", "#e4e7ec"),
                ("--text-secondary", "#9aa4b2"),
                ("--accent", "#2563eb"),
                ("--star", "#d97706"),
                ("--success", "#10b981"),
                ("--warning", "#f59e0b"),
                ("--error", "#ef4444"),
            ],
            Theme::Light => &[
                ("--bg-primary", "#f5f7fa"),
                ("--bg-card", "#ffffff"),
                ("--text-primary", "#1a202c"),
                ("--text-secondary", "#4a5568"),
                ("--accent", "#1e40af"),
                ("--star", "#b45309"),
                ("--success", "#059669"),
                ("--warning", "#d97706"),
                ("--error", "#dc2626"),
            ],
        };

        table
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, value)| *value)
            .unwrap_or("")
    }

    pub fn color(self, name: &str) -> Option<Color32> {
        parse_hex_color(self.property(name).trim())
    }

    /// Chart tick color, read from `--text-primary`.
    pub fn text_color(self) -> Color32 {
        self.color("--text-primary").unwrap_or(FALLBACK_TEXT_COLOR)
    }
}

/// Parses `#rrggbb`.
pub fn parse_hex_color(value: &str) -> Option<Color32> {
    let hex = value.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?))
}
