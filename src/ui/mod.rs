// src/ui/mod.rs
pub mod charts;
pub mod clipboard;
pub mod dashboard;
pub mod toasts;
pub mod widgets;

pub use clipboard::EguiClipboard;
pub use dashboard::show_dashboard;
pub use toasts::show_toasts;
pub use widgets::Palette;
