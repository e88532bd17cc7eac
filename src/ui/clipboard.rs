// src/ui/clipboard.rs
use eframe::egui;

use crate::dom::Clipboard;
use crate::error::ClipboardError;

/// Writes through egui's platform output; the text reaches the system
/// clipboard at the end of the frame.
pub struct EguiClipboard {
    ctx: Option<egui::Context>,
}

impl EguiClipboard {
    pub fn new(ctx: egui::Context) -> Self {
        Self { ctx: Some(ctx) }
    }

    /// A clipboard with no window behind it; every write fails.
    pub fn detached() -> Self {
        Self { ctx: None }
    }
}

impl Clipboard for EguiClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let ctx = self
            .ctx
            .as_ref()
            .ok_or_else(|| ClipboardError("no window to copy from".to_string()))?;
        ctx.output_mut(|o| o.copied_text = text.to_string());
        Ok(())
    }
}
