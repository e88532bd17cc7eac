// src/dom/mod.rs
//! Retained element tree the render functions write into and the egui painter
//! reads from. Elements are addressed by id, like a page's `getElementById`.

use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::time::Instant;

use crate::error::ClipboardError;
use crate::model::KeyKind;

pub mod page;

pub use page::ids;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Success,
    Warning,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Style {
    pub color: Option<Tone>,
    pub opacity: Option<f32>,
    /// Seconds after the parent was rendered before this element is revealed.
    pub animation_delay: Option<f32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Element {
    pub text: String,
    pub classes: BTreeSet<String>,
    pub children: Vec<Element>,
    pub style: Style,
    pub disabled: bool,
}

impl Element {
    /// `class` may hold several space-separated names.
    pub fn with_class(class: &str) -> Self {
        Self {
            classes: class.split_whitespace().map(str::to_string).collect(),
            ..Default::default()
        }
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = text.into();
        self
    }

    pub fn delay(mut self, seconds: f32) -> Self {
        self.style.animation_delay = Some(seconds);
        self
    }

    pub fn child(mut self, child: Element) -> Self {
        self.children.push(child);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn add_class(&mut self, class: &str) {
        self.classes.insert(class.to_string());
    }

    pub fn remove_class(&mut self, class: &str) {
        self.classes.remove(class);
    }

    /// Own text followed by the text of every descendant, space separated.
    pub fn text_content(&self) -> String {
        let mut parts = Vec::new();
        self.collect_text(&mut parts);
        parts.join(" ")
    }

    fn collect_text<'a>(&'a self, parts: &mut Vec<&'a str>) {
        if !self.text.is_empty() {
            parts.push(&self.text);
        }
        for child in &self.children {
            child.collect_text(parts);
        }
    }
}

/// What a click on a bound element asks the dashboard to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    ToggleTheme,
    Refresh,
    CopyKey(KeyKind),
}

#[derive(Debug, Default)]
pub struct Document {
    elements: BTreeMap<String, Element>,
    listeners: HashMap<String, Command>,
    rendered_at: HashMap<String, Instant>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, id: &str, element: Element) {
        self.elements.insert(id.to_string(), element);
    }

    pub fn element(&self, id: &str) -> Option<&Element> {
        self.elements.get(id)
    }

    pub fn element_mut(&mut self, id: &str) -> Option<&mut Element> {
        self.elements.get_mut(id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.elements.keys().map(String::as_str)
    }

    /// Replaces all content of `id` with plain text.
    pub fn set_text(&mut self, id: &str, text: impl Into<String>) {
        if let Some(element) = self.elements.get_mut(id) {
            element.text = text.into();
            element.children.clear();
            self.rendered_at.insert(id.to_string(), Instant::now());
        }
    }

    /// Replaces all content of `id` with `children`.
    pub fn set_children(&mut self, id: &str, children: Vec<Element>) {
        if let Some(element) = self.elements.get_mut(id) {
            element.text.clear();
            element.children = children;
            self.rendered_at.insert(id.to_string(), Instant::now());
        }
    }

    pub fn append_child(&mut self, id: &str, child: Element) {
        if let Some(element) = self.elements.get_mut(id) {
            element.children.push(child);
        }
    }

    pub fn text_content(&self, id: &str) -> String {
        self.element(id).map(Element::text_content).unwrap_or_default()
    }

    pub fn add_class(&mut self, id: &str, class: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.add_class(class);
        }
    }

    pub fn remove_class(&mut self, id: &str, class: &str) {
        if let Some(element) = self.elements.get_mut(id) {
            element.remove_class(class);
        }
    }

    /// Ids of every element carrying `class`, in id order.
    pub fn ids_with_class(&self, class: &str) -> Vec<String> {
        self.elements
            .iter()
            .filter(|(_, element)| element.has_class(class))
            .map(|(id, _)| id.clone())
            .collect()
    }

    pub fn set_disabled(&mut self, id: &str, disabled: bool) {
        if let Some(element) = self.elements.get_mut(id) {
            element.disabled = disabled;
        }
    }

    pub fn set_style(&mut self, id: &str, style: Style) {
        if let Some(element) = self.elements.get_mut(id) {
            element.style = style;
        }
    }

    pub fn rendered_at(&self, id: &str) -> Option<Instant> {
        self.rendered_at.get(id).copied()
    }

    pub fn add_click_listener(&mut self, id: &str, command: Command) {
        self.listeners.insert(id.to_string(), command);
    }

    /// Command bound to `id`, unless the element is disabled.
    pub fn click(&self, id: &str) -> Option<Command> {
        let element = self.elements.get(id)?;
        if element.disabled {
            return None;
        }
        self.listeners.get(id).copied()
    }
}

/// The system clipboard.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}
