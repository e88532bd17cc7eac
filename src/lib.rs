// src/lib.rs
//! EuroMilhões statistics dashboard: backend client, controller, element tree
//! and the egui painter that shows it.

pub mod api;
pub mod app;
pub mod dashboard;
pub mod dom;
pub mod error;
pub mod file;
pub mod model;
pub mod settings;
pub mod ui;
