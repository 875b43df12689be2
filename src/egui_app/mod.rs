//! Desktop viewer: selector chains, the report controller and the egui renderer.

pub mod controller;
pub mod selector;
pub mod state;
pub mod ui;
