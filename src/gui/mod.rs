//! GUI module - egui-based timer list editor

mod cell_editor;
mod components;
mod constants;
mod manager;
mod timer_panel;

pub use manager::run_gui;
