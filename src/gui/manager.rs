//! GUI manager - eframe application hosting the timer panel

use anyhow::Result;
use eframe::egui;
use std::path::PathBuf;
use tracing::{debug, info};

use crate::config::AppConfig;
use crate::gui::constants::*;
use crate::gui::timer_panel::TimerListPanel;
use crate::types::Timer;

pub struct GuiManager {
    panel: TimerListPanel,
}

impl GuiManager {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        default_timer_name: String,
        base_dir: PathBuf,
        timers: Vec<Timer>,
    ) -> Self {
        Self {
            panel: TimerListPanel::new(base_dir, timers)
                .with_default_timer_name(default_timer_name),
        }
    }
}

impl eframe::App for GuiManager {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::SidePanel::right("timer_buttons")
            .resizable(false)
            .show(ctx, |ui| {
                ui.add_space(SECTION_SPACING);
                let enabled = !self.panel.is_blocked();
                ui.add_enabled_ui(enabled, |ui| self.panel.show_buttons(ui));
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Timers");
            ui.add_space(ITEM_SPACING);
            let enabled = !self.panel.is_blocked();
            ui.add_enabled_ui(enabled, |ui| self.panel.show_table(ui));
        });

        self.panel.show_dialogs(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        let timers = self.panel.timers();
        info!(count = timers.len(), "Timer editor closed");
        for timer in &timers {
            debug!(timer = ?timer, "Final timer");
        }
    }
}

pub fn run_gui(config: &AppConfig, base_dir: PathBuf, timers: Vec<Timer>) -> Result<()> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([config.window_width as f32, config.window_height as f32])
            .with_title("Media Timers"),
        ..Default::default()
    };

    let default_timer_name = config.default_timer_name.clone();
    eframe::run_native(
        "Media Timers",
        options,
        Box::new(move |cc| {
            Ok(Box::new(GuiManager::new(cc, default_timer_name, base_dir, timers)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run egui application: {}", e))?;

    Ok(())
}
