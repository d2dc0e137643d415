//! Time-of-day cell: `HH:MM:SS` renderer and masked editor

use chrono::NaiveTime;
use eframe::egui;
use tracing::debug;

use super::EditOutcome;
use crate::gui::constants::*;

pub const TIME_FORMAT: &str = "%H:%M:%S";

/// Longest accepted input, "HH:MM:SS"
const MASK_LEN: usize = 8;

/// Format a time for display, unset renders as empty text
pub fn render(time: Option<NaiveTime>) -> String {
    time.map(|t| t.format(TIME_FORMAT).to_string())
        .unwrap_or_default()
}

/// Keep only characters that can appear in a time, up to the mask length
fn mask(input: &str) -> String {
    input
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ':')
        .take(MASK_LEN)
        .collect()
}

/// Outcome of committing the editor text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeCommit {
    Value(Option<NaiveTime>),
    /// Text did not parse, nothing is stored
    Rejected,
}

pub struct TimeEditor {
    text: String,
    focus_requested: bool,
}

impl TimeEditor {
    pub fn new(initial: Option<NaiveTime>) -> Self {
        Self {
            text: render(initial),
            focus_requested: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = mask(text);
    }

    /// Parse the current text; blank means unset
    pub fn commit(&self) -> TimeCommit {
        let text = self.text.trim();
        if text.is_empty() {
            return TimeCommit::Value(None);
        }
        match NaiveTime::parse_from_str(text, TIME_FORMAT) {
            Ok(time) => TimeCommit::Value(Some(time)),
            Err(e) => {
                debug!(text = %text, error = %e, "Rejected time edit");
                TimeCommit::Rejected
            }
        }
    }

    /// Enter in the field: store the parsed time, or keep editing when the
    /// text is malformed
    pub fn on_enter(&self) -> EditOutcome<Option<NaiveTime>> {
        match self.commit() {
            TimeCommit::Value(time) => EditOutcome::Commit(time),
            TimeCommit::Rejected => EditOutcome::Editing,
        }
    }

    /// The clear button always stores an unset time
    pub fn on_clear(&self) -> EditOutcome<Option<NaiveTime>> {
        EditOutcome::Commit(None)
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) -> EditOutcome<Option<NaiveTime>> {
        let mut outcome = EditOutcome::Editing;

        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.text)
                    .desired_width(TIME_FIELD_WIDTH)
                    .hint_text("HH:MM:SS"),
            );
            if !self.focus_requested {
                response.request_focus();
                self.focus_requested = true;
            }
            if response.changed() {
                self.text = mask(&self.text);
            }

            if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                outcome = EditOutcome::Cancel;
            } else if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                outcome = self.on_enter();
                if outcome == EditOutcome::Editing {
                    response.request_focus();
                }
            }

            if ui.small_button("✖").on_hover_text("Clear").clicked() {
                outcome = self.on_clear();
            }
        });

        outcome
    }
}
