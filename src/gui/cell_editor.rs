//! Per-kind rendering and editing of timer table cells

use eframe::egui;
use tracing::debug;

use crate::gui::components::path_cell::{self, PathEditor, SharedDirectory};
use crate::gui::components::time_cell::{self, TimeEditor};
use crate::gui::components::EditOutcome;
use crate::gui::constants::*;
use crate::timer_model::CellValue;

/// What a rendered (not currently edited) cell asks for
pub enum CellAction {
    None,
    /// Start the in-place editor for this cell
    Edit,
    /// Store a value directly (flag cells toggle without an editor)
    Store(CellValue),
}

/// Editor state for the one cell being edited, tagged by column kind
pub enum CellEditor {
    Text { text: String, focus_requested: bool },
    Time(TimeEditor),
    Path(PathEditor),
}

impl CellEditor {
    /// Build the editor for a cell, `None` for flags which toggle in place
    pub fn for_value(value: &CellValue, last_dir: &SharedDirectory) -> Option<Self> {
        match value {
            CellValue::Flag(_) => None,
            CellValue::Text(text) => Some(CellEditor::Text {
                text: text.clone(),
                focus_requested: false,
            }),
            CellValue::Time(time) => Some(CellEditor::Time(TimeEditor::new(*time))),
            CellValue::Path(path) => Some(CellEditor::Path(PathEditor::new(
                path.as_deref(),
                SharedDirectory::clone(last_dir),
            ))),
        }
    }

    /// Draw a cell that is not being edited
    pub fn render(ui: &mut egui::Ui, value: &CellValue) -> CellAction {
        match value {
            CellValue::Flag(enabled) => {
                let mut checked = *enabled;
                if ui.checkbox(&mut checked, "").changed() {
                    CellAction::Store(CellValue::Flag(checked))
                } else {
                    CellAction::None
                }
            }
            CellValue::Text(text) => {
                clicked_to_edit(ui.add(egui::Label::new(text).sense(egui::Sense::click())))
            }
            CellValue::Time(time) => {
                let text = time_cell::render(*time);
                let label = if text.is_empty() { "--:--:--".to_string() } else { text };
                clicked_to_edit(ui.add(egui::Label::new(label).sense(egui::Sense::click())))
            }
            CellValue::Path(path) => clicked_to_edit(path_cell::render(ui, path.as_deref())),
        }
    }

    /// Draw the active editor for one frame
    pub fn edit(&mut self, ui: &mut egui::Ui) -> EditOutcome<CellValue> {
        match self {
            CellEditor::Text { text, focus_requested } => {
                let response = ui.add(
                    egui::TextEdit::singleline(text).desired_width(NAME_FIELD_WIDTH),
                );
                if !*focus_requested {
                    response.request_focus();
                    *focus_requested = true;
                }
                if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                    EditOutcome::Cancel
                } else if response.lost_focus() {
                    debug!(text = %text, "Committing text edit");
                    EditOutcome::Commit(CellValue::Text(text.clone()))
                } else {
                    EditOutcome::Editing
                }
            }
            CellEditor::Time(editor) => editor.ui(ui).map(CellValue::Time),
            CellEditor::Path(editor) => editor.ui(ui).map(CellValue::Path),
        }
    }
}

fn clicked_to_edit(response: egui::Response) -> CellAction {
    if response.clicked() {
        CellAction::Edit
    } else {
        CellAction::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveTime;
    use std::path::PathBuf;

    fn last_dir() -> SharedDirectory {
        path_cell::shared_directory(PathBuf::from("."))
    }

    #[test]
    fn test_flag_has_no_editor() {
        assert!(CellEditor::for_value(&CellValue::Flag(true), &last_dir()).is_none());
    }

    #[test]
    fn test_editor_variant_matches_value() {
        let dir = last_dir();
        let text = CellEditor::for_value(&CellValue::Text("x".to_string()), &dir);
        assert!(matches!(text, Some(CellEditor::Text { .. })));

        let time = CellEditor::for_value(&CellValue::Time(NaiveTime::from_hms_opt(1, 0, 0)), &dir);
        assert!(matches!(time, Some(CellEditor::Time(_))));

        let path = CellEditor::for_value(&CellValue::Path(None), &dir);
        assert!(matches!(path, Some(CellEditor::Path(_))));
    }

    #[test]
    fn test_path_editor_shares_directory() {
        let dir = last_dir();
        let _editor = CellEditor::for_value(&CellValue::Path(None), &dir).unwrap();
        assert_eq!(std::rc::Rc::strong_count(&dir), 2);
    }
}
