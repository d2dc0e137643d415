//! Timer list panel: the table, its selection, and the command buttons

use eframe::egui;
use std::cell::Cell;
use std::collections::BTreeSet;
use std::path::PathBuf;
use std::rc::Rc;
use tracing::{debug, info, warn};

use crate::gui::cell_editor::{CellAction, CellEditor};
use crate::gui::components::EditOutcome;
use crate::gui::components::path_cell::{self, SharedDirectory};
use crate::gui::constants::*;
use crate::timer_model::{CellValue, TimerTableModel};
use crate::types::{DEFAULT_TIMER_NAME, Timer};

/// Destructive command waiting for the user's answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    RemoveSelected(Vec<usize>),
    RemoveAll(usize),
}

impl Confirmation {
    pub fn message(&self) -> String {
        match self {
            Confirmation::RemoveSelected(rows) => {
                format!("Remove {} selected timer(s)?", rows.len())
            }
            Confirmation::RemoveAll(count) => format!("Remove all {count} timer(s)?"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmResponse {
    Proceed,
    Cancel,
}

struct ActiveEdit {
    row: usize,
    column: usize,
    editor: CellEditor,
}

/// Interaction collected while drawing the grid, applied afterwards
enum TableAction {
    Select { row: usize, modifiers: egui::Modifiers },
    StartEdit { row: usize, column: usize },
    Store { row: usize, column: usize, value: CellValue },
    CancelEdit,
}

pub struct TimerListPanel {
    model: TimerTableModel,
    selection: BTreeSet<usize>,
    anchor: Option<usize>,
    editing: Option<ActiveEdit>,
    pending: Option<Confirmation>,
    last_dir: SharedDirectory,
    default_timer_name: String,
    /// Set by the model listener, consumed by `sync_with_model`
    refresh_requested: Rc<Cell<bool>>,
    known_rows: usize,
}

impl TimerListPanel {
    /// Build the panel with `timers` sorted by their natural order
    pub fn new(base_dir: PathBuf, mut timers: Vec<Timer>) -> Self {
        timers.sort();
        let known_rows = timers.len();
        let mut model = TimerTableModel::new(timers);

        let refresh_requested = Rc::new(Cell::new(false));
        let flag = Rc::clone(&refresh_requested);
        model.add_listener(move || flag.set(true));

        info!(count = known_rows, base_dir = %base_dir.display(), "Timer panel created");

        Self {
            model,
            selection: BTreeSet::new(),
            anchor: None,
            editing: None,
            pending: None,
            last_dir: path_cell::shared_directory(base_dir),
            default_timer_name: DEFAULT_TIMER_NAME.to_string(),
            refresh_requested,
            known_rows,
        }
    }

    pub fn with_default_timer_name(mut self, name: impl Into<String>) -> Self {
        self.default_timer_name = name.into();
        self
    }

    /// Copy of the current timers in table order
    pub fn timers(&self) -> Vec<Timer> {
        self.model.timers()
    }

    pub fn row_count(&self) -> usize {
        self.model.row_count()
    }

    pub fn last_directory(&self) -> PathBuf {
        self.last_dir.borrow().clone()
    }

    /// Bring view state back in line after the model reported a change
    fn sync_with_model(&mut self) {
        if !self.refresh_requested.replace(false) {
            return;
        }

        let rows = self.model.row_count();
        if rows != self.known_rows {
            debug!(before = self.known_rows, after = rows, "Row count changed, clearing selection");
            self.selection.clear();
            self.anchor = None;
            self.known_rows = rows;
        }
        if self.editing.as_ref().is_some_and(|edit| edit.row >= rows) {
            self.editing = None;
        }
    }

    // ---------------------------------------------------------------------
    // Selection
    // ---------------------------------------------------------------------

    pub fn selected_rows(&self) -> Vec<usize> {
        self.selection.iter().copied().collect()
    }

    /// Make `row` the only selected row
    pub fn select_row(&mut self, row: usize) {
        if row >= self.row_count() {
            return;
        }
        self.selection.clear();
        self.selection.insert(row);
        self.anchor = Some(row);
    }

    pub fn toggle_row(&mut self, row: usize) {
        if row >= self.row_count() {
            return;
        }
        if !self.selection.remove(&row) {
            self.selection.insert(row);
        }
        self.anchor = Some(row);
    }

    /// Select every row between the anchor and `row`
    pub fn extend_selection(&mut self, row: usize) {
        if row >= self.row_count() {
            return;
        }
        let anchor = self.anchor.unwrap_or(row);
        let (low, high) = if anchor <= row { (anchor, row) } else { (row, anchor) };
        self.selection = (low..=high).collect();
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
        self.anchor = None;
    }

    pub fn can_remove(&self) -> bool {
        !self.selection.is_empty()
    }

    pub fn can_remove_all(&self) -> bool {
        self.row_count() > 0
    }

    /// The confirmation dialog is modal: nothing else runs while it is open
    pub fn is_blocked(&self) -> bool {
        self.pending.is_some()
    }

    fn reject_while_blocked(&self, command: &str) -> bool {
        if let Some(pending) = &self.pending {
            warn!(command = command, pending = ?pending, "Ignoring command while a confirmation is open");
            return true;
        }
        false
    }

    // ---------------------------------------------------------------------
    // Commands
    // ---------------------------------------------------------------------

    pub fn add(&mut self) {
        if self.reject_while_blocked("add") {
            return;
        }
        self.model.add_timer(Timer::new(self.default_timer_name.clone()));
        self.sync_with_model();
    }

    /// Ask to remove the selected rows
    pub fn request_remove(&mut self) {
        if self.reject_while_blocked("remove") {
            return;
        }
        if !self.can_remove() {
            warn!("Remove requested with no selected rows");
            return;
        }
        self.pending = Some(Confirmation::RemoveSelected(self.selected_rows()));
    }

    pub fn request_remove_all(&mut self) {
        if self.reject_while_blocked("remove all") {
            return;
        }
        if !self.can_remove_all() {
            warn!("Remove all requested on an empty table");
            return;
        }
        self.pending = Some(Confirmation::RemoveAll(self.row_count()));
    }

    pub fn pending_confirmation(&self) -> Option<&Confirmation> {
        self.pending.as_ref()
    }

    /// Resolve the pending confirmation dialog
    pub fn respond(&mut self, response: ConfirmResponse) {
        let Some(confirmation) = self.pending.take() else {
            return;
        };
        if response == ConfirmResponse::Cancel {
            debug!(confirmation = ?confirmation, "Confirmation cancelled");
            return;
        }

        self.editing = None;
        match confirmation {
            Confirmation::RemoveSelected(rows) => self.model.remove_rows(&rows),
            Confirmation::RemoveAll(_) => self.model.clear(),
        }
        self.clear_selection();
        self.sync_with_model();
    }

    pub fn enable_all(&mut self) {
        if self.reject_while_blocked("enable all") {
            return;
        }
        self.model.enable_all();
        self.sync_with_model();
    }

    pub fn disable_all(&mut self) {
        if self.reject_while_blocked("disable all") {
            return;
        }
        self.model.disable_all();
        self.sync_with_model();
    }

    /// Open the in-place editor for a cell; flag cells have none
    pub fn start_edit(&mut self, row: usize, column: usize) {
        if self.reject_while_blocked("edit") {
            return;
        }
        if row >= self.row_count() || !self.model.is_cell_editable(row, column) {
            return;
        }
        let value = self.model.value_at(row, column);
        self.editing = CellEditor::for_value(&value, &self.last_dir)
            .map(|editor| ActiveEdit { row, column, editor });
    }

    pub fn is_editing(&self, row: usize, column: usize) -> bool {
        self.editing
            .as_ref()
            .is_some_and(|edit| edit.row == row && edit.column == column)
    }

    /// Store a value for a cell and close its editor
    pub fn store(&mut self, row: usize, column: usize, value: CellValue) {
        if self.reject_while_blocked("store") {
            return;
        }
        if self.is_editing(row, column) {
            self.editing = None;
        }
        self.model.set_value_at(value, row, column);
        self.sync_with_model();
    }

    fn apply(&mut self, action: TableAction) {
        if self.reject_while_blocked("table interaction") {
            return;
        }
        match action {
            TableAction::Select { row, modifiers } => {
                if modifiers.shift {
                    self.extend_selection(row);
                } else if modifiers.command {
                    self.toggle_row(row);
                } else {
                    self.select_row(row);
                }
            }
            TableAction::StartEdit { row, column } => self.start_edit(row, column),
            TableAction::Store { row, column, value } => self.store(row, column, value),
            TableAction::CancelEdit => self.editing = None,
        }
    }

    // ---------------------------------------------------------------------
    // Drawing
    // ---------------------------------------------------------------------

    pub fn show_table(&mut self, ui: &mut egui::Ui) {
        self.sync_with_model();

        let mut actions = Vec::new();
        let columns = self.model.column_count();

        egui::ScrollArea::both().auto_shrink([false, false]).show(ui, |ui| {
            egui::Grid::new("timer_table")
                .num_columns(columns + 1)
                .striped(true)
                .spacing([SECTION_SPACING, ITEM_SPACING])
                .show(ui, |ui| {
                    ui.label(egui::RichText::new("#").strong());
                    for column in 0..columns {
                        ui.label(egui::RichText::new(self.model.column_name(column)).strong());
                    }
                    ui.end_row();

                    for row in 0..self.model.row_count() {
                        let selected = self.selection.contains(&row);
                        if ui.selectable_label(selected, format!("{}", row + 1)).clicked() {
                            let modifiers = ui.input(|i| i.modifiers);
                            actions.push(TableAction::Select { row, modifiers });
                        }

                        for column in 0..columns {
                            match self.editing.as_mut() {
                                Some(edit) if edit.row == row && edit.column == column => {
                                    match edit.editor.edit(ui) {
                                        EditOutcome::Editing => {}
                                        EditOutcome::Commit(value) => {
                                            actions.push(TableAction::Store { row, column, value })
                                        }
                                        EditOutcome::Cancel => actions.push(TableAction::CancelEdit),
                                    }
                                }
                                _ => {
                                    let value = self.model.value_at(row, column);
                                    match CellEditor::render(ui, &value) {
                                        CellAction::None => {}
                                        CellAction::Edit => {
                                            actions.push(TableAction::StartEdit { row, column })
                                        }
                                        CellAction::Store(value) => {
                                            actions.push(TableAction::Store { row, column, value })
                                        }
                                    }
                                }
                            }
                        }
                        ui.end_row();
                    }
                });

            if self.model.row_count() == 0 {
                ui.add_space(SECTION_SPACING);
                ui.label(egui::RichText::new("No timers. Click \"Add\" to create one.")
                    .italics()
                    .weak());
            }
        });

        for action in actions {
            self.apply(action);
        }
    }

    pub fn show_buttons(&mut self, ui: &mut egui::Ui) {
        self.sync_with_model();

        let size = [BUTTON_WIDTH, 0.0];
        ui.vertical(|ui| {
            if ui.add(egui::Button::new("Add").min_size(size.into())).clicked() {
                self.add();
            }
            if ui
                .add_enabled(self.can_remove(), egui::Button::new("Remove").min_size(size.into()))
                .clicked()
            {
                self.request_remove();
            }
            if ui
                .add_enabled(self.can_remove_all(), egui::Button::new("Remove All").min_size(size.into()))
                .clicked()
            {
                self.request_remove_all();
            }

            ui.add_space(SECTION_SPACING);

            if ui.add(egui::Button::new("Enable All").min_size(size.into())).clicked() {
                self.enable_all();
            }
            if ui.add(egui::Button::new("Disable All").min_size(size.into())).clicked() {
                self.disable_all();
            }
        });
    }

    /// Draw the pending confirmation, if any
    pub fn show_dialogs(&mut self, ctx: &egui::Context) {
        let Some(confirmation) = self.pending.as_ref() else {
            return;
        };
        let message = confirmation.message();

        let mut response = None;
        let modal = egui::Modal::new(egui::Id::new("timer_confirmation")).show(ctx, |ui| {
            ui.label(egui::RichText::new("Confirm").strong());
            ui.add_space(ITEM_SPACING);
            ui.label(message);
            ui.add_space(ITEM_SPACING);
            ui.horizontal(|ui| {
                if ui.button("Proceed").clicked() {
                    response = Some(ConfirmResponse::Proceed);
                }
                if ui.button("Cancel").clicked() {
                    response = Some(ConfirmResponse::Cancel);
                }
            });
        });
        // Escape or a click on the backdrop dismisses the dialog
        if response.is_none() && modal.should_close() {
            response = Some(ConfirmResponse::Cancel);
        }

        if let Some(response) = response {
            self.respond(response);
        }
    }
}
