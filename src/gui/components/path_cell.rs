//! Resource cell: file name renderer and path editor with a browse dialog

use eframe::egui;
use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;
use tracing::{debug, info};

use super::EditOutcome;
use crate::gui::constants::*;

pub const DIALOG_TITLE: &str = "Select media resource";

/// Last folder browsed from any resource cell of one table
pub type SharedDirectory = Rc<RefCell<PathBuf>>;

pub fn shared_directory(start: PathBuf) -> SharedDirectory {
    Rc::new(RefCell::new(start))
}

/// File name without its directory, empty when unset
pub fn display_name(path: Option<&Path>) -> String {
    match path {
        Some(path) => path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned()),
        None => String::new(),
    }
}

/// A resource is a problem when unset or not an existing regular file
pub fn is_problem(path: Option<&Path>) -> bool {
    path.is_none_or(|path| !path.is_file())
}

pub fn render(ui: &mut egui::Ui, path: Option<&Path>) -> egui::Response {
    let name = display_name(path);
    let response = if is_problem(path) {
        let text = if name.is_empty() { "(none)".to_string() } else { name };
        let color = ui.visuals().warn_fg_color;
        ui.add(egui::Label::new(egui::RichText::new(text).color(color)).sense(egui::Sense::click()))
    } else {
        ui.add(egui::Label::new(name).sense(egui::Sense::click()))
    };

    match path {
        Some(path) => response.on_hover_text(path.display().to_string()),
        None => response,
    }
}

pub struct PathEditor {
    text: String,
    last_dir: SharedDirectory,
    focus_requested: bool,
}

impl PathEditor {
    pub fn new(initial: Option<&Path>, last_dir: SharedDirectory) -> Self {
        Self {
            text: initial
                .map(|p| p.to_string_lossy().into_owned())
                .unwrap_or_default(),
            last_dir,
            focus_requested: false,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: &str) {
        self.text = text.to_string();
    }

    /// Path typed into the field; blank means unset
    pub fn commit_text(&self) -> Option<PathBuf> {
        let text = self.text.trim();
        if text.is_empty() {
            None
        } else {
            Some(PathBuf::from(text))
        }
    }

    /// Take a file chosen in the dialog: remember its folder and return
    /// the absolute path to store
    pub fn accept_selection(&mut self, file: PathBuf) -> PathBuf {
        let file = std::path::absolute(&file).unwrap_or(file);
        if let Some(parent) = file.parent() {
            *self.last_dir.borrow_mut() = parent.to_path_buf();
        }
        self.text = file.to_string_lossy().into_owned();
        info!(path = %file.display(), "Selected media resource");
        file
    }

    /// Open the native file dialog in the last browsed folder
    fn browse(&mut self) -> Option<PathBuf> {
        let start = self.last_dir.borrow().clone();
        debug!(directory = %start.display(), "Opening resource dialog");
        // No filter: rfd turns each extension into a `*.ext` glob, which
        // would hide files without an extension
        rfd::FileDialog::new()
            .set_title(DIALOG_TITLE)
            .set_directory(&start)
            .pick_file()
    }

    /// Enter in the field stores the typed path
    pub fn on_enter(&self) -> EditOutcome<Option<PathBuf>> {
        EditOutcome::Commit(self.commit_text())
    }

    /// A file picked in the dialog is stored immediately
    pub fn on_file_selected(&mut self, file: PathBuf) -> EditOutcome<Option<PathBuf>> {
        EditOutcome::Commit(Some(self.accept_selection(file)))
    }

    pub fn ui(&mut self, ui: &mut egui::Ui) -> EditOutcome<Option<PathBuf>> {
        let mut outcome = EditOutcome::Editing;

        ui.horizontal(|ui| {
            let response = ui.add(
                egui::TextEdit::singleline(&mut self.text)
                    .desired_width(PATH_FIELD_WIDTH)
                    .hint_text("path to media file"),
            );
            if !self.focus_requested {
                response.request_focus();
                self.focus_requested = true;
            }

            if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
                outcome = EditOutcome::Cancel;
            } else if response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                outcome = self.on_enter();
            }

            if ui.small_button("Browse…").clicked() {
                if let Some(file) = self.browse() {
                    outcome = self.on_file_selected(file);
                }
            }
        });

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_display_name_is_file_name() {
        let path = PathBuf::from("/srv/media/morning/chime.ogg");
        assert_eq!(display_name(Some(path.as_path())), "chime.ogg");
        assert_eq!(display_name(None), "");
    }

    #[test]
    fn test_problem_state() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("song.mp3");
        fs::write(&file, b"not really audio").unwrap();

        assert!(!is_problem(Some(file.as_path())));
        assert!(is_problem(None));
        assert!(is_problem(Some(dir.path().join("missing.mp3").as_path())));
        // A directory is not a playable resource
        assert!(is_problem(Some(dir.path())));
    }

    #[test]
    fn test_accept_selection_updates_shared_directory() {
        let dir = tempfile::tempdir().unwrap();
        let folder = dir.path().join("jingles");
        fs::create_dir(&folder).unwrap();
        let file = folder.join("bell.wav");
        fs::write(&file, b"").unwrap();

        let last_dir = shared_directory(dir.path().to_path_buf());
        let mut first = PathEditor::new(None, Rc::clone(&last_dir));
        let second = PathEditor::new(None, Rc::clone(&last_dir));

        let stored = first.accept_selection(file.clone());

        assert_eq!(stored, file);
        assert!(stored.is_absolute());
        assert_eq!(*last_dir.borrow(), folder);
        // Every editor of the table sees the new folder
        assert_eq!(*second.last_dir.borrow(), folder);
        assert_eq!(first.text(), file.to_string_lossy());
    }

    #[test]
    fn test_accept_relative_selection_is_made_absolute() {
        let last_dir = shared_directory(PathBuf::from("."));
        let mut editor = PathEditor::new(None, Rc::clone(&last_dir));

        let stored = editor.accept_selection(PathBuf::from("clips/intro.mp3"));

        assert!(stored.is_absolute());
        assert!(stored.ends_with("clips/intro.mp3"));
        assert!(last_dir.borrow().ends_with("clips"));
    }

    #[test]
    fn test_enter_commits_typed_path() {
        let last_dir = shared_directory(PathBuf::from("."));
        let mut editor = PathEditor::new(None, last_dir);

        editor.set_text("/srv/media/noon.ogg");
        assert_eq!(editor.on_enter(), EditOutcome::Commit(Some(PathBuf::from("/srv/media/noon.ogg"))));

        editor.set_text("");
        assert_eq!(editor.on_enter(), EditOutcome::Commit(None));
    }

    #[test]
    fn test_file_selection_commits_and_remembers_folder() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("alarm");
        fs::write(&file, b"").unwrap();

        let last_dir = shared_directory(PathBuf::from("."));
        let mut editor = PathEditor::new(None, Rc::clone(&last_dir));

        assert_eq!(editor.on_file_selected(file.clone()), EditOutcome::Commit(Some(file)));
        assert_eq!(*last_dir.borrow(), dir.path());
    }

    #[test]
    fn test_commit_text_blank_is_unset() {
        let last_dir = shared_directory(PathBuf::from("."));
        let mut editor = PathEditor::new(Some(Path::new("/tmp/a.mp3")), last_dir);
        assert_eq!(editor.commit_text(), Some(PathBuf::from("/tmp/a.mp3")));

        editor.set_text("  ");
        assert_eq!(editor.commit_text(), None);
    }
}
