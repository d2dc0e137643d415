//! Cell renderers and editors for the timer table

pub mod path_cell;
pub mod time_cell;

/// Result of drawing an editor for one frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditOutcome<T> {
    /// Still editing, nothing to store yet
    Editing,
    Commit(T),
    Cancel,
}

impl<T> EditOutcome<T> {
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> EditOutcome<U> {
        match self {
            EditOutcome::Editing => EditOutcome::Editing,
            EditOutcome::Commit(value) => EditOutcome::Commit(f(value)),
            EditOutcome::Cancel => EditOutcome::Cancel,
        }
    }
}
