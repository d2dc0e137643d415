//! Table model backing the timer list
//!
//! Owns the timer records and exposes them as five fixed, typed columns.
//! Every mutation notifies the registered listeners exactly once; there is
//! no per-row or per-column diffing.

use chrono::NaiveTime;
use std::collections::HashSet;
use std::path::PathBuf;
use tracing::{debug, info, warn};

use crate::types::Timer;

/// Kind of data held by a column, selects the renderer/editor pair
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    Flag,
    Text,
    Time,
    Path,
}

/// The fixed columns of the timer table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Enabled,
    Name,
    From,
    To,
    Resource,
}

impl Column {
    pub const ALL: [Column; 5] = [
        Column::Enabled,
        Column::Name,
        Column::From,
        Column::To,
        Column::Resource,
    ];

    /// Map a column index to its column
    ///
    /// # Panics
    /// Panics if `index` is not in `0..5`. Asking for a column that does not
    /// exist is a bug in the caller.
    pub fn from_index(index: usize) -> Self {
        match Self::ALL.get(index) {
            Some(column) => *column,
            None => panic!("invalid timer table column index: {index}"),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Column::Enabled => "Enabled",
            Column::Name => "Name",
            Column::From => "From",
            Column::To => "To",
            Column::Resource => "Resource",
        }
    }

    pub fn kind(self) -> CellKind {
        match self {
            Column::Enabled => CellKind::Flag,
            Column::Name => CellKind::Text,
            Column::From | Column::To => CellKind::Time,
            Column::Resource => CellKind::Path,
        }
    }
}

/// A single cell's value, tagged by kind
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellValue {
    Flag(bool),
    Text(String),
    Time(Option<NaiveTime>),
    Path(Option<PathBuf>),
}

impl CellValue {
    pub fn kind(&self) -> CellKind {
        match self {
            CellValue::Flag(_) => CellKind::Flag,
            CellValue::Text(_) => CellKind::Text,
            CellValue::Time(_) => CellKind::Time,
            CellValue::Path(_) => CellKind::Path,
        }
    }
}

/// Handle returned by [`TimerTableModel::add_listener`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Listener = Box<dyn Fn()>;

pub struct TimerTableModel {
    timers: Vec<Timer>,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: u64,
}

impl TimerTableModel {
    pub fn new(timers: Vec<Timer>) -> Self {
        Self {
            timers,
            listeners: Vec::new(),
            next_listener_id: 0,
        }
    }

    /// Register a callback fired after every change to the table
    pub fn add_listener(&mut self, listener: impl Fn() + 'static) -> ListenerId {
        let id = ListenerId(self.next_listener_id);
        self.next_listener_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    fn fire_table_changed(&self) {
        for (_, listener) in &self.listeners {
            listener();
        }
    }

    pub fn row_count(&self) -> usize {
        self.timers.len()
    }

    pub fn column_count(&self) -> usize {
        Column::ALL.len()
    }

    /// # Panics
    /// Panics on an invalid column index
    pub fn column_name(&self, column: usize) -> &'static str {
        Column::from_index(column).name()
    }

    /// # Panics
    /// Panics on an invalid column index
    pub fn column_kind(&self, column: usize) -> CellKind {
        Column::from_index(column).kind()
    }

    /// Every cell of the table is editable
    pub fn is_cell_editable(&self, _row: usize, column: usize) -> bool {
        Column::from_index(column);
        true
    }

    /// # Panics
    /// Panics on an invalid row or column index
    pub fn value_at(&self, row: usize, column: usize) -> CellValue {
        let timer = &self.timers[row];
        match Column::from_index(column) {
            Column::Enabled => CellValue::Flag(timer.enabled),
            Column::Name => CellValue::Text(timer.name.clone()),
            Column::From => CellValue::Time(timer.from),
            Column::To => CellValue::Time(timer.to),
            Column::Resource => CellValue::Path(timer.resource.clone()),
        }
    }

    /// Store an edited cell value and notify listeners
    ///
    /// A blank name is rejected and leaves the row untouched.
    ///
    /// # Panics
    /// Panics on an invalid row or column index, or when the value's kind
    /// does not match the column.
    pub fn set_value_at(&mut self, value: CellValue, row: usize, column: usize) {
        let column = Column::from_index(column);
        let timer = &mut self.timers[row];
        match (column, value) {
            (Column::Enabled, CellValue::Flag(enabled)) => timer.enabled = enabled,
            (Column::Name, CellValue::Text(name)) => {
                if name.trim().is_empty() {
                    warn!(row = row, "Ignoring blank timer name");
                    return;
                }
                timer.name = name;
            }
            (Column::From, CellValue::Time(time)) => timer.from = time,
            (Column::To, CellValue::Time(time)) => timer.to = time,
            (Column::Resource, CellValue::Path(path)) => timer.resource = path,
            (column, value) => panic!(
                "cannot store {:?} value in {} column",
                value.kind(),
                column.name()
            ),
        }
        debug!(row = row, column = column.name(), "Updated timer cell");
        self.fire_table_changed();
    }

    /// Append a timer at the end of the table
    pub fn add_timer(&mut self, timer: Timer) {
        info!(name = %timer.name, row = self.timers.len(), "Adding timer");
        self.timers.push(timer);
        self.fire_table_changed();
    }

    /// Remove the given rows, keeping the remaining ones in order
    ///
    /// Duplicate and out-of-range indices are ignored.
    pub fn remove_rows(&mut self, rows: &[usize]) {
        let mut doomed = HashSet::with_capacity(rows.len());
        for &row in rows {
            if row >= self.timers.len() {
                warn!(row = row, row_count = self.timers.len(), "Ignoring out-of-range row in removal");
                continue;
            }
            doomed.insert(row);
        }

        let timers = std::mem::take(&mut self.timers);
        self.timers = timers
            .into_iter()
            .enumerate()
            .filter(|(row, _)| !doomed.contains(row))
            .map(|(_, timer)| timer)
            .collect();

        info!(removed = doomed.len(), remaining = self.timers.len(), "Removed timers");
        self.fire_table_changed();
    }

    pub fn clear(&mut self) {
        info!(removed = self.timers.len(), "Clearing all timers");
        self.timers.clear();
        self.fire_table_changed();
    }

    pub fn set_all_enabled(&mut self, enabled: bool) {
        info!(enabled = enabled, count = self.timers.len(), "Setting enabled flag on all timers");
        for timer in &mut self.timers {
            timer.enabled = enabled;
        }
        self.fire_table_changed();
    }

    pub fn enable_all(&mut self) {
        self.set_all_enabled(true);
    }

    pub fn disable_all(&mut self) {
        self.set_all_enabled(false);
    }

    /// Copy of the current timers in table order
    pub fn timers(&self) -> Vec<Timer> {
        self.timers.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    fn hms(h: u32, m: u32, s: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, s).unwrap()
    }

    fn sample_model() -> TimerTableModel {
        TimerTableModel::new(vec![
            Timer::new("first").with_window(hms(6, 0, 0), hms(7, 0, 0)),
            Timer::new("second").enabled(true).with_resource("/media/a.mp3"),
            Timer::new("third"),
            Timer::new("fourth").enabled(true),
        ])
    }

    fn counting_listener(model: &mut TimerTableModel) -> Rc<Cell<usize>> {
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        model.add_listener(move || counter.set(counter.get() + 1));
        count
    }

    fn names(model: &TimerTableModel) -> Vec<String> {
        model.timers().into_iter().map(|t| t.name).collect()
    }

    #[test]
    fn test_column_metadata() {
        let model = TimerTableModel::new(Vec::new());
        assert_eq!(model.column_count(), 5);

        let expected = [
            ("Enabled", CellKind::Flag),
            ("Name", CellKind::Text),
            ("From", CellKind::Time),
            ("To", CellKind::Time),
            ("Resource", CellKind::Path),
        ];
        for (index, (name, kind)) in expected.iter().enumerate() {
            assert_eq!(model.column_name(index), *name);
            assert_eq!(model.column_kind(index), *kind);
        }
    }

    #[test]
    #[should_panic(expected = "invalid timer table column index")]
    fn test_column_name_out_of_range_panics() {
        TimerTableModel::new(Vec::new()).column_name(5);
    }

    #[test]
    #[should_panic(expected = "invalid timer table column index")]
    fn test_column_kind_out_of_range_panics() {
        TimerTableModel::new(Vec::new()).column_kind(usize::MAX);
    }

    #[test]
    #[should_panic(expected = "invalid timer table column index")]
    fn test_value_at_out_of_range_column_panics() {
        sample_model().value_at(0, 7);
    }

    #[test]
    fn test_all_cells_editable() {
        let model = sample_model();
        for column in 0..model.column_count() {
            assert!(model.is_cell_editable(0, column));
        }
    }

    #[test]
    fn test_value_at_reads_fields() {
        let model = sample_model();
        assert_eq!(model.value_at(1, 0), CellValue::Flag(true));
        assert_eq!(model.value_at(0, 1), CellValue::Text("first".to_string()));
        assert_eq!(model.value_at(0, 2), CellValue::Time(Some(hms(6, 0, 0))));
        assert_eq!(model.value_at(0, 3), CellValue::Time(Some(hms(7, 0, 0))));
        assert_eq!(model.value_at(2, 3), CellValue::Time(None));
        assert_eq!(
            model.value_at(1, 4),
            CellValue::Path(Some(PathBuf::from("/media/a.mp3")))
        );
    }

    #[test]
    fn test_set_value_at_updates_and_notifies() {
        let mut model = sample_model();
        let count = counting_listener(&mut model);

        model.set_value_at(CellValue::Time(Some(hms(13, 45, 30))), 2, 2);
        assert_eq!(model.value_at(2, 2), CellValue::Time(Some(hms(13, 45, 30))));
        assert_eq!(count.get(), 1);

        model.set_value_at(CellValue::Path(None), 1, 4);
        assert_eq!(model.value_at(1, 4), CellValue::Path(None));
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_set_blank_name_rejected() {
        let mut model = sample_model();
        let count = counting_listener(&mut model);

        model.set_value_at(CellValue::Text("   ".to_string()), 0, 1);

        assert_eq!(model.value_at(0, 1), CellValue::Text("first".to_string()));
        assert_eq!(count.get(), 0);
    }

    #[test]
    #[should_panic(expected = "cannot store")]
    fn test_set_value_kind_mismatch_panics() {
        sample_model().set_value_at(CellValue::Flag(true), 0, 2);
    }

    #[test]
    fn test_add_timer_appends_and_fires_once() {
        let mut model = sample_model();
        let count = counting_listener(&mut model);

        model.add_timer(Timer::new("fifth"));

        assert_eq!(model.row_count(), 5);
        assert_eq!(count.get(), 1);
        assert_eq!(names(&model).last().map(String::as_str), Some("fifth"));
    }

    #[test]
    fn test_remove_rows_preserves_order() {
        let mut model = sample_model();
        let count = counting_listener(&mut model);

        model.remove_rows(&[2, 0]);

        assert_eq!(names(&model), vec!["second", "fourth"]);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_remove_rows_ignores_duplicates_and_out_of_range() {
        let mut model = sample_model();

        model.remove_rows(&[1, 1, 42]);

        assert_eq!(names(&model), vec!["first", "third", "fourth"]);
    }

    #[test]
    fn test_clear_empties_table() {
        let mut model = sample_model();
        let count = counting_listener(&mut model);

        model.clear();

        assert_eq!(model.row_count(), 0);
        assert!(model.timers().is_empty());
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_enable_disable_all_only_touch_flag() {
        let mut model = sample_model();
        let before = model.timers();

        model.enable_all();
        let enabled = model.timers();
        assert!(enabled.iter().all(|t| t.enabled));

        model.disable_all();
        let disabled = model.timers();
        assert!(disabled.iter().all(|t| !t.enabled));

        for (original, changed) in before.iter().zip(disabled.iter()) {
            assert_eq!(original.name, changed.name);
            assert_eq!(original.from, changed.from);
            assert_eq!(original.to, changed.to);
            assert_eq!(original.resource, changed.resource);
        }
    }

    #[test]
    fn test_timers_returns_copy() {
        let model = sample_model();
        let mut copy = model.timers();
        copy.clear();
        assert_eq!(model.row_count(), 4);
    }

    #[test]
    fn test_remove_listener_stops_notifications() {
        let mut model = sample_model();
        let count = Rc::new(Cell::new(0));
        let counter = Rc::clone(&count);
        let id = model.add_listener(move || counter.set(counter.get() + 1));

        model.clear();
        assert!(model.remove_listener(id));
        model.clear();

        assert_eq!(count.get(), 1);
        assert!(!model.remove_listener(id));
    }

    #[test]
    fn test_listeners_notified_in_registration_order() {
        let mut model = sample_model();
        let order = Rc::new(std::cell::RefCell::new(Vec::new()));
        for tag in ["first", "second", "third"] {
            let order = Rc::clone(&order);
            model.add_listener(move || order.borrow_mut().push(tag));
        }

        model.add_timer(Timer::new("fifth"));

        assert_eq!(*order.borrow(), vec!["first", "second", "third"]);
    }

    #[test]
    fn test_every_listener_notified() {
        let mut model = sample_model();
        let first = counting_listener(&mut model);
        let second = counting_listener(&mut model);

        model.disable_all();

        assert_eq!(first.get(), 1);
        assert_eq!(second.get(), 1);
    }
}
