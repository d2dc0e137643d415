//! Domain types for type safety and clarity

use chrono::NaiveTime;
use std::cmp::Ordering;
use std::path::PathBuf;

/// Name given to timers created without one
pub const DEFAULT_TIMER_NAME: &str = "New timer";

/// A scheduled playback entry
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Timer {
    pub name: String,
    pub enabled: bool,
    /// Start of the playback window (None = unset)
    pub from: Option<NaiveTime>,
    /// End of the playback window (None = unset)
    pub to: Option<NaiveTime>,
    /// Media file played while the timer is active
    pub resource: Option<PathBuf>,
}

impl Timer {
    /// Create a disabled timer with no times and no resource
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn with_window(mut self, from: NaiveTime, to: NaiveTime) -> Self {
        self.from = Some(from);
        self.to = Some(to);
        self
    }

    pub fn with_resource(mut self, resource: impl Into<PathBuf>) -> Self {
        self.resource = Some(resource.into());
        self
    }

    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Natural order: start time, end time, name (unset times sort first)
/// Remaining fields only break ties so the order agrees with `Eq`
impl Ord for Timer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.from
            .cmp(&other.from)
            .then_with(|| self.to.cmp(&other.to))
            .then_with(|| self.name.cmp(&other.name))
            .then_with(|| self.enabled.cmp(&other.enabled))
            .then_with(|| self.resource.cmp(&other.resource))
    }
}

impl PartialOrd for Timer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
