//! Controller state snapshots

use std::collections::HashMap;

/// One immutable snapshot of external input state.
///
/// The three tables are sparse: an index that is not present reads as `0.0`
/// for axes and `false` for buttons and toggles. Providers hand out a fresh
/// `Sample` on every call; nothing in this crate mutates one after creation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Sample {
    axis: HashMap<u32, f64>,
    button: HashMap<u32, bool>,
    toggle: HashMap<u32, bool>,
}

impl Sample {
    /// Create an empty snapshot (all indexes at their defaults)
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a snapshot from pre-built tables
    pub fn from_tables(
        axis: HashMap<u32, f64>,
        button: HashMap<u32, bool>,
        toggle: HashMap<u32, bool>,
    ) -> Self {
        Self { axis, button, toggle }
    }

    /// Set an axis value (builder style)
    pub fn with_axis(mut self, index: u32, value: f64) -> Self {
        self.axis.insert(index, value);
        self
    }

    /// Set a button state (builder style)
    pub fn with_button(mut self, index: u32, pressed: bool) -> Self {
        self.button.insert(index, pressed);
        self
    }

    /// Set a toggle state (builder style)
    pub fn with_toggle(mut self, index: u32, on: bool) -> Self {
        self.toggle.insert(index, on);
        self
    }

    /// Axis position; absent indexes read as 0.0
    pub fn axis(&self, index: u32) -> f64 {
        self.axis.get(&index).copied().unwrap_or(0.0)
    }

    /// Button state; absent indexes read as false
    pub fn button(&self, index: u32) -> bool {
        self.button.get(&index).copied().unwrap_or(false)
    }

    /// Toggle state; absent indexes read as false
    pub fn toggle(&self, index: u32) -> bool {
        self.toggle.get(&index).copied().unwrap_or(false)
    }
}
