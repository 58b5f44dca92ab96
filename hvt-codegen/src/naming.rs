//! Unique label generation
//!
//! The only mutable state in the backend: two monotonically increasing
//! counters owned by the translator instance, so independent runs in one
//! process never interfere and every run yields identical names.

/// Generates the label names that must be unique across a whole run.
#[derive(Debug, Default)]
pub struct NameGenerator {
    comparisons: u32,
    call_sites: u32,
}

impl NameGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// A fresh `(true, end)` label pair for one comparison.
    ///
    /// Comparison labels are global, not function-scoped: comparisons can
    /// occur in straight-line code outside any function.
    pub fn comparison_labels(&mut self) -> (String, String) {
        let key = self.comparisons;
        self.comparisons += 1;
        (format!("CMP.TRUE.{}", key), format!("CMP.END.{}", key))
    }

    /// A fresh return label for one call site.
    ///
    /// Keyed by a single run-wide sequence number rather than a count per
    /// callee, so labels stay unique under any input ordering.
    pub fn return_label(&mut self, callee: &str) -> String {
        let key = self.call_sites;
        self.call_sites += 1;
        format!("{}$ret.{}", callee, key)
    }
}
