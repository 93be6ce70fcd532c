//! Per-selector outcome counters.
//!
//! The selector is single-threaded and owns its counters outright, so
//! these are plain integers rather than atomics. Read them through
//! [`SelectorCounters`] snapshots for debug overlays or logs.

use crate::selector::{SkipReason, TickOutcome};

/// Running totals of tick outcomes since the selector was created.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectorCounters {
    /// Every call to `tick`.
    pub ticks: u64,
    /// Ticks rejected by a guard (not ready, paused, indoors, disabled).
    pub skipped: u64,
    /// Ticks that arrived before the interval elapsed.
    pub not_due: u64,
    /// Due ticks whose chance roll failed.
    pub chance_failed: u64,
    /// Selections whose key had no authored line.
    pub missing: u64,
    /// Selections whose authored line was blank.
    pub blank: u64,
    /// Lines sent to the display.
    pub displayed: u64,
}

impl SelectorCounters {
    /// Fold one tick outcome into the totals.
    pub fn record(&mut self, outcome: &TickOutcome) {
        self.ticks += 1;
        match outcome {
            TickOutcome::Skipped(_) => self.skipped += 1,
            TickOutcome::NotDue => self.not_due += 1,
            TickOutcome::ChanceFailed { .. } => self.chance_failed += 1,
            TickOutcome::Missing { .. } => self.missing += 1,
            TickOutcome::Blank { .. } => self.blank += 1,
            TickOutcome::Displayed { .. } => self.displayed += 1,
        }
    }

    /// Ticks that passed the due-check and rolled the trigger chance.
    #[must_use]
    pub fn attempts(&self) -> u64 {
        self.chance_failed + self.missing + self.blank + self.displayed
    }

    /// Fraction of selections that found an authored line, in [0, 1].
    ///
    /// Useful to spot context combinations that lack content.
    #[must_use]
    pub fn hit_rate(&self) -> f64 {
        let selections = self.missing + self.blank + self.displayed;
        if selections == 0 {
            return 0.0;
        }
        self.displayed as f64 / selections as f64
    }
}

/// Short label for a skip reason, for structured log fields.
#[must_use]
pub fn skip_label(reason: SkipReason) -> &'static str {
    match reason {
        SkipReason::Disabled => "disabled",
        SkipReason::HostNotReady => "host_not_ready",
        SkipReason::EnvironmentUnavailable => "environment_unavailable",
        SkipReason::Paused => "paused",
        SkipReason::InsideBuilding => "inside_building",
    }
}
