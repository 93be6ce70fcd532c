//! Collaborator interfaces the engine reads from and writes to.
//!
//! The host owns live world state and the on-screen text display; the
//! engine only sees them through these traits, passed in explicitly.

use crate::types::EnvironmentSnapshot;

/// Live world state provided by the host.
pub trait EnvironmentSource {
    /// Whether the host has finished loading.
    fn is_host_ready(&self) -> bool;

    /// Whether the game is paused.
    fn is_paused(&self) -> bool;

    /// Current world state, or `None` while the player state cannot be
    /// queried (e.g. during a scene transition).
    fn snapshot(&self) -> Option<EnvironmentSnapshot>;
}

/// On-screen text display. Fire-and-forget.
pub trait DisplaySink {
    /// Show `text` for `duration_secs` seconds.
    fn show(&mut self, text: &str, duration_secs: u32);
}

impl<F> DisplaySink for F
where
    F: FnMut(&str, u32),
{
    fn show(&mut self, text: &str, duration_secs: u32) {
        self(text, duration_secs);
    }
}
