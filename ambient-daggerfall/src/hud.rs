//! HUD message queue — the display collaborator for the frame system.
//!
//! Lines are queued in the order they were shown; the host UI drains the
//! queue each frame and hands each message to its own HUD text widget.

use std::collections::VecDeque;

use ambient_core::host::DisplaySink;

/// One line of HUD text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HudMessage {
    /// Text to show.
    pub text: String,
    /// Seconds to keep it on screen.
    pub duration_secs: u32,
}

/// FIFO of pending HUD messages.
#[derive(Debug, Default)]
pub struct HudQueue {
    pending: VecDeque<HudMessage>,
}

impl HudQueue {
    /// An empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Take every pending message, oldest first.
    pub fn drain(&mut self) -> impl Iterator<Item = HudMessage> + '_ {
        self.pending.drain(..)
    }

    /// Oldest pending message.
    #[must_use]
    pub fn peek(&self) -> Option<&HudMessage> {
        self.pending.front()
    }

    /// Number of pending messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Whether nothing is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl DisplaySink for HudQueue {
    fn show(&mut self, text: &str, duration_secs: u32) {
        self.pending.push_back(HudMessage {
            text: text.to_string(),
            duration_secs,
        });
    }
}
