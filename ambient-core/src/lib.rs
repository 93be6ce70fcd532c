//! # ambient-core
//!
//! Host-agnostic engine for contextual ambient flavor text.
//!
//! Given a snapshot of the player's surroundings (dungeon or outdoors,
//! location kind, climate, weather, time of day) the engine derives a
//! composite key such as `VillageNightRainy4`, looks it up in an authored
//! [`TextTable`], and asks the host to show the line, subject to:
//!
//! - **Pacing** — a base interval between attempts, stretched to a
//!   post-trigger interval after every line shown
//! - **Chance** — a d100 roll per due attempt
//! - **Repeat avoidance** — the 0–9 variant index never repeats back to back
//!
//! Host state and the on-screen display are reached only through the
//! traits in [`host`], so the engine carries no global state.
//!
//! ## Performance Contract
//!
//! `tick` never blocks: one hash lookup and at most a handful of random
//! draws per call, cheap enough to run every rendered frame.

#![deny(clippy::unwrap_used)]
#![deny(missing_docs)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod host;
pub mod key;
pub mod metrics;
pub mod selector;
pub mod table;
pub mod types;

pub use config::{ConfigSource, SelectorConfig};
pub use error::{AmbientError, Result};
pub use host::{DisplaySink, EnvironmentSource};
pub use key::{climate_key, compose_key, weather_key, OutdoorVariant, VariantPicker};
pub use metrics::SelectorCounters;
pub use selector::{AmbientTextSelector, SkipReason, TickOutcome};
pub use table::{FileTableLoader, TableLoader, TextTable};
pub use types::*;
