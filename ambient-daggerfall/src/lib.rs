//! # ambient-daggerfall — Host Integration for ambient-core
//!
//! This crate wires the host-agnostic `ambient-core` engine into a
//! Daggerfall-style game host.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │                Game host                │
//! │  ┌───────────────────────────────────┐  │
//! │  │       ambient-daggerfall          │  │
//! │  │  ┌──────────┐ ┌──────┐ ┌───────┐  │  │
//! │  │  │  Bridge  │ │Config│ │  HUD  │  │  │
//! │  │  └────┬─────┘ └──┬───┘ └───┬───┘  │  │
//! │  │       ▼          ▼         ▲      │  │
//! │  │    ┌─────────────────────────┐    │  │
//! │  │    │        Systems          │    │  │
//! │  │    └────────────┬────────────┘    │  │
//! │  │                 ▼                 │  │
//! │  │    ┌─────────────────────────┐    │  │
//! │  │    │      ambient-core       │    │  │
//! │  │    └─────────────────────────┘    │  │
//! │  └───────────────────────────────────┘  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - `bridge` — raw host state → `EnvironmentSnapshot`
//! - `config` — mod settings file, hot-swappable settings handle
//! - `hud` — HUD message queue (`DisplaySink`)
//! - `systems` — per-frame driver around the selector

#![deny(clippy::unwrap_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod bridge;
pub mod config;
pub mod hud;
pub mod systems;

pub use bridge::HostWorldState;
pub use config::{ModSettings, SettingsHandle};
pub use hud::{HudMessage, HudQueue};
pub use systems::AmbientTextSystem;
