//! The ambient text selector: pacing, chance roll, key derivation, lookup.
//!
//! Once per host frame the selector is handed the current time and world
//! snapshot. A tick proceeds only when:
//!
//! 1. the host is ready, the game is not paused, and the player is not
//!    inside a building;
//! 2. more than the current interval has elapsed since the last attempt;
//! 3. a d100 roll is at or below the trigger chance.
//!
//! A successful display switches the next wait to the post-trigger
//! interval. Every other due tick leaves it at the base interval.

use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, trace};

use crate::config::SelectorConfig;
use crate::host::DisplaySink;
use crate::key::{compose_key, OutdoorVariant, VariantPicker};
use crate::metrics::SelectorCounters;
use crate::table::TextTable;
use crate::types::{EnvironmentSnapshot, HostTime};

/// Why a tick did nothing before reaching the due-check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SkipReason {
    /// Ambient text is switched off in the mod settings.
    Disabled,
    /// Host has not finished loading.
    HostNotReady,
    /// Player state could not be queried.
    EnvironmentUnavailable,
    /// Game is paused.
    Paused,
    /// Buildings never get ambient text.
    InsideBuilding,
}

/// What a single tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TickOutcome {
    /// A guard rejected the tick; no state changed.
    Skipped(SkipReason),
    /// The interval has not elapsed yet; no state changed.
    NotDue,
    /// The chance roll failed.
    ChanceFailed {
        /// The d100 roll, 1–100.
        roll: u8,
    },
    /// The derived key has no authored line.
    Missing {
        /// Key that was looked up.
        key: String,
    },
    /// The authored line is empty or whitespace.
    Blank {
        /// Key that was looked up.
        key: String,
    },
    /// A line was sent to the display.
    Displayed {
        /// Key that was looked up.
        key: String,
    },
}

impl TickOutcome {
    /// Whether this tick put text on screen.
    #[must_use]
    pub fn is_displayed(&self) -> bool {
        matches!(self, Self::Displayed { .. })
    }
}

/// Picks and paces ambient flavor text.
///
/// Generic over the random source so tests and replays can seed it.
#[derive(Debug)]
pub struct AmbientTextSelector<R = StdRng> {
    config: SelectorConfig,
    table: Arc<TextTable>,
    rng: R,
    picker: VariantPicker,
    last_trigger: HostTime,
    current_interval_secs: f32,
    counters: SelectorCounters,
}

impl AmbientTextSelector<StdRng> {
    /// Create a selector seeded from OS entropy.
    ///
    /// `started_at` is the host time the selector starts counting from, so
    /// the first attempt happens one base interval later.
    #[must_use]
    pub fn new(
        table: impl Into<Arc<TextTable>>,
        config: SelectorConfig,
        started_at: HostTime,
    ) -> Self {
        Self::with_rng(table, config, started_at, StdRng::from_entropy())
    }

    /// Create a selector with a fixed seed, for reproducible runs.
    #[must_use]
    pub fn seeded(
        table: impl Into<Arc<TextTable>>,
        config: SelectorConfig,
        started_at: HostTime,
        seed: u64,
    ) -> Self {
        Self::with_rng(table, config, started_at, StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> AmbientTextSelector<R> {
    /// Create a selector drawing from `rng`.
    pub fn with_rng(
        table: impl Into<Arc<TextTable>>,
        config: SelectorConfig,
        started_at: HostTime,
        rng: R,
    ) -> Self {
        Self {
            current_interval_secs: config.base_interval_secs,
            config,
            table: table.into(),
            rng,
            picker: VariantPicker::new(),
            last_trigger: started_at,
            counters: SelectorCounters::default(),
        }
    }

    /// Configuration used by the next tick.
    #[must_use]
    pub fn config(&self) -> &SelectorConfig {
        &self.config
    }

    /// Replace the configuration. Timing and repeat-avoidance state are kept.
    pub fn set_config(&mut self, config: SelectorConfig) {
        if config != self.config {
            debug!(?config, "selector configuration updated");
            self.config = config;
        }
    }

    /// The text table being queried.
    #[must_use]
    pub fn table(&self) -> &TextTable {
        &self.table
    }

    /// Host time of the last due tick.
    #[must_use]
    pub fn last_trigger(&self) -> HostTime {
        self.last_trigger
    }

    /// Wait, in seconds, the next due-check uses.
    #[must_use]
    pub fn current_interval_secs(&self) -> f32 {
        self.current_interval_secs
    }

    /// Most recently drawn variant index, `None` before the first selection.
    #[must_use]
    pub fn last_variant_index(&self) -> Option<u8> {
        self.picker.last()
    }

    /// Outcome totals so far.
    #[must_use]
    pub fn counters(&self) -> SelectorCounters {
        self.counters
    }

    /// Whether a tick at `now` would pass the due-check.
    #[must_use]
    pub fn is_due(&self, now: HostTime) -> bool {
        now > self.last_trigger.offset(self.current_interval_secs)
    }

    /// Run one frame of the selector.
    pub fn tick<D>(&mut self, now: HostTime, env: &EnvironmentSnapshot, sink: &mut D) -> TickOutcome
    where
        D: DisplaySink + ?Sized,
    {
        let outcome = self.run_tick(now, env, sink);
        self.counters.record(&outcome);
        outcome
    }

    /// Record a tick the caller rejected before it reached the selector.
    pub fn skip(&mut self, reason: SkipReason) -> TickOutcome {
        let outcome = TickOutcome::Skipped(reason);
        self.counters.record(&outcome);
        outcome
    }

    fn run_tick<D>(&mut self, now: HostTime, env: &EnvironmentSnapshot, sink: &mut D) -> TickOutcome
    where
        D: DisplaySink + ?Sized,
    {
        if let Some(reason) = guard(env) {
            return TickOutcome::Skipped(reason);
        }
        if !self.is_due(now) {
            return TickOutcome::NotDue;
        }

        self.last_trigger = now;
        self.current_interval_secs = self.config.base_interval_secs;

        let roll: u8 = self.rng.gen_range(1..=100);
        if roll > self.config.trigger_chance_percent {
            trace!(roll, chance = self.config.trigger_chance_percent, "chance roll failed");
            return TickOutcome::ChanceFailed { roll };
        }

        let key = self.select_key(env);
        let Some(text) = self.table.lookup(&key) else {
            trace!(%key, "no ambient text authored");
            return TickOutcome::Missing { key };
        };
        if text.trim().is_empty() {
            trace!(%key, "ambient text is blank");
            return TickOutcome::Blank { key };
        }

        debug!(%key, text, "ambient text");
        sink.show(text, self.config.display_duration_secs);
        self.current_interval_secs = self.config.post_trigger_interval_secs;
        TickOutcome::Displayed { key }
    }

    /// Draw a fresh variant index and compose the context key for `env`.
    ///
    /// The index never repeats the previous call's index.
    pub fn select_key(&mut self, env: &EnvironmentSnapshot) -> String {
        let idx = self.picker.next(&mut self.rng);
        if env.is_inside_dungeon {
            compose_key(env, OutdoorVariant::Climate, idx)
        } else {
            let variant = OutdoorVariant::random(&mut self.rng);
            compose_key(env, variant, idx)
        }
    }
}

fn guard(env: &EnvironmentSnapshot) -> Option<SkipReason> {
    if !env.host_ready {
        Some(SkipReason::HostNotReady)
    } else if env.is_game_paused {
        Some(SkipReason::Paused)
    } else if env.is_inside_building {
        Some(SkipReason::InsideBuilding)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{climate, DungeonType, LocationType, WeatherState};

    fn every_crypt_line() -> TextTable {
        TextTable::from_entries((0..10).map(|i| (format!("Crypt{i}"), format!("Crypt line {i}"))))
            .expect("table")
    }

    fn always() -> SelectorConfig {
        SelectorConfig {
            trigger_chance_percent: 100,
            base_interval_secs: 2.0,
            post_trigger_interval_secs: 4.0,
            display_duration_secs: 3,
        }
    }

    fn at(secs: f64) -> HostTime {
        HostTime::from_secs(secs)
    }

    #[test]
    fn first_attempt_waits_one_base_interval() {
        let mut selector = AmbientTextSelector::seeded(every_crypt_line(), always(), at(10.0), 1);
        let env = EnvironmentSnapshot::dungeon(DungeonType::Crypt);
        let mut shown = Vec::new();
        let mut sink = |t: &str, d: u32| shown.push((t.to_string(), d));

        assert_eq!(selector.tick(at(11.0), &env, &mut sink), TickOutcome::NotDue);
        // Exactly at the boundary is still not due.
        assert_eq!(selector.tick(at(12.0), &env, &mut sink), TickOutcome::NotDue);
        assert!(selector.tick(at(12.01), &env, &mut sink).is_displayed());
        assert_eq!(shown.len(), 1);
        assert_eq!(shown[0].1, 3);
    }

    #[test]
    fn display_switches_to_post_trigger_interval() {
        let mut selector = AmbientTextSelector::seeded(every_crypt_line(), always(), at(0.0), 2);
        let env = EnvironmentSnapshot::dungeon(DungeonType::Crypt);
        let mut sink = |_: &str, _: u32| {};

        assert!(selector.tick(at(3.0), &env, &mut sink).is_displayed());
        assert!((selector.current_interval_secs() - 4.0).abs() < f32::EPSILON);
        assert_eq!(selector.last_trigger(), at(3.0));

        // 2 s later would be due under the base interval, but not under 4 s.
        assert_eq!(selector.tick(at(5.5), &env, &mut sink), TickOutcome::NotDue);
        assert!(selector.tick(at(7.5), &env, &mut sink).is_displayed());
    }

    #[test]
    fn missing_key_keeps_base_interval() {
        let mut selector =
            AmbientTextSelector::seeded(TextTable::default(), always(), at(0.0), 3);
        let env = EnvironmentSnapshot::outdoors(
            LocationType::TownCity,
            true,
            climate::DESERT,
            WeatherState::Clear,
        );
        let mut shown = 0;
        let mut sink = |_: &str, _: u32| shown += 1;

        let outcome = selector.tick(at(5.0), &env, &mut sink);
        assert!(matches!(outcome, TickOutcome::Missing { ref key } if key.starts_with("TownCity")));
        assert!((selector.current_interval_secs() - 2.0).abs() < f32::EPSILON);
        assert_eq!(selector.last_trigger(), at(5.0));
        assert_eq!(shown, 0);
    }

    #[test]
    fn blank_text_is_not_displayed() {
        let table =
            TextTable::from_entries((0..10).map(|i| (format!("Mine{i}"), "   ".to_string())))
                .expect("table");
        let mut selector = AmbientTextSelector::seeded(table, always(), at(0.0), 4);
        let env = EnvironmentSnapshot::dungeon(DungeonType::Mine);
        let mut shown = 0;
        let mut sink = |_: &str, _: u32| shown += 1;

        assert!(matches!(
            selector.tick(at(3.0), &env, &mut sink),
            TickOutcome::Blank { .. }
        ));
        assert_eq!(shown, 0);
        assert!((selector.current_interval_secs() - 2.0).abs() < f32::EPSILON);
    }

    #[test]
    fn zero_chance_never_selects() {
        let config = SelectorConfig {
            trigger_chance_percent: 0,
            ..always()
        };
        let mut selector = AmbientTextSelector::seeded(every_crypt_line(), config, at(0.0), 5);
        let env = EnvironmentSnapshot::dungeon(DungeonType::Crypt);
        let mut shown = Vec::new();
        let mut sink = |t: &str, _: u32| shown.push(t.to_string());

        for step in 1..200 {
            let outcome = selector.tick(at(f64::from(step) * 3.0), &env, &mut sink);
            assert!(matches!(outcome, TickOutcome::ChanceFailed { .. }));
        }
        assert!(shown.is_empty());
        assert_eq!(selector.last_variant_index(), None);
        assert_eq!(selector.counters().chance_failed, 199);
    }

    #[test]
    fn guards_leave_state_untouched() {
        let mut selector = AmbientTextSelector::seeded(every_crypt_line(), always(), at(0.0), 6);
        let mut shown = Vec::new();
        let mut sink = |t: &str, _: u32| shown.push(t.to_string());

        let mut building = EnvironmentSnapshot::dungeon(DungeonType::Crypt);
        building.is_inside_building = true;
        let mut paused = EnvironmentSnapshot::dungeon(DungeonType::Crypt);
        paused.is_game_paused = true;
        let mut loading = EnvironmentSnapshot::dungeon(DungeonType::Crypt);
        loading.host_ready = false;

        for (env, reason) in [
            (building, SkipReason::InsideBuilding),
            (paused, SkipReason::Paused),
            (loading, SkipReason::HostNotReady),
        ] {
            assert_eq!(
                selector.tick(at(1_000.0), &env, &mut sink),
                TickOutcome::Skipped(reason)
            );
        }
        assert_eq!(selector.last_trigger(), at(0.0));
        assert!((selector.current_interval_secs() - 2.0).abs() < f32::EPSILON);
        assert_eq!(selector.last_variant_index(), None);
        assert_eq!(selector.counters().skipped, 3);
        assert!(shown.is_empty());
    }

    #[test]
    fn config_change_keeps_timing_state() {
        let mut selector = AmbientTextSelector::seeded(every_crypt_line(), always(), at(0.0), 7);
        let env = EnvironmentSnapshot::dungeon(DungeonType::Crypt);
        let mut sink = |_: &str, _: u32| {};
        assert!(selector.tick(at(3.0), &env, &mut sink).is_displayed());
        let idx = selector.last_variant_index();

        selector.set_config(SelectorConfig {
            base_interval_secs: 10.0,
            post_trigger_interval_secs: 20.0,
            ..always()
        });
        assert_eq!(selector.last_trigger(), at(3.0));
        assert_eq!(selector.last_variant_index(), idx);
        // Interval in force is still the one chosen by the previous tick.
        assert!((selector.current_interval_secs() - 4.0).abs() < f32::EPSILON);
        assert!(selector.tick(at(7.5), &env, &mut sink).is_displayed());
        assert!((selector.current_interval_secs() - 20.0).abs() < f32::EPSILON);
    }

    #[test]
    fn dungeon_keys_use_dungeon_type_only() {
        let mut selector = AmbientTextSelector::seeded(TextTable::default(), always(), at(0.0), 8);
        let mut env = EnvironmentSnapshot::dungeon(DungeonType::VampireHaunt);
        env.location_type = LocationType::TownCity;
        env.is_in_location_rect = true;
        for _ in 0..50 {
            let key = selector.select_key(&env);
            assert!(key.starts_with("VampireHaunt"));
            assert_eq!(key.len(), "VampireHaunt".len() + 1);
        }
    }

    #[test]
    fn select_key_never_repeats_index() {
        let mut selector = AmbientTextSelector::seeded(TextTable::default(), always(), at(0.0), 9);
        let env = EnvironmentSnapshot::default();
        let mut prev = None;
        for _ in 0..500 {
            let key = selector.select_key(&env);
            let idx = selector.last_variant_index();
            assert!(key.ends_with(&idx.map(|i| i.to_string()).unwrap_or_default()));
            assert_ne!(idx, prev);
            prev = idx;
        }
    }
}
