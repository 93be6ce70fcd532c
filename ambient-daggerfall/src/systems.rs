//! Frame system for the ambient text module.
//!
//! The host calls [`AmbientTextSystem::update`] once per rendered frame
//! with unscaled time. The system pulls the latest settings, applies the
//! host guards, and hands the snapshot to the selector.
//!
//! ## Per-frame order
//!
//! | Step | Check                         | On failure                  |
//! |------|-------------------------------|-----------------------------|
//! | 1    | settings master switch        | `Skipped(Disabled)`         |
//! | 2    | host ready                    | `Skipped(HostNotReady)`     |
//! | 3    | player state queryable        | `Skipped(EnvironmentUnavailable)` |
//! | 4    | not paused                    | `Skipped(Paused)`           |
//! | 5    | selector tick                 | see `TickOutcome`           |

use std::sync::Arc;

use ambient_core::config::ConfigSource;
use ambient_core::error::Result;
use ambient_core::host::{DisplaySink, EnvironmentSource};
use ambient_core::metrics::{skip_label, SelectorCounters};
use ambient_core::selector::{AmbientTextSelector, SkipReason, TickOutcome};
use ambient_core::table::{TableLoader, TextTable};
use ambient_core::types::HostTime;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, trace};

/// Drives an [`AmbientTextSelector`] from host frames.
#[derive(Debug)]
pub struct AmbientTextSystem<C, R = StdRng> {
    selector: AmbientTextSelector<R>,
    settings: C,
}

impl<C: ConfigSource> AmbientTextSystem<C, StdRng> {
    /// Create the system, seeding its random source from OS entropy.
    #[must_use]
    pub fn new(table: impl Into<Arc<TextTable>>, settings: C, started_at: HostTime) -> Self {
        Self::with_rng(table, settings, started_at, StdRng::from_entropy())
    }

    /// Load the table through `loader`, then create the system.
    ///
    /// # Errors
    /// Returns the loader's error if the table cannot be loaded.
    pub fn from_loader<L: TableLoader + ?Sized>(
        loader: &L,
        settings: C,
        started_at: HostTime,
    ) -> Result<Self> {
        let table = loader.load()?;
        Ok(Self::new(table, settings, started_at))
    }
}

impl<C: ConfigSource, R: Rng> AmbientTextSystem<C, R> {
    /// Create the system with an explicit random source.
    pub fn with_rng(
        table: impl Into<Arc<TextTable>>,
        settings: C,
        started_at: HostTime,
        rng: R,
    ) -> Self {
        info!("Begin mod init: AmbientText");
        let table = table.into();
        let (enabled, config) = settings.read();
        info!(
            lines = table.len(),
            enabled,
            ?config,
            "Finished mod init: AmbientText"
        );
        Self {
            selector: AmbientTextSelector::with_rng(table, config, started_at, rng),
            settings,
        }
    }

    /// Run one host frame.
    pub fn update<E, D>(&mut self, now: HostTime, host: &E, sink: &mut D) -> TickOutcome
    where
        E: EnvironmentSource + ?Sized,
        D: DisplaySink + ?Sized,
    {
        let (enabled, config) = self.settings.read();
        self.selector.set_config(config);

        if !enabled {
            return self.skip(SkipReason::Disabled);
        }
        if !host.is_host_ready() {
            return self.skip(SkipReason::HostNotReady);
        }
        let Some(snapshot) = host.snapshot() else {
            return self.skip(SkipReason::EnvironmentUnavailable);
        };
        if host.is_paused() {
            return self.skip(SkipReason::Paused);
        }

        self.selector.tick(now, &snapshot, sink)
    }

    fn skip(&mut self, reason: SkipReason) -> TickOutcome {
        trace!(reason = skip_label(reason), "ambient text frame skipped");
        self.selector.skip(reason)
    }

    /// The underlying selector.
    #[must_use]
    pub fn selector(&self) -> &AmbientTextSelector<R> {
        &self.selector
    }

    /// The settings source.
    #[must_use]
    pub fn settings(&self) -> &C {
        &self.settings
    }

    /// Outcome totals so far.
    #[must_use]
    pub fn counters(&self) -> SelectorCounters {
        self.selector.counters()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use tracing::{Event, Level, Subscriber};
    use tracing_subscriber::layer::{Context, SubscriberExt as _};
    use tracing_subscriber::Layer;

    use super::*;
    use crate::bridge::HostWorldState;
    use crate::config::{ModSettings, SettingsHandle};
    use crate::hud::HudQueue;

    fn crypt_table() -> TextTable {
        TextTable::from_entries((0..10).map(|i| (format!("Crypt{i}"), format!("crypt {i}"))))
            .expect("table")
    }

    fn certain() -> ModSettings {
        let mut settings = ModSettings::default();
        settings.ambient_text.text_chance = 100;
        settings
    }

    fn in_crypt() -> HostWorldState {
        HostWorldState {
            inside_dungeon: true,
            dungeon_id: 0,
            ..HostWorldState::default()
        }
    }

    #[test]
    fn shows_text_on_hud() {
        let mut system =
            AmbientTextSystem::with_rng(crypt_table(), certain(), HostTime(0.0), StdRng::seed_from_u64(1));
        let mut hud = HudQueue::new();
        let outcome = system.update(HostTime(2.5), &in_crypt(), &mut hud);
        assert!(outcome.is_displayed());
        let msg = hud.peek().expect("message");
        assert!(msg.text.starts_with("crypt "));
        assert_eq!(msg.duration_secs, 3);
    }

    #[test]
    fn disabled_module_does_nothing() {
        let mut settings = certain();
        settings.modules.ambient_text = false;
        let mut system =
            AmbientTextSystem::with_rng(crypt_table(), settings, HostTime(0.0), StdRng::seed_from_u64(2));
        let mut hud = HudQueue::new();
        assert_eq!(
            system.update(HostTime(100.0), &in_crypt(), &mut hud),
            TickOutcome::Skipped(SkipReason::Disabled)
        );
        assert!(hud.is_empty());
    }

    #[test]
    fn host_guards_in_order() {
        let mut system =
            AmbientTextSystem::with_rng(crypt_table(), certain(), HostTime(0.0), StdRng::seed_from_u64(3));
        let mut hud = HudQueue::new();

        let loading = HostWorldState { ready: false, ..in_crypt() };
        let transition = HostWorldState { player_available: false, ..in_crypt() };
        let paused = HostWorldState { paused: true, ..in_crypt() };
        let building = HostWorldState { inside_building: true, ..in_crypt() };

        for (state, reason) in [
            (loading, SkipReason::HostNotReady),
            (transition, SkipReason::EnvironmentUnavailable),
            (paused, SkipReason::Paused),
            (building, SkipReason::InsideBuilding),
        ] {
            assert_eq!(
                system.update(HostTime(50.0), &state, &mut hud),
                TickOutcome::Skipped(reason)
            );
        }
        assert!(hud.is_empty());
        assert_eq!(system.selector().last_trigger(), HostTime(0.0));
        assert_eq!(system.counters().skipped, 4);
    }

    #[test]
    fn hot_reload_applies_without_reset() {
        let handle = SettingsHandle::new(certain());
        let mut system = AmbientTextSystem::with_rng(
            crypt_table(),
            handle.clone(),
            HostTime(0.0),
            StdRng::seed_from_u64(4),
        );
        let mut hud = HudQueue::new();
        assert!(system.update(HostTime(2.5), &in_crypt(), &mut hud).is_displayed());

        let mut slower = certain();
        slower.ambient_text.interval = 30.0;
        slower.ambient_text.post_text_interval = 60.0;
        handle.replace(slower);

        // Post-trigger interval chosen before the reload (4 s) still governs.
        assert!(system.update(HostTime(7.0), &in_crypt(), &mut hud).is_displayed());
        assert!((system.selector().current_interval_secs() - 60.0).abs() < f32::EPSILON);
        assert_eq!(system.update(HostTime(60.0), &in_crypt(), &mut hud), TickOutcome::NotDue);
        assert_eq!(hud.len(), 2);
    }

    struct WarnCounter(Arc<AtomicUsize>);

    impl<S: Subscriber> Layer<S> for WarnCounter {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() == Level::WARN {
                self.0.fetch_add(1, Ordering::Relaxed);
            }
        }
    }

    #[test]
    fn clamped_settings_warn_once_not_per_frame() {
        let warnings = Arc::new(AtomicUsize::new(0));
        let subscriber = tracing_subscriber::registry().with(WarnCounter(Arc::clone(&warnings)));

        tracing::subscriber::with_default(subscriber, || {
            let settings = ModSettings::from_toml("[ambient_text]\ninterval = -2\n").expect("parse");
            let handle = SettingsHandle::new(settings);
            let mut system = AmbientTextSystem::with_rng(
                crypt_table(),
                handle.clone(),
                HostTime(0.0),
                StdRng::seed_from_u64(5),
            );
            let mut hud = HudQueue::new();
            for frame in 0..600 {
                system.update(HostTime(f64::from(frame) / 60.0), &in_crypt(), &mut hud);
            }
            assert_eq!(warnings.load(Ordering::Relaxed), 1);

            handle.replace(settings);
            for frame in 600..1_200 {
                system.update(HostTime(f64::from(frame) / 60.0), &in_crypt(), &mut hud);
            }
        });
        assert_eq!(warnings.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn switch_and_config_come_from_one_read() {
        let handle = SettingsHandle::new(certain());
        let mut off = certain();
        off.modules.ambient_text = false;
        off.ambient_text.interval = 30.0;
        handle.replace(off);
        assert_eq!(handle.read(), (false, off.selector_config()));

        let mut system =
            AmbientTextSystem::with_rng(crypt_table(), handle, HostTime(0.0), StdRng::seed_from_u64(6));
        let mut hud = HudQueue::new();
        assert_eq!(
            system.update(HostTime(5.0), &in_crypt(), &mut hud),
            TickOutcome::Skipped(SkipReason::Disabled)
        );
        assert!((system.selector().config().base_interval_secs - 30.0).abs() < f32::EPSILON);
    }
}
