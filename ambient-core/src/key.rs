//! Context key derivation.
//!
//! A key is the concatenation of canonical enum names followed by a
//! variant index 0–9, with no separators:
//!
//! | Context                      | Key shape                              | Example             |
//! |------------------------------|----------------------------------------|---------------------|
//! | Dungeon                      | `<dungeon><idx>`                       | `Crypt3`            |
//! | Outdoors, climate            | `<location><climate><idx>`             | `TownCityDesert7`   |
//! | Outdoors, day/night          | `<location><Day/Night><idx>`           | `VillageNight2`     |
//! | Outdoors, day/night, weather | `<location><Day/Night><weather><idx>`  | `VillageDayRainy0`  |
//!
//! Outside every location rect the location fragment is `None`.

use rand::Rng;

use crate::types::{
    day_night, ClimateZone, DungeonType, EnvironmentSnapshot, WeatherFlags, WeatherState,
};

/// Number of authored lines per context key.
pub const VARIANT_COUNT: u8 = 10;

/// Draws variant indices 0–9, never returning the same index twice in a row.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VariantPicker {
    last: Option<u8>,
}

impl VariantPicker {
    /// A picker with no previous draw.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recently drawn index, if any.
    #[must_use]
    pub fn last(&self) -> Option<u8> {
        self.last
    }

    /// Draw a fresh index by rejection sampling against the previous one.
    pub fn next<R: Rng + ?Sized>(&mut self, rng: &mut R) -> u8 {
        loop {
            let idx = rng.gen_range(0..VARIANT_COUNT);
            if Some(idx) != self.last {
                self.last = Some(idx);
                return idx;
            }
        }
    }
}

/// Which context dimensions an outdoor key combines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutdoorVariant {
    /// Location and climate.
    Climate,
    /// Location and time of day.
    DayNight,
    /// Location, time of day and weather.
    DayNightWeather,
}

impl OutdoorVariant {
    /// All variants, in draw order.
    pub const ALL: [Self; 3] = [Self::Climate, Self::DayNight, Self::DayNightWeather];

    /// Draw one of the three variants uniformly.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.gen_range(0..Self::ALL.len())]
    }
}

/// Climate fragment for a raw host climate index. Unknown indices give `"Ocean"`.
#[must_use]
pub fn climate_key(index: i32) -> &'static str {
    ClimateZone::from_index(index).name()
}

/// Weather fragment for raw host weather flags.
#[must_use]
pub fn weather_key(flags: WeatherFlags) -> &'static str {
    WeatherState::from_flags(flags).name()
}

/// Key for a dungeon interior.
#[must_use]
pub fn dungeon_key(dungeon: DungeonType, idx: u8) -> String {
    format!("{dungeon}{idx}")
}

/// Key for an outdoor scene.
#[must_use]
pub fn outdoor_key(env: &EnvironmentSnapshot, variant: OutdoorVariant, idx: u8) -> String {
    let location = env.effective_location();
    match variant {
        OutdoorVariant::Climate => {
            format!("{location}{}{idx}", climate_key(env.climate_index))
        }
        OutdoorVariant::DayNight => format!("{location}{}{idx}", day_night(env.is_day)),
        OutdoorVariant::DayNightWeather => {
            format!("{location}{}{}{idx}", day_night(env.is_day), env.weather)
        }
    }
}

/// Key for `env` with an already drawn variant and index.
///
/// Inside a dungeon only the dungeon type matters and `variant` is ignored.
#[must_use]
pub fn compose_key(env: &EnvironmentSnapshot, variant: OutdoorVariant, idx: u8) -> String {
    if env.is_inside_dungeon {
        dungeon_key(env.dungeon_type, idx)
    } else {
        outdoor_key(env, variant, idx)
    }
}
