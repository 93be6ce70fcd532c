//! Bridge module — maps raw host queries onto ambient-core types.
//!
//! The host exposes its world through several singletons:
//! - enter/exit state (inside building, inside dungeon, current dungeon id)
//! - GPS (in location rect, location type id, climate index)
//! - world time (hour of day)
//! - weather manager (raining, storming, snowing, overcast flags)
//!
//! Each frame the host copies those values into a [`HostWorldState`],
//! which then serves as the engine's `EnvironmentSource`.

use ambient_core::host::EnvironmentSource;
use ambient_core::types::{
    DungeonType, EnvironmentSnapshot, LocationType, WeatherFlags, WeatherState,
};

/// First daytime hour.
pub const DAWN_HOUR: u8 = 6;
/// First night-time hour.
pub const DUSK_HOUR: u8 = 18;

/// Raw per-frame host state, as read from the host's singletons.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HostWorldState {
    /// Host finished loading.
    pub ready: bool,
    /// Player enter/exit state can be queried.
    pub player_available: bool,
    /// Game is paused.
    pub paused: bool,
    /// Player is inside a building.
    pub inside_building: bool,
    /// Player is inside a dungeon.
    pub inside_dungeon: bool,
    /// Raw dungeon type id of the current dungeon.
    pub dungeon_id: u8,
    /// Player is inside a location rect.
    pub in_location_rect: bool,
    /// Raw location type id of the current location.
    pub location_type_id: i32,
    /// Raw climate index under the player.
    pub climate_index: i32,
    /// Hour of day, 0–23.
    pub hour: u8,
    /// Raw weather flags.
    pub weather: WeatherFlags,
}

impl HostWorldState {
    /// Whether `hour` falls in daytime.
    #[must_use]
    pub fn is_day(&self) -> bool {
        (DAWN_HOUR..DUSK_HOUR).contains(&self.hour)
    }

    /// Convert to the engine's snapshot, applying host-id mappings.
    #[must_use]
    pub fn to_snapshot(&self) -> EnvironmentSnapshot {
        EnvironmentSnapshot {
            is_inside_building: self.inside_building,
            is_inside_dungeon: self.inside_dungeon,
            dungeon_type: DungeonType::from_id(self.dungeon_id),
            is_in_location_rect: self.in_location_rect,
            location_type: LocationType::from_id(self.location_type_id),
            is_day: self.is_day(),
            climate_index: self.climate_index,
            weather: WeatherState::from_flags(self.weather),
            is_game_paused: self.paused,
            host_ready: self.ready,
        }
    }
}

impl Default for HostWorldState {
    fn default() -> Self {
        Self {
            ready: true,
            player_available: true,
            paused: false,
            inside_building: false,
            inside_dungeon: false,
            dungeon_id: 255,
            in_location_rect: false,
            location_type_id: -1,
            climate_index: ambient_core::types::climate::OCEAN,
            hour: 12,
            weather: WeatherFlags::default(),
        }
    }
}

impl EnvironmentSource for HostWorldState {
    fn is_host_ready(&self) -> bool {
        self.ready
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn snapshot(&self) -> Option<EnvironmentSnapshot> {
        self.player_available.then(|| self.to_snapshot())
    }
}
