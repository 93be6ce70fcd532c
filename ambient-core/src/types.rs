//! Core type definitions for the ambient text engine.
//!
//! Every context dimension that feeds a text key is a closed enumeration
//! so key composition gets exhaustiveness checking. Each enum exposes its
//! canonical key fragment through `name()` and `Display`.

use serde::{Deserialize, Serialize};
use std::fmt;

// ---------------------------------------------------------------------------
// Time
// ---------------------------------------------------------------------------

/// Monotonic host time in seconds (unscaled, unaffected by pause).
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct HostTime(pub f64);

impl HostTime {
    /// Construct from seconds.
    #[must_use]
    pub fn from_secs(secs: f64) -> Self {
        Self(secs)
    }

    /// This time shifted forward by `secs`.
    #[must_use]
    pub fn offset(self, secs: f32) -> Self {
        Self(self.0 + f64::from(secs))
    }
}

impl fmt::Display for HostTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}s", self.0)
    }
}

// ---------------------------------------------------------------------------
// Dungeons
// ---------------------------------------------------------------------------

/// Kind of dungeon the player is inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DungeonType {
    /// Host id 0.
    Crypt,
    /// Host id 1.
    OrcStronghold,
    /// Host id 2.
    HumanStronghold,
    /// Host id 3.
    Prison,
    /// Host id 4.
    DesecratedTemple,
    /// Host id 5.
    Mine,
    /// Host id 6.
    NaturalCave,
    /// Host id 7.
    Coven,
    /// Host id 8.
    VampireHaunt,
    /// Host id 9.
    Laboratory,
    /// Host id 10.
    HarpyNest,
    /// Host id 11.
    RuinedCastle,
    /// Host id 12.
    SpiderNest,
    /// Host id 13.
    GiantStronghold,
    /// Host id 14.
    DragonsDen,
    /// Host id 15.
    BarbarianStronghold,
    /// Host id 16.
    VolcanicCaves,
    /// Host id 17.
    ScorpionNest,
    /// Host id 18.
    Cemetery,
    /// Host id 255, or any unknown id.
    NoDungeon,
}

impl DungeonType {
    /// All dungeon kinds, in host id order.
    pub const ALL: [Self; 20] = [
        Self::Crypt,
        Self::OrcStronghold,
        Self::HumanStronghold,
        Self::Prison,
        Self::DesecratedTemple,
        Self::Mine,
        Self::NaturalCave,
        Self::Coven,
        Self::VampireHaunt,
        Self::Laboratory,
        Self::HarpyNest,
        Self::RuinedCastle,
        Self::SpiderNest,
        Self::GiantStronghold,
        Self::DragonsDen,
        Self::BarbarianStronghold,
        Self::VolcanicCaves,
        Self::ScorpionNest,
        Self::Cemetery,
        Self::NoDungeon,
    ];

    /// Map a raw host dungeon id. Unknown ids become `NoDungeon`.
    #[must_use]
    pub fn from_id(id: u8) -> Self {
        match id {
            0..=18 => Self::ALL[usize::from(id)],
            _ => Self::NoDungeon,
        }
    }

    /// Canonical key fragment.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Crypt => "Crypt",
            Self::OrcStronghold => "OrcStronghold",
            Self::HumanStronghold => "HumanStronghold",
            Self::Prison => "Prison",
            Self::DesecratedTemple => "DesecratedTemple",
            Self::Mine => "Mine",
            Self::NaturalCave => "NaturalCave",
            Self::Coven => "Coven",
            Self::VampireHaunt => "VampireHaunt",
            Self::Laboratory => "Laboratory",
            Self::HarpyNest => "HarpyNest",
            Self::RuinedCastle => "RuinedCastle",
            Self::SpiderNest => "SpiderNest",
            Self::GiantStronghold => "GiantStronghold",
            Self::DragonsDen => "DragonsDen",
            Self::BarbarianStronghold => "BarbarianStronghold",
            Self::VolcanicCaves => "VolcanicCaves",
            Self::ScorpionNest => "ScorpionNest",
            Self::Cemetery => "Cemetery",
            Self::NoDungeon => "NoDungeon",
        }
    }
}

impl fmt::Display for DungeonType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Locations
// ---------------------------------------------------------------------------

/// Kind of map location the player is standing in.
///
/// `None` is the wilderness sentinel used whenever the player is outside
/// every location rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LocationType {
    /// Host id 0.
    TownCity,
    /// Host id 1.
    TownHamlet,
    /// Host id 2.
    Village,
    /// Host id 3.
    HomeFarms,
    /// Host id 4.
    DungeonLabyrinth,
    /// Host id 5.
    ReligionTemple,
    /// Host id 6.
    Tavern,
    /// Host id 7.
    DungeonKeep,
    /// Host id 8.
    HomeWealthy,
    /// Host id 9.
    ReligionCult,
    /// Host id 10.
    DungeonRuin,
    /// Host id 11.
    HomePoor,
    /// Host id 12.
    Graveyard,
    /// Host id 13.
    Coven,
    /// Host id 14.
    HomeYourShips,
    /// Wilderness, or any unknown id.
    None,
}

impl LocationType {
    /// All location kinds, in host id order, sentinel last.
    pub const ALL: [Self; 16] = [
        Self::TownCity,
        Self::TownHamlet,
        Self::Village,
        Self::HomeFarms,
        Self::DungeonLabyrinth,
        Self::ReligionTemple,
        Self::Tavern,
        Self::DungeonKeep,
        Self::HomeWealthy,
        Self::ReligionCult,
        Self::DungeonRuin,
        Self::HomePoor,
        Self::Graveyard,
        Self::Coven,
        Self::HomeYourShips,
        Self::None,
    ];

    /// Map a raw host location type id. Anything outside 0..=14 is `None`.
    #[must_use]
    pub fn from_id(id: i32) -> Self {
        match usize::try_from(id) {
            Ok(i) if i < 15 => Self::ALL[i],
            _ => Self::None,
        }
    }

    /// Canonical key fragment.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::TownCity => "TownCity",
            Self::TownHamlet => "TownHamlet",
            Self::Village => "Village",
            Self::HomeFarms => "HomeFarms",
            Self::DungeonLabyrinth => "DungeonLabyrinth",
            Self::ReligionTemple => "ReligionTemple",
            Self::Tavern => "Tavern",
            Self::DungeonKeep => "DungeonKeep",
            Self::HomeWealthy => "HomeWealthy",
            Self::ReligionCult => "ReligionCult",
            Self::DungeonRuin => "DungeonRuin",
            Self::HomePoor => "HomePoor",
            Self::Graveyard => "Graveyard",
            Self::Coven => "Coven",
            Self::HomeYourShips => "HomeYourShips",
            Self::None => "None",
        }
    }
}

impl fmt::Display for LocationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Climate
// ---------------------------------------------------------------------------

/// Raw host climate indices.
pub mod climate {
    /// Open sea.
    pub const OCEAN: i32 = 223;
    /// Sand desert.
    pub const DESERT: i32 = 224;
    /// Rocky desert.
    pub const DESERT2: i32 = 225;
    /// High mountains.
    pub const MOUNTAIN: i32 = 226;
    /// Tropical rainforest.
    pub const RAINFOREST: i32 = 227;
    /// Marsh and swamp.
    pub const SWAMP: i32 = 228;
    /// Subtropical scrub.
    pub const SUBTROPICAL: i32 = 229;
    /// Wooded mountain slopes.
    pub const MOUNTAIN_WOODS: i32 = 230;
    /// Temperate woodland.
    pub const WOODLANDS: i32 = 231;
    /// Haunted woodland.
    pub const HAUNTED_WOODLANDS: i32 = 232;
}

/// Coarse climate bucket used in text keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClimateZone {
    /// Desert, rocky desert and subtropical.
    Desert,
    /// Rainforest and swamp.
    Swamp,
    /// Woodlands of every kind.
    Woods,
    /// Mountains.
    Mountains,
    /// Catch-all for every other index.
    Ocean,
}

impl ClimateZone {
    /// Bucket a raw host climate index. Total: unknown indices are `Ocean`.
    #[must_use]
    pub fn from_index(index: i32) -> Self {
        match index {
            climate::DESERT2 | climate::DESERT | climate::SUBTROPICAL => Self::Desert,
            climate::RAINFOREST | climate::SWAMP => Self::Swamp,
            climate::WOODLANDS | climate::HAUNTED_WOODLANDS | climate::MOUNTAIN_WOODS => {
                Self::Woods
            }
            climate::MOUNTAIN => Self::Mountains,
            _ => Self::Ocean,
        }
    }

    /// Canonical key fragment.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Desert => "Desert",
            Self::Swamp => "Swamp",
            Self::Woods => "Woods",
            Self::Mountains => "Mountains",
            Self::Ocean => "Ocean",
        }
    }
}

impl fmt::Display for ClimateZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// ---------------------------------------------------------------------------
// Weather & time of day
// ---------------------------------------------------------------------------

/// Raw weather flags as reported by the host. Not mutually exclusive.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeatherFlags {
    /// Rain is falling.
    pub raining: bool,
    /// A thunderstorm is active.
    pub storming: bool,
    /// Snow is falling.
    pub snowing: bool,
    /// Sky is overcast.
    pub overcast: bool,
}

/// Weather bucket used in text keys.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeatherState {
    /// No weather flag set.
    #[default]
    Clear,
    /// Raining or storming.
    Rainy,
    /// Overcast only.
    Cloudy,
    /// Snowing.
    Snowy,
}

impl WeatherState {
    /// Collapse raw flags. First match wins: Rainy, Snowy, Cloudy, Clear.
    #[must_use]
    pub fn from_flags(flags: WeatherFlags) -> Self {
        if flags.raining || flags.storming {
            Self::Rainy
        } else if flags.snowing {
            Self::Snowy
        } else if flags.overcast {
            Self::Cloudy
        } else {
            Self::Clear
        }
    }

    /// Canonical key fragment.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Clear => "Clear",
            Self::Rainy => "Rainy",
            Self::Cloudy => "Cloudy",
            Self::Snowy => "Snowy",
        }
    }
}

impl From<WeatherFlags> for WeatherState {
    fn from(flags: WeatherFlags) -> Self {
        Self::from_flags(flags)
    }
}

impl fmt::Display for WeatherState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Key fragment for the time of day.
#[must_use]
pub fn day_night(is_day: bool) -> &'static str {
    if is_day { "Day" } else { "Night" }
}

// ---------------------------------------------------------------------------
// Environment snapshot
// ---------------------------------------------------------------------------

/// Everything the selector needs to know about the world for one tick.
///
/// Supplied fresh on every call and never retained past it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvironmentSnapshot {
    /// Player is inside a building interior.
    pub is_inside_building: bool,
    /// Player is inside a dungeon interior.
    pub is_inside_dungeon: bool,
    /// Dungeon kind. Only meaningful when `is_inside_dungeon`.
    pub dungeon_type: DungeonType,
    /// Player is inside a map location rect.
    pub is_in_location_rect: bool,
    /// Location kind. Only meaningful when `is_in_location_rect`.
    pub location_type: LocationType,
    /// World time is daytime.
    pub is_day: bool,
    /// Raw host climate index.
    pub climate_index: i32,
    /// Collapsed weather.
    pub weather: WeatherState,
    /// Game is paused.
    pub is_game_paused: bool,
    /// Host finished loading.
    pub host_ready: bool,
}

impl EnvironmentSnapshot {
    /// A ready, unpaused outdoor snapshot.
    #[must_use]
    pub fn outdoors(
        location_type: LocationType,
        is_day: bool,
        climate_index: i32,
        weather: WeatherState,
    ) -> Self {
        Self {
            is_in_location_rect: location_type != LocationType::None,
            location_type,
            is_day,
            climate_index,
            weather,
            ..Self::default()
        }
    }

    /// A ready, unpaused dungeon snapshot.
    #[must_use]
    pub fn dungeon(dungeon_type: DungeonType) -> Self {
        Self {
            is_inside_dungeon: true,
            dungeon_type,
            ..Self::default()
        }
    }

    /// Location kind after applying the location-rect gate.
    #[must_use]
    pub fn effective_location(&self) -> LocationType {
        if self.is_in_location_rect {
            self.location_type
        } else {
            LocationType::None
        }
    }
}

impl Default for EnvironmentSnapshot {
    fn default() -> Self {
        Self {
            is_inside_building: false,
            is_inside_dungeon: false,
            dungeon_type: DungeonType::NoDungeon,
            is_in_location_rect: false,
            location_type: LocationType::None,
            is_day: true,
            climate_index: climate::OCEAN,
            weather: WeatherState::Clear,
            is_game_paused: false,
            host_ready: true,
        }
    }
}
