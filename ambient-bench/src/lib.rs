//! Shared fixtures for the ambient text benchmarks.

use ambient_core::table::TextTable;
use ambient_core::types::{DungeonType, LocationType};

/// A table with a line for every dungeon key and every outdoor day/night
/// key, roughly the size of a fully authored content pack.
#[must_use]
pub fn full_table() -> TextTable {
    let mut entries = Vec::new();
    for idx in 0..10 {
        for dungeon in DungeonType::ALL {
            entries.push((format!("{dungeon}{idx}"), format!("{dungeon} line {idx}")));
        }
        for location in LocationType::ALL {
            for time in ["Day", "Night"] {
                entries.push((format!("{location}{time}{idx}"), format!("{location} {time} {idx}")));
                for weather in ["Clear", "Rainy", "Cloudy", "Snowy"] {
                    entries.push((
                        format!("{location}{time}{weather}{idx}"),
                        format!("{location} {time} {weather} {idx}"),
                    ));
                }
            }
            for climate in ["Desert", "Swamp", "Woods", "Mountains", "Ocean"] {
                entries.push((
                    format!("{location}{climate}{idx}"),
                    format!("{location} {climate} {idx}"),
                ));
            }
        }
    }
    TextTable::from_entries(entries).expect("fixture keys are unique")
}
