//! Static destination catalog
//!
//! Read-only fixture data: candidate cities with descriptive tags and the
//! pre-baked weather estimates the offline fallback path relies on.

use crate::models::Destination;

#[allow(clippy::too_many_arguments)]
fn destination(
    name: &str,
    country: &str,
    emoji: &str,
    description: &str,
    beach: bool,
    culture: bool,
    nature: bool,
    avg_temp: i64,
    sunshine: i64,
) -> Destination {
    Destination {
        name: name.to_string(),
        country: country.to_string(),
        emoji: emoji.to_string(),
        description: description.to_string(),
        beach,
        culture,
        nature,
        avg_temp,
        sunshine,
    }
}

/// The built-in candidate destinations evaluated by every search
#[must_use]
pub fn default_catalog() -> Vec<Destination> {
    vec![
        destination(
            "Barcelona",
            "Spain",
            "🏖️",
            "Mediterranean beaches, Gaudí architecture and a buzzing old town.",
            true,
            true,
            false,
            24,
            75,
        ),
        destination(
            "Lisbon",
            "Portugal",
            "🌉",
            "Hilly riverside capital with Atlantic beaches a tram ride away.",
            true,
            true,
            false,
            22,
            80,
        ),
        destination(
            "Rome",
            "Italy",
            "🏛️",
            "Two thousand years of history on every street corner.",
            false,
            true,
            false,
            26,
            78,
        ),
        destination(
            "Athens",
            "Greece",
            "🏺",
            "Ancient ruins, rooftop tavernas and ferries to the islands.",
            true,
            true,
            false,
            28,
            85,
        ),
        destination(
            "Dubrovnik",
            "Croatia",
            "🏰",
            "Walled Adriatic old town with pebble beaches below the ramparts.",
            true,
            true,
            true,
            25,
            80,
        ),
        destination(
            "Prague",
            "Czechia",
            "🌁",
            "Gothic spires, cobbled lanes and beer gardens above the Vltava.",
            false,
            true,
            false,
            19,
            60,
        ),
        destination(
            "Vienna",
            "Austria",
            "🎻",
            "Imperial palaces, coffee houses and a packed concert calendar.",
            false,
            true,
            false,
            20,
            58,
        ),
        destination(
            "Amsterdam",
            "Netherlands",
            "🚲",
            "Canals, world-class museums and everything reachable by bike.",
            false,
            true,
            false,
            17,
            50,
        ),
        destination(
            "Interlaken",
            "Switzerland",
            "🏔️",
            "Alpine lakes and peaks, a base camp for hikers and paragliders.",
            false,
            false,
            true,
            15,
            55,
        ),
        destination(
            "Nice",
            "France",
            "🌊",
            "Riviera promenade, azure water and day trips into the hills.",
            true,
            false,
            true,
            23,
            82,
        ),
        destination(
            "Reykjavik",
            "Iceland",
            "🌋",
            "Geysers, glaciers and midnight sun on the edge of the Arctic.",
            false,
            false,
            true,
            10,
            40,
        ),
        destination(
            "Palma de Mallorca",
            "Spain",
            "⛵",
            "Island capital mixing sandy coves with a Gothic seafront cathedral.",
            true,
            false,
            true,
            26,
            85,
        ),
    ]
}
