//! Fixed preset drink catalog.

use serde::Serialize;

use crate::drink_type::DrinkType;

/// A preset serving: the volume and strength recorded when the preset is chosen.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrinkPreset {
    pub drink_type: DrinkType,
    pub name: &'static str,
    pub emoji: &'static str,
    pub volume_ml: f64,
    pub abv_percent: f64,
    /// Short serving label, e.g. `350ml (5%)`.
    pub info: &'static str,
}

const fn preset(
    drink_type: DrinkType,
    name: &'static str,
    emoji: &'static str,
    volume_ml: f64,
    abv_percent: f64,
    info: &'static str,
) -> DrinkPreset {
    DrinkPreset {
        drink_type,
        name,
        emoji,
        volume_ml,
        abv_percent,
        info,
    }
}

pub static PRESETS: [DrinkPreset; 8] = [
    preset(DrinkType::Beer, "Beer", "🍺", 350.0, 5.0, "350ml (5%)"),
    preset(DrinkType::BeerLarge, "Large beer", "🍺", 500.0, 5.0, "500ml (5%)"),
    preset(DrinkType::Highball, "Highball", "🥃", 300.0, 7.0, "300ml (7%)"),
    preset(DrinkType::Sake, "Sake", "🍶", 180.0, 15.0, "1 go (15%)"),
    preset(DrinkType::Wine, "Wine", "🍷", 120.0, 12.0, "120ml (12%)"),
    preset(DrinkType::SparklingWine, "Sparkling wine", "🥂", 120.0, 12.0, "120ml (12%)"),
    preset(DrinkType::Whiskey, "Whiskey", "🥃", 30.0, 40.0, "30ml (40%)"),
    preset(DrinkType::Shochu, "Shochu", "🍺", 90.0, 25.0, "90ml (25%)"),
];

/// Looks up the preset for a drink type. `Custom` has none.
pub fn lookup(drink_type: DrinkType) -> Option<&'static DrinkPreset> {
    PRESETS.iter().find(|p| p.drink_type == drink_type)
}

/// Resolves a raw tag to its preset, if the tag still names one.
pub fn lookup_tag(tag: &str) -> Option<&'static DrinkPreset> {
    tag.parse().ok().and_then(lookup)
}

/// Human-readable name for any drink type, including `custom`.
pub fn display_name(drink_type: DrinkType) -> String {
    match lookup(drink_type) {
        Some(p) => format!("{} {}", p.emoji, p.name),
        None => "🍹 Custom".to_string(),
    }
}
