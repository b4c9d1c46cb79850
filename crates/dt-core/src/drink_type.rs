//! Drink type enum as the single source of truth for drink type tags.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Preset drink types plus the free-form `custom` pseudo-type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DrinkType {
    Beer,
    BeerLarge,
    Highball,
    Sake,
    Wine,
    SparklingWine,
    Whiskey,
    Shochu,
    Custom,
}

impl DrinkType {
    /// Every preset type, in catalog order. `Custom` is not a preset.
    pub const PRESETS: [Self; 8] = [
        Self::Beer,
        Self::BeerLarge,
        Self::Highball,
        Self::Sake,
        Self::Wine,
        Self::SparklingWine,
        Self::Whiskey,
        Self::Shochu,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Beer => "beer",
            Self::BeerLarge => "beer_large",
            Self::Highball => "highball",
            Self::Sake => "sake",
            Self::Wine => "wine",
            Self::SparklingWine => "sparkling_wine",
            Self::Whiskey => "whiskey",
            Self::Shochu => "shochu",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for DrinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DrinkType {
    type Err = UnknownDrinkType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "beer" => Ok(Self::Beer),
            "beer_large" => Ok(Self::BeerLarge),
            "highball" => Ok(Self::Highball),
            "sake" => Ok(Self::Sake),
            "wine" => Ok(Self::Wine),
            "sparkling_wine" => Ok(Self::SparklingWine),
            "whiskey" => Ok(Self::Whiskey),
            "shochu" => Ok(Self::Shochu),
            "custom" => Ok(Self::Custom),
            _ => Err(UnknownDrinkType(s.to_string())),
        }
    }
}

impl Serialize for DrinkType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for DrinkType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Error type for unknown drink type tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownDrinkType(String);

impl fmt::Display for UnknownDrinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown drink type: {}", self.0)
    }
}

impl std::error::Error for UnknownDrinkType {}
