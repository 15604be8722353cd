//! Core positional types shared across all modules.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

// ---------------------------------------------------------------------------
// Basic math
// ---------------------------------------------------------------------------

/// World-space position of a player.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Coordinates {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    pub fn origin() -> Self {
        Self::new(0.0, 0.0, 0.0)
    }
}

impl fmt::Display for Coordinates {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.2}, {:.2}, {:.2})", self.x, self.y, self.z)
    }
}

/// Facing of a player.
///
/// `x` carries yaw and `y` carries pitch. The receiver reads these names, so
/// they stay as they are.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Orientation {
    pub x: f32,
    pub y: f32,
}

impl Orientation {
    pub fn new(yaw: f32, pitch: f32) -> Self {
        Self { x: yaw, y: pitch }
    }

    pub fn yaw(&self) -> f32 {
        self.x
    }

    pub fn pitch(&self) -> f32 {
        self.y
    }
}

// ---------------------------------------------------------------------------
// Game platforms
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameType {
    Minecraft,
    Hytale,
}

impl GameType {
    pub fn as_wire(&self) -> &'static str {
        match self {
            GameType::Minecraft => "minecraft",
            GameType::Hytale => "hytale",
        }
    }
}

impl fmt::Display for GameType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_wire())
    }
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown game type '{0}' (expected 'minecraft' or 'hytale')")]
pub struct UnknownGameType(pub String);

impl FromStr for GameType {
    type Err = UnknownGameType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "minecraft" => Ok(GameType::Minecraft),
            "hytale" => Ok(GameType::Hytale),
            _ => Err(UnknownGameType(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Dimensions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum MinecraftDimension {
    Overworld,
    Nether,
    TheEnd,
}

#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum HytaleDimension {
    Orbis,
}

/// Logical subworld a player is in.
///
/// `Custom` carries any platform string the alias tables do not recognise,
/// unchanged.
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub enum Dimension {
    Minecraft(MinecraftDimension),
    Hytale(HytaleDimension),
    Custom(String),
}

impl Dimension {
    pub const OVERWORLD: Dimension = Dimension::Minecraft(MinecraftDimension::Overworld);
    pub const NETHER: Dimension = Dimension::Minecraft(MinecraftDimension::Nether);
    pub const THE_END: Dimension = Dimension::Minecraft(MinecraftDimension::TheEnd);
    pub const ORBIS: Dimension = Dimension::Hytale(HytaleDimension::Orbis);

    /// Map a raw platform string onto a dimension for `game`.
    ///
    /// Matching is case-insensitive. Minecraft accepts exact aliases first and
    /// then falls back to substring search, so world folder names such as
    /// `survival_nether` resolve too. Unmatched input becomes `Custom(raw)`.
    pub fn parse(game: GameType, raw: &str) -> Dimension {
        let lower = raw.to_lowercase();
        let known = match game {
            GameType::Minecraft => minecraft_alias(&lower).map(Dimension::Minecraft),
            GameType::Hytale => hytale_alias(&lower).map(Dimension::Hytale),
        };
        known.unwrap_or_else(|| Dimension::Custom(raw.to_string()))
    }

    /// [`Dimension::parse`] for hosts that may not know the dimension at all.
    pub fn parse_opt(game: GameType, raw: Option<&str>) -> Option<Dimension> {
        raw.map(|r| Dimension::parse(game, r))
    }

    /// Exact match against Minecraft registry keys, no substring fallback.
    pub fn from_registry_key(key: &str) -> Dimension {
        match key {
            "minecraft:overworld" => Dimension::OVERWORLD,
            "minecraft:the_nether" => Dimension::NETHER,
            "minecraft:the_end" => Dimension::THE_END,
            other => Dimension::Custom(other.to_string()),
        }
    }

    pub fn to_wire(&self) -> &str {
        match self {
            Dimension::Minecraft(MinecraftDimension::Overworld) => "overworld",
            Dimension::Minecraft(MinecraftDimension::Nether) => "nether",
            Dimension::Minecraft(MinecraftDimension::TheEnd) => "the_end",
            Dimension::Hytale(HytaleDimension::Orbis) => "orbis",
            Dimension::Custom(name) => name,
        }
    }

    pub fn is_custom(&self) -> bool {
        matches!(self, Dimension::Custom(_))
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_wire())
    }
}

fn minecraft_alias(lower: &str) -> Option<MinecraftDimension> {
    use MinecraftDimension::*;
    match lower {
        "minecraft:overworld" | "overworld" | "world" => Some(Overworld),
        "minecraft:the_nether" | "the_nether" | "nether" | "world_nether" => Some(Nether),
        "minecraft:the_end" | "the_end" | "world_the_end" => Some(TheEnd),
        _ if lower.contains("overworld") => Some(Overworld),
        _ if lower.contains("nether") => Some(Nether),
        // also covers "the_end"
        _ if lower.contains("end") => Some(TheEnd),
        _ => None,
    }
}

fn hytale_alias(lower: &str) -> Option<HytaleDimension> {
    match lower {
        "orbis" => Some(HytaleDimension::Orbis),
        _ => None,
    }
}
