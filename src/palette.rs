//! Type palette and pastel color derivation

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Page background mix toward white.
pub const PAGE_MIX: f64 = 0.86;
/// Hero card mix toward white.
pub const HERO_MIX: f64 = 0.72;
/// Chip mix toward white.
pub const CHIP_MIX: f64 = 0.6;
/// Type badge background mix toward white.
pub const BADGE_MIX: f64 = 0.65;

/// A 24-bit RGB color
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Build from a packed `0xRRGGBB` value; the top byte is ignored.
    pub const fn from_hex(hex: u32) -> Self {
        Self {
            r: ((hex >> 16) & 0xff) as u8,
            g: ((hex >> 8) & 0xff) as u8,
            b: (hex & 0xff) as u8,
        }
    }

    /// Blend toward white by `ratio`. 0 keeps the color, 1 yields white.
    pub fn pastelize(self, ratio: f64) -> Rgb {
        let ratio = if ratio.is_nan() { 0.0 } else { ratio.clamp(0.0, 1.0) };
        Rgb {
            r: mix_channel(self.r, ratio),
            g: mix_channel(self.g, ratio),
            b: mix_channel(self.b, ratio),
        }
    }
}

impl std::fmt::Display for Rgb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

fn mix_channel(channel: u8, ratio: f64) -> u8 {
    let channel = f64::from(channel);
    (channel + (255.0 - channel) * ratio).round().clamp(0.0, 255.0) as u8
}

/// The 18 canonical Pokemon types
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PokemonType {
    Normal,
    Fire,
    Water,
    Electric,
    Grass,
    Ice,
    Fighting,
    Poison,
    Ground,
    Flying,
    Psychic,
    Bug,
    Rock,
    Ghost,
    Dragon,
    Dark,
    Steel,
    Fairy,
}

impl PokemonType {
    pub const ALL: [PokemonType; 18] = [
        PokemonType::Normal,
        PokemonType::Fire,
        PokemonType::Water,
        PokemonType::Electric,
        PokemonType::Grass,
        PokemonType::Ice,
        PokemonType::Fighting,
        PokemonType::Poison,
        PokemonType::Ground,
        PokemonType::Flying,
        PokemonType::Psychic,
        PokemonType::Bug,
        PokemonType::Rock,
        PokemonType::Ghost,
        PokemonType::Dragon,
        PokemonType::Dark,
        PokemonType::Steel,
        PokemonType::Fairy,
    ];

    /// Look up a type by its API name (case-insensitive).
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL
            .into_iter()
            .find(|ty| ty.name().eq_ignore_ascii_case(name))
    }

    pub fn name(self) -> &'static str {
        match self {
            PokemonType::Normal => "normal",
            PokemonType::Fire => "fire",
            PokemonType::Water => "water",
            PokemonType::Electric => "electric",
            PokemonType::Grass => "grass",
            PokemonType::Ice => "ice",
            PokemonType::Fighting => "fighting",
            PokemonType::Poison => "poison",
            PokemonType::Ground => "ground",
            PokemonType::Flying => "flying",
            PokemonType::Psychic => "psychic",
            PokemonType::Bug => "bug",
            PokemonType::Rock => "rock",
            PokemonType::Ghost => "ghost",
            PokemonType::Dragon => "dragon",
            PokemonType::Dark => "dark",
            PokemonType::Steel => "steel",
            PokemonType::Fairy => "fairy",
        }
    }

    pub fn base_color(self) -> Rgb {
        let hex = match self {
            PokemonType::Normal => 0xA8A77A,
            PokemonType::Fire => 0xEE8130,
            PokemonType::Water => 0x6390F0,
            PokemonType::Electric => 0xF7D02C,
            PokemonType::Grass => 0x7AC74C,
            PokemonType::Ice => 0x96D9D6,
            PokemonType::Fighting => 0xC22E28,
            PokemonType::Poison => 0xA33EA1,
            PokemonType::Ground => 0xE2BF65,
            PokemonType::Flying => 0xA98FF3,
            PokemonType::Psychic => 0xF95587,
            PokemonType::Bug => 0xA6B91A,
            PokemonType::Rock => 0xB6A136,
            PokemonType::Ghost => 0x735797,
            PokemonType::Dragon => 0x6F35FC,
            PokemonType::Dark => 0x705746,
            PokemonType::Steel => 0xB7B7CE,
            PokemonType::Fairy => 0xD685AD,
        };
        Rgb::from_hex(hex)
    }
}

/// Base color for a type name; unknown names use the `normal` entry.
pub fn type_color(name: &str) -> Rgb {
    PokemonType::from_name(name)
        .unwrap_or(PokemonType::Normal)
        .base_color()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_hex_unpacks_channels() {
        assert_eq!(Rgb::from_hex(0xEE8130), Rgb::new(0xEE, 0x81, 0x30));
        assert_eq!(Rgb::from_hex(0xFFEE8130), Rgb::new(0xEE, 0x81, 0x30));
    }

    #[test]
    fn test_pastelize_endpoints() {
        for ty in PokemonType::ALL {
            let base = ty.base_color();
            assert_eq!(base.pastelize(0.0), base, "{}", ty.name());
            assert_eq!(base.pastelize(1.0), Rgb::WHITE, "{}", ty.name());
        }
    }

    #[test]
    fn test_pastelize_rounds_each_channel() {
        // 0x00 + 255 * 0.5 = 127.5 -> 128
        let mixed = Rgb::new(0, 100, 255).pastelize(0.5);
        assert_eq!(mixed, Rgb::new(128, 178, 255));
    }

    #[test]
    fn test_pastelize_clamps_ratio() {
        let base = PokemonType::Fire.base_color();
        assert_eq!(base.pastelize(-1.0), base);
        assert_eq!(base.pastelize(2.0), Rgb::WHITE);
    }

    #[test]
    fn test_unknown_type_falls_back_to_normal() {
        assert_eq!(type_color("shadow"), PokemonType::Normal.base_color());
        assert_eq!(type_color(""), PokemonType::Normal.base_color());
        assert_eq!(type_color("Water"), PokemonType::Water.base_color());
    }

    #[test]
    fn test_display_hex() {
        assert_eq!(Rgb::new(0xA8, 0xA7, 0x7A).to_string(), "#A8A77A");
    }
}
