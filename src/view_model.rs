//! Detail view-model - pure derivation from a raw payload
//!
//! Everything the detail screen paints is computed here once per payload.
//! Components only read the result; none of them look at [`RawPokemon`].

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::palette::{self, PokemonType, Rgb};
use crate::state::RawPokemon;

/// Base stat value that fills a stat bar completely.
pub const STAT_BAR_MAX: f64 = 200.0;

/// One alternate sprite of the same Pokemon
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SpriteForm {
    pub label: String,
    pub url: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TypeBadge {
    pub name: String,
    pub text_color: Rgb,
    pub background_color: Rgb,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct StatRow {
    /// Verbatim API name, used as the row key
    pub name: String,
    /// Display label with separators replaced by spaces
    pub label: String,
    pub value: u32,
    /// `min(1, value / 200)`
    pub fill_ratio: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AbilityRow {
    pub label: String,
    pub is_hidden: bool,
}

/// Display-ready snapshot of one Pokemon
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct DetailViewModel {
    pub name: String,
    pub display_name: String,
    pub padded_id: String,
    pub primary_type: PokemonType,
    pub base_color: Rgb,
    pub primary_color: Rgb,
    pub hero_color: Rgb,
    pub chip_color: Rgb,
    pub hero_image_url: Option<String>,
    pub forms: Vec<SpriteForm>,
    pub type_badges: Vec<TypeBadge>,
    pub stat_rows: Vec<StatRow>,
    pub height_label: String,
    pub weight_label: String,
    pub base_experience: Option<u32>,
    pub abilities: Vec<AbilityRow>,
}

impl DetailViewModel {
    pub fn build(raw: &RawPokemon) -> Self {
        build(raw)
    }
}

/// Derive the view-model. Total over any payload; missing images and empty
/// type lists fall back instead of failing.
pub fn build(raw: &RawPokemon) -> DetailViewModel {
    let primary_type = primary_type(&raw.types);
    let base_color = primary_type.base_color();

    DetailViewModel {
        name: raw.name.clone(),
        display_name: title_case(&raw.name),
        padded_id: padded_id(raw.id),
        primary_type,
        base_color,
        primary_color: base_color.pastelize(palette::PAGE_MIX),
        hero_color: base_color.pastelize(palette::HERO_MIX),
        chip_color: base_color.pastelize(palette::CHIP_MIX),
        hero_image_url: hero_image_url(raw),
        forms: forms(raw),
        type_badges: type_badges(&raw.types),
        stat_rows: raw
            .stats
            .iter()
            .map(|stat| stat_row(&stat.name, stat.base_value))
            .collect(),
        height_label: format!("{:.1} m", f64::from(raw.height) / 10.0),
        weight_label: format!("{:.1} kg", f64::from(raw.weight) / 10.0),
        base_experience: raw.base_experience,
        abilities: raw
            .abilities
            .iter()
            .map(|ability| AbilityRow {
                label: humanize(&ability.name),
                is_hidden: ability.is_hidden,
            })
            .collect(),
    }
}

/// Uppercase the first character only.
pub fn title_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn padded_id(id: u32) -> String {
    format!("{id:03}")
}

pub fn fill_ratio(value: u32) -> f64 {
    (f64::from(value) / STAT_BAR_MAX).min(1.0)
}

/// First type drives the palette; unknown or missing types read as `normal`.
pub fn primary_type(types: &[String]) -> PokemonType {
    types
        .first()
        .and_then(|name| PokemonType::from_name(name))
        .unwrap_or(PokemonType::Normal)
}

pub fn hero_image_url(raw: &RawPokemon) -> Option<String> {
    first_present([
        raw.sprites.official_artwork.as_deref(),
        raw.sprites.front_default.as_deref(),
    ])
    .map(str::to_string)
}

pub fn forms(raw: &RawPokemon) -> Vec<SpriteForm> {
    let candidates = [
        ("Default", raw.sprites.front_default.as_deref()),
        ("Shiny", raw.sprites.front_shiny.as_deref()),
        ("Artwork", raw.sprites.official_artwork.as_deref()),
    ];
    candidates
        .into_iter()
        .filter_map(|(label, url)| {
            let url = present(url)?;
            Some(SpriteForm {
                label: label.to_string(),
                url: url.to_string(),
            })
        })
        .collect()
}

pub fn type_badges(types: &[String]) -> Vec<TypeBadge> {
    types
        .iter()
        .map(|name| {
            let base = palette::type_color(name);
            TypeBadge {
                name: name.clone(),
                text_color: base,
                background_color: base.pastelize(palette::BADGE_MIX),
            }
        })
        .collect()
}

pub fn stat_row(name: &str, value: u32) -> StatRow {
    StatRow {
        name: name.to_string(),
        label: name.replace(['-', '_'], " "),
        value,
        fill_ratio: fill_ratio(value),
    }
}

fn humanize(name: &str) -> String {
    title_case(&name.replace('-', " "))
}

/// Resolve an ordered list of optional URLs to the first usable one.
fn first_present<'a, const N: usize>(candidates: [Option<&'a str>; N]) -> Option<&'a str> {
    candidates.into_iter().find_map(present)
}

/// `None` for null, empty or whitespace-only URLs.
fn present(url: Option<&str>) -> Option<&str> {
    url.filter(|url| !url.trim().is_empty())
}
