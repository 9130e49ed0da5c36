//! PokeAPI client
//!
//! The JSON body is decoded into private wire structs that mirror the parts of
//! `/pokemon/{name}` the screen uses (unknown fields are ignored), then
//! validated into a [`RawPokemon`].

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::Config;
use crate::state::{RawAbility, RawPokemon, RawStat, SpriteSet, normalize_name};

// ============================================================================
// Errors
// ============================================================================

#[derive(thiserror::Error, Debug)]
pub enum ApiError {
    #[error("no Pokemon name given")]
    EmptyName,
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{url} returned {status}")]
    Status {
        status: reqwest::StatusCode,
        url: String,
    },
    #[error("response parse error: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("malformed payload: {0}")]
    Malformed(String),
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Deserialize)]
struct NamedResource {
    name: String,
}

#[derive(Debug, Deserialize)]
struct PokemonResponse {
    id: u32,
    name: String,
    #[serde(default)]
    height: u32,
    #[serde(default)]
    weight: u32,
    #[serde(default)]
    base_experience: Option<u32>,
    #[serde(default)]
    sprites: SpritesResponse,
    #[serde(default)]
    types: Vec<TypeSlot>,
    #[serde(default)]
    stats: Vec<StatSlot>,
    #[serde(default)]
    abilities: Vec<AbilitySlot>,
}

#[derive(Debug, Default, Deserialize)]
struct SpritesResponse {
    #[serde(default)]
    front_default: Option<String>,
    #[serde(default)]
    front_shiny: Option<String>,
    #[serde(default)]
    other: Option<OtherSprites>,
}

#[derive(Debug, Deserialize)]
struct OtherSprites {
    #[serde(rename = "official-artwork", default)]
    official_artwork: Option<ArtworkSprites>,
}

#[derive(Debug, Deserialize)]
struct ArtworkSprites {
    #[serde(default)]
    front_default: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TypeSlot {
    #[serde(default)]
    slot: u8,
    #[serde(rename = "type")]
    type_info: NamedResource,
}

#[derive(Debug, Deserialize)]
struct StatSlot {
    base_stat: u32,
    stat: NamedResource,
}

#[derive(Debug, Deserialize)]
struct AbilitySlot {
    ability: NamedResource,
    #[serde(default)]
    is_hidden: bool,
}

impl TryFrom<PokemonResponse> for RawPokemon {
    type Error = ApiError;

    fn try_from(response: PokemonResponse) -> Result<Self, Self::Error> {
        if response.id == 0 {
            return Err(ApiError::Malformed("id must be positive".into()));
        }
        if response.name.trim().is_empty() {
            return Err(ApiError::Malformed("name is empty".into()));
        }

        let mut types = response.types;
        types.sort_by_key(|slot| slot.slot);

        let official_artwork = response
            .sprites
            .other
            .and_then(|other| other.official_artwork)
            .and_then(|artwork| artwork.front_default);

        Ok(RawPokemon {
            id: response.id,
            name: response.name,
            height: response.height,
            weight: response.weight,
            base_experience: response.base_experience,
            sprites: SpriteSet {
                front_default: response.sprites.front_default,
                front_shiny: response.sprites.front_shiny,
                official_artwork,
            },
            types: types.into_iter().map(|slot| slot.type_info.name).collect(),
            stats: response
                .stats
                .into_iter()
                .map(|slot| RawStat {
                    name: slot.stat.name,
                    base_value: slot.base_stat,
                })
                .collect(),
            abilities: response
                .abilities
                .into_iter()
                .map(|slot| RawAbility {
                    name: slot.ability.name,
                    is_hidden: slot.is_hidden,
                })
                .collect(),
        })
    }
}

/// Decode and validate a `/pokemon/{name}` body.
pub fn decode_pokemon(bytes: &[u8]) -> Result<RawPokemon, ApiError> {
    let response: PokemonResponse = serde_json::from_slice(bytes)?;
    RawPokemon::try_from(response)
}

// ============================================================================
// Client
// ============================================================================

#[async_trait]
pub trait PokemonClient: Send + Sync {
    async fn fetch_pokemon(&self, name: &str) -> Result<RawPokemon, ApiError>;
}

#[derive(Clone, Debug)]
pub struct HttpPokemonClient {
    base_url: String,
    client: reqwest::Client,
}

impl HttpPokemonClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ApiError> {
        Self::new(config.api_base(), config.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get(&self, url: &str) -> Result<RawPokemon, ApiError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                status,
                url: url.to_string(),
            });
        }
        let bytes = response.bytes().await?;
        decode_pokemon(&bytes)
    }

    /// Resource URL for an already-normalized name.
    pub fn pokemon_url(&self, name: &str) -> String {
        format!("{}/pokemon/{}", self.base_url, urlencoding::encode(name))
    }
}

#[async_trait]
impl PokemonClient for HttpPokemonClient {
    async fn fetch_pokemon(&self, name: &str) -> Result<RawPokemon, ApiError> {
        let name = normalize_name(name).ok_or(ApiError::EmptyName)?;
        let url = self.pokemon_url(&name);
        debug!(%url, "fetching pokemon");

        let result = self.get(&url).await;

        if let Err(err) = &result {
            warn!(%url, error = %err, "pokemon fetch failed");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_minimal_payload() {
        let body = br#"{
            "id": 132,
            "name": "ditto",
            "height": 3,
            "weight": 40,
            "sprites": {"front_default": null, "front_shiny": null},
            "types": [],
            "stats": [{"base_stat": 48, "stat": {"name": "hp", "url": "x"}}]
        }"#;

        let raw = decode_pokemon(body).unwrap();

        assert_eq!(raw.id, 132);
        assert_eq!(raw.sprites, SpriteSet::default());
        assert!(raw.types.is_empty());
        assert_eq!(raw.stats[0].name, "hp");
        assert_eq!(raw.stats[0].base_value, 48);
    }

    #[test]
    fn test_types_sorted_by_slot() {
        let body = br#"{
            "id": 1,
            "name": "bulbasaur",
            "types": [
                {"slot": 2, "type": {"name": "poison"}},
                {"slot": 1, "type": {"name": "grass"}}
            ]
        }"#;

        let raw = decode_pokemon(body).unwrap();
        assert_eq!(raw.types, vec!["grass".to_string(), "poison".to_string()]);
    }

    #[test]
    fn test_zero_id_is_malformed() {
        let err = decode_pokemon(br#"{"id": 0, "name": "missingno"}"#).unwrap_err();
        assert!(matches!(err, ApiError::Malformed(_)));
    }

    #[test]
    fn test_wrong_shape_is_decode_error() {
        let err = decode_pokemon(br#"{"id": "one", "name": "x"}"#).unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[test]
    fn test_pokemon_url_encodes_name() {
        let client =
            HttpPokemonClient::new("https://example.test/api/v2/", Duration::from_secs(1))
                .unwrap();
        assert_eq!(
            client.pokemon_url("mr mime"),
            "https://example.test/api/v2/pokemon/mr%20mime"
        );
    }
}
