//! Application state - single source of truth

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tui_dispatch::DataResource;

use crate::view_model::{DetailViewModel, SpriteForm};

/// Pokemon record as validated at the API boundary
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RawPokemon {
    pub id: u32,
    pub name: String,
    /// Decimetres
    pub height: u32,
    /// Hectograms
    pub weight: u32,
    pub base_experience: Option<u32>,
    pub sprites: SpriteSet,
    pub types: Vec<String>,
    pub stats: Vec<RawStat>,
    pub abilities: Vec<RawAbility>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SpriteSet {
    pub front_default: Option<String>,
    pub front_shiny: Option<String>,
    pub official_artwork: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RawStat {
    pub name: String,
    pub base_value: u32,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct RawAbility {
    pub name: String,
    pub is_hidden: bool,
}

/// Detail screen tabs, in display order
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum DetailTab {
    #[default]
    Forms,
    Detail,
    Types,
    Stats,
}

impl DetailTab {
    pub const ALL: [DetailTab; 4] = [
        DetailTab::Forms,
        DetailTab::Detail,
        DetailTab::Types,
        DetailTab::Stats,
    ];

    pub fn title(self) -> &'static str {
        match self {
            DetailTab::Forms => "Forms",
            DetailTab::Detail => "Detail",
            DetailTab::Types => "Types",
            DetailTab::Stats => "Stats",
        }
    }

    pub fn index(self) -> usize {
        match self {
            DetailTab::Forms => 0,
            DetailTab::Detail => 1,
            DetailTab::Types => 2,
            DetailTab::Stats => 3,
        }
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Spinner timing while a request is in flight.
pub const SPINNER_TICK_MS: u64 = 80;
pub const SPINNER_FRAMES: [&str; 4] = ["|", "/", "-", "\\"];

/// State for one detail screen instance
#[derive(Clone, Debug, tui_dispatch::DebugState, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct AppState {
    /// Normalized name the screen is showing; `None` means nothing requested
    #[debug(section = "Request", label = "Name", debug_fmt)]
    pub requested_name: Option<String>,

    /// Empty → Loading → Loaded/Failed
    #[debug(section = "Request", label = "Pokemon", debug_fmt)]
    pub pokemon: DataResource<DetailViewModel>,

    #[debug(section = "View", label = "Tab", debug_fmt)]
    pub tab: DetailTab,

    #[debug(section = "View", label = "Form")]
    pub selected_form: usize,

    #[debug(skip)]
    pub tick_count: u32,

    // --- Name prompt ---
    #[debug(skip)]
    pub prompt_open: bool,

    #[debug(skip)]
    pub prompt_query: String,
}

impl AppState {
    /// Create a screen for `name`; blank names leave the screen idle.
    pub fn new(name: Option<String>) -> Self {
        Self {
            requested_name: name.as_deref().and_then(normalize_name),
            pokemon: DataResource::Empty,
            tab: DetailTab::default(),
            selected_form: 0,
            tick_count: 0,
            prompt_open: false,
            prompt_query: String::new(),
        }
    }

    pub fn view_model(&self) -> Option<&DetailViewModel> {
        self.pokemon.data()
    }

    pub fn current_form(&self) -> Option<&SpriteForm> {
        self.view_model()?.forms.get(self.selected_form)
    }

    pub fn form_count(&self) -> usize {
        self.view_model().map_or(0, |vm| vm.forms.len())
    }

    pub fn spinner_frame(&self) -> &'static str {
        SPINNER_FRAMES[self.tick_count as usize % SPINNER_FRAMES.len()]
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(None)
    }
}

/// Trim and lowercase a requested name; blank input yields `None`.
pub fn normalize_name(name: &str) -> Option<String> {
    let name = name.trim().to_lowercase();
    if name.is_empty() { None } else { Some(name) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_cycle_wraps() {
        assert_eq!(DetailTab::Forms.next(), DetailTab::Detail);
        assert_eq!(DetailTab::Stats.next(), DetailTab::Forms);
        assert_eq!(DetailTab::Forms.prev(), DetailTab::Stats);
        assert_eq!(DetailTab::from_index(2), Some(DetailTab::Types));
        assert_eq!(DetailTab::from_index(4), None);
    }

    #[test]
    fn test_new_normalizes_name() {
        let state = AppState::new(Some("  Pikachu ".into()));
        assert_eq!(state.requested_name.as_deref(), Some("pikachu"));
        assert!(state.pokemon.is_empty());

        let state = AppState::new(Some("   ".into()));
        assert_eq!(state.requested_name, None);
    }
}
