//! Actions - everything that can happen to the detail screen

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::state::{DetailTab, RawPokemon};

#[derive(tui_dispatch::Action, Clone, Debug, PartialEq, Serialize, Deserialize, JsonSchema)]
#[action(infer_categories)]
pub enum Action {
    // ===== Pokemon category =====
    /// Intent: show a different Pokemon (identifier change)
    PokemonRequest(String),

    /// Intent: fetch the current Pokemon again
    PokemonRefresh,

    /// Result: payload decoded for `name`
    PokemonDidLoad { name: String, pokemon: RawPokemon },

    /// Result: fetch for `name` failed
    PokemonDidError { name: String, error: String },

    // ===== Prompt category =====
    /// Open the name prompt
    PromptOpen,

    /// Close the name prompt without requesting
    PromptClose,

    /// Prompt text changed
    PromptQueryChange(String),

    /// Submit the prompt text as the new request
    PromptSubmit(String),

    // ===== UI category =====
    UiTabNext,
    UiTabPrev,
    UiTabSelect(DetailTab),
    UiFormNext,
    UiFormPrev,

    /// Force a re-render (cursor movement in the prompt)
    Render,

    // ===== Uncategorized (global) =====
    /// Periodic tick for the loading spinner
    Tick,

    Quit,
}
