//! Reducer - pure function: (state, action) -> DispatchResult

use tui_dispatch::{DataResource, DispatchResult};

use crate::action::Action;
use crate::effect::Effect;
use crate::state::{AppState, normalize_name};
use crate::view_model::DetailViewModel;

/// The reducer handles all state transitions
pub fn reducer(state: &mut AppState, action: Action) -> DispatchResult<Effect> {
    match action {
        // ===== Pokemon actions =====
        Action::PokemonRequest(name) => request(state, &name),

        Action::PokemonRefresh => {
            let Some(name) = state.requested_name.clone() else {
                return DispatchResult::unchanged();
            };
            if state.pokemon.is_loading() {
                return DispatchResult::unchanged();
            }
            start_fetch(state, name)
        }

        Action::PokemonDidLoad { name, pokemon } => {
            if !is_current(state, &name) {
                return DispatchResult::unchanged();
            }
            state.pokemon = DataResource::Loaded(DetailViewModel::build(&pokemon));
            state.selected_form = 0;
            DispatchResult::changed()
        }

        Action::PokemonDidError { name, error } => {
            if !is_current(state, &name) {
                return DispatchResult::unchanged();
            }
            state.pokemon = DataResource::Failed(error);
            state.selected_form = 0;
            DispatchResult::changed()
        }

        // ===== Prompt actions =====
        Action::PromptOpen => {
            state.prompt_open = true;
            state.prompt_query.clear();
            DispatchResult::changed()
        }

        Action::PromptClose => {
            if !state.prompt_open {
                return DispatchResult::unchanged();
            }
            state.prompt_open = false;
            state.prompt_query.clear();
            DispatchResult::changed()
        }

        Action::PromptQueryChange(query) => {
            state.prompt_query = query;
            DispatchResult::changed()
        }

        Action::PromptSubmit(query) => {
            state.prompt_open = false;
            state.prompt_query.clear();
            let result = request(state, &query);
            if result.changed {
                result
            } else {
                DispatchResult::changed()
            }
        }

        // ===== UI actions =====
        Action::UiTabNext => {
            state.tab = state.tab.next();
            DispatchResult::changed()
        }

        Action::UiTabPrev => {
            state.tab = state.tab.prev();
            DispatchResult::changed()
        }

        Action::UiTabSelect(tab) => {
            if state.tab == tab {
                return DispatchResult::unchanged();
            }
            state.tab = tab;
            DispatchResult::changed()
        }

        Action::UiFormNext => {
            let count = state.form_count();
            if count < 2 {
                return DispatchResult::unchanged();
            }
            state.selected_form = (state.selected_form + 1) % count;
            DispatchResult::changed()
        }

        Action::UiFormPrev => {
            let count = state.form_count();
            if count < 2 {
                return DispatchResult::unchanged();
            }
            state.selected_form = (state.selected_form + count - 1) % count;
            DispatchResult::changed()
        }

        Action::Render => DispatchResult::changed(),

        // ===== Global actions =====
        Action::Tick => {
            if state.pokemon.is_loading() {
                state.tick_count = state.tick_count.wrapping_add(1);
                DispatchResult::changed()
            } else {
                DispatchResult::unchanged()
            }
        }

        Action::Quit => DispatchResult::unchanged(),
    }
}

/// React to an identifier change. A blank name clears the screen without
/// fetching; the name already loading or loaded is not fetched twice.
fn request(state: &mut AppState, name: &str) -> DispatchResult<Effect> {
    let Some(name) = normalize_name(name) else {
        if state.requested_name.is_none() && state.pokemon.is_empty() {
            return DispatchResult::unchanged();
        }
        state.requested_name = None;
        state.pokemon = DataResource::Empty;
        state.selected_form = 0;
        return DispatchResult::changed();
    };

    let same_name = state.requested_name.as_deref() == Some(name.as_str());
    if same_name && (state.pokemon.is_loading() || state.pokemon.is_loaded()) {
        return DispatchResult::unchanged();
    }

    state.requested_name = Some(name.clone());
    start_fetch(state, name)
}

fn start_fetch(state: &mut AppState, name: String) -> DispatchResult<Effect> {
    state.pokemon = DataResource::Loading;
    state.selected_form = 0;
    state.tick_count = 0;
    DispatchResult::changed_with(Effect::FetchPokemon { name })
}

/// Completions for a superseded request are dropped.
fn is_current(state: &AppState, name: &str) -> bool {
    state.requested_name.as_deref() == Some(name) && state.pokemon.is_loading()
}
