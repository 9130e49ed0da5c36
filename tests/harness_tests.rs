//! Store flows driven through EffectStoreTestHarness

use async_trait::async_trait;
use pokedetail::{
    action::Action,
    api::{ApiError, PokemonClient},
    components::{Component, DetailScreen, DetailScreenProps},
    effect::{Effect, fetch_action},
    reducer::reducer,
    state::{AppState, DetailTab, RawPokemon, RawStat, SpriteSet},
};
use tui_dispatch::testing::*;
use tui_dispatch::{DataResource, NumericComponentId};

fn mock_pikachu() -> RawPokemon {
    RawPokemon {
        id: 25,
        name: "pikachu".into(),
        height: 4,
        weight: 60,
        base_experience: Some(112),
        sprites: SpriteSet {
            front_default: Some("https://img.example/25.png".into()),
            front_shiny: Some("https://img.example/shiny/25.png".into()),
            official_artwork: Some("https://img.example/artwork/25.png".into()),
        },
        types: vec!["electric".into()],
        stats: vec![
            RawStat {
                name: "hp".into(),
                base_value: 35,
            },
            RawStat {
                name: "speed".into(),
                base_value: 90,
            },
        ],
        abilities: Vec::new(),
    }
}

/// Client that answers every name with one canned outcome
enum MockClient {
    Found(RawPokemon),
    Status(u16),
}

#[async_trait]
impl PokemonClient for MockClient {
    async fn fetch_pokemon(&self, name: &str) -> Result<RawPokemon, ApiError> {
        match self {
            MockClient::Found(pokemon) => Ok(pokemon.clone()),
            MockClient::Status(code) => Err(ApiError::Status {
                status: reqwest::StatusCode::from_u16(*code).unwrap(),
                url: format!("http://pokeapi.test/pokemon/{name}"),
            }),
        }
    }
}

fn did_load(name: &str) -> Action {
    Action::PokemonDidLoad {
        name: name.into(),
        pokemon: mock_pikachu(),
    }
}

#[test]
fn test_request_then_load() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::PokemonRequest("  Pikachu ".into()));
    harness.assert_state(|s| s.pokemon.is_loading());
    harness.assert_state(|s| s.requested_name.as_deref() == Some("pikachu"));

    let effects = harness.drain_effects();
    effects.effects_count(1);
    effects.effects_first_matches(
        |e| matches!(e, Effect::FetchPokemon { name } if name == "pikachu"),
    );

    harness.complete_action(did_load("pikachu"));
    let (changed, total) = harness.process_emitted();
    assert_eq!(total, 1);
    assert_eq!(changed, 1);

    harness.assert_state(|s| s.pokemon.is_loaded());
    harness.assert_state(|s| {
        let vm = s.view_model().unwrap();
        vm.display_name == "Pikachu"
            && vm.padded_id == "025"
            && vm.type_badges.len() == 1
            && vm.forms.len() == 3
    });
}

#[test]
fn test_error_flow_has_no_view_model() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::PokemonRequest("nosuchmon".into()));
    harness.complete_action(Action::PokemonDidError {
        name: "nosuchmon".into(),
        error: "404 Not Found".into(),
    });
    harness.process_emitted();

    harness.assert_state(|s| s.pokemon.is_failed());
    harness.assert_state(|s| s.pokemon.error() == Some("404 Not Found"));
    harness.assert_state(|s| s.view_model().is_none());
}

#[test]
fn test_stale_completion_is_dropped() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    harness.dispatch_collect(Action::PokemonRequest("bulbasaur".into()));
    harness.dispatch_collect(Action::PokemonRequest("pikachu".into()));
    harness.drain_effects().effects_count(2);

    harness.complete_action(did_load("bulbasaur"));
    let (changed, _) = harness.process_emitted();
    assert_eq!(changed, 0);
    harness.assert_state(|s| s.pokemon.is_loading());

    harness.complete_action(did_load("pikachu"));
    harness.process_emitted();
    harness.assert_state(|s| s.pokemon.is_loaded());
}

#[test]
fn test_same_name_while_loaded_does_not_refetch() {
    let state = AppState {
        requested_name: Some("pikachu".into()),
        pokemon: DataResource::Loaded(pokedetail::view_model::build(&mock_pikachu())),
        ..Default::default()
    };
    let mut harness = EffectStoreTestHarness::new(state, reducer);

    harness.dispatch_collect(Action::PokemonRequest("PIKACHU".into()));
    harness.drain_effects().effects_count(0);
    harness.assert_state(|s| s.pokemon.is_loaded());

    harness.dispatch_collect(Action::PokemonRefresh);
    harness.drain_effects().effects_count(1);
    harness.assert_state(|s| s.pokemon.is_loading());
}

#[test]
fn test_blank_request_clears_screen() {
    let mut harness = EffectStoreTestHarness::new(AppState::new(Some("eevee".into())), reducer);

    harness.dispatch_collect(Action::PokemonRequest("   ".into()));
    harness.drain_effects().effects_count(0);
    harness.assert_state(|s| s.requested_name.is_none() && s.pokemon.is_empty());
}

#[test]
fn test_prompt_submit_requests() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    let results = harness.dispatch_all([
        Action::PromptOpen,
        Action::PromptQueryChange("mew".into()),
        Action::PromptSubmit("mew".into()),
    ]);
    assert_eq!(results, vec![true, true, true]);

    harness.assert_state(|s| !s.prompt_open && s.prompt_query.is_empty());
    harness.assert_state(|s| s.pokemon.is_loading());
    harness
        .drain_effects()
        .effects_first_matches(|e| matches!(e, Effect::FetchPokemon { name } if name == "mew"));
}

#[test]
fn test_keys_drive_tabs_and_forms() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_collect(Action::PokemonRequest("pikachu".into()));
    harness.complete_action(did_load("pikachu"));
    harness.process_emitted();

    let mut component = DetailScreen;
    let actions = harness.send_keys::<NumericComponentId, _, _>("j j", |state, event| {
        let props = DetailScreenProps {
            state,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });
    actions.assert_count(2);
    for action in actions {
        harness.dispatch_collect(action);
    }
    harness.assert_state(|s| s.selected_form == 2);
    harness.assert_state(|s| s.current_form().map(|f| f.label.as_str()) == Some("Artwork"));

    harness.dispatch_collect(Action::UiFormNext);
    harness.assert_state(|s| s.selected_form == 0);

    let actions = harness.send_keys::<NumericComponentId, _, _>("4", |state, event| {
        let props = DetailScreenProps {
            state,
            is_focused: true,
        };
        component
            .handle_event(&event.kind, props)
            .into_iter()
            .collect::<Vec<_>>()
    });
    actions.assert_first(Action::UiTabSelect(DetailTab::Stats));
    harness.dispatch_collect(Action::UiTabSelect(DetailTab::Stats));
    harness.assert_state(|s| s.tab == DetailTab::Stats);

    harness.dispatch_collect(Action::UiTabNext);
    harness.assert_state(|s| s.tab == DetailTab::Forms);
}

#[test]
fn test_tick_only_advances_while_loading() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);

    assert_eq!(harness.dispatch_all([Action::Tick]), vec![false]);

    harness.dispatch_collect(Action::PokemonRequest("pikachu".into()));
    assert_eq!(harness.dispatch_all([Action::Tick, Action::Tick]), vec![true, true]);
    harness.assert_state(|s| s.tick_count == 2);
}

#[tokio::test]
async fn test_fetch_success_flows_into_loaded_state() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_collect(Action::PokemonRequest("Pikachu".into()));
    let effects = harness.drain_effects();
    effects.effects_count(1);
    let Some(Effect::FetchPokemon { name }) = effects.into_iter().next() else {
        panic!("expected a fetch effect");
    };

    let client = MockClient::Found(mock_pikachu());
    let action = fetch_action(&client, name).await;
    assert!(matches!(&action, Action::PokemonDidLoad { name, .. } if name == "pikachu"));

    harness.complete_action(action);
    let (changed, total) = harness.process_emitted();
    assert_eq!((changed, total), (1, 1));

    harness.assert_state(|s| s.pokemon.is_loaded());
    harness.assert_state(|s| {
        let vm = s.view_model().unwrap();
        vm.display_name == "Pikachu" && vm.padded_id == "025"
    });
}

#[tokio::test]
async fn test_fetch_not_found_flows_into_failed_state() {
    let mut harness = EffectStoreTestHarness::new(AppState::default(), reducer);
    harness.dispatch_collect(Action::PokemonRequest("nosuchmon".into()));
    let effects = harness.drain_effects();
    effects.effects_count(1);
    let Some(Effect::FetchPokemon { name }) = effects.into_iter().next() else {
        panic!("expected a fetch effect");
    };

    let client = MockClient::Status(404);
    let action = fetch_action(&client, name).await;
    assert!(matches!(&action, Action::PokemonDidError { name, .. } if name == "nosuchmon"));

    harness.complete_action(action);
    harness.process_emitted();

    harness.assert_state(|s| s.pokemon.is_failed());
    harness.assert_state(|s| s.pokemon.error().is_some_and(|e| e.contains("404")));
    harness.assert_state(|s| s.view_model().is_none());
}
