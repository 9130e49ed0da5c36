//! Effects - side effects declared by the reducer

use crate::action::Action;
use crate::api::PokemonClient;

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// GET the Pokemon resource for an already-normalized name
    FetchPokemon { name: String },
}

/// Run one fetch and turn its outcome into the completion action for `name`.
pub async fn fetch_action<C: PokemonClient + ?Sized>(client: &C, name: String) -> Action {
    match client.fetch_pokemon(&name).await {
        Ok(pokemon) => Action::PokemonDidLoad { name, pokemon },
        Err(err) => Action::PokemonDidError {
            name,
            error: err.to_string(),
        },
    }
}
