//! Effects of Secret cards revealed at the end of the opening round.
//!
//! Each revealed card is mapped to a [`SecretEffect`]; the effect owns the
//! card from that point and decides where it ends up.

use uuid::Uuid;

use crate::game::{state::Game, types::Card};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretEffect {
    /// Announce the card to the table and discard it.
    Reveal,
}

impl SecretEffect {
    /// Spy Network, the only secret in the catalog, has no rule beyond
    /// the reveal, so every card maps to `Reveal` for now.
    pub fn for_card(_card: &Card) -> Self {
        SecretEffect::Reveal
    }

    pub fn resolve(self, game: &mut Game, owner: Uuid, card: Card) {
        let owner_name = game
            .players
            .get(&owner)
            .map(|p| p.name.clone())
            .unwrap_or_default();

        match self {
            SecretEffect::Reveal => {
                game.record(format!(
                    "{owner_name} revealed secret: {} ({})",
                    card.name, card.description
                ));
                game.discard_pile.push(card);
            }
        }
    }
}
