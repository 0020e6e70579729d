//! Static card catalog: the population deck and the 100-card main deck.

use rand::seq::SliceRandom;

use crate::game::types::{Card, CardKind};

/// (id tag, display name, value, copies)
const POPULATION_DENOMINATIONS: [(&str, &str, i64, usize); 5] = [
    ("1m", "1 Million", 1_000_000, 5),
    ("2m", "2 Million", 2_000_000, 4),
    ("5m", "5 Million", 5_000_000, 3),
    ("10m", "10 Million", 10_000_000, 3),
    ("25m", "25 Million", 25_000_000, 5),
];

pub const POPULATION_DECK_SIZE: usize = 20;
pub const POPULATION_TOTAL: i64 = 183_000_000;
pub const MAIN_DECK_SIZE: usize = 100;

/// (id prefix, display name, megatons)
const WARHEADS: [(&str, &str, u32); 3] = [
    ("wh-10m", "10 Megaton Warhead", 10),
    ("wh-25m", "25 Megaton Warhead", 25),
    ("wh-100m", "100 Megaton Warhead", 100),
];

/// The 20 population cards in catalog order.
pub fn population_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(POPULATION_DECK_SIZE);
    for (tag, name, value, copies) in POPULATION_DENOMINATIONS {
        for i in 1..=copies {
            deck.push(Card::new(
                format!("pop-{tag}-{i}"),
                name,
                CardKind::Population { value },
            ));
        }
    }
    deck
}

/// The Nuclear War deck in catalog order.
pub fn main_deck() -> Vec<Card> {
    let mut deck = Vec::with_capacity(MAIN_DECK_SIZE);

    for i in 0..20 {
        deck.push(
            Card::new(format!("prop-{i}"), "Propaganda", CardKind::Propaganda)
                .with_description("Steal 1 million population from a player."),
        );
    }

    for i in 0..15 {
        deck.push(
            Card::new(
                format!("missile-{i}"),
                "ICBM",
                CardKind::DeliverySystem {
                    carrying_capacity: 100,
                },
            )
            .with_description("Carries a warhead up to 100 megatons."),
        );
    }
    for i in 0..15 {
        deck.push(
            Card::new(
                format!("bomber-{i}"),
                "B-52 Bomber",
                CardKind::DeliverySystem {
                    carrying_capacity: 200,
                },
            )
            .with_description("Carries multiple warheads up to a total of 200 megatons."),
        );
    }

    for (prefix, name, megatons) in WARHEADS {
        for i in 0..10 {
            deck.push(
                Card::new(
                    format!("{prefix}-{i}"),
                    name,
                    CardKind::Warhead {
                        warhead_size: megatons,
                    },
                )
                .with_description(format!("A {megatons}-megaton warhead.")),
            );
        }
    }

    for i in 0..10 {
        deck.push(
            Card::new(
                format!("anti-missile-{i}"),
                "Anti-Missile System",
                CardKind::AntiMissile {
                    intercepts: vec!["ICBM".to_string()],
                },
            )
            .with_description("Intercepts ICBMs."),
        );
    }

    for i in 0..10 {
        deck.push(
            Card::new(format!("secret-{i}"), "Secret: Spy Network", CardKind::Secret)
                .with_description("Look at another player's hand."),
        );
    }

    deck
}

/// Uniform in-place shuffle using the thread-local RNG.
pub fn shuffle(cards: &mut [Card]) {
    cards.shuffle(&mut rand::rng());
}

