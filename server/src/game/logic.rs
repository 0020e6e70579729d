//! Turn and combat rules applied to a [`Game`].
//!
//! All functions assume the caller holds the session's write lock.

use uuid::Uuid;

use crate::game::{
    error::GameError,
    secrets::SecretEffect,
    state::Game,
    types::{GameState, Location},
};

/// 1 megaton = 1 million population.
pub const CASUALTIES_PER_MEGATON: i64 = 1_000_000;

/// What happened to the target of an attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Impact {
    Intercepted,
    Hit { casualties: i64, eliminated: bool },
}

impl Game {
    fn ensure_turn(&self, player_id: Uuid) -> Result<(), GameError> {
        match self.current_player() {
            Some(current) if current.id == player_id => Ok(()),
            Some(current) => Err(GameError::NotYourTurn {
                expected: current.name.clone(),
            }),
            None => Err(GameError::NotYourTurn {
                expected: String::from("nobody"),
            }),
        }
    }

    /// Move a card from the player's hand onto their placemat.
    ///
    /// Playing a card never ends the turn; only `attack` and `pass_turn` do.
    pub fn play_card(
        &mut self,
        player_id: Uuid,
        card_id: &str,
        location: Location,
    ) -> Result<(), GameError> {
        if matches!(
            self.state,
            GameState::WaitingForPlayers | GameState::GameOver
        ) {
            return Err(GameError::InvalidState {
                action: "play a card",
                state: self.state,
            });
        }

        let player = self.player(player_id)?;
        let card_index = player
            .hand
            .iter()
            .position(|c| c.id == card_id)
            .ok_or_else(|| GameError::CardNotFound {
                card_id: card_id.to_string(),
                player: player.name.clone(),
            })?;

        if self.state == GameState::OpeningRound {
            if !player.hand[card_index].is_secret() {
                return Err(GameError::InvalidMove(
                    "only secret cards can be played during the opening round".into(),
                ));
            }
            if location != Location::FaceDown1 {
                return Err(GameError::InvalidMove(
                    "secret cards must be played to face_down_1 during the opening round".into(),
                ));
            }
        } else {
            self.ensure_turn(player_id)?;
        }

        if !player.placemat.is_free(location) {
            return Err(GameError::SlotOccupied(location));
        }

        let player = self.player_mut(player_id)?;
        let card = player.hand.remove(card_index);
        let event = if location.is_face_down() {
            format!("{} played a card face down ({location})", player.name)
        } else {
            format!("{} played {} to {location}", player.name, card.name)
        };
        player.placemat.place(location, card);
        self.record(event);

        if self.state == GameState::OpeningRound
            && self
                .players
                .values()
                .all(|p| p.placemat.face_down_1.is_some())
        {
            self.resolve_opening_secrets();
            self.state = GameState::InProgress;
            let opener = self
                .current_player()
                .map(|p| p.name.clone())
                .unwrap_or_default();
            self.record(format!("The war begins. It is {opener}'s turn."));
        }

        Ok(())
    }

    /// Reveal and resolve every committed opening secret.
    pub fn resolve_opening_secrets(&mut self) {
        log::debug!("[game {}] resolving opening secrets", self.id);
        for id in self.player_order.clone() {
            let revealed = self
                .players
                .get_mut(&id)
                .and_then(|p| p.placemat.face_down_1.take());
            if let Some(card) = revealed {
                SecretEffect::for_card(&card).resolve(self, id, card);
            }
        }
    }

    /// Launch the first delivery system and first warhead in the attacker's
    /// active cards at `target_id`.
    pub fn attack(&mut self, attacker_id: Uuid, target_id: Uuid) -> Result<(), GameError> {
        let attacker = self.player(attacker_id)?;
        let target = self.player(target_id)?;
        let final_strike = self.state == GameState::FinalStrike;

        if !final_strike {
            if attacker.is_eliminated {
                return Err(GameError::PlayerEliminated(attacker.name.clone()));
            }
            if self.state != GameState::InProgress {
                return Err(GameError::InvalidState {
                    action: "attack",
                    state: self.state,
                });
            }
        }
        self.ensure_turn(attacker_id)?;

        if attacker_id == target_id {
            return Err(GameError::InvalidMove("you cannot attack yourself".into()));
        }
        if target.is_eliminated {
            return Err(GameError::InvalidMove(format!(
                "{} is already eliminated",
                target.name
            )));
        }

        let active = &attacker.placemat.active_cards;
        let delivery_index = active
            .iter()
            .position(|c| c.is_delivery_system())
            .ok_or_else(|| GameError::MissingDeliverySystem(attacker.name.clone()))?;
        let warhead_index = active
            .iter()
            .position(|c| c.is_warhead())
            .ok_or_else(|| GameError::MissingWarhead(attacker.name.clone()))?;

        let megatons = active[warhead_index].megatons();
        let launch = format!(
            "{} attacks {} with a {megatons} megaton warhead on a {}!",
            attacker.name, target.name, active[delivery_index].name
        );
        let attacker_name = attacker.name.clone();
        let target_name = target.name.clone();

        // The launch is paid for whatever the outcome.
        let attacker = self.player_mut(attacker_id)?;
        let (later, earlier) = if delivery_index > warhead_index {
            (delivery_index, warhead_index)
        } else {
            (warhead_index, delivery_index)
        };
        let spent = [
            attacker.placemat.active_cards.remove(later),
            attacker.placemat.active_cards.remove(earlier),
        ];
        self.discard_pile.extend(spent);
        self.record(launch);

        let target = self.player_mut(target_id)?;
        let impact = match target
            .placemat
            .active_cards
            .iter()
            .position(|c| c.is_anti_missile())
        {
            Some(index) => {
                let interceptor = target.placemat.active_cards.remove(index);
                self.discard_pile.push(interceptor);
                Impact::Intercepted
            }
            None => {
                let casualties = i64::from(megatons) * CASUALTIES_PER_MEGATON;
                target.population -= casualties;
                let mut eliminated = false;
                if target.population <= 0 {
                    target.population = 0;
                    if !target.is_eliminated {
                        target.is_eliminated = true;
                        eliminated = true;
                    }
                }
                Impact::Hit {
                    casualties,
                    eliminated,
                }
            }
        };

        match impact {
            Impact::Intercepted => {
                self.record(format!(
                    "{attacker_name}'s attack was intercepted by {target_name}'s Anti-Missile!"
                ));
            }
            Impact::Hit {
                casualties,
                eliminated,
            } => {
                self.record(format!(
                    "Direct hit! {target_name} loses {casualties} population."
                ));
                if eliminated {
                    self.record(format!("{target_name} has been eliminated!"));
                    if self.survivors().is_empty() {
                        self.declare_game_over();
                        return Ok(());
                    }
                    self.state = GameState::FinalStrike;
                    if let Some(index) = self.player_order.iter().position(|id| *id == target_id)
                    {
                        self.current_player_index = index;
                    }
                    self.record(format!(
                        "{target_name} gets a Final Strike! It is now their turn."
                    ));
                    return Ok(());
                }
            }
        }

        if final_strike {
            self.state = GameState::InProgress;
            self.record(format!("{attacker_name} has completed their Final Strike."));
        }

        self.check_for_winner();
        if self.state != GameState::GameOver {
            self.advance_turn();
        }
        Ok(())
    }

    /// End the current player's turn. During a Final Strike this forfeits
    /// the retaliation.
    pub fn pass_turn(&mut self, player_id: Uuid) -> Result<(), GameError> {
        if matches!(
            self.state,
            GameState::WaitingForPlayers | GameState::GameOver
        ) {
            return Err(GameError::InvalidState {
                action: "pass",
                state: self.state,
            });
        }
        self.ensure_turn(player_id)?;

        let name = self.player(player_id)?.name.clone();
        if self.state == GameState::FinalStrike {
            self.state = GameState::InProgress;
            self.record(format!("{name} forfeits their Final Strike."));
            self.check_for_winner();
            if self.state == GameState::GameOver {
                return Ok(());
            }
        } else {
            self.record(format!("{name} passes."));
        }

        self.advance_turn();
        Ok(())
    }

    /// Move to the next player in turn order that is still in the game.
    pub fn advance_turn(&mut self) {
        let seats = self.player_order.len();
        for _ in 0..seats {
            self.current_player_index = (self.current_player_index + 1) % seats;
            let next = self.player_order[self.current_player_index];
            if let Some(player) = self.players.get(&next) {
                if !player.is_eliminated {
                    let event = format!("It is now {}'s turn.", player.name);
                    self.record(event);
                    return;
                }
            }
        }
        log::warn!("[game {}] no active players left to advance the turn to", self.id);
    }

    /// Ends the game once at most one player is left standing.
    pub fn check_for_winner(&mut self) {
        match self.survivors().as_slice() {
            [winner] => {
                self.winner = Some(*winner);
                self.state = GameState::GameOver;
                let name = self
                    .players
                    .get(winner)
                    .map(|p| p.name.clone())
                    .unwrap_or_default();
                self.record(format!("{name} has won the game!"));
            }
            [] => self.declare_game_over(),
            _ => {}
        }
    }

    fn declare_game_over(&mut self) {
        self.winner = None;
        self.state = GameState::GameOver;
        self.record("Mutual destruction. Nobody wins.".to_string());
    }
}
