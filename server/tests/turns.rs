//! Turn rotation and passing.

use nuclear_war_server::game::{types::GameState, Game, GameError};
use uuid::Uuid;

fn in_progress(players: usize) -> (Game, Vec<Uuid>) {
    let mut game = Game::new();
    let ids: Vec<Uuid> = (0..players)
        .map(|i| game.add_player(&format!("Player {}", i + 1)).unwrap())
        .collect();
    game.state = GameState::InProgress;
    (game, ids)
}

#[test]
fn advance_moves_to_next_seat_and_wraps() {
    let (mut game, _) = in_progress(2);

    game.advance_turn();
    assert_eq!(game.current_player_index, 1);

    game.advance_turn();
    assert_eq!(game.current_player_index, 0);
}

#[test]
fn advance_skips_eliminated_players() {
    let (mut game, ids) = in_progress(3);
    game.players.get_mut(&ids[1]).unwrap().is_eliminated = true;

    let mut visited = Vec::new();
    for _ in 0..4 {
        game.advance_turn();
        visited.push(game.current_player_index);
    }
    assert_eq!(visited, [2, 0, 2, 0]);
}

#[test]
fn advance_with_everyone_eliminated_keeps_index() {
    let (mut game, ids) = in_progress(3);
    for id in &ids {
        game.players.get_mut(id).unwrap().is_eliminated = true;
    }
    game.current_player_index = 1;

    game.advance_turn();
    assert_eq!(game.current_player_index, 1);
}

#[test]
fn pass_hands_turn_to_next_player() {
    let (mut game, ids) = in_progress(3);

    game.pass_turn(ids[0]).unwrap();
    assert_eq!(game.current_player_id(), Some(ids[1]));
    assert_eq!(game.state, GameState::InProgress);
}

#[test]
fn pass_out_of_turn_is_rejected() {
    let (mut game, ids) = in_progress(2);

    assert_eq!(
        game.pass_turn(ids[1]),
        Err(GameError::NotYourTurn {
            expected: "Player 1".into()
        })
    );
    assert_eq!(game.current_player_index, 0);
}

#[test]
fn pass_before_start_is_rejected() {
    let mut game = Game::new();
    let id = game.add_player("Alice").unwrap();
    assert!(matches!(
        game.pass_turn(id),
        Err(GameError::InvalidState { .. })
    ));
}

#[test]
fn one_survivor_wins() {
    let (mut game, ids) = in_progress(3);
    game.players.get_mut(&ids[0]).unwrap().is_eliminated = true;
    game.players.get_mut(&ids[2]).unwrap().is_eliminated = true;

    game.check_for_winner();
    assert_eq!(game.state, GameState::GameOver);
    assert_eq!(game.winner, Some(ids[1]));
}

#[test]
fn no_winner_while_two_remain() {
    let (mut game, ids) = in_progress(3);
    game.players.get_mut(&ids[0]).unwrap().is_eliminated = true;

    game.check_for_winner();
    assert_eq!(game.state, GameState::InProgress);
    assert!(game.winner.is_none());
}
