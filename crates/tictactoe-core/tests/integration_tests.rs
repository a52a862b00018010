//! Integration tests for the tic-tac-toe engine.
//!
//! These tests drive complete games through the registry and check the
//! state machine against every reachable position.

use pretty_assertions::assert_eq;
use tictactoe_core::*;

const PLAYER_X: PlayerId = 1;
const PLAYER_O: PlayerId = 2;

fn at(index: u8) -> Position {
    Position::from_move_index(index).unwrap()
}

/// Play `(player, move_index)` pairs, panicking on any rejection
fn play(registry: &GameRegistry, id: GameId, moves: &[(PlayerId, u8)]) {
    for &(player, index) in moves {
        registry
            .make_move(id, player, at(index))
            .unwrap_or_else(|e| panic!("move {index} by {player} rejected: {e}"));
    }
}

#[test]
fn test_opening_moves_and_x_win() {
    let registry = GameRegistry::new();
    let id = registry.create_game(PLAYER_X, PLAYER_O);

    play(&registry, id, &[(PLAYER_X, 0)]);
    let game = registry.get_game(id).unwrap();
    assert_eq!(game.board().to_string(), "x--------");
    assert_eq!(game.status(), GameStatus::OToMove);

    assert_eq!(
        registry.make_move(id, PLAYER_O, at(0)),
        Err(GameError::CellOccupied)
    );
    assert_eq!(registry.get_game(id).unwrap(), game);

    play(&registry, id, &[(PLAYER_O, 4)]);
    let game = registry.get_game(id).unwrap();
    assert_eq!(game.board().to_string(), "x---o----");
    assert_eq!(game.status(), GameStatus::XToMove);

    play(&registry, id, &[(PLAYER_X, 1), (PLAYER_O, 8), (PLAYER_X, 2)]);
    let game = registry.get_game(id).unwrap();
    assert_eq!(game.status(), GameStatus::XWon);
    assert_eq!(game.winner(), Some(PLAYER_X));
    assert_eq!(game.board().to_string(), "x--xo-x-o");
}

#[test]
fn test_full_board_draw() {
    let registry = GameRegistry::new();
    let id = registry.create_game(PLAYER_X, PLAYER_O);

    // Final board:
    // x o x
    // x o o
    // o x x
    let moves = [
        (0, 0, PLAYER_X),
        (0, 1, PLAYER_O),
        (0, 2, PLAYER_X),
        (1, 1, PLAYER_O),
        (1, 0, PLAYER_X),
        (1, 2, PLAYER_O),
        (2, 1, PLAYER_X),
        (2, 0, PLAYER_O),
        (2, 2, PLAYER_X),
    ];
    for (row, col, player) in moves {
        registry
            .make_move(id, player, Position::new(row, col).unwrap())
            .unwrap();
    }

    let game = registry.get_game(id).unwrap();
    assert_eq!(game.status(), GameStatus::Draw);
    assert_eq!(game.move_count(), 9);
    assert_eq!(game.board().to_string(), "xoxxoooxx");
    assert_eq!(game.winner(), None);

    for player in [PLAYER_X, PLAYER_O] {
        assert_eq!(
            registry.make_move(id, player, at(4)),
            Err(GameError::GameOver)
        );
    }
    assert_eq!(registry.get_game(id).unwrap(), game);
}

#[test]
fn test_created_games_are_all_reachable() {
    let registry = GameRegistry::new();
    let ids: Vec<GameId> = (0..50)
        .map(|i| registry.create_game(i, i + 1))
        .collect();

    let mut sorted = ids.clone();
    sorted.sort_unstable();
    sorted.dedup();
    assert_eq!(sorted.len(), 50);

    for (i, id) in ids.iter().enumerate() {
        let game = registry.get_game(*id).unwrap();
        assert_eq!(game.id(), *id);
        assert_eq!(game.player_x(), i as PlayerId);
        assert_eq!(game.player_o(), i as PlayerId + 1);
    }
    assert_eq!(registry.list_game_ids(), ids);
}

/// Counts of positions visited by the exhaustive walk
#[derive(Default)]
struct Walk {
    finished_games: usize,
    x_wins: usize,
    o_wins: usize,
    draws: usize,
}

/// Visit every legal continuation of `game`, checking the cached status
/// against the status derived from the board at every step.
fn explore(game: &Game, walk: &mut Walk) {
    assert_eq!(game.status(), GameStatus::from_board(game.board()));
    assert_eq!(game.move_count() as usize, game.board().filled_count());

    let terminal = game.board().winner().is_some() || game.board().is_full();
    assert_eq!(game.is_finished(), terminal);

    if game.is_finished() {
        walk.finished_games += 1;
        match game.status() {
            GameStatus::XWon => walk.x_wins += 1,
            GameStatus::OWon => walk.o_wins += 1,
            GameStatus::Draw => walk.draws += 1,
            other => panic!("terminal game reported {other}"),
        }

        let mut after = game.clone();
        for index in 0..9 {
            assert_eq!(after.apply_move(PLAYER_X, at(index)), Err(GameError::GameOver));
            assert_eq!(after.apply_move(PLAYER_O, at(index)), Err(GameError::GameOver));
        }
        assert_eq!(&after, game);
        return;
    }

    let mover = game.current_player().unwrap();
    let waiting = if mover == PLAYER_X { PLAYER_O } else { PLAYER_X };

    for index in 0..9 {
        let pos = at(index);
        let mut next = game.clone();

        if !game.board().get(pos).is_empty() {
            assert_eq!(next.apply_move(mover, pos), Err(GameError::CellOccupied));
            assert_eq!(&next, game);
            continue;
        }

        assert_eq!(next.apply_move(waiting, pos), Err(GameError::NotPlayerTurn));
        assert_eq!(&next, game);

        let status = next.apply_move(mover, pos).unwrap();
        if !status.is_terminal() {
            assert_ne!(status.to_move(), game.status().to_move());
        }
        explore(&next, walk);
    }
}

#[test]
fn test_every_reachable_game() {
    let mut walk = Walk::default();
    explore(&Game::new(0, PLAYER_X, PLAYER_O), &mut walk);

    // Well-known totals for 3x3 tic-tac-toe
    assert_eq!(walk.finished_games, 255_168);
    assert_eq!(walk.x_wins, 131_184);
    assert_eq!(walk.o_wins, 77_904);
    assert_eq!(walk.draws, 46_080);
}
