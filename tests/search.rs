/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use arbiter::{
    best_move, Color, DrawReason, Game, GameStatus, Mark, Position, Score, Search, SearchConfig,
    SearchResult, Searchable, Square, TicTacToe, FEN_KIWIPETE, FEN_STARTPOS,
};

/// Plain minimax, with nothing that could change which move is found.
fn minimax(max_depth: u8) -> SearchConfig {
    SearchConfig {
        max_depth,
        pruning: false,
        ordering: false,
        caching: false,
        ..Default::default()
    }
}

fn alpha_beta(max_depth: u8) -> SearchConfig {
    SearchConfig {
        pruning: true,
        ..minimax(max_depth)
    }
}

fn run<G: Searchable + Clone + PartialEq + std::fmt::Debug>(
    game: &G,
    config: SearchConfig,
) -> SearchResult<G::Move> {
    let mut copy = game.clone();
    let res = Search::new(&mut copy, config).start();
    assert_eq!(&copy, game, "Search did not restore the game");
    res
}

#[test]
fn test_startpos_has_twenty_moves() {
    let game = Game::default();
    assert_eq!(game.legal_moves().len(), 20);
    assert_eq!(game.status(), GameStatus::InProgress);
}

#[test]
fn test_best_move_from_startpos() {
    let mut game = Game::default();
    let mv = best_move(&mut game, 2, 10_000).unwrap();
    assert!(game.legal_moves().contains(&mv));
    assert_eq!(game, Game::default());
}

#[test]
fn test_legal_moves_never_leave_king_in_check() {
    let fens = [
        FEN_STARTPOS,
        FEN_KIWIPETE,
        "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
        "4k3/8/8/K2pP2r/8/8/8/8 w - d6 0 1",
        "4k3/8/4q3/8/8/8/3b4/4K3 w - - 0 1",
    ];

    for fen in fens {
        let position = Position::from_fen(fen).unwrap();
        let us = position.side_to_move();

        for mv in position.legal_moves() {
            let mut after = position;
            after.apply(mv);
            assert!(!after.is_in_check(us), "{mv} leaves the king in check on {fen}");
        }
    }
}

#[test]
fn test_checkmated_side_has_no_moves() {
    let game =
        Game::from_fen("rnb1k1nr/pppp1ppp/8/2b1p3/6Pq/5P2/PPPPP2P/RNBQKBNR w KQkq - 1 3").unwrap();

    assert_eq!(game.status(), GameStatus::Checkmate(Color::White));
    assert!(game.legal_moves().is_empty());
    for square in Square::iter() {
        assert!(game.legal_moves_from(square).is_empty());
        assert!(game.destinations_from(square).is_empty());
    }

    let mut game = game;
    assert!(best_move(&mut game, 3, 1_000).is_none());
}

#[test]
fn test_bare_kings_are_drawn() {
    let mut game = Game::from_fen("8/4k3/8/8/3K4/8/8/8 w - - 0 1").unwrap();
    assert_eq!(
        game.status(),
        GameStatus::Draw(DrawReason::InsufficientMaterial)
    );

    let res = Search::new(&mut game, SearchConfig::with_limits(3, 1_000)).start();
    assert_eq!(res.score, Score::DRAW);
}

#[test]
fn test_tictactoe_takes_the_win() {
    let mut board: TicTacToe = "XX./OO./... x".parse().unwrap();
    let cell = best_move(&mut board, 9, 1_000).unwrap();
    assert_eq!((cell.row(), cell.col()), (0, 2));

    // O would rather block than lose
    let mut board: TicTacToe = "XX./O../... o".parse().unwrap();
    let cell = best_move(&mut board, 9, 1_000).unwrap();
    assert_eq!((cell.row(), cell.col()), (0, 2));
}

#[test]
fn test_tictactoe_is_a_draw_with_best_play() {
    let board = TicTacToe::new();
    let res = run(&board, SearchConfig::with_limits(9, 60_000));
    assert_eq!(res.score, Score::DRAW);
    assert!(res.bestmove.is_some());
}

#[test]
fn test_alpha_beta_matches_minimax_on_tictactoe() {
    let boards = [
        "X../.O./... x",
        "X.O/.X./... o",
        "XO./.X./..O x",
        "X../.../..O x",
        ".../.X./... o",
        "XX./OO./... x",
    ];

    for text in boards {
        let board: TicTacToe = text.parse().unwrap();

        let full = run(&board, minimax(9));
        let pruned = run(&board, alpha_beta(9));

        assert_eq!(full.bestmove, pruned.bestmove, "on {text}");
        assert_eq!(full.score, pruned.score, "on {text}");
        assert!(pruned.nodes <= full.nodes, "on {text}");

        // Ordering and caching may pick a different move of equal value, but never change the value
        let everything = run(&board, SearchConfig::with_limits(9, 60_000));
        assert_eq!(full.score, everything.score, "on {text}");
    }
}

#[test]
fn test_alpha_beta_matches_minimax_on_chess() {
    let cases = [
        ("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1", 3),
        ("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1", 3),
        ("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", 2),
        ("k7/8/KQ6/8/8/8/8/8 w - - 0 1", 3),
        (FEN_KIWIPETE, 2),
    ];

    for (fen, depth) in cases {
        let game = Game::from_fen(fen).unwrap();

        let full = run(&game, minimax(depth));
        let pruned = run(&game, alpha_beta(depth));

        assert_eq!(full.bestmove, pruned.bestmove, "on {fen}");
        assert_eq!(full.score, pruned.score, "on {fen}");
        assert!(pruned.nodes <= full.nodes, "on {fen}");

        let ordered = run(
            &game,
            SearchConfig {
                ordering: true,
                ..alpha_beta(depth)
            },
        );
        assert_eq!(full.score, ordered.score, "on {fen}");
    }
}

#[test]
fn test_caching_keeps_scores() {
    let cases = [
        ("4k3/8/8/8/8/8/8/R3K3 w - - 0 1", 4),
        ("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1", 4),
        ("k7/8/KQ6/8/8/8/8/8 w - - 0 1", 4),
        ("4k3/8/8/3q4/8/8/8/3RK3 w - - 0 1", 3),
        ("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", 2),
    ];

    let mut hits = 0;
    for (fen, max_depth) in cases {
        let game = Game::from_fen(fen).unwrap();

        for depth in 2..=max_depth {
            let uncached = run(
                &game,
                SearchConfig {
                    caching: false,
                    ..SearchConfig::with_limits(depth, 60_000)
                },
            );
            assert_eq!(uncached.tt_hits, 0);
            let cached = run(&game, SearchConfig::with_limits(depth, 60_000));

            assert_eq!(cached.score, uncached.score, "depth {depth} on {fen}");
            hits += cached.tt_hits;
        }
    }

    // Otherwise the comparison proves nothing
    assert!(hits > 0);
}

#[test]
fn test_prefers_the_shorter_mate() {
    // Mate in 1 is available, and so are plenty of slower mates
    let game = Game::from_fen("k7/8/KQ6/8/8/8/8/8 w - - 0 1").unwrap();
    let res = run(&game, SearchConfig::with_limits(4, 60_000));
    assert_eq!(res.score, Score::win_in(1));

    let board: TicTacToe = "XX./OO./... x".parse().unwrap();
    let res = run(&board, minimax(9));
    assert_eq!(res.score, Score::win_in(1));
}

#[test]
fn test_out_of_time_still_moves() {
    let mut game = Game::default();
    assert!(best_move(&mut game, 5, 0).is_some());
    assert_eq!(game, Game::default());

    let res = run(
        &Game::default(),
        SearchConfig {
            max_depth: 5,
            max_nodes: 100,
            ..Default::default()
        },
    );
    assert!(res.timed_out);
    assert!(res.bestmove.is_some());
}

#[test]
fn test_tictactoe_side_comes_from_the_text() {
    // Equal marks, so either side may be on move
    let text = "X../.../..O";
    for (suffix, mark) in [("x", Mark::X), ("o", Mark::O)] {
        let mut board: TicTacToe = format!("{text} {suffix}").parse().unwrap();
        let cell = best_move(&mut board, 9, 60_000).unwrap();
        assert!(board.make_move(cell.row(), cell.col()));
        assert_eq!(board.get(cell), Some(mark));
    }
}

#[test]
fn test_side_comes_from_the_game() {
    // Black to move, and Black can take a free queen
    let game = Game::from_fen("3rk3/8/8/3Q4/8/8/8/4K3 b - - 0 1").unwrap();
    let res = run(&game, SearchConfig::with_limits(2, 60_000));
    assert_eq!(res.bestmove.unwrap(), "d8d5");
    assert!(res.score < Score::DRAW);
}
