//! Two engines, one per player, driven by simulated server broadcasts.

#![cfg(feature = "chess-rules")]

use matchwire_protocol::{ClientEvent, Color, MoveMade, MoveToken, RoomId, Square};
use matchwire_sync::{ChessRules, RemoteUpdate, SyncEngine};

const START_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn engine(color: Color) -> SyncEngine<ChessRules> {
    let mut engine = SyncEngine::new(RoomId::new("r1"), color, ChessRules::new());
    engine.start(START_FEN).unwrap();
    engine
}

/// What the server would broadcast after accepting `frame` from the
/// engine whose position is now `fen`.
fn server_broadcast(frame: &ClientEvent, fen: &str) -> MoveMade {
    let ClientEvent::Move { token, color, .. } = frame else {
        panic!("expected a move frame");
    };
    let text = token.as_str();
    let from = sq(&text[0..2]);
    let to = sq(&text[2..4]);
    MoveMade {
        token: MoveToken::new(&from, &to),
        from,
        to,
        fen: fen.to_owned(),
        turn: color.opponent(),
    }
}

#[test]
fn test_move_round_trip_between_two_clients() {
    let mut white = engine(Color::White);
    let mut black = engine(Color::Black);

    assert!(white.your_turn());
    assert!(!black.your_turn());

    let frame = white.submit(sq("e2"), sq("e4"), None).unwrap();
    let broadcast = server_broadcast(&frame, white.fen());

    // The sender sees its own move come back and drops it.
    let white_fen = white.fen().to_owned();
    assert_eq!(white.apply_remote(&broadcast), RemoteUpdate::Echo);
    assert_eq!(white.fen(), white_fen);
    assert_eq!(white.history().len(), 1);

    // The opponent applies it and is now on the move.
    let update = black.apply_remote(&broadcast);
    assert_eq!(
        update,
        RemoteUpdate::Applied {
            your_turn: true,
            resynced: false,
            ended: None,
        }
    );
    assert_eq!(black.fen(), white.fen());
}

#[test]
fn test_full_exchange_keeps_clients_in_lockstep() {
    let mut white = engine(Color::White);
    let mut black = engine(Color::Black);

    let moves = [("e2", "e4"), ("e7", "e5"), ("g1", "f3"), ("b8", "c6")];
    for (i, (from, to)) in moves.iter().enumerate() {
        let (mover, other) = if i % 2 == 0 {
            (&mut white, &mut black)
        } else {
            (&mut black, &mut white)
        };
        let frame = mover.submit(sq(from), sq(to), None).unwrap();
        let broadcast = server_broadcast(&frame, mover.fen());
        assert_eq!(mover.apply_remote(&broadcast), RemoteUpdate::Echo);
        assert!(matches!(
            other.apply_remote(&broadcast),
            RemoteUpdate::Applied { your_turn: true, .. }
        ));
    }

    assert_eq!(white.fen(), black.fen());
    assert_eq!(white.history().len(), 4);
    assert_eq!(black.history().len(), 4);
}

#[test]
fn test_diverged_client_resyncs_to_canonical_position() {
    let mut white = engine(Color::White);
    let mut black = engine(Color::Black);

    // White plays e4 but black's channel delivered something that left
    // its board stale: simulate by making black think d4 was played.
    let frame = white.submit(sq("e2"), sq("e4"), None).unwrap();
    let stale = black.submit(sq("e7"), sq("e5"), None);
    assert!(stale.is_err(), "black cannot move first");
    black.start("rnbqkbnr/pppppppp/8/8/3P4/8/PPP1PPPP/RNBQKBNR b KQkq - 0 1").unwrap();

    // Now the authoritative broadcast for e2e4 cannot replay on black's
    // board (e2 is occupied but the position differs), yet after
    // reconciliation black matches the server exactly.
    let broadcast = server_broadcast(&frame, white.fen());
    let update = black.apply_remote(&broadcast);

    let RemoteUpdate::Applied { resynced, .. } = update else {
        panic!("expected an applied update");
    };
    assert!(resynced);
    assert_eq!(black.fen(), white.fen());
}
