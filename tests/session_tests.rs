use rand::rngs::SmallRng;
use seabattle::{
    Board, CellState, Coordinate, FleetSpec, Layer, Opponent, Orientation, ParseError, Phase,
    Session, SessionError, ShotOutcome, ShotResult, Side,
};

fn at(row: usize, col: usize) -> Coordinate {
    Coordinate::new(row, col).unwrap()
}

fn board_with(ships: &[(usize, usize, usize, Orientation)]) -> Board {
    let mut board = Board::new();
    for &(row, col, length, orientation) in ships {
        board.place_ship(at(row, col), length, orientation).unwrap();
    }
    board
}

fn single_ship_session(seed: u64) -> Session {
    let fleet = FleetSpec::new(vec![1]).unwrap();
    let human = board_with(&[(0, 0, 1, Orientation::Horizontal)]);
    let opponent = board_with(&[(2, 3, 1, Orientation::Horizontal)]);
    Session::from_boards(fleet, human, opponent, seed)
}

/// Opponent board with one single-cell ship at C4, human fleet large enough
/// that a single reply can never sink it.
fn sturdy_session(seed: u64) -> Session {
    let fleet = FleetSpec::new(vec![4, 3, 2]).unwrap();
    let human = board_with(&[
        (0, 0, 4, Orientation::Horizontal),
        (2, 0, 3, Orientation::Horizontal),
        (4, 0, 2, Orientation::Horizontal),
    ]);
    let opponent = board_with(&[(2, 3, 1, Orientation::Horizontal)]);
    Session::from_boards(fleet, human, opponent, seed)
}

/// Fires at the cells of a fixed list in order.
struct Scripted(Vec<Coordinate>);

impl Opponent for Scripted {
    fn select_target(&mut self, _rng: &mut SmallRng, _hits: &Layer, _misses: &Layer) -> Option<Coordinate> {
        if self.0.is_empty() {
            None
        } else {
            Some(self.0.remove(0))
        }
    }
}

#[test]
fn test_start_places_only_the_opponent_fleet() {
    let session = Session::start_seeded(FleetSpec::default(), 1).unwrap();
    assert_eq!(session.phase(), Phase::Setup);
    assert_eq!(session.winner(), None);
    assert_eq!(session.to_move(), None);
    assert_eq!(session.opponent_board().ship_cells(), 20);
    assert_eq!(session.human_board().ship_cells(), 0);
}

#[test]
fn test_place_human_fleet_opens_fire() {
    let mut session = Session::start_seeded(FleetSpec::default(), 2).unwrap();
    session.place_human_fleet().unwrap();
    assert_eq!(session.phase(), Phase::Shooting);
    assert_eq!(session.to_move(), Some(Side::Human));
    assert_eq!(session.human_board().ship_cells(), 20);

    assert_eq!(
        session.place_human_fleet(),
        Err(SessionError::WrongPhase {
            expected: Phase::Setup,
            actual: Phase::Shooting,
        })
    );
}

#[test]
fn test_no_shots_during_setup() {
    let mut session = Session::start_seeded(FleetSpec::default(), 3).unwrap();
    assert_eq!(
        session.submit_human_shot("A1"),
        Err(SessionError::WrongPhase {
            expected: Phase::Shooting,
            actual: Phase::Setup,
        })
    );
    assert_eq!(session.opponent_board().shots_taken(), 0);
}

#[test]
fn test_sinking_the_last_ship_wins_immediately() {
    let mut session = single_ship_session(4);
    let outcome = session.submit_human_shot("C4").unwrap();

    let exchange = outcome.exchange().copied().unwrap();
    assert_eq!(exchange.target, at(2, 3));
    assert_eq!(exchange.result, ShotResult::Hit);
    assert_eq!(exchange.reply, None);
    assert_eq!(exchange.phase, Phase::Finished);
    assert_eq!(exchange.winner, Some(Side::Human));

    assert!(session.opponent_board().is_fleet_destroyed());
    assert_eq!(session.phase(), Phase::Finished);
    assert_eq!(session.winner(), Some(Side::Human));
    assert_eq!(session.human_board().shots_taken(), 0);
}

#[test]
fn test_finished_session_rejects_further_shots() {
    let mut session = single_ship_session(5);
    session.submit_human_shot("C4").unwrap();
    assert_eq!(
        session.submit_human_shot("A1"),
        Err(SessionError::WrongPhase {
            expected: Phase::Shooting,
            actual: Phase::Finished,
        })
    );
    assert!(session.fire_opponent().is_err());
    assert_eq!(session.winner(), Some(Side::Human));
}

#[test]
fn test_miss_is_followed_by_one_opponent_shot() {
    let fleet = FleetSpec::default();
    let mut session = Session::start_seeded(fleet, 6).unwrap();
    session.place_human_fleet().unwrap();
    let target = session
        .opponent_board()
        .cells()
        .find(|&(_, state)| state == CellState::Empty)
        .map(|(at, _)| at)
        .unwrap();

    let outcome = session.submit_human_shot(&target.to_string()).unwrap();
    let exchange = outcome.exchange().copied().unwrap();
    assert_eq!(exchange.result, ShotResult::Miss);
    assert_eq!(exchange.phase, Phase::Shooting);
    assert_eq!(exchange.winner, None);

    let reply = exchange.reply.unwrap();
    assert_eq!(session.human_board().shots_taken(), 1);
    assert_eq!(session.shots_fired(Side::Opponent), 1);
    assert_ne!(reply.result, ShotResult::AlreadyShot);
    assert!(session.human_board().cell(reply.target).is_shot());
    assert_eq!(session.to_move(), Some(Side::Human));
}

#[test]
fn test_hit_gives_no_extra_turn() {
    let fleet = FleetSpec::new(vec![2]).unwrap();
    let human = board_with(&[(9, 0, 2, Orientation::Horizontal)]);
    let opponent = board_with(&[(0, 0, 2, Orientation::Horizontal)]);
    let mut session = Session::from_boards(fleet, human, opponent, 7);

    let outcome = session.submit_human_shot("A1").unwrap();
    let exchange = outcome.exchange().copied().unwrap();
    assert_eq!(exchange.result, ShotResult::Hit);
    assert!(exchange.reply.is_some());
    assert_eq!(session.shots_fired(Side::Opponent), 1);
}

#[test]
fn test_rejected_input_costs_no_turn() {
    let mut session = sturdy_session(8);
    let miss = session.submit_human_shot("J10").unwrap();
    assert!(!miss.is_rejected());
    let opponent_shots = session.shots_fired(Side::Opponent);
    let human_before = *session.human_board();
    let opponent_before = *session.opponent_board();

    assert_eq!(
        session.submit_human_shot("j10").unwrap(),
        ShotOutcome::AlreadyShot(at(9, 9))
    );
    assert_eq!(
        session.submit_human_shot("Z1").unwrap(),
        ShotOutcome::InvalidCoordinate(ParseError::OutOfRange)
    );
    assert_eq!(
        session.submit_human_shot("").unwrap(),
        ShotOutcome::InvalidCoordinate(ParseError::TooShort)
    );

    assert_eq!(session.shots_fired(Side::Opponent), opponent_shots);
    assert_eq!(*session.human_board(), human_before);
    assert_eq!(*session.opponent_board(), opponent_before);
    assert_eq!(session.to_move(), Some(Side::Human));
}

#[test]
fn test_input_is_trimmed() {
    let mut session = single_ship_session(9);
    let outcome = session.submit_human_shot("  c4\n").unwrap();
    assert_eq!(outcome.exchange().map(|e| e.target), Some(at(2, 3)));
}

#[test]
fn test_half_steps_enforce_turn_order() {
    let mut session = single_ship_session(10);
    assert_eq!(
        session.fire_opponent(),
        Err(SessionError::OutOfTurn {
            expected: Side::Human
        })
    );
    assert_eq!(session.fire_human(at(5, 5)).unwrap(), ShotResult::Miss);
    assert_eq!(session.to_move(), Some(Side::Opponent));
    assert_eq!(
        session.fire_human(at(5, 6)),
        Err(SessionError::OutOfTurn {
            expected: Side::Opponent
        })
    );
    let reply = session.fire_opponent().unwrap();
    assert!(session.human_board().cell(reply.target).is_shot());
    // the opponent may have sunk the single human ship
    if session.is_finished() {
        assert_eq!(session.winner(), Some(Side::Opponent));
    } else {
        assert_eq!(session.to_move(), Some(Side::Human));
    }
}

#[test]
fn test_opponent_can_win() {
    let mut session = single_ship_session(11);
    session.set_strategy(Box::new(Scripted(vec![at(5, 5), at(0, 0)])));

    let first = session.submit_human_shot("J10").unwrap();
    let reply = first.exchange().and_then(|e| e.reply).unwrap();
    assert_eq!(reply.target, at(5, 5));
    assert_eq!(reply.result, ShotResult::Miss);

    let second = session.submit_human_shot("J9").unwrap();
    let exchange = second.exchange().copied().unwrap();
    assert_eq!(exchange.result, ShotResult::Miss);
    assert_eq!(exchange.reply.map(|r| r.result), Some(ShotResult::Hit));
    assert_eq!(exchange.phase, Phase::Finished);
    assert_eq!(exchange.winner, Some(Side::Opponent));
    assert!(session.human_board().is_fleet_destroyed());
    assert_eq!(session.shots_fired(Side::Human), 2);
    assert_eq!(session.shots_fired(Side::Opponent), 2);
}

#[test]
fn test_misbehaving_strategy_is_reported() {
    let mut session = sturdy_session(15);
    session.set_strategy(Box::new(Scripted(vec![at(9, 9), at(9, 9)])));
    session.submit_human_shot("A1").unwrap();
    assert_eq!(
        session.submit_human_shot("A2"),
        Err(SessionError::RepeatedTarget(at(9, 9)))
    );

    let mut session = sturdy_session(16);
    session.set_strategy(Box::new(Scripted(vec![])));
    assert_eq!(
        session.submit_human_shot("A1"),
        Err(SessionError::NoTargetsLeft)
    );
}

#[test]
fn test_failed_reply_leaves_session_playable() {
    let mut session = sturdy_session(17);
    session.set_strategy(Box::new(Scripted(vec![])));
    let before = *session.opponent_board();
    assert_eq!(
        session.submit_human_shot("A1"),
        Err(SessionError::NoTargetsLeft)
    );
    assert_eq!(*session.opponent_board(), before);
    assert_eq!(session.shots_fired(Side::Human), 0);
    assert_eq!(session.shots_fired(Side::Opponent), 0);
    assert_eq!(session.to_move(), Some(Side::Human));

    session.set_strategy(Box::new(Scripted(vec![at(9, 9), at(9, 9)])));
    session.submit_human_shot("A1").unwrap();
    let human_before = *session.human_board();
    let opponent_before = *session.opponent_board();
    assert_eq!(
        session.submit_human_shot("A2"),
        Err(SessionError::RepeatedTarget(at(9, 9)))
    );
    assert_eq!(*session.human_board(), human_before);
    assert_eq!(*session.opponent_board(), opponent_before);
    assert_eq!(session.shots_fired(Side::Human), 1);
    assert_eq!(session.shots_fired(Side::Opponent), 1);
    assert_eq!(session.to_move(), Some(Side::Human));

    session.set_strategy(Box::new(Scripted(vec![at(9, 8)])));
    let exchange = session.submit_human_shot("A2").unwrap();
    let exchange = exchange.exchange().copied().unwrap();
    assert_eq!(exchange.result, ShotResult::Miss);
    assert_eq!(exchange.reply.map(|r| r.target), Some(at(9, 8)));
}

#[test]
fn test_fire_opponent_error_keeps_turn() {
    let mut session = sturdy_session(18);
    session.set_strategy(Box::new(Scripted(vec![])));
    assert_eq!(session.fire_human(at(5, 5)).unwrap(), ShotResult::Miss);
    assert_eq!(session.fire_opponent(), Err(SessionError::NoTargetsLeft));
    assert_eq!(session.to_move(), Some(Side::Opponent));
    assert_eq!(session.shots_fired(Side::Opponent), 0);

    session.set_strategy(Box::new(Scripted(vec![at(9, 9)])));
    assert_eq!(session.fire_opponent().unwrap().target, at(9, 9));
    assert_eq!(session.to_move(), Some(Side::Human));
}

#[test]
fn test_from_boards_with_destroyed_fleet_is_finished() {
    let fleet = FleetSpec::default();
    let human = board_with(&[(0, 0, 1, Orientation::Vertical)]);
    let session = Session::from_boards(fleet, human, Board::new(), 12);
    assert_eq!(session.phase(), Phase::Finished);
    assert_eq!(session.winner(), Some(Side::Human));
}

#[test]
fn test_restart_resets_everything() {
    let mut session = Session::start_seeded(FleetSpec::default(), 13).unwrap();
    session.place_human_fleet().unwrap();
    session.submit_human_shot("E5").unwrap();

    session.restart().unwrap();
    assert_eq!(session.phase(), Phase::Setup);
    assert_eq!(session.winner(), None);
    assert_eq!(session.shots_fired(Side::Human), 0);
    assert_eq!(session.shots_fired(Side::Opponent), 0);
    assert_eq!(session.opponent_board().shots_taken(), 0);
    assert_eq!(session.opponent_board().ship_cells(), 20);
    assert_eq!(session.human_board().ship_cells(), 0);

    session.place_human_fleet().unwrap();
    assert_eq!(session.phase(), Phase::Shooting);
}

#[test]
fn test_seeded_sessions_are_reproducible() {
    let mut a = Session::start_seeded(FleetSpec::default(), 14).unwrap();
    let mut b = Session::start_seeded(FleetSpec::default(), 14).unwrap();
    a.place_human_fleet().unwrap();
    b.place_human_fleet().unwrap();
    assert_eq!(a.human_board(), b.human_board());
    assert_eq!(a.opponent_board(), b.opponent_board());
    assert_eq!(
        a.submit_human_shot("B2").unwrap(),
        b.submit_human_shot("B2").unwrap()
    );
}
