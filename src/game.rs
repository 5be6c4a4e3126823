//! Game sessions: one human board, one opponent board and the turn order
//! between them.

use core::fmt;
use log::{debug, info, warn};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::board::Board;
use crate::common::{PlacementError, ShotResult, Side};
use crate::config::FleetSpec;
use crate::coordinate::{parse_coordinate, Coordinate, ParseError};
use crate::opponent::{Opponent, RandomOpponent};
use crate::placement::place_fleet;
use crate::render::{render_opponent_view, render_own_board, SymbolGrid};

/// Stage of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Opponent fleet placed, waiting for the human fleet.
    Setup,
    /// Both fleets placed, shots alternate.
    Shooting,
    /// One fleet is destroyed.
    Finished,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Setup => write!(f, "setup"),
            Phase::Shooting => write!(f, "shooting"),
            Phase::Finished => write!(f, "finished"),
        }
    }
}

/// Errors returned by [`Session`] operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionError {
    /// The operation is not allowed in the current phase.
    WrongPhase { expected: Phase, actual: Phase },
    /// The other side is due to fire.
    OutOfTurn { expected: Side },
    /// The opponent strategy found no cell left to fire at.
    NoTargetsLeft,
    /// The opponent strategy picked a cell that was already shot.
    RepeatedTarget(Coordinate),
    Placement(PlacementError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SessionError::WrongPhase { expected, actual } => write!(
                f,
                "not allowed during {} (only during {})",
                actual, expected
            ),
            SessionError::OutOfTurn { expected } => write!(f, "it is the {}'s turn", expected),
            SessionError::NoTargetsLeft => write!(f, "no cells left to fire at"),
            SessionError::RepeatedTarget(at) => {
                write!(f, "opponent fired at {} twice", at)
            }
            SessionError::Placement(e) => write!(f, "placement failed: {}", e),
        }
    }
}

impl std::error::Error for SessionError {}

impl From<PlacementError> for SessionError {
    fn from(err: PlacementError) -> Self {
        SessionError::Placement(err)
    }
}

/// The opponent's reply within an exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OpponentShot {
    pub target: Coordinate,
    pub result: ShotResult,
}

/// A human shot that counted, plus whatever followed it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Exchange {
    pub target: Coordinate,
    /// Either [`ShotResult::Hit`] or [`ShotResult::Miss`].
    pub result: ShotResult,
    /// `None` when the human shot ended the game.
    pub reply: Option<OpponentShot>,
    pub phase: Phase,
    pub winner: Option<Side>,
}

/// What became of a shot submitted as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ShotOutcome {
    /// The text is not a coordinate on the board. Nothing changed.
    InvalidCoordinate(ParseError),
    /// The cell was fired at before. Nothing changed, no turn was used.
    AlreadyShot(Coordinate),
    Exchange(Exchange),
}

impl ShotOutcome {
    /// `true` when the caller should ask for another coordinate.
    pub fn is_rejected(&self) -> bool {
        !matches!(self, ShotOutcome::Exchange(_))
    }

    pub fn exchange(&self) -> Option<&Exchange> {
        match self {
            ShotOutcome::Exchange(exchange) => Some(exchange),
            _ => None,
        }
    }
}

/// A single game between a human and the automated opponent.
///
/// A session owns both boards and its own random number generator, so
/// separate games never share state.
pub struct Session {
    fleet: FleetSpec,
    human: Board,
    opponent: Board,
    phase: Phase,
    turn: Side,
    winner: Option<Side>,
    human_shots: usize,
    opponent_shots: usize,
    rng: SmallRng,
    strategy: Box<dyn Opponent>,
}

impl Session {
    /// New session seeded from the thread RNG, opponent fleet in place.
    pub fn start(fleet: FleetSpec) -> Result<Self, PlacementError> {
        let rng = SmallRng::from_rng(&mut rand::rng());
        Self::with_strategy(fleet, rng, Box::new(RandomOpponent::new()))
    }

    /// Like [`Session::start`] but reproducible.
    pub fn start_seeded(fleet: FleetSpec, seed: u64) -> Result<Self, PlacementError> {
        Self::with_strategy(
            fleet,
            SmallRng::seed_from_u64(seed),
            Box::new(RandomOpponent::new()),
        )
    }

    pub fn with_strategy(
        fleet: FleetSpec,
        mut rng: SmallRng,
        strategy: Box<dyn Opponent>,
    ) -> Result<Self, PlacementError> {
        let mut opponent = Board::new();
        place_fleet(&mut opponent, &fleet, &mut rng)?;
        info!(
            "session started with {} ships ({} cells) per side",
            fleet.ship_count(),
            fleet.total_cells()
        );
        Ok(Self {
            fleet,
            human: Board::new(),
            opponent,
            phase: Phase::Setup,
            turn: Side::Human,
            winner: None,
            human_shots: 0,
            opponent_shots: 0,
            rng,
            strategy,
        })
    }

    /// Session over prepared layouts, ready for the first human shot.
    ///
    /// A board whose fleet is already destroyed ends the game at once.
    pub fn from_boards(fleet: FleetSpec, human: Board, opponent: Board, seed: u64) -> Self {
        let mut session = Self {
            fleet,
            human,
            opponent,
            phase: Phase::Shooting,
            turn: Side::Human,
            winner: None,
            human_shots: 0,
            opponent_shots: 0,
            rng: SmallRng::seed_from_u64(seed),
            strategy: Box::new(RandomOpponent::new()),
        };
        if session.opponent.is_fleet_destroyed() {
            session.finish(Side::Human);
        } else if session.human.is_fleet_destroyed() {
            session.finish(Side::Opponent);
        }
        session
    }

    /// Swap the opponent's targeting strategy.
    pub fn set_strategy(&mut self, strategy: Box<dyn Opponent>) {
        self.strategy = strategy;
    }

    /// Throw away both boards and begin a new game with the same fleet.
    pub fn restart(&mut self) -> Result<(), PlacementError> {
        let mut opponent = Board::new();
        place_fleet(&mut opponent, &self.fleet, &mut self.rng)?;
        self.opponent = opponent;
        self.human = Board::new();
        self.phase = Phase::Setup;
        self.turn = Side::Human;
        self.winner = None;
        self.human_shots = 0;
        self.opponent_shots = 0;
        info!("session restarted");
        Ok(())
    }

    /// Lay out the human fleet at random and open fire.
    pub fn place_human_fleet(&mut self) -> Result<(), SessionError> {
        self.expect_phase(Phase::Setup)?;
        place_fleet(&mut self.human, &self.fleet, &mut self.rng)?;
        self.phase = Phase::Shooting;
        self.turn = Side::Human;
        info!("human fleet placed, shooting begins");
        Ok(())
    }

    /// The human half of an exchange.
    ///
    /// [`ShotResult::AlreadyShot`] leaves the session untouched and the
    /// human keeps the turn.
    pub fn fire_human(&mut self, target: Coordinate) -> Result<ShotResult, SessionError> {
        self.expect_turn(Side::Human)?;
        let result = self.opponent.resolve_shot(target);
        if result == ShotResult::AlreadyShot {
            debug!("human repeated a shot at {}", target);
            return Ok(result);
        }
        self.human_shots += 1;
        debug!("human fires at {}: {}", target, result);
        if self.opponent.is_fleet_destroyed() {
            self.finish(Side::Human);
        } else {
            self.turn = Side::Opponent;
        }
        Ok(result)
    }

    /// The opponent half of an exchange.
    ///
    /// A strategy that picks no cell, or an already shot one, is an error and
    /// leaves the session unchanged.
    pub fn fire_opponent(&mut self) -> Result<OpponentShot, SessionError> {
        self.expect_turn(Side::Opponent)?;
        let target = self.pick_target()?;
        Ok(self.apply_opponent_shot(target))
    }

    /// Parse `text`, fire, and let the opponent answer if the game goes on.
    ///
    /// Malformed coordinates and repeated cells come back as rejected
    /// outcomes. Errors are reserved for calls made in the wrong phase and
    /// for a strategy that cannot answer; in both cases nothing is applied,
    /// not even the human shot.
    pub fn submit_human_shot(&mut self, text: &str) -> Result<ShotOutcome, SessionError> {
        self.expect_turn(Side::Human)?;
        let target = match parse_coordinate(text.trim()) {
            Ok(target) => target,
            Err(e) => {
                debug!("rejected coordinate {:?}: {}", text, e);
                return Ok(ShotOutcome::InvalidCoordinate(e));
            }
        };
        let mut preview = self.opponent;
        match preview.resolve_shot(target) {
            ShotResult::AlreadyShot => {
                debug!("human repeated a shot at {}", target);
                return Ok(ShotOutcome::AlreadyShot(target));
            }
            ShotResult::Hit | ShotResult::Miss => {}
        }
        let reply_target = if preview.is_fleet_destroyed() {
            None
        } else {
            Some(self.pick_target()?)
        };
        let result = self.fire_human(target)?;
        let reply = reply_target.map(|at| self.apply_opponent_shot(at));
        Ok(ShotOutcome::Exchange(Exchange {
            target,
            result,
            reply,
            phase: self.phase,
            winner: self.winner,
        }))
    }

    /// Ask the strategy for an unshot cell on the human board.
    fn pick_target(&mut self) -> Result<Coordinate, SessionError> {
        let hits = self.human.hits();
        let misses = self.human.misses();
        let target = self
            .strategy
            .select_target(&mut self.rng, &hits, &misses)
            .ok_or(SessionError::NoTargetsLeft)?;
        if self.human.cell(target).is_shot() {
            warn!("strategy picked {} twice", target);
            return Err(SessionError::RepeatedTarget(target));
        }
        Ok(target)
    }

    /// Fire at a cell returned by `pick_target`.
    fn apply_opponent_shot(&mut self, target: Coordinate) -> OpponentShot {
        let result = self.human.resolve_shot(target);
        self.opponent_shots += 1;
        self.strategy.handle_shot_result(target, result);
        debug!("opponent fires at {}: {}", target, result);
        if self.human.is_fleet_destroyed() {
            self.finish(Side::Opponent);
        } else {
            self.turn = Side::Human;
        }
        OpponentShot { target, result }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Side due to fire next, `None` outside the shooting phase.
    pub fn to_move(&self) -> Option<Side> {
        (self.phase == Phase::Shooting).then_some(self.turn)
    }

    /// Shots by `side` that hit or missed.
    pub fn shots_fired(&self, side: Side) -> usize {
        match side {
            Side::Human => self.human_shots,
            Side::Opponent => self.opponent_shots,
        }
    }

    pub fn fleet(&self) -> &FleetSpec {
        &self.fleet
    }

    pub fn human_board(&self) -> &Board {
        &self.human
    }

    pub fn opponent_board(&self) -> &Board {
        &self.opponent
    }

    /// The human's own board, ships shown.
    pub fn own_view(&self) -> SymbolGrid {
        render_own_board(&self.human)
    }

    /// The human's shots at the opponent, ships hidden.
    pub fn target_view(&self) -> SymbolGrid {
        render_opponent_view(&self.opponent)
    }

    fn expect_phase(&self, expected: Phase) -> Result<(), SessionError> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(SessionError::WrongPhase {
                expected,
                actual: self.phase,
            })
        }
    }

    fn expect_turn(&self, side: Side) -> Result<(), SessionError> {
        self.expect_phase(Phase::Shooting)?;
        if self.turn == side {
            Ok(())
        } else {
            Err(SessionError::OutOfTurn {
                expected: self.turn,
            })
        }
    }

    fn finish(&mut self, winner: Side) {
        self.phase = Phase::Finished;
        self.winner = Some(winner);
        info!(
            "{} wins ({} human shots, {} opponent shots)",
            winner, self.human_shots, self.opponent_shots
        );
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("fleet", &self.fleet)
            .field("phase", &self.phase)
            .field("turn", &self.turn)
            .field("winner", &self.winner)
            .field("human_shots", &self.human_shots)
            .field("opponent_shots", &self.opponent_shots)
            .field("human", &self.human)
            .field("opponent", &self.opponent)
            .finish_non_exhaustive()
    }
}
