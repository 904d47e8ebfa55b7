use alloc::vec::Vec;
use rand::prelude::*;
use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - Idle -> Running (first flip or explicit start)
/// - Running -> Won (win reveal after the last pair)
/// - Won -> Running (explicit start)
/// - any -> Idle (reset)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    Idle,
    Running,
    Won,
}

impl SessionState {
    pub const fn is_idle(self) -> bool {
        matches!(self, Self::Idle)
    }

    pub const fn is_running(self) -> bool {
        matches!(self, Self::Running)
    }

    pub const fn is_won(self) -> bool {
        matches!(self, Self::Won)
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Idle
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FlipOutcome {
    /// Ignored: two cards already up, card not hidden, or game over.
    NoChange,
    /// First card of a pair turned up.
    Flipped,
    Matched,
    /// Second card differs, both go back down after the mismatch delay.
    Mismatched,
    /// Last pair matched, the win is revealed after the win delay.
    Completed,
}

impl FlipOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TaskOutcome {
    /// Task belongs to an earlier game.
    Stale,
    NoChange,
    FlippedBack(CardCount),
    Won(Score),
}

impl TaskOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::FlippedBack(_) | Self::Won(_))
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum StartOutcome {
    /// A game is already running.
    Ignored,
    Started,
}

/// One player's game: the board, the counters and the timer bookkeeping.
///
/// The session never touches a clock. Timer requests are queued as [`Command`]s
/// for the host, which hands ticks and [`DelayedTask`]s back through
/// [`Session::tick`] and [`Session::run`].
#[derive(Clone, Debug)]
pub struct Session {
    config: GameConfig,
    pool: ImagePool,
    board: Board,
    state: SessionState,
    flipped_count: u8,
    total_moves: Counter,
    elapsed_secs: Counter,
    generation: Generation,
    rng: SmallRng,
    commands: Vec<Command>,
}

impl Session {
    pub fn new(config: GameConfig, pool: ImagePool, seed: u64) -> Result<Self> {
        let config = config.normalized();
        pool.check_dimension(config.dimension)?;

        let mut rng = SmallRng::seed_from_u64(seed);
        let board = deal(&mut rng, &config, &pool)?;
        log::debug!("new session, seed: {}", seed);

        Ok(Self {
            config,
            pool,
            board,
            state: SessionState::Idle,
            flipped_count: 0,
            total_moves: 0,
            elapsed_secs: 0,
            generation: Generation::default(),
            rng,
            commands: Vec::new(),
        })
    }

    /// Continues numbering after `previous`, so ticks and tasks queued for a replaced session stay stale.
    pub fn after(mut self, previous: Generation) -> Self {
        self.generation = previous.next();
        self
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn generation(&self) -> Generation {
        self.generation
    }

    pub fn flipped_count(&self) -> u8 {
        self.flipped_count
    }

    pub fn total_moves(&self) -> Counter {
        self.total_moves
    }

    pub fn elapsed_secs(&self) -> Counter {
        self.elapsed_secs
    }

    pub fn score(&self) -> Score {
        Score::new(self.total_moves, self.elapsed_secs)
    }

    /// Final score, once the win has been revealed.
    pub fn summary(&self) -> Option<Score> {
        self.state.is_won().then(|| self.score())
    }

    /// The start control is disabled while a game runs.
    pub fn can_start(&self) -> bool {
        !self.state.is_running()
    }

    pub fn image_at(&self, coords: Coord2) -> Option<&str> {
        let coords = self.board.validate_coords(coords).ok()?;
        self.pool.get(self.board[coords].image)
    }

    pub fn can_flip(&self, coords: Coord2) -> bool {
        !self.state.is_won()
            && self.flipped_count < 2
            && self
                .board
                .validate_coords(coords)
                .is_ok_and(|coords| self.board[coords].is_hidden())
    }

    /// Drains the timer requests queued since the last call.
    pub fn take_commands(&mut self) -> Vec<Command> {
        core::mem::take(&mut self.commands)
    }

    pub fn flip(&mut self, coords: Coord2) -> Result<FlipOutcome> {
        let coords = self.board.validate_coords(coords)?;

        if !self.can_flip(coords) {
            log::trace!("flip ignored at {:?}", coords);
            return Ok(FlipOutcome::NoChange);
        }

        if self.state.is_idle() {
            self.begin();
        }

        self.board.set_face(coords, CardFace::Flipped);
        self.flipped_count += 1;
        self.total_moves = self.total_moves.saturating_add(1);

        if self.flipped_count < 2 {
            return Ok(FlipOutcome::Flipped);
        }

        let outcome = self.resolve_pair();

        if self.board.is_complete() {
            log::debug!("all pairs matched after {} moves", self.total_moves);
            self.schedule(DelayedAction::RevealWin, self.config.win_delay);
            return Ok(FlipOutcome::Completed);
        }

        Ok(outcome)
    }

    /// Deals a new board and starts the clock right away.
    pub fn start(&mut self) -> Result<StartOutcome> {
        if self.state.is_running() {
            log::debug!("start ignored, game already running");
            return Ok(StartOutcome::Ignored);
        }

        let board = deal(&mut self.rng, &self.config, &self.pool)?;
        self.generation = self.generation.next();
        self.board = board;
        self.begin();
        Ok(StartOutcome::Started)
    }

    /// Stops the clock, zeroes the counters and deals a new board.
    pub fn reset(&mut self) -> Result<()> {
        let board = deal(&mut self.rng, &self.config, &self.pool)?;
        self.generation = self.generation.next();
        self.commands.push(Command::StopTicker);
        self.board = board;
        self.zero_counters();
        self.state = SessionState::Idle;
        log::debug!("reset, generation: {:?}", self.generation);
        Ok(())
    }

    /// Accounts one ticker period, returns whether the counters changed.
    pub fn tick(&mut self, generation: Generation) -> bool {
        if generation != self.generation || !self.state.is_running() {
            log::trace!("tick ignored, generation: {:?}", generation);
            return false;
        }
        self.elapsed_secs = self.elapsed_secs.saturating_add(1);
        true
    }

    /// Runs a delayed task handed back by the host.
    pub fn run(&mut self, task: DelayedTask) -> TaskOutcome {
        if task.generation != self.generation {
            log::debug!(
                "stale {:?} from {:?}, current {:?}",
                task.action,
                task.generation,
                self.generation
            );
            return TaskOutcome::Stale;
        }

        match task.action {
            DelayedAction::FlipBack => {
                let hidden = self.board.hide_unmatched();
                self.flipped_count = 0;
                TaskOutcome::FlippedBack(hidden)
            }
            DelayedAction::RevealWin => {
                if !self.state.is_running() || !self.board.is_complete() {
                    log::warn!("win reveal in state {:?} ignored", self.state);
                    return TaskOutcome::NoChange;
                }
                self.state = SessionState::Won;
                self.commands.push(Command::StopTicker);
                let score = self.score();
                log::debug!("won: {:?}", score);
                TaskOutcome::Won(score)
            }
        }
    }

    fn begin(&mut self) {
        self.zero_counters();
        self.state = SessionState::Running;
        self.commands.push(Command::StartTicker {
            generation: self.generation,
            period: self.config.tick_period,
        });
        log::debug!("started, generation: {:?}", self.generation);
    }

    fn zero_counters(&mut self) {
        self.flipped_count = 0;
        self.total_moves = 0;
        self.elapsed_secs = 0;
    }

    fn resolve_pair(&mut self) -> FlipOutcome {
        let pair: Vec<Coord2> = self.board.flipped_coords().collect();
        let &[first, second] = pair.as_slice() else {
            log::warn!("expected two face up cards, found {:?}", pair);
            return FlipOutcome::Flipped;
        };

        if self.board[first].image == self.board[second].image {
            self.board.set_face(first, CardFace::Matched);
            self.board.set_face(second, CardFace::Matched);
            self.flipped_count = 0;
            FlipOutcome::Matched
        } else {
            self.schedule(DelayedAction::FlipBack, self.config.mismatch_delay);
            FlipOutcome::Mismatched
        }
    }

    fn schedule(&mut self, action: DelayedAction, delay: core::time::Duration) {
        self.commands.push(Command::Schedule(DelayedTask {
            action,
            generation: self.generation,
            delay,
        }));
    }
}

fn deal(rng: &mut SmallRng, config: &GameConfig, pool: &ImagePool) -> Result<Board> {
    RandomDeckGenerator::new(rng.random()).generate(config.dimension, pool)
}
