//! Input handling and tick cadence around a [`Board`].
//!
//! The controller owns the collaborators the rules need (random source and
//! audio sink) plus the velocity last chosen by the player. An external
//! driver calls [`GameController::tick`] at a fixed interval and reads the
//! board back for drawing.

use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::audio::AudioSink;
use super::board::{Board, Phase, TickReport, Velocity};
use super::config::Config;

/// A directional input from the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Towards row 0.
    Up,
    /// Towards the last row.
    Down,
    /// Towards column 0.
    Left,
    /// Towards the last column.
    Right,
}

impl From<Direction> for Velocity {
    fn from(direction: Direction) -> Self {
        match direction {
            Direction::Up => Velocity::UP,
            Direction::Down => Velocity::DOWN,
            Direction::Left => Velocity::LEFT,
            Direction::Right => Velocity::RIGHT,
        }
    }
}

/// Drives a [`Board`] from player input.
pub struct GameController<R, A> {
    board: Board,
    velocity: Velocity,
    rng: R,
    audio: A,
    tick_interval: Duration,
    ticks: u64,
    last_report: TickReport,
}

impl<A: AudioSink> GameController<StdRng, A> {
    /// Creates a controller whose random source is seeded from
    /// [`Config::seed`], or from the OS when no seed is configured.
    pub fn from_config(config: &Config, audio: A) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::new(config, rng, audio)
    }
}

impl<R: Rng, A: AudioSink> GameController<R, A> {
    /// Creates a controller for a fresh board sized by `config`.
    ///
    /// The food is moved to a random cell right away.
    pub fn new(config: &Config, mut rng: R, audio: A) -> Self {
        let mut board = Board::new(config.width_tiles(), config.height_tiles(), config);
        board.place_food(&mut rng);

        tracing::debug!(
            width = board.width(),
            height = board.height(),
            food_x = board.food.x,
            food_y = board.food.y,
            "new game"
        );

        Self::with_board(board, rng, audio, config.tick_interval())
    }

    /// Wraps an existing board. The head starts standing still.
    pub fn with_board(board: Board, rng: R, audio: A, tick_interval: Duration) -> Self {
        Self {
            board,
            velocity: Velocity::STILL,
            rng,
            audio,
            tick_interval,
            ticks: 0,
            last_report: TickReport::default(),
        }
    }

    /// Points the head in `direction` from the next tick on.
    ///
    /// Reversing straight back is allowed. Ignored once the game is over.
    pub fn set_direction(&mut self, direction: Direction) {
        if self.board.is_over() {
            return;
        }
        self.velocity = direction.into();
    }

    /// Advances the board by one tick and returns the resulting phase.
    ///
    /// Once this returns [`Phase::Over`] the caller should stop its clock;
    /// further ticks are no-ops.
    pub fn tick(&mut self) -> Phase {
        if self.board.is_over() {
            return Phase::Over;
        }

        let report = self
            .board
            .advance(self.velocity, &mut self.rng, &mut self.audio);
        self.ticks += 1;

        for event in &report.events {
            tracing::trace!(tick = self.ticks, ?event);
        }
        self.last_report = report;

        self.board.phase()
    }

    /// The board, for drawing.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Velocity applied on the next tick.
    pub fn velocity(&self) -> Velocity {
        self.velocity
    }

    /// Current phase of the game.
    pub fn phase(&self) -> Phase {
        self.board.phase()
    }

    /// `true` once a hazard has been hit.
    pub fn is_over(&self) -> bool {
        self.board.is_over()
    }

    /// Interval between ticks the driver should honor.
    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    /// Number of ticks that advanced the board.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Events of the most recent tick.
    pub fn last_report(&self) -> &TickReport {
        &self.last_report
    }

    /// The audio sink.
    pub fn audio(&self) -> &A {
        &self.audio
    }
}

/// Fixed-interval clock fed with elapsed frame time.
///
/// At most one tick is due per call, so every tick is followed by a frame.
/// Time left over after a tick is carried into the next interval, but a
/// backlog of more than one interval is dropped.
#[derive(Debug, Clone)]
pub struct TickClock {
    interval: Duration,
    pending: Duration,
    stopped: bool,
}

impl TickClock {
    /// Creates a clock. Intervals shorter than a millisecond are raised to one.
    pub fn new(interval: Duration) -> Self {
        Self {
            interval: interval.max(Duration::from_millis(1)),
            pending: Duration::ZERO,
            stopped: false,
        }
    }

    /// Adds `elapsed` and returns `true` if a tick is now due.
    pub fn accumulate(&mut self, elapsed: Duration) -> bool {
        if self.stopped {
            return false;
        }

        self.pending += elapsed;
        if self.pending < self.interval {
            return false;
        }

        self.pending -= self.interval;
        if self.pending >= self.interval {
            tracing::debug!(dropped_ms = self.pending.as_millis(), "tick clock fell behind");
            self.pending = Duration::ZERO;
        }
        true
    }

    /// Stops the clock for good.
    pub fn stop(&mut self) {
        self.stopped = true;
        self.pending = Duration::ZERO;
    }

    /// `true` after [`TickClock::stop`].
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}
