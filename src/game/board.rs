//! The board state and the per-tick rules.
//!
//! A [`Board`] owns everything the rules touch: the head, the food, the
//! trail of tiles left behind by earlier pickups, the score and the
//! terminal flag. [`Board::advance`] is the only transition. It runs in
//! four phases:
//!
//! 1. pickup: a head sitting on the food lays a new trail tile
//! 2. translation of the head by the current velocity
//! 3. edge wrap onto the opposite side of the board
//! 4. collision of the head with the trail

use std::num::NonZeroU32;

use rand::Rng;

use super::audio::{AudioSink, SoundClip};
use super::config::Config;

/// Points added when the head touches a bonus tile.
pub const BONUS_SCORE: u32 = 10;

const START_HEAD: Position = Position::new(5, 5);
const START_FOOD: Position = Position::new(10, 10);

/// A cell of the board in tile coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Position {
    /// Column, growing to the right.
    pub x: i32,
    /// Row, growing downwards.
    pub y: i32,
}

impl Position {
    /// Creates a position.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// What a trail tile does when the head lands on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileKind {
    /// No effect.
    Plain,
    /// Ends the game.
    Hazard,
    /// Awards [`BONUS_SCORE`] once, then turns plain.
    Bonus,
}

/// A tile laid at the spot where food was collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedTile {
    /// Where the tile sits.
    pub position: Position,
    /// Its current effect.
    pub kind: TileKind,
}

impl PlacedTile {
    /// Creates a tile.
    pub const fn new(position: Position, kind: TileKind) -> Self {
        Self { position, kind }
    }
}

/// Per-tick movement of the head: standing still or one step along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Velocity {
    dx: i32,
    dy: i32,
}

impl Velocity {
    /// No movement.
    pub const STILL: Self = Self { dx: 0, dy: 0 };
    /// One row up.
    pub const UP: Self = Self { dx: 0, dy: -1 };
    /// One row down.
    pub const DOWN: Self = Self { dx: 0, dy: 1 };
    /// One column left.
    pub const LEFT: Self = Self { dx: -1, dy: 0 };
    /// One column right.
    pub const RIGHT: Self = Self { dx: 1, dy: 0 };

    /// Horizontal component.
    pub fn dx(self) -> i32 {
        self.dx
    }

    /// Vertical component.
    pub fn dy(self) -> i32 {
        self.dy
    }
}

/// Whether the game still accepts ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Ticks advance the board.
    Running,
    /// A hazard was hit. Terminal.
    Over,
}

/// Something notable that happened during a tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// The head collected the food and a tile was laid.
    FoodCollected {
        /// Where the tile was laid.
        position: Position,
        /// Kind of the new tile.
        kind: TileKind,
        /// 1-based pickup number.
        pickup: u32,
    },
    /// The head touched a bonus tile.
    BonusCollected {
        /// The bonus tile's position.
        position: Position,
    },
    /// The head touched a hazard tile and the game ended.
    HazardHit {
        /// The hazard tile's position.
        position: Position,
    },
}

/// Events produced by one call to [`Board::advance`], in the order they happened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// The events.
    pub events: Vec<GameEvent>,
}

impl TickReport {
    /// `true` if nothing notable happened.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

/// Complete game state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    width: i32,
    height: i32,
    score_per_tile: u32,
    special_tile_frequency: NonZeroU32,
    /// Current head cell.
    pub head: Position,
    /// Current food cell.
    pub food: Position,
    /// Tiles laid so far, in pickup order.
    pub trail: Vec<PlacedTile>,
    /// Points collected so far.
    pub score: u32,
    /// Number of pickups so far.
    pub tile_counter: u32,
    over: bool,
}

impl Board {
    /// Creates a fresh board of `width` x `height` tiles.
    ///
    /// The head starts at (5, 5) and the food at (10, 10), pulled inside the
    /// board when it is smaller than that.
    pub fn new(width: i32, height: i32, config: &Config) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        let clamp = |p: Position| Position::new(p.x.min(width - 1), p.y.min(height - 1));

        Self {
            width,
            height,
            score_per_tile: config.score_per_tile,
            special_tile_frequency: config.special_tile_frequency,
            head: clamp(START_HEAD),
            food: clamp(START_FOOD),
            trail: Vec::new(),
            score: 0,
            tile_counter: 0,
            over: false,
        }
    }

    /// Board width in tiles.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Board height in tiles.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// `true` once a hazard has been hit.
    pub fn is_over(&self) -> bool {
        self.over
    }

    /// Current phase of the game.
    pub fn phase(&self) -> Phase {
        if self.over {
            Phase::Over
        } else {
            Phase::Running
        }
    }

    /// Moves the food to a uniformly random cell. Occupied cells are not avoided.
    pub fn place_food<R: Rng>(&mut self, rng: &mut R) {
        self.food = Position::new(
            rng.random_range(0..self.width),
            rng.random_range(0..self.height),
        );
    }

    /// Runs one tick. Does nothing once the game is over.
    pub fn advance<R: Rng>(
        &mut self,
        velocity: Velocity,
        rng: &mut R,
        audio: &mut dyn AudioSink,
    ) -> TickReport {
        let mut report = TickReport::default();
        if self.over {
            return report;
        }

        if self.head == self.food {
            let event = self.collect_food(rng);
            report.events.push(event);
        }

        self.head.x += velocity.dx();
        self.head.y += velocity.dy();
        self.wrap_head();

        for tile in &mut self.trail {
            if tile.position != self.head {
                continue;
            }

            match tile.kind {
                TileKind::Hazard => {
                    self.over = true;
                    tracing::info!(
                        score = self.score,
                        x = self.head.x,
                        y = self.head.y,
                        "game over"
                    );
                    report.events.push(GameEvent::HazardHit {
                        position: tile.position,
                    });
                    break;
                }
                TileKind::Bonus => {
                    self.score = self.score.saturating_add(BONUS_SCORE);
                    tile.kind = TileKind::Plain;
                    if let Err(err) = audio.play(SoundClip::Ding) {
                        tracing::warn!(%err, "could not play bonus sound");
                    }
                    report.events.push(GameEvent::BonusCollected {
                        position: tile.position,
                    });
                }
                TileKind::Plain => {}
            }
        }

        report
    }

    fn collect_food<R: Rng>(&mut self, rng: &mut R) -> GameEvent {
        let pickup = self.tile_counter + 1;

        let kind = if pickup % self.special_tile_frequency.get() == 0 {
            if rng.random_bool(0.5) {
                TileKind::Hazard
            } else {
                TileKind::Bonus
            }
        } else {
            self.score = self.score.saturating_add(self.score_per_tile);
            TileKind::Plain
        };

        let position = self.food;
        self.trail.push(PlacedTile::new(position, kind));
        self.tile_counter = pickup;
        self.place_food(rng);

        tracing::debug!(pickup, ?kind, score = self.score, "food collected");

        GameEvent::FoodCollected {
            position,
            kind,
            pickup,
        }
    }

    // Only one axis is corrected per tick; vertical wins when both overflow.
    fn wrap_head(&mut self) {
        let head = &mut self.head;
        if head.y >= self.height {
            head.y = 0;
        } else if head.y < 0 {
            head.y = self.height - 1;
        } else if head.x >= self.width {
            head.x = 0;
        } else if head.x < 0 {
            head.x = self.width - 1;
        }
    }
}
