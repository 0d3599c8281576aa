#![allow(missing_docs)]

use color_collector::game::audio::{AudioSink, Silent, SoundClip};
use color_collector::game::board::{
    BONUS_SCORE, Board, GameEvent, Phase, PlacedTile, Position, TileKind, Velocity,
};
use color_collector::game::config::Config;
use color_collector::game::error::AudioError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::num::NonZeroU32;

#[derive(Default)]
struct RecordingAudio {
    played: Vec<SoundClip>,
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, clip: SoundClip) -> Result<(), AudioError> {
        self.played.push(clip);
        Ok(())
    }
}

struct BrokenAudio;

impl AudioSink for BrokenAudio {
    fn play(&mut self, clip: SoundClip) -> Result<(), AudioError> {
        Err(AudioError::ClipUnavailable(clip.id().to_string()))
    }
}

fn create_test_config(frequency: u32) -> Config {
    Config {
        score_per_tile: 5,
        special_tile_frequency: NonZeroU32::new(frequency).unwrap(),
        ..Config::default()
    }
}

fn create_test_board() -> Board {
    Board::new(24, 24, &create_test_config(4))
}

/// Puts the head on the food and ticks once, moving right.
fn pickup(board: &mut Board, rng: &mut StdRng) -> Vec<GameEvent> {
    board.head = board.food;
    board.advance(Velocity::RIGHT, rng, &mut Silent).events
}

#[test]
fn test_board_creation() {
    let board = create_test_board();

    assert_eq!(board.width(), 24);
    assert_eq!(board.height(), 24);
    assert_eq!(board.head, Position::new(5, 5));
    assert_eq!(board.food, Position::new(10, 10));
    assert!(board.trail.is_empty());
    assert_eq!(board.score, 0);
    assert_eq!(board.tile_counter, 0);
    assert!(!board.is_over());
    assert_eq!(board.phase(), Phase::Running);
}

#[test]
fn test_first_pickup_scenario() {
    let mut board = create_test_board();
    let mut rng = StdRng::seed_from_u64(7);

    // drive from (5, 5) to the food at (10, 10)
    for _ in 0..5 {
        board.advance(Velocity::RIGHT, &mut rng, &mut Silent);
    }
    for _ in 0..5 {
        board.advance(Velocity::DOWN, &mut rng, &mut Silent);
    }
    assert_eq!(board.head, Position::new(10, 10));
    assert_eq!(board.tile_counter, 0);

    let report = board.advance(Velocity::DOWN, &mut rng, &mut Silent);

    assert_eq!(board.score, 5);
    assert_eq!(board.tile_counter, 1);
    assert_eq!(
        board.trail,
        vec![PlacedTile::new(Position::new(10, 10), TileKind::Plain)]
    );
    assert_eq!(board.head, Position::new(10, 11));
    assert!(!board.is_over());
    assert_eq!(
        report.events,
        vec![GameEvent::FoodCollected {
            position: Position::new(10, 10),
            kind: TileKind::Plain,
            pickup: 1,
        }]
    );
}

#[test]
fn test_fourth_pickup_is_special_for_any_seed() {
    for seed in 0..32 {
        let mut board = create_test_board();
        let mut rng = StdRng::seed_from_u64(seed);

        for _ in 0..4 {
            pickup(&mut board, &mut rng);
        }

        assert_eq!(board.tile_counter, 4);
        assert_eq!(board.trail.len(), 4);
        for tile in &board.trail[..3] {
            assert_eq!(tile.kind, TileKind::Plain);
        }
        assert_ne!(board.trail[3].kind, TileKind::Plain, "seed {seed}");
        // special tiles score nothing when placed
        assert_eq!(board.score, 15);
    }
}

#[test]
fn test_special_kinds_are_both_reachable() {
    let mut hazards = 0;
    let mut bonuses = 0;

    for seed in 0..64 {
        let mut board = Board::new(24, 24, &create_test_config(1));
        let mut rng = StdRng::seed_from_u64(seed);
        pickup(&mut board, &mut rng);
        match board.trail[0].kind {
            TileKind::Hazard => hazards += 1,
            TileKind::Bonus => bonuses += 1,
            TileKind::Plain => panic!("frequency 1 must never lay plain tiles"),
        }
    }

    assert!(hazards > 0);
    assert!(bonuses > 0);
}

#[test]
fn test_special_tile_cadence() {
    let mut board = Board::new(24, 24, &create_test_config(3));
    let mut rng = StdRng::seed_from_u64(99);
    let mut plain_pickups = 0;
    let mut bonus_hits = 0;

    while board.tile_counter < 30 && !board.is_over() {
        let before = board.tile_counter;
        for event in pickup(&mut board, &mut rng) {
            match event {
                GameEvent::FoodCollected { kind, pickup: k, .. } => {
                    assert_eq!(k, before + 1);
                    assert_eq!(kind == TileKind::Plain, k % 3 != 0);
                    if kind == TileKind::Plain {
                        plain_pickups += 1;
                    }
                }
                GameEvent::BonusCollected { .. } => bonus_hits += 1,
                GameEvent::HazardHit { .. } => {}
            }
        }
        assert_eq!(board.tile_counter, before + 1);
        assert_eq!(board.trail.len() as u32, board.tile_counter);
    }

    for (index, tile) in board.trail.iter().enumerate() {
        let k = index + 1;
        if k % 3 != 0 {
            assert_eq!(tile.kind, TileKind::Plain);
        }
    }
    assert_eq!(board.score, plain_pickups * 5 + bonus_hits * BONUS_SCORE);
}

#[test]
fn test_food_relocates_inside_board() {
    let mut board = Board::new(7, 3, &create_test_config(1000));
    let mut rng = StdRng::seed_from_u64(3);

    for _ in 0..200 {
        pickup(&mut board, &mut rng);
        assert!((0..7).contains(&board.food.x));
        assert!((0..3).contains(&board.food.y));
    }
    assert_eq!(board.tile_counter, 200);
}

#[test]
fn test_wrap_keeps_head_on_board() {
    let (width, height) = (5, 4);
    let velocities = [
        Velocity::STILL,
        Velocity::UP,
        Velocity::DOWN,
        Velocity::LEFT,
        Velocity::RIGHT,
    ];
    let mut rng = StdRng::seed_from_u64(1);

    for x in 0..width {
        for y in 0..height {
            for velocity in velocities {
                let mut board = Board::new(width, height, &create_test_config(4));
                board.head = Position::new(x, y);
                board.advance(velocity, &mut rng, &mut Silent);

                assert!((0..width).contains(&board.head.x), "{x},{y} {velocity:?}");
                assert!((0..height).contains(&board.head.y), "{x},{y} {velocity:?}");
            }
        }
    }
}

#[test]
fn test_wrap_to_opposite_edge() {
    let mut board = create_test_board();
    let mut rng = StdRng::seed_from_u64(1);

    board.head = Position::new(0, 3);
    board.advance(Velocity::LEFT, &mut rng, &mut Silent);
    assert_eq!(board.head, Position::new(23, 3));

    board.advance(Velocity::RIGHT, &mut rng, &mut Silent);
    assert_eq!(board.head, Position::new(0, 3));

    board.head = Position::new(3, 0);
    board.advance(Velocity::UP, &mut rng, &mut Silent);
    assert_eq!(board.head, Position::new(3, 23));

    board.advance(Velocity::DOWN, &mut rng, &mut Silent);
    assert_eq!(board.head, Position::new(3, 0));
}

#[test]
fn test_hazard_ends_game() {
    let mut board = create_test_board();
    let mut rng = StdRng::seed_from_u64(1);
    board
        .trail
        .push(PlacedTile::new(Position::new(6, 5), TileKind::Hazard));

    let report = board.advance(Velocity::RIGHT, &mut rng, &mut Silent);

    assert!(board.is_over());
    assert_eq!(board.phase(), Phase::Over);
    assert_eq!(
        report.events,
        vec![GameEvent::HazardHit {
            position: Position::new(6, 5)
        }]
    );
}

#[test]
fn test_game_over_is_terminal() {
    let mut board = create_test_board();
    let mut rng = StdRng::seed_from_u64(1);
    board
        .trail
        .push(PlacedTile::new(Position::new(6, 5), TileKind::Hazard));
    board.advance(Velocity::RIGHT, &mut rng, &mut Silent);
    assert!(board.is_over());

    let snapshot = board.clone();
    for velocity in [Velocity::STILL, Velocity::UP, Velocity::LEFT] {
        let report = board.advance(velocity, &mut rng, &mut Silent);
        assert!(report.is_empty());
        assert_eq!(board, snapshot);
    }

    // even standing on the food does nothing
    board.head = board.food;
    let snapshot = board.clone();
    board.advance(Velocity::RIGHT, &mut rng, &mut Silent);
    assert_eq!(board, snapshot);
}

#[test]
fn test_first_hazard_stops_collision_scan() {
    let mut board = create_test_board();
    let mut rng = StdRng::seed_from_u64(1);
    let mut audio = RecordingAudio::default();
    let cell = Position::new(6, 5);
    board.trail.push(PlacedTile::new(cell, TileKind::Hazard));
    board.trail.push(PlacedTile::new(cell, TileKind::Bonus));

    board.advance(Velocity::RIGHT, &mut rng, &mut audio);

    assert!(board.is_over());
    assert_eq!(board.score, 0);
    assert_eq!(board.trail[1].kind, TileKind::Bonus);
    assert!(audio.played.is_empty());
}

#[test]
fn test_bonus_before_hazard_still_pays() {
    let mut board = create_test_board();
    let mut rng = StdRng::seed_from_u64(1);
    let cell = Position::new(6, 5);
    board.trail.push(PlacedTile::new(cell, TileKind::Bonus));
    board.trail.push(PlacedTile::new(cell, TileKind::Hazard));

    let report = board.advance(Velocity::RIGHT, &mut rng, &mut Silent);

    assert!(board.is_over());
    assert_eq!(board.score, BONUS_SCORE);
    assert_eq!(board.trail[0].kind, TileKind::Plain);
    assert_eq!(
        report.events,
        vec![
            GameEvent::BonusCollected { position: cell },
            GameEvent::HazardHit { position: cell },
        ]
    );
}

#[test]
fn test_bonus_is_single_use() {
    let mut board = create_test_board();
    let mut rng = StdRng::seed_from_u64(1);
    let mut audio = RecordingAudio::default();
    board
        .trail
        .push(PlacedTile::new(Position::new(6, 5), TileKind::Bonus));

    board.advance(Velocity::RIGHT, &mut rng, &mut audio);
    assert_eq!(board.score, BONUS_SCORE);
    assert_eq!(board.trail[0].kind, TileKind::Plain);
    assert_eq!(audio.played, vec![SoundClip::Ding]);

    board.advance(Velocity::LEFT, &mut rng, &mut audio);
    board.advance(Velocity::RIGHT, &mut rng, &mut audio);

    assert_eq!(board.head, Position::new(6, 5));
    assert_eq!(board.score, BONUS_SCORE);
    assert_eq!(audio.played.len(), 1);
    assert!(!board.is_over());
}

#[test]
fn test_plain_tile_is_inert() {
    let mut board = create_test_board();
    let mut rng = StdRng::seed_from_u64(1);
    board
        .trail
        .push(PlacedTile::new(Position::new(6, 5), TileKind::Plain));

    let report = board.advance(Velocity::RIGHT, &mut rng, &mut Silent);

    assert!(report.is_empty());
    assert_eq!(board.score, 0);
    assert!(!board.is_over());
}

#[test]
fn test_audio_failure_does_not_interrupt_tick() {
    let mut board = create_test_board();
    let mut rng = StdRng::seed_from_u64(1);
    board
        .trail
        .push(PlacedTile::new(Position::new(6, 5), TileKind::Bonus));

    board.advance(Velocity::RIGHT, &mut rng, &mut BrokenAudio);

    assert_eq!(board.score, BONUS_SCORE);
    assert_eq!(board.trail[0].kind, TileKind::Plain);
}

#[test]
fn test_score_and_counter_never_decrease() {
    let mut board = Board::new(6, 6, &create_test_config(2));
    let mut rng = StdRng::seed_from_u64(2024);
    let mut walk = StdRng::seed_from_u64(4048);
    let velocities = [Velocity::UP, Velocity::DOWN, Velocity::LEFT, Velocity::RIGHT];

    for _ in 0..5000 {
        if board.is_over() {
            break;
        }
        let (score, counter) = (board.score, board.tile_counter);
        let velocity = velocities[walk.random_range(0..velocities.len())];
        board.advance(velocity, &mut rng, &mut Silent);

        assert!(board.score >= score);
        assert!(board.tile_counter >= counter);
        assert!(board.tile_counter - counter <= 1);
        assert_eq!(board.trail.len() as u32, board.tile_counter);
    }
}

#[test]
fn test_same_seed_same_game() {
    let play = |seed: u64| {
        let mut board = create_test_board();
        let mut rng = StdRng::seed_from_u64(seed);
        for _ in 0..12 {
            pickup(&mut board, &mut rng);
        }
        board
    };

    assert_eq!(play(11), play(11));
}
