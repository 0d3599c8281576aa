use std::sync::OnceLock;
use std::time::Duration;

use color_collector::game::audio::LoggedAudio;
use color_collector::game::board::Phase;
use color_collector::game::config::Config;
use color_collector::game::controller::{Direction, GameController, TickClock};
use macroquad::prelude::*;
use tracing_subscriber::EnvFilter;

mod graphics;

const DEFAULT_CONFIG_PATH: &str = "game.properties";

static CONFIG: OnceLock<Config> = OnceLock::new();

// window_conf runs before main, so logging and config are set up here
fn config() -> &'static Config {
    CONFIG.get_or_init(|| {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .init();

        let path = std::env::args()
            .nth(1)
            .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
        Config::load_or_default(path)
    })
}

fn window_conf() -> Conf {
    let config = config();
    Conf {
        window_title: "Color Collector".to_owned(),
        window_width: i32::try_from(config.board_width).unwrap_or(i32::MAX),
        window_height: i32::try_from(config.board_height).unwrap_or(i32::MAX),
        window_resizable: false,
        ..Default::default()
    }
}

fn read_direction() -> Option<Direction> {
    if is_key_pressed(KeyCode::Up) {
        Some(Direction::Up)
    } else if is_key_pressed(KeyCode::Down) {
        Some(Direction::Down)
    } else if is_key_pressed(KeyCode::Left) {
        Some(Direction::Left)
    } else if is_key_pressed(KeyCode::Right) {
        Some(Direction::Right)
    } else {
        None
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let config = config();
    let mut controller = GameController::from_config(config, LoggedAudio);
    let mut clock = TickClock::new(controller.tick_interval());

    tracing::info!(
        speed_ms = config.game_speed_ms,
        frequency = config.special_tile_frequency.get(),
        "starting color collector"
    );

    loop {
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        if let Some(direction) = read_direction() {
            controller.set_direction(direction);
        }

        let elapsed = Duration::from_secs_f32(get_frame_time());
        if clock.accumulate(elapsed) && controller.tick() == Phase::Over {
            clock.stop();
        }

        clear_background(BLACK);
        graphics::draw_board(controller.board(), config.tile_size as f32);

        next_frame().await
    }
}
