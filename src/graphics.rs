use color_collector::game::board::{Board, Position, TileKind};
use macroquad::prelude::*;

const GRID_COLOR: Color = Color::new(0.25, 0.25, 0.25, 1.0);

trait ToScreen {
    fn to_screen(&self, tile_size: f32) -> Vec2;
}

impl ToScreen for Position {
    fn to_screen(&self, tile_size: f32) -> Vec2 {
        vec2(self.x as f32 * tile_size, self.y as f32 * tile_size)
    }
}

fn kind_color(kind: TileKind) -> Color {
    match kind {
        TileKind::Plain => YELLOW,
        TileKind::Hazard => RED,
        TileKind::Bonus => GREEN,
    }
}

fn fill_tile(position: Position, tile_size: f32, color: Color) {
    let corner = position.to_screen(tile_size);
    draw_rectangle(corner.x, corner.y, tile_size, tile_size, color);
}

fn draw_grid(board: &Board, tile_size: f32) {
    let width = board.width() as f32 * tile_size;
    let height = board.height() as f32 * tile_size;

    for i in 0..=board.width() {
        let x = i as f32 * tile_size;
        draw_line(x, 0.0, x, height, 1.0, GRID_COLOR);
    }
    for i in 0..=board.height() {
        let y = i as f32 * tile_size;
        draw_line(0.0, y, width, y, 1.0, GRID_COLOR);
    }
}

pub fn draw_board(board: &Board, tile_size: f32) {
    draw_grid(board, tile_size);

    for tile in &board.trail {
        fill_tile(tile.position, tile_size, kind_color(tile.kind));
    }

    fill_tile(board.head, tile_size, WHITE);
    fill_tile(board.food, tile_size, BLUE);

    draw_text(&format!("Score: {}", board.score), 10.0, 20.0, 24.0, WHITE);

    if board.is_over() {
        let text = "Game Over";
        let font_size = 48.0;
        let size = measure_text(text, None, font_size as u16, 1.0);
        draw_text(
            text,
            screen_width() / 2. - size.width / 2.,
            screen_height() / 2. - size.height / 2.,
            font_size,
            WHITE,
        );
    }
}
