//! Basic example of using the picture puzzle engine

use picpuzzle_core::{slice, Difficulty, GameConfig, Picture, PuzzleEngine};
use image::{DynamicImage, Rgb, RgbImage};

fn main() {
    for level in Difficulty::all_levels() {
        println!("{:<6} {}", level.to_string(), level.grid_size());
    }
    let config = GameConfig::easy();

    // Shuffle a new puzzle
    let mut engine = PuzzleEngine::with_seed(config.grid_size, 7);
    println!("Shuffled {} puzzle (* = locked):", config.grid_size);
    println!("{}", engine);

    // Slice a generated picture; piece k is shown by tile k
    let picture = Picture::new(DynamicImage::ImageRgb8(RgbImage::from_fn(90, 90, |x, y| {
        Rgb([(x * 2) as u8, (y * 2) as u8, 128])
    })));
    let pieces = slice(&picture, config.grid_size);
    println!("Sliced {}x{} picture into {} pieces", picture.width(), picture.height(), pieces.len());
    for piece in &pieces {
        let [r, g, b] = piece.average_color();
        println!(
            "  piece {} at row {}, col {}: #{:02x}{:02x}{:02x}",
            piece.index(),
            piece.row(),
            piece.col(),
            r,
            g,
            b
        );
    }

    // Solve by bringing each tile home in slot order
    let mut moves = 0;
    for slot in 0..engine.total_tiles() {
        let Some(from) = engine.tiles().iter().position(|tile| tile.id() == slot) else {
            continue;
        };
        if engine.swap(slot, from) {
            moves += 1;
        }
    }

    println!("\nSolved in {} moves:", moves);
    println!("{}", engine);
    println!("Completed: {}", engine.is_completed());
}
