//! Picture slicing.
//!
//! A picture is cut into `n * n` equal rectangles in row-major order. Piece
//! dimensions use integer division (`width / n`, `height / n`), so the last
//! `width % n` columns and `height % n` rows of pixels are dropped. Pieces
//! keep the source color type and carry the source orientation untouched.

use crate::{GridSize, PuzzleError};
use image::metadata::Orientation;
use image::{DynamicImage, ImageDecoder, ImageReader};
use log::{debug, warn};
use std::io::Cursor;
use std::path::Path;

/// A decoded source image together with its EXIF orientation
#[derive(Debug, Clone)]
pub struct Picture {
    image: DynamicImage,
    orientation: Orientation,
}

impl Picture {
    /// Wrap already decoded pixels with no orientation transform
    pub fn new(image: DynamicImage) -> Self {
        Self::with_orientation(image, Orientation::NoTransforms)
    }

    pub fn with_orientation(image: DynamicImage, orientation: Orientation) -> Self {
        Self { image, orientation }
    }

    /// Decode an encoded image (PNG, JPEG), keeping its orientation metadata
    pub fn decode(bytes: &[u8]) -> Result<Self, PuzzleError> {
        let mut decoder = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()?
            .into_decoder()?;
        let orientation = decoder.orientation()?;
        let image = DynamicImage::from_decoder(decoder)?;
        Ok(Self { image, orientation })
    }

    /// Read and decode an image file
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PuzzleError> {
        let bytes = std::fs::read(path)?;
        Self::decode(&bytes)
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// One rectangular piece of a sliced picture
#[derive(Debug, Clone)]
pub struct Slice {
    index: usize,
    row: usize,
    col: usize,
    image: DynamicImage,
    orientation: Orientation,
}

impl Slice {
    /// Row-major slot index; matches the id of the tile showing this piece
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    /// Orientation inherited from the source picture
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Mean RGB color of the piece, black for an empty piece
    pub fn average_color(&self) -> [u8; 3] {
        let rgb = self.image.to_rgb8();
        let count = rgb.width() as u64 * rgb.height() as u64;
        if count == 0 {
            return [0, 0, 0];
        }
        let mut sums = [0u64; 3];
        for pixel in rgb.pixels() {
            for (sum, channel) in sums.iter_mut().zip(pixel.0) {
                *sum += channel as u64;
            }
        }
        sums.map(|sum| (sum / count) as u8)
    }
}

/// Cut a picture into `grid_size * grid_size` pieces, row by row
pub fn slice(picture: &Picture, grid_size: GridSize) -> Vec<Slice> {
    let Ok(n) = u32::try_from(grid_size.get()) else {
        warn!("grid size {} is too large to slice", grid_size.get());
        return Vec::new();
    };

    let piece_width = picture.width() / n;
    let piece_height = picture.height() / n;
    debug!(
        "slicing {}x{} picture into {} pieces of {}x{}",
        picture.width(),
        picture.height(),
        grid_size,
        piece_width,
        piece_height
    );

    let mut slices = Vec::with_capacity(grid_size.total_tiles());
    for row in 0..n {
        for col in 0..n {
            let image = picture.image.crop_imm(
                col * piece_width,
                row * piece_height,
                piece_width,
                piece_height,
            );
            slices.push(Slice {
                index: slices.len(),
                row: row as usize,
                col: col as usize,
                image,
                orientation: picture.orientation,
            });
        }
    }
    slices
}

/// Decode and slice encoded image bytes.
///
/// Returns an empty vector when the bytes cannot be decoded; callers treat
/// that as "slicing unavailable".
pub fn slice_bytes(bytes: &[u8], grid_size: GridSize) -> Vec<Slice> {
    match Picture::decode(bytes) {
        Ok(picture) => slice(&picture, grid_size),
        Err(err) => {
            warn!("slicing unavailable: {}", err);
            Vec::new()
        }
    }
}
