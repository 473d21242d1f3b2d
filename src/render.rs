//! Output adapters for a finished [Bitmap].
//!
//! None of these add a quiet zone unless asked to. Scanners need at least one
//! module of free space around the symbol.
use crate::placement::Bitmap;

/// Axis aligned rectangle in output units, origin in the top left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bitmap {
    /// Draw the symbol as text, row by row.
    ///
    /// Each dark module is written as `set`, each light one as `unset`.
    /// Every row ends with a newline.
    pub fn text(&self, set: &str, unset: &str) -> String {
        let glyph_len = set.len().max(unset.len());
        let mut out = String::with_capacity(self.height() * (self.width() * glyph_len + 1));
        for y in 0..self.height() {
            for x in 0..self.width() {
                out.push_str(if self.is_set(x, y) { set } else { unset });
            }
            out.push('\n');
        }
        out
    }

    /// Text drawing with two characters per module so it looks square.
    pub fn ascii(&self) -> String {
        self.text("XX", "  ")
    }

    /// One `cell_size` x `cell_size` rectangle per module.
    ///
    /// Normally a rectangle is returned for every dark module. With `inverse`
    /// the light modules are returned instead, for example to draw on a dark
    /// background.
    pub fn rectangles(&self, cell_size: f64, inverse: bool) -> Vec<Rect> {
        let mut rects = Vec::new();
        for y in 0..self.height() {
            for x in 0..self.width() {
                if self.is_set(x, y) != inverse {
                    rects.push(Rect {
                        x: x as f64 * cell_size,
                        y: y as f64 * cell_size,
                        width: cell_size,
                        height: cell_size,
                    });
                }
            }
        }
        rects
    }

    /// Rasterize into a grayscale image.
    ///
    /// Each module becomes `cell_size` x `cell_size` pixels, the symbol is
    /// surrounded by `quiet_zone` light modules. Dark modules are black
    /// unless `inverse` swaps the colors.
    #[cfg(feature = "image")]
    pub fn to_image(&self, cell_size: u32, quiet_zone: u32, inverse: bool) -> image::GrayImage {
        use image::{GrayImage, Luma};

        let (dark, light) = if inverse { (255, 0) } else { (0, 255) };
        let width = (self.width() as u32 + 2 * quiet_zone) * cell_size;
        let height = (self.height() as u32 + 2 * quiet_zone) * cell_size;
        let mut img = GrayImage::from_pixel(width, height, Luma([light]));
        for (x, y) in self.pixels() {
            let left = (x as u32 + quiet_zone) * cell_size;
            let top = (y as u32 + quiet_zone) * cell_size;
            for i in 0..cell_size {
                for j in 0..cell_size {
                    img.put_pixel(left + j, top + i, Luma([dark]));
                }
            }
        }
        img
    }
}
