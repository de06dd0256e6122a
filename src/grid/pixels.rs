use crate::foundation::core::Canvas;
use crate::foundation::error::{ChromataError, ChromataResult};

/// Smallest grid edge that still leaves an interior cell for pathfinders to stand on.
pub const MIN_GRID_EDGE: u32 = 3;

/// Immutable straight-alpha RGBA8 raster read by pathfinders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelGrid {
    canvas: Canvas,
    rgba8: Vec<u8>,
}

impl PixelGrid {
    /// Wrap a row-major RGBA8 buffer.
    pub fn new(width: u32, height: u32, rgba8: Vec<u8>) -> ChromataResult<Self> {
        if width < MIN_GRID_EDGE || height < MIN_GRID_EDGE {
            return Err(ChromataError::validation(format!(
                "pixel grid must be at least {MIN_GRID_EDGE}x{MIN_GRID_EDGE}, got {width}x{height}"
            )));
        }
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| ChromataError::validation("pixel grid size overflow"))?;
        if rgba8.len() != expected {
            return Err(ChromataError::validation(format!(
                "pixel grid expects {expected} bytes for {width}x{height}, got {}",
                rgba8.len()
            )));
        }
        Ok(Self {
            canvas: Canvas::new(width, height),
            rgba8,
        })
    }

    /// A grid where every pixel has the same value.
    pub fn filled(width: u32, height: u32, rgba: [u8; 4]) -> ChromataResult<Self> {
        let n = (width as usize).saturating_mul(height as usize);
        let mut data = Vec::with_capacity(n.saturating_mul(4));
        for _ in 0..n {
            data.extend_from_slice(&rgba);
        }
        Self::new(width, height, data)
    }

    pub fn from_rgba_image(img: image::RgbaImage) -> ChromataResult<Self> {
        let (width, height) = img.dimensions();
        Self::new(width, height, img.into_raw())
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn width(&self) -> u32 {
        self.canvas.width
    }

    pub fn height(&self) -> u32 {
        self.canvas.height
    }

    /// Pixel at `(x, y)`, or `None` outside `[0, width) x [0, height)`.
    pub fn pixel(&self, x: i32, y: i32) -> Option<[u8; 4]> {
        let idx = self.index(x, y)?;
        let px = self.rgba8.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        if x >= self.canvas.width || y >= self.canvas.height {
            return None;
        }
        Some(((y as usize) * (self.canvas.width as usize) + (x as usize)) * 4)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grid/pixels.rs"]
mod tests;
