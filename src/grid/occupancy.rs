use crate::foundation::core::{Canvas, Channel};

/// Per-channel visited flags shared by every pathfinder of a session.
///
/// Flags only ever go from `false` to `true`; the whole grid is cleared at once by
/// [`OccupancyGrid::clear`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OccupancyGrid {
    canvas: Canvas,
    cells: Vec<[bool; 3]>,
}

impl OccupancyGrid {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas,
            cells: vec![[false; 3]; canvas.area()],
        }
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    /// Whether `channel` has already been claimed at `(x, y)`. Cells outside the grid read as
    /// unvisited.
    pub fn is_visited(&self, x: i32, y: i32, channel: Channel) -> bool {
        self.index(x, y)
            .is_some_and(|idx| self.cells[idx][channel.index()])
    }

    /// Claim `(x, y)` for `channel`. Returns `true` when the flag was newly set.
    pub fn mark(&mut self, x: i32, y: i32, channel: Channel) -> bool {
        let Some(idx) = self.index(x, y) else {
            return false;
        };
        let flag = &mut self.cells[idx][channel.index()];
        let fresh = !*flag;
        *flag = true;
        fresh
    }

    pub fn visited_count(&self, channel: Channel) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell[channel.index()])
            .count()
    }

    pub fn clear(&mut self) {
        self.cells.fill([false; 3]);
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = u32::try_from(x).ok()?;
        let y = u32::try_from(y).ok()?;
        if x >= self.canvas.width || y >= self.canvas.height {
            return None;
        }
        Some((y as usize) * (self.canvas.width as usize) + (x as usize))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/grid/occupancy.rs"]
mod tests;
