use crate::foundation::core::{Canvas, Channel, GridPoint, Rgb8, Vec2};
use crate::grid::occupancy::OccupancyGrid;
use crate::grid::pixels::PixelGrid;
use crate::path::history::HistoryQueue;

/// Number of recent points each pathfinder remembers.
pub const HISTORY_CAPACITY: usize = 10;
/// The turning arc is split into this many equal parts; samples sit on every boundary, so
/// `ARC_SUBDIVISIONS + 1` candidates are tested and the middle one lies on the heading.
pub const ARC_SUBDIVISIONS: usize = 4;
/// Extra `step` attempts made by [`Pathfinder::next_point`] while results are fallbacks.
pub const MAX_RETRIES: usize = 5;

const FULL: u8 = 255;

/// Comparator policy applied to candidate color distances.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Key {
    /// Keep the smallest positive distance: walk toward the channel.
    #[default]
    Low,
    /// Keep the largest distance below 255: walk toward mismatches.
    High,
}

impl Key {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Key::Low),
            "high" => Some(Key::High),
            _ => None,
        }
    }

    fn prefers(self, distance: i32, best: Option<i32>) -> bool {
        match self {
            Key::Low => distance > 0 && best.is_none_or(|b| distance < b),
            Key::High => distance < i32::from(FULL) && best.is_none_or(|b| distance > b),
        }
    }
}

/// Motion parameters shared by every pathfinder in a session.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Motion {
    /// Edge margin in pixels, also the seeded velocity magnitude.
    pub speed: f64,
    /// Width of the sampled arc, in radians.
    pub turning_angle: f64,
    pub key: Key,
}

/// Outcome of one successful [`Pathfinder::step`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Step {
    pub point: GridPoint,
    /// `false` when no eligible candidate existed and the fallback point was taken.
    pub pristine: bool,
}

/// Something that yields successive trail points, one per call.
pub trait PointSource {
    fn next_point(&mut self) -> Option<GridPoint>;
}

/// A walker that follows one color channel across a [`PixelGrid`].
#[derive(Clone, Debug, PartialEq)]
pub struct Pathfinder {
    x: i32,
    y: i32,
    velocity: Vec2,
    target: Rgb8,
    channel: Channel,
    motion: Motion,
    history: HistoryQueue,
}

impl Pathfinder {
    pub fn new(x: i32, y: i32, velocity: Vec2, target: Rgb8, motion: Motion) -> Self {
        Self {
            x,
            y,
            velocity,
            target,
            channel: target.seeking_channel(),
            motion,
            history: HistoryQueue::new(HISTORY_CAPACITY),
        }
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    /// The RGB target triple, unchanged.
    pub fn color(&self) -> Rgb8 {
        self.target
    }

    pub fn channel(&self) -> Channel {
        self.channel
    }

    pub fn motion(&self) -> Motion {
        self.motion
    }

    pub fn history(&self) -> &HistoryQueue {
        &self.history
    }

    /// Advance one point along the arc ahead of the current heading.
    ///
    /// Returns `None` without touching any state when neither an eligible candidate nor a
    /// fallback exists.
    pub fn step(&mut self, pixels: &PixelGrid, occupancy: &mut OccupancyGrid) -> Option<Step> {
        let canvas = pixels.canvas();
        let steered = self.steered_velocity(canvas);
        let theta = steered.y.atan2(steered.x);
        let radius = steered.hypot().round();
        let arc = self.motion.turning_angle;

        let mut best: Option<(GridPoint, i32)> = None;
        let mut fallback: Option<GridPoint> = None;

        for k in 0..=ARC_SUBDIVISIONS {
            let angle = theta - arc / 2.0 + arc * (k as f64) / (ARC_SUBDIVISIONS as f64);
            let x = self.x + (radius * angle.cos()).round() as i32;
            let y = self.y + (radius * angle.sin()).round() as i32;
            let sample = canvas
                .contains_open(x, y)
                .then(|| pixels.pixel(x, y))
                .flatten();

            if let Some(px) = sample {
                let value = px[self.channel.index()];
                let distance = i32::from(FULL) - i32::from(value);
                let fresh = !occupancy.is_visited(x, y, self.channel);
                if fresh
                    && px[3] == FULL
                    && self.motion.key.prefers(distance, best.map(|(_, d)| d))
                {
                    best = Some((GridPoint::new(x, y, value), distance));
                }
            }

            if k == ARC_SUBDIVISIONS / 2 {
                fallback = match sample {
                    Some(px) if px[3] == FULL => {
                        Some(GridPoint::new(x, y, px[self.channel.index()]))
                    }
                    _ => self.history.get(-2),
                };
            }
        }

        let pristine = best.is_some();
        let Some(point) = best.map(|(p, _)| p).or(fallback) else {
            tracing::trace!(x = self.x, y = self.y, channel = ?self.channel, "pathfinder stalled");
            return None;
        };

        self.velocity = Vec2::new(f64::from(point.x - self.x), f64::from(point.y - self.y));
        self.x = point.x;
        self.y = point.y;
        occupancy.mark(point.x, point.y, self.channel);
        self.history.push(point);

        Some(Step { point, pristine })
    }

    /// Step, retrying up to [`MAX_RETRIES`] times while only fallback points come back.
    ///
    /// The last point produced wins even when it is still a fallback.
    pub fn next_point(
        &mut self,
        pixels: &PixelGrid,
        occupancy: &mut OccupancyGrid,
    ) -> Option<GridPoint> {
        let mut last = None;
        for _ in 0..=MAX_RETRIES {
            match self.step(pixels, occupancy) {
                Some(Step {
                    point,
                    pristine: true,
                }) => return Some(point),
                Some(Step { point, .. }) => last = Some(point),
                // A failed step mutates nothing, so retrying would fail the same way.
                None => break,
            }
        }
        last
    }

    /// Velocity with any component that would carry the walker within `speed` pixels of an
    /// edge on the next step turned to point inward. `self.velocity` is left as is.
    fn steered_velocity(&self, canvas: Canvas) -> Vec2 {
        let margin = self.motion.speed;
        let width = f64::from(canvas.width);
        let height = f64::from(canvas.height);
        let mut v = self.velocity;
        let projected_x = f64::from(self.x) + v.x;
        let projected_y = f64::from(self.y) + v.y;

        if projected_x <= margin {
            v.x = v.x.abs();
        } else if width - margin <= projected_x {
            v.x = -v.x.abs();
        }
        if projected_y <= margin {
            v.y = v.y.abs();
        } else if height - margin <= projected_y {
            v.y = -v.y.abs();
        }
        v
    }
}

/// Binds a pathfinder to the grids it walks so a renderer can pull points from it.
pub struct PathCursor<'a> {
    pub finder: &'a mut Pathfinder,
    pub pixels: &'a PixelGrid,
    pub occupancy: &'a mut OccupancyGrid,
}

impl PointSource for PathCursor<'_> {
    fn next_point(&mut self) -> Option<GridPoint> {
        self.finder.next_point(self.pixels, self.occupancy)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/path/finder.rs"]
mod tests;
