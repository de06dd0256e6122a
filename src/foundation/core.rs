pub use kurbo::{BezPath, Point, Vec2};

/// Pixel dimensions of a grid or drawing surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    pub width: u32,
    pub height: u32,
}

impl Canvas {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when `(x, y)` lies strictly inside the grid: `0 < x < width && 0 < y < height`.
    ///
    /// Row 0 and column 0 are never visited by a pathfinder.
    pub fn contains_open(self, x: i32, y: i32) -> bool {
        0 < x
            && i64::from(x) < i64::from(self.width)
            && 0 < y
            && i64::from(y) < i64::from(self.height)
    }

    pub fn area(self) -> usize {
        (self.width as usize) * (self.height as usize)
    }
}

/// One of the three color channels a pathfinder can seek.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    /// Component index inside an RGBA pixel (0, 1 or 2).
    pub fn index(self) -> usize {
        match self {
            Channel::Red => 0,
            Channel::Green => 1,
            Channel::Blue => 2,
        }
    }
}

/// Straight (non-premultiplied) RGB triple.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgb8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb8 {
    pub const RED: Rgb8 = Rgb8::new(255, 0, 0);
    pub const GREEN: Rgb8 = Rgb8::new(0, 255, 0);
    pub const BLUE: Rgb8 = Rgb8::new(0, 0, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Reduce the triple to the channel a pathfinder seeks: the first of red/green that is
    /// nonzero, blue otherwise.
    pub fn seeking_channel(self) -> Channel {
        if self.r != 0 {
            Channel::Red
        } else if self.g != 0 {
            Channel::Green
        } else {
            Channel::Blue
        }
    }
}

/// Straight-alpha RGBA8 color used for paints.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Rgba8 {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba8 {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    pub fn lerp(self, other: Rgba8, t: f64) -> Rgba8 {
        let t = t.clamp(0.0, 1.0);
        let mix = |a: u8, b: u8| -> u8 {
            (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8
        };
        Rgba8 {
            r: mix(self.r, other.r),
            g: mix(self.g, other.g),
            b: mix(self.b, other.b),
            a: mix(self.a, other.a),
        }
    }
}

/// A visited grid cell together with the brightness of the sought channel there.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct GridPoint {
    pub x: i32,
    pub y: i32,
    pub brightness: u8,
}

impl GridPoint {
    pub const fn new(x: i32, y: i32, brightness: u8) -> Self {
        Self { x, y, brightness }
    }

    pub fn to_point(self) -> Point {
        Point::new(f64::from(self.x), f64::from(self.y))
    }

    pub fn same_cell(self, other: GridPoint) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// Euclidean distance rounded to the nearest whole pixel.
    pub fn rounded_distance(self, other: GridPoint) -> f64 {
        self.to_point().distance(other.to_point()).round()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
