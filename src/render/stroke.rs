use crate::foundation::core::{BezPath, GridPoint, Rgb8, Rgba8};
use crate::path::finder::PointSource;
use crate::render::surface::{DrawingSurface, LineCap, LinearGradient, Paint, Pen};

/// How consecutive trail points are turned into marks.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineMode {
    /// Quadratic curves through midpoints, gradient-stroked.
    #[default]
    Smooth,
    /// Straight gradient-stroked segments.
    Square,
    /// Filled discs spaced along the trail.
    Point,
}

impl LineMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "smooth" => Some(LineMode::Smooth),
            "square" => Some(LineMode::Square),
            "point" => Some(LineMode::Point),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Keep each stroke in its pathfinder's hue.
    #[default]
    Color,
    Greyscale,
}

impl ColorMode {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "color" | "colour" => Some(ColorMode::Color),
            "greyscale" | "grayscale" => Some(ColorMode::Greyscale),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokeStyle {
    pub line_mode: LineMode,
    pub color_mode: ColorMode,
    pub line_width: f64,
    /// Pathfinder speed; the distance gates of every mode scale with it.
    pub speed: f64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TrailState {
    Smooth {
        current: GridPoint,
        control: GridPoint,
    },
    Square {
        reference: GridPoint,
    },
    Point {
        reference: GridPoint,
    },
}

/// Draws one pathfinder's trail a point at a time.
#[derive(Clone, Debug, PartialEq)]
pub struct StrokeRenderer {
    color: Rgb8,
    style: StrokeStyle,
    state: Option<TrailState>,
}

impl StrokeRenderer {
    pub fn new(color: Rgb8, style: StrokeStyle) -> Self {
        Self {
            color,
            style,
            state: None,
        }
    }

    pub fn style(&self) -> StrokeStyle {
        self.style
    }

    /// Pull one point from `source` and draw the mark it completes.
    ///
    /// When the source has no point the renderer keeps its state for the next call. Returns
    /// whether anything was drawn.
    pub fn draw_step(
        &mut self,
        source: &mut impl PointSource,
        surface: &mut impl DrawingSurface,
    ) -> bool {
        let Some(next) = source.next_point() else {
            return false;
        };
        match self.style.line_mode {
            LineMode::Smooth => self.draw_smooth(next, surface),
            LineMode::Square => self.draw_square(next, surface),
            LineMode::Point => self.draw_point(next, surface),
        }
    }

    fn draw_smooth(&mut self, next: GridPoint, surface: &mut impl DrawingSurface) -> bool {
        let (current, control) = match self.state {
            Some(TrailState::Smooth { current, control }) => (current, control),
            _ => (next, next),
        };
        let mid = GridPoint::new(
            midpoint(control.x, next.x),
            midpoint(control.y, next.y),
            ((u16::from(current.brightness) + u16::from(next.brightness)) / 2) as u8,
        );

        let drawn = current.rounded_distance(next) <= self.style.speed * 3.0;
        if drawn {
            let mut path = BezPath::new();
            path.move_to(current.to_point());
            path.quad_to(control.to_point(), mid.to_point());
            surface.stroke_path(&path, self.pen(), &self.gradient(current, next));
        }

        self.state = Some(TrailState::Smooth {
            current: mid,
            control: next,
        });
        drawn
    }

    fn draw_square(&mut self, next: GridPoint, surface: &mut impl DrawingSurface) -> bool {
        let reference = match self.state {
            Some(TrailState::Square { reference }) => reference,
            _ => next,
        };

        let drawn = reference.rounded_distance(next) <= self.style.speed + 1.0;
        if drawn {
            let mut path = BezPath::new();
            path.move_to(reference.to_point());
            path.line_to(next.to_point());
            surface.stroke_path(&path, self.pen(), &self.gradient(reference, next));
        }

        self.state = Some(TrailState::Square { reference: next });
        drawn
    }

    fn draw_point(&mut self, next: GridPoint, surface: &mut impl DrawingSurface) -> bool {
        let Some(TrailState::Point { reference }) = self.state else {
            self.state = Some(TrailState::Point { reference: next });
            return false;
        };

        if reference.rounded_distance(next) < self.style.speed * 2.0 {
            return false;
        }
        surface.fill_circle(
            next.to_point(),
            self.style.line_width,
            self.stroke_color(next.brightness),
        );
        self.state = Some(TrailState::Point { reference: next });
        true
    }

    fn pen(&self) -> Pen {
        Pen {
            width: self.style.line_width,
            cap: LineCap::Round,
        }
    }

    fn gradient(&self, from: GridPoint, to: GridPoint) -> Paint {
        Paint::Linear(LinearGradient {
            start: from.to_point(),
            end: to.to_point(),
            start_color: self.stroke_color(from.brightness),
            end_color: self.stroke_color(to.brightness),
        })
    }

    /// Color for a brightness value. In color mode, channels that are zero in the target
    /// triple stay zero.
    pub fn stroke_color(&self, brightness: u8) -> Rgba8 {
        match self.style.color_mode {
            ColorMode::Color => {
                let keep = |c: u8| if c != 0 { brightness } else { 0 };
                Rgba8::opaque(keep(self.color.r), keep(self.color.g), keep(self.color.b))
            }
            ColorMode::Greyscale => Rgba8::opaque(brightness, brightness, brightness),
        }
    }
}

fn midpoint(a: i32, b: i32) -> i32 {
    ((f64::from(a) + f64::from(b)) / 2.0).round() as i32
}

#[cfg(test)]
#[path = "../../tests/unit/render/stroke.rs"]
mod tests;
