use crate::foundation::core::{BezPath, Canvas, Point, Rgba8};

/// How the ends of an open stroke are finished.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineCap {
    #[default]
    Butt,
    Round,
    Square,
}

/// Stroke geometry.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Pen {
    pub width: f64,
    pub cap: LineCap,
}

/// Two-stop linear gradient between `start` (offset 0) and `end` (offset 1).
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LinearGradient {
    pub start: Point,
    pub end: Point,
    pub start_color: Rgba8,
    pub end_color: Rgba8,
}

impl LinearGradient {
    /// Color at `p`, projecting onto the gradient axis and clamping outside it.
    pub fn color_at(&self, p: Point) -> Rgba8 {
        let axis = self.end - self.start;
        let len2 = axis.hypot2();
        if len2 <= f64::EPSILON {
            return self.end_color;
        }
        let t = (p - self.start).dot(axis) / len2;
        self.start_color.lerp(self.end_color, t)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Paint {
    Solid(Rgba8),
    Linear(LinearGradient),
}

impl Paint {
    pub fn color_at(&self, p: Point) -> Rgba8 {
        match self {
            Paint::Solid(c) => *c,
            Paint::Linear(g) => g.color_at(p),
        }
    }
}

/// How new paint is combined with what is already on the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompositeOp {
    #[default]
    SourceOver,
    /// Additive.
    Lighter,
    Lighten,
    Darken,
    Multiply,
    Screen,
    Difference,
}

impl CompositeOp {
    /// Parse a canvas-style operation name.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "source-over" => Some(CompositeOp::SourceOver),
            "lighter" => Some(CompositeOp::Lighter),
            "lighten" => Some(CompositeOp::Lighten),
            "darken" => Some(CompositeOp::Darken),
            "multiply" => Some(CompositeOp::Multiply),
            "screen" => Some(CompositeOp::Screen),
            "difference" => Some(CompositeOp::Difference),
            _ => None,
        }
    }
}

/// The drawing capability a session renders into.
///
/// Paths are built with [`BezPath`] (`move_to`, `line_to`, `quad_to`) and handed over whole.
pub trait DrawingSurface {
    fn size(&self) -> Canvas;

    /// Blend mode applied to every subsequent draw call.
    fn set_composite(&mut self, op: CompositeOp);

    /// Reset every pixel to transparent.
    fn clear(&mut self);

    fn stroke_path(&mut self, path: &BezPath, pen: Pen, paint: &Paint);

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8);

    /// End of a frame. Surfaces that batch draw calls commit them here.
    fn present(&mut self) {}
}

impl<S: DrawingSurface + ?Sized> DrawingSurface for &mut S {
    fn size(&self) -> Canvas {
        (**self).size()
    }

    fn set_composite(&mut self, op: CompositeOp) {
        (**self).set_composite(op)
    }

    fn clear(&mut self) {
        (**self).clear()
    }

    fn stroke_path(&mut self, path: &BezPath, pen: Pen, paint: &Paint) {
        (**self).stroke_path(path, pen, paint)
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8) {
        (**self).fill_circle(center, radius, color)
    }

    fn present(&mut self) {
        (**self).present()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
