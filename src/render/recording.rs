use crate::foundation::core::{BezPath, Canvas, Point, Rgba8};
use crate::render::surface::{CompositeOp, DrawingSurface, Paint, Pen};

/// One call made against a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SurfaceOp {
    SetComposite {
        composite: CompositeOp,
    },
    Clear,
    Stroke {
        #[serde(serialize_with = "path_as_svg")]
        path: BezPath,
        pen: Pen,
        paint: Paint,
    },
    FillCircle {
        center: Point,
        radius: f64,
        color: Rgba8,
    },
}

fn path_as_svg<S: serde::Serializer>(path: &BezPath, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&path.to_svg())
}

/// A surface that draws nothing and remembers every call, in order.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    canvas: Option<Canvas>,
    ops: Vec<SurfaceOp>,
}

impl RecordingSurface {
    pub fn new(canvas: Canvas) -> Self {
        Self {
            canvas: Some(canvas),
            ops: Vec::new(),
        }
    }

    pub fn ops(&self) -> &[SurfaceOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<SurfaceOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn stroke_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::Stroke { .. }))
            .count()
    }

    pub fn circle_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, SurfaceOp::FillCircle { .. }))
            .count()
    }

    pub fn to_json(&self) -> crate::ChromataResult<String> {
        serde_json::to_string_pretty(&self.ops)
            .map_err(|e| crate::ChromataError::serde(e.to_string()))
    }
}

impl DrawingSurface for RecordingSurface {
    fn size(&self) -> Canvas {
        self.canvas.unwrap_or(Canvas::new(0, 0))
    }

    fn set_composite(&mut self, op: CompositeOp) {
        self.ops.push(SurfaceOp::SetComposite { composite: op });
    }

    fn clear(&mut self) {
        self.ops.push(SurfaceOp::Clear);
    }

    fn stroke_path(&mut self, path: &BezPath, pen: Pen, paint: &Paint) {
        self.ops.push(SurfaceOp::Stroke {
            path: path.clone(),
            pen,
            paint: *paint,
        });
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8) {
        self.ops.push(SurfaceOp::FillCircle {
            center,
            radius,
            color,
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/recording.rs"]
mod tests;
