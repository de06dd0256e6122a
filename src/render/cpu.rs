use std::sync::Arc;

use vello_cpu::kurbo::{self as cpu_kurbo, Shape as _};
use vello_cpu::peniko::{self, BlendMode, Compose, Mix};

use crate::foundation::core::{BezPath, Canvas, Point, Rgba8};
use crate::foundation::error::{ChromataError, ChromataResult};
use crate::render::surface::{CompositeOp, DrawingSurface, LineCap, Paint, Pen};

const CIRCLE_TOLERANCE: f64 = 0.1;

/// `vello_cpu` raster surface.
///
/// Draw calls made since the last [`DrawingSurface::present`] are recorded into a render
/// context that starts from the committed pixmap; `present` rasterizes them and commits the
/// result. Pixel accessors read the committed pixmap.
pub struct CpuSurface {
    canvas: Canvas,
    width: u16,
    height: u16,
    pixmap: Arc<vello_cpu::Pixmap>,
    pending: Option<vello_cpu::RenderContext>,
    composite: CompositeOp,
}

impl CpuSurface {
    pub fn new(canvas: Canvas) -> ChromataResult<Self> {
        let width: u16 = canvas
            .width
            .try_into()
            .map_err(|_| ChromataError::validation("surface width exceeds u16"))?;
        let height: u16 = canvas
            .height
            .try_into()
            .map_err(|_| ChromataError::validation("surface height exceeds u16"))?;
        Ok(Self {
            canvas,
            width,
            height,
            pixmap: Arc::new(vello_cpu::Pixmap::new(width, height)),
            pending: None,
            composite: CompositeOp::default(),
        })
    }

    pub fn composite(&self) -> CompositeOp {
        self.composite
    }

    /// Committed premultiplied RGBA8, row-major.
    pub fn data_premul(&self) -> &[u8] {
        self.pixmap.data_as_u8_slice()
    }

    /// Committed premultiplied pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.canvas.width || y >= self.canvas.height {
            return None;
        }
        let i = ((y as usize) * (self.canvas.width as usize) + (x as usize)) * 4;
        let px = self.data_premul().get(i..i + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    /// Straight-alpha copy of the committed pixmap, for PNG encoding.
    pub fn to_rgba_image(&self) -> image::RgbaImage {
        let data = self.data_premul();
        let mut out = Vec::with_capacity(data.len());
        for px in data.chunks_exact(4) {
            out.extend_from_slice(&unpremultiply(px));
        }
        image::RgbaImage::from_raw(self.canvas.width, self.canvas.height, out)
            .unwrap_or_else(|| image::RgbaImage::new(self.canvas.width, self.canvas.height))
    }

    /// Render context for the current frame, seeded with the committed pixmap.
    fn context(&mut self) -> &mut vello_cpu::RenderContext {
        let (width, height) = (self.width, self.height);
        let committed = &self.pixmap;
        let ctx = self.pending.get_or_insert_with(|| {
            let mut ctx = vello_cpu::RenderContext::new(width, height);
            ctx.set_blend_mode(BlendMode::default());
            ctx.set_paint_transform(cpu_kurbo::Affine::IDENTITY);
            ctx.set_paint(vello_cpu::Image {
                image: vello_cpu::ImageSource::Pixmap(Arc::clone(committed)),
                sampler: peniko::ImageSampler::default(),
            });
            ctx.fill_rect(&cpu_kurbo::Rect::new(
                0.0,
                0.0,
                f64::from(width),
                f64::from(height),
            ));
            ctx
        });
        ctx.set_blend_mode(blend_mode(self.composite));
        ctx.set_paint_transform(cpu_kurbo::Affine::IDENTITY);
        ctx
    }
}

impl DrawingSurface for CpuSurface {
    fn size(&self) -> Canvas {
        self.canvas
    }

    fn set_composite(&mut self, op: CompositeOp) {
        self.composite = op;
    }

    fn clear(&mut self) {
        self.pending = None;
        self.pixmap = Arc::new(vello_cpu::Pixmap::new(self.width, self.height));
    }

    fn stroke_path(&mut self, path: &BezPath, pen: Pen, paint: &Paint) {
        if pen.width <= 0.0 {
            return;
        }
        let stroke = cpu_kurbo::Stroke::new(pen.width)
            .with_caps(cap_to_cpu(pen.cap))
            .with_join(cpu_kurbo::Join::Round);
        let cpu_path = bezpath_to_cpu(path);
        let ctx = self.context();
        set_paint(ctx, paint);
        ctx.set_stroke(stroke);
        ctx.stroke_path(&cpu_path);
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: Rgba8) {
        if radius <= 0.0 {
            return;
        }
        let circle = cpu_kurbo::Circle::new(point_to_cpu(center), radius);
        let ctx = self.context();
        ctx.set_paint(color_to_cpu(color));
        ctx.fill_path(&circle.to_path(CIRCLE_TOLERANCE));
    }

    fn present(&mut self) {
        let Some(mut ctx) = self.pending.take() else {
            return;
        };
        let mut next = vello_cpu::Pixmap::new(self.width, self.height);
        ctx.flush();
        ctx.render_to_pixmap(&mut next);
        self.pixmap = Arc::new(next);
    }
}

fn set_paint(ctx: &mut vello_cpu::RenderContext, paint: &Paint) {
    match paint {
        Paint::Solid(c) => ctx.set_paint(color_to_cpu(*c)),
        Paint::Linear(g) if g.start.distance(g.end) <= f64::EPSILON => {
            ctx.set_paint(color_to_cpu(g.end_color))
        }
        Paint::Linear(g) => ctx.set_paint(
            peniko::Gradient::new_linear(point_to_cpu(g.start), point_to_cpu(g.end)).with_stops([
                (0.0, color_to_cpu(g.start_color)),
                (1.0, color_to_cpu(g.end_color)),
            ]),
        ),
    }
}

fn blend_mode(op: CompositeOp) -> BlendMode {
    match op {
        CompositeOp::SourceOver => BlendMode::default(),
        CompositeOp::Lighter => BlendMode::new(Mix::Normal, Compose::Plus),
        CompositeOp::Lighten => BlendMode::new(Mix::Lighten, Compose::SrcOver),
        CompositeOp::Darken => BlendMode::new(Mix::Darken, Compose::SrcOver),
        CompositeOp::Multiply => BlendMode::new(Mix::Multiply, Compose::SrcOver),
        CompositeOp::Screen => BlendMode::new(Mix::Screen, Compose::SrcOver),
        CompositeOp::Difference => BlendMode::new(Mix::Difference, Compose::SrcOver),
    }
}

fn cap_to_cpu(cap: LineCap) -> cpu_kurbo::Cap {
    match cap {
        LineCap::Butt => cpu_kurbo::Cap::Butt,
        LineCap::Round => cpu_kurbo::Cap::Round,
        LineCap::Square => cpu_kurbo::Cap::Square,
    }
}

fn color_to_cpu(c: Rgba8) -> peniko::Color {
    peniko::Color::from_rgba8(c.r, c.g, c.b, c.a)
}

fn point_to_cpu(p: Point) -> cpu_kurbo::Point {
    cpu_kurbo::Point::new(p.x, p.y)
}

fn bezpath_to_cpu(path: &BezPath) -> cpu_kurbo::BezPath {
    use kurbo::PathEl;

    let mut out = cpu_kurbo::BezPath::new();
    for &el in path.elements() {
        match el {
            PathEl::MoveTo(p) => out.move_to(point_to_cpu(p)),
            PathEl::LineTo(p) => out.line_to(point_to_cpu(p)),
            PathEl::QuadTo(p1, p2) => out.quad_to(point_to_cpu(p1), point_to_cpu(p2)),
            PathEl::CurveTo(p1, p2, p3) => {
                out.curve_to(point_to_cpu(p1), point_to_cpu(p2), point_to_cpu(p3));
            }
            PathEl::ClosePath => out.close_path(),
        }
    }
    out
}

fn unpremultiply(px: &[u8]) -> [u8; 4] {
    let a = px[3];
    if a == 0 {
        return [0, 0, 0, 0];
    }
    let un = |c: u8| -> u8 {
        ((u16::from(c) * 255 + u16::from(a) / 2) / u16::from(a)).min(255) as u8
    };
    [un(px[0]), un(px[1]), un(px[2]), a]
}

#[cfg(test)]
#[path = "../../tests/unit/render/cpu.rs"]
mod tests;
