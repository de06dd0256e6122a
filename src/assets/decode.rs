use image::imageops::FilterType;

use crate::foundation::core::Canvas;
use crate::foundation::error::{ChromataError, ChromataResult};
use crate::grid::pixels::PixelGrid;
use crate::session::config::OutputSize;

/// A decoded source image, sized for drawing.
#[derive(Clone, Debug)]
pub struct DecodedImage {
    pub pixels: PixelGrid,
    /// Factor applied to the source dimensions (`1.0` for original size).
    pub scale: f64,
}

/// Decode `bytes` to straight RGBA8 and size the result per `output`.
pub fn decode_image(bytes: &[u8], output: OutputSize) -> ChromataResult<DecodedImage> {
    let rgba = image::load_from_memory(bytes)
        .map_err(|e| ChromataError::decode(format!("decode image from memory: {e}")))?
        .to_rgba8();

    let (rgba, scale) = match output {
        OutputSize::Original => (rgba, 1.0),
        OutputSize::Container(container) => {
            let source = Canvas::new(rgba.width(), rgba.height());
            let (fitted, scale) = fit_dimensions(source, container)?;
            let resized = if fitted == source {
                rgba
            } else {
                image::imageops::resize(&rgba, fitted.width, fitted.height, FilterType::Triangle)
            };
            (resized, scale)
        }
    };

    Ok(DecodedImage {
        pixels: PixelGrid::from_rgba_image(rgba)?,
        scale,
    })
}

/// Largest size with the source aspect ratio that fits inside `container`.
pub fn fit_dimensions(source: Canvas, container: Canvas) -> ChromataResult<(Canvas, f64)> {
    if source.area() == 0 || container.area() == 0 {
        return Err(ChromataError::validation(format!(
            "cannot fit {}x{} into {}x{}",
            source.width, source.height, container.width, container.height
        )));
    }
    let ratio_w = f64::from(container.width) / f64::from(source.width);
    let ratio_h = f64::from(container.height) / f64::from(source.height);
    let scale = ratio_w.min(ratio_h);
    let dim = |v: u32| ((f64::from(v) * scale).round() as u32).max(1);
    Ok((Canvas::new(dim(source.width), dim(source.height)), scale))
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
