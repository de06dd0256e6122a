use crate::foundation::core::Canvas;
use crate::foundation::error::{ChromataError, ChromataResult};
use crate::path::finder::{Key, Motion};
use crate::render::stroke::{ColorMode, LineMode, StrokeStyle};
use crate::render::surface::CompositeOp;

pub const DEFAULT_PATHFINDER_COUNT: u32 = 30;
pub const PATHFINDER_COUNT_RANGE: (u32, u32) = (1, 10_000);
pub const DEFAULT_SPEED: f64 = 7.0;
pub const SPEED_RANGE: (f64, f64) = (1.0, 100.0);
pub const DEFAULT_TURNING_ANGLE: f64 = std::f64::consts::PI;
pub const TURNING_ANGLE_RANGE: (f64, f64) = (0.1, 10.0);
pub const DEFAULT_LINE_WIDTH: f64 = 2.0;
pub const LINE_WIDTH_RANGE: (f64, f64) = (1.0, 100.0);

/// User-facing options as they arrive from JSON or flags.
///
/// Every field is optional so "omitted" stays distinct from "given as zero".
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Options {
    pub path_finder_count: Option<f64>,
    pub origin: Option<OriginSpec>,
    pub speed: Option<f64>,
    pub turning_angle: Option<f64>,
    pub color_mode: Option<String>,
    pub line_width: Option<f64>,
    pub line_mode: Option<String>,
    pub composite_operation: Option<String>,
    pub output_size: Option<String>,
    pub container: Option<Canvas>,
    pub iteration_limit: Option<u64>,
    pub key: Option<String>,
}

impl Options {
    pub fn from_json(json: &str) -> ChromataResult<Self> {
        serde_json::from_str(json).map_err(|e| ChromataError::serde(format!("options: {e}")))
    }

    /// Fields set in `other` replace the ones in `self`.
    pub fn overlay(mut self, other: Options) -> Self {
        macro_rules! take {
            ($($field:ident),* $(,)?) => {
                $(if other.$field.is_some() {
                    self.$field = other.$field;
                })*
            };
        }
        take!(
            path_finder_count,
            origin,
            speed,
            turning_angle,
            color_mode,
            line_width,
            line_mode,
            composite_operation,
            output_size,
            container,
            iteration_limit,
            key,
        );
        self
    }
}

/// `origin` accepts either a list of tokens or one space-separated string.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(untagged)]
pub enum OriginSpec {
    Many(Vec<String>),
    One(String),
}

impl OriginSpec {
    /// Recognized tokens, in order. Anything unrecognized is dropped.
    pub fn tokens(&self) -> Vec<OriginToken> {
        match self {
            OriginSpec::Many(list) => list.iter().filter_map(|s| OriginToken::parse(s)).collect(),
            OriginSpec::One(s) => tokenize(s),
        }
    }
}

/// Where a group of pathfinders starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum OriginToken {
    Top,
    Bottom,
    Left,
    Right,
    /// `"P% Q%"`: a point at P percent of the width and Q percent of the height.
    Point { x_pct: u32, y_pct: u32 },
}

impl OriginToken {
    pub fn parse(s: &str) -> Option<Self> {
        let words: Vec<&str> = s.split_whitespace().collect();
        match words.as_slice() {
            [word] => edge(word),
            [x, y] => Some(OriginToken::Point {
                x_pct: percent(x)?,
                y_pct: percent(y)?,
            }),
            _ => None,
        }
    }
}

fn edge(word: &str) -> Option<OriginToken> {
    match word.to_ascii_lowercase().as_str() {
        "top" => Some(OriginToken::Top),
        "bottom" => Some(OriginToken::Bottom),
        "left" => Some(OriginToken::Left),
        "right" => Some(OriginToken::Right),
        _ => None,
    }
}

fn percent(word: &str) -> Option<u32> {
    let digits = word.strip_suffix('%')?;
    if digits.is_empty() || digits.len() > 3 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u32>().ok().filter(|v| *v <= 100)
}

fn tokenize(s: &str) -> Vec<OriginToken> {
    let words: Vec<&str> = s.split_whitespace().collect();
    let mut out = Vec::new();
    let mut i = 0;
    while i < words.len() {
        if let (Some(x), Some(y)) = (percent(words[i]), words.get(i + 1).and_then(|w| percent(w)))
        {
            out.push(OriginToken::Point { x_pct: x, y_pct: y });
            i += 2;
            continue;
        }
        if let Some(t) = edge(words[i]) {
            out.push(t);
        }
        i += 1;
    }
    out
}

/// How big the drawing (and the pixel grid it samples) is.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputSize {
    /// The decoded image size.
    #[default]
    Original,
    /// Scaled to fit inside a container box, keeping the aspect ratio.
    Container(Canvas),
}

/// Validated, clamped session configuration.
#[derive(Clone, Debug, PartialEq)]
pub struct Config {
    pub path_finder_count: u32,
    pub origin: Vec<OriginToken>,
    pub speed: f64,
    pub turning_angle: f64,
    pub color_mode: ColorMode,
    pub line_width: f64,
    pub line_mode: LineMode,
    pub composite_operation: CompositeOp,
    pub output_size: OutputSize,
    /// `0` runs unbounded.
    pub iteration_limit: u64,
    pub key: Key,
}

impl Default for Config {
    fn default() -> Self {
        Self::from_options(&Options::default())
    }
}

impl Config {
    /// Fill omitted fields with defaults and clamp numeric ones into range. Non-finite numbers
    /// count as omitted; unrecognized names fall back to the default variant.
    pub fn from_options(o: &Options) -> Self {
        let count = finite(o.path_finder_count)
            .map(|v| {
                v.round().clamp(
                    f64::from(PATHFINDER_COUNT_RANGE.0),
                    f64::from(PATHFINDER_COUNT_RANGE.1),
                ) as u32
            })
            .unwrap_or(DEFAULT_PATHFINDER_COUNT);

        let mut origin = o.origin.as_ref().map(OriginSpec::tokens).unwrap_or_default();
        if origin.is_empty() {
            if o.origin.is_some() {
                tracing::debug!("no recognized origin tokens, seeding from bottom");
            }
            origin.push(OriginToken::Bottom);
        }

        let output_size = match (o.output_size.as_deref(), o.container) {
            (Some(s), Some(c)) if s.eq_ignore_ascii_case("container") => OutputSize::Container(c),
            _ => OutputSize::Original,
        };

        Self {
            path_finder_count: count,
            origin,
            speed: clamp_or(o.speed, DEFAULT_SPEED, SPEED_RANGE),
            turning_angle: clamp_or(o.turning_angle, DEFAULT_TURNING_ANGLE, TURNING_ANGLE_RANGE),
            color_mode: o
                .color_mode
                .as_deref()
                .and_then(ColorMode::parse)
                .unwrap_or_default(),
            line_width: clamp_or(o.line_width, DEFAULT_LINE_WIDTH, LINE_WIDTH_RANGE),
            line_mode: o
                .line_mode
                .as_deref()
                .and_then(LineMode::parse)
                .unwrap_or_default(),
            composite_operation: o
                .composite_operation
                .as_deref()
                .map(|s| CompositeOp::parse(s).unwrap_or_default())
                .unwrap_or(CompositeOp::Lighten),
            output_size,
            iteration_limit: o.iteration_limit.unwrap_or(0),
            key: o.key.as_deref().and_then(Key::parse).unwrap_or_default(),
        }
    }

    pub fn from_json(json: &str) -> ChromataResult<Self> {
        Ok(Self::from_options(&Options::from_json(json)?))
    }

    /// Widen strokes for an image drawn more than about twice its source size.
    pub fn apply_output_scale(&mut self, scale: f64) {
        if scale.is_finite() && scale.round() > 1.0 {
            self.line_width *= scale;
        }
    }

    pub fn motion(&self) -> Motion {
        Motion {
            speed: self.speed,
            turning_angle: self.turning_angle,
            key: self.key,
        }
    }

    pub fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle {
            line_mode: self.line_mode,
            color_mode: self.color_mode,
            line_width: self.line_width,
            speed: self.speed,
        }
    }
}

fn finite(v: Option<f64>) -> Option<f64> {
    v.filter(|v| v.is_finite())
}

fn clamp_or(v: Option<f64>, default: f64, (lo, hi): (f64, f64)) -> f64 {
    finite(v).map(|v| v.clamp(lo, hi)).unwrap_or(default)
}

#[cfg(test)]
#[path = "../../tests/unit/session/config.rs"]
mod tests;
