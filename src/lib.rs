//! Chromata: generative drawing by color-seeking pathfinders.
//!
//! A [`Session`] seeds agents along the edges (or at points) of a source image. Every frame
//! each agent steps toward pixels rich in its target channel, avoiding cells that channel
//! has already claimed, and its [`StrokeRenderer`] turns the resulting trail into curves,
//! segments or dots on a [`DrawingSurface`].
//!
//! Hosts supply the pixel grid ([`decode_image`] or [`PixelGrid::new`]), a drawing surface
//! ([`CpuSurface`], [`RecordingSurface`] or their own) and a [`FrameScheduler`].
#![forbid(unsafe_code)]

pub mod assets;
pub mod foundation;
pub mod grid;
pub mod path;
pub mod render;
pub mod session;

pub use crate::assets::decode::{DecodedImage, decode_image, fit_dimensions};
pub use crate::foundation::core::{BezPath, Canvas, Channel, GridPoint, Point, Rgb8, Rgba8, Vec2};
pub use crate::foundation::error::{ChromataError, ChromataResult};
pub use crate::grid::occupancy::OccupancyGrid;
pub use crate::grid::pixels::PixelGrid;
pub use crate::path::finder::{Key, Motion, PathCursor, Pathfinder, PointSource, Step};
pub use crate::path::history::HistoryQueue;
pub use crate::render::cpu::CpuSurface;
pub use crate::render::recording::{RecordingSurface, SurfaceOp};
pub use crate::render::stroke::{ColorMode, LineMode, StrokeRenderer, StrokeStyle};
pub use crate::render::surface::{CompositeOp, DrawingSurface, LineCap, LinearGradient, Paint, Pen};
pub use crate::session::config::{Config, OriginSpec, OriginToken, Options, OutputSize};
pub use crate::session::scheduler::{FrameScheduler, FrameToken, ManualScheduler};
pub use crate::session::seed::{AgentSeed, seed_agents};
pub use crate::session::{Agent, Session};
