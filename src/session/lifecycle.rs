use crate::foundation::error::{ChromataError, ChromataResult};
use crate::grid::occupancy::OccupancyGrid;
use crate::grid::pixels::PixelGrid;
use crate::path::finder::{PathCursor, Pathfinder};
use crate::render::stroke::StrokeRenderer;
use crate::render::surface::DrawingSurface;
use crate::session::config::Config;
use crate::session::scheduler::{FrameScheduler, FrameToken};
use crate::session::seed::seed_agents;

/// A pathfinder together with the renderer that draws its trail.
#[derive(Clone, Debug, PartialEq)]
pub struct Agent {
    pub finder: Pathfinder,
    pub renderer: StrokeRenderer,
}

/// Owns one run: the grids, the agents, the drawing surface and the frame loop.
///
/// The session is driven entirely by its host. The host delivers the pixel grid through
/// [`Session::image_ready`], calls the lifecycle methods, and forwards due frames to
/// [`Session::on_frame`]. Nothing here blocks or spawns.
pub struct Session<S, F> {
    config: Config,
    surface: S,
    scheduler: F,

    pixels: Option<PixelGrid>,
    occupancy: Option<OccupancyGrid>,
    agents: Vec<Agent>,

    running: bool,
    start_pending: bool,
    iteration_count: u64,
    iteration_limit: u64,
    scheduled: Option<FrameToken>,
}

impl<S: DrawingSurface, F: FrameScheduler> Session<S, F> {
    /// Create an idle session. The surface's composite operation is set here, once.
    pub fn new(config: Config, mut surface: S, scheduler: F) -> Self {
        surface.set_composite(config.composite_operation);
        Self {
            iteration_limit: config.iteration_limit,
            config,
            surface,
            scheduler,
            pixels: None,
            occupancy: None,
            agents: Vec::new(),
            running: false,
            start_pending: false,
            iteration_count: 0,
            scheduled: None,
        }
    }

    /// Deliver the pixel grid. Runs a `start` that was requested while waiting.
    ///
    /// Readiness is signalled exactly once; use [`Session::reload`] to swap images.
    pub fn image_ready(&mut self, pixels: PixelGrid) -> ChromataResult<()> {
        if self.pixels.is_some() {
            return Err(ChromataError::lifecycle(
                "pixel grid already delivered; use reload to replace it",
            ));
        }
        tracing::debug!(
            width = pixels.width(),
            height = pixels.height(),
            "pixel grid ready"
        );
        self.occupancy = Some(OccupancyGrid::new(pixels.canvas()));
        self.pixels = Some(pixels);

        if std::mem::take(&mut self.start_pending) {
            self.start();
        }
        Ok(())
    }

    /// Reset, then replace the pixel grid.
    pub fn reload(&mut self, pixels: PixelGrid) {
        self.reset();
        self.occupancy = Some(OccupancyGrid::new(pixels.canvas()));
        self.pixels = Some(pixels);
        tracing::debug!("pixel grid reloaded");
    }

    /// Begin or resume drawing.
    ///
    /// Before the pixel grid arrives this only records the request. Otherwise agents are
    /// seeded if needed and a tick runs right away, unless a frame is already pending, in
    /// which case that frame continues the loop.
    #[tracing::instrument(level = "debug", skip(self))]
    pub fn start(&mut self) {
        if !self.is_ready() {
            tracing::debug!("start deferred until the pixel grid is ready");
            self.start_pending = true;
            return;
        }
        self.ensure_seeded();
        self.running = true;
        tracing::debug!(agents = self.agents.len(), "started");
        if self.scheduled.is_none() {
            self.tick();
        }
    }

    /// Stop after the pending frame, if any. Returns the iteration count.
    pub fn stop(&mut self) -> u64 {
        self.running = false;
        self.start_pending = false;
        tracing::debug!(iteration = self.iteration_count, "stopped");
        self.iteration_count
    }

    /// Stop if running, otherwise start. Only stopping yields the iteration count.
    pub fn toggle(&mut self) -> Option<u64> {
        if self.running {
            Some(self.stop())
        } else {
            self.start();
            None
        }
    }

    /// Clear the surface and occupancy, discard agents and the iteration count.
    ///
    /// The pixel grid is kept and the configured iteration limit applies again.
    pub fn reset(&mut self) {
        self.running = false;
        self.start_pending = false;
        if let Some(token) = self.scheduled.take() {
            self.scheduler.cancel_frame(token);
        }
        self.surface.clear();
        if let Some(occupancy) = self.occupancy.as_mut() {
            occupancy.clear();
        }
        self.agents.clear();
        self.iteration_count = 0;
        self.iteration_limit = self.config.iteration_limit;
        tracing::debug!("reset");
    }

    /// Host callback for a due frame. Tokens other than the pending one are ignored.
    pub fn on_frame(&mut self, token: FrameToken) -> bool {
        if self.scheduled != Some(token) {
            tracing::trace!(?token, "ignoring stale frame");
            return false;
        }
        self.scheduled = None;
        self.tick();
        true
    }

    /// Advance every agent one step in creation order, then re-arm while running.
    ///
    /// Reaching a nonzero iteration limit stops the session and clears the limit, so a later
    /// `start` runs unbounded.
    pub fn tick(&mut self) {
        self.ensure_seeded();
        let (Some(pixels), Some(occupancy)) = (self.pixels.as_ref(), self.occupancy.as_mut())
        else {
            return;
        };

        for agent in &mut self.agents {
            let mut cursor = PathCursor {
                finder: &mut agent.finder,
                pixels,
                occupancy: &mut *occupancy,
            };
            agent.renderer.draw_step(&mut cursor, &mut self.surface);
        }
        self.surface.present();
        self.iteration_count += 1;

        // Checked after the count advances rather than before drawing, so the session is
        // already stopped once the limit-th tick returns and no extra frame is armed.
        if self.iteration_limit > 0 && self.iteration_count >= self.iteration_limit {
            tracing::debug!(
                limit = self.iteration_limit,
                "iteration limit reached, stopping"
            );
            self.running = false;
            self.iteration_limit = 0;
        }

        if self.running && self.scheduled.is_none() {
            self.scheduled = Some(self.scheduler.request_frame());
        }
    }

    fn ensure_seeded(&mut self) {
        if !self.agents.is_empty() {
            return;
        }
        let Some(pixels) = self.pixels.as_ref() else {
            return;
        };
        let motion = self.config.motion();
        let style = self.config.stroke_style();
        self.agents = seed_agents(&self.config, pixels.canvas())
            .into_iter()
            .map(|s| Agent {
                finder: Pathfinder::new(s.x, s.y, s.velocity, s.target, motion),
                renderer: StrokeRenderer::new(s.target, style),
            })
            .collect();
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn is_ready(&self) -> bool {
        self.pixels.is_some()
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// True while a `start` waits for the pixel grid.
    pub fn is_start_pending(&self) -> bool {
        self.start_pending
    }

    pub fn iteration_count(&self) -> u64 {
        self.iteration_count
    }

    /// Remaining auto-stop limit; `0` once consumed or when unbounded.
    pub fn iteration_limit(&self) -> u64 {
        self.iteration_limit
    }

    pub fn scheduled_frame(&self) -> Option<FrameToken> {
        self.scheduled
    }

    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    pub fn pixels(&self) -> Option<&PixelGrid> {
        self.pixels.as_ref()
    }

    pub fn occupancy(&self) -> Option<&OccupancyGrid> {
        self.occupancy.as_ref()
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }

    pub fn into_parts(self) -> (S, F) {
        (self.surface, self.scheduler)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/lifecycle.rs"]
mod tests;
