use crate::animation::pose::Pose;
use crate::app::Renderer;
use crate::app::context::SwimContext;
use crate::errors::{Result, RigError};
use crate::scene::Scene;
use crate::utils::fps_counter::FpsCounter;
use crate::utils::time::Clock;

/// Frame counters kept by [`FrameLoop`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Frames attempted.
    pub frames: u64,
    /// Frames rejected before rendering.
    pub skipped: u64,
    /// Frames whose render call failed.
    pub render_failures: u64,
}

/// Drives a [`SwimContext`] from a clock and hands each frame to a renderer.
///
/// A faulted frame is logged and skipped; the loop itself never stops on an
/// error.
pub struct FrameLoop<C: Clock, R: Renderer> {
    context: SwimContext,
    clock: C,
    renderer: R,
    fps: FpsCounter,
    stats: FrameStats,
}

impl<C: Clock, R: Renderer> FrameLoop<C, R> {
    pub fn new(context: SwimContext, clock: C, renderer: R) -> Self {
        Self {
            context,
            clock,
            renderer,
            fps: FpsCounter::new(),
            stats: FrameStats::default(),
        }
    }

    /// Runs one frame: clock, animation update, matrix propagation, render.
    pub fn frame(&mut self) -> Result<Pose> {
        let time = self.clock.tick();
        self.stats.frames += 1;

        if let Some(fps) = self.fps.update(time.delta) {
            log::debug!("FPS: {fps:.1}");
        }

        let pose = match self.context.update(time.elapsed, time.delta) {
            Ok(pose) => pose,
            Err(e) => {
                self.stats.skipped += 1;
                log::warn!("Skipping frame {}: {e}", self.stats.frames);
                return Err(e);
            }
        };

        if let Err(e) = self.renderer.render(self.context.scene()) {
            self.stats.render_failures += 1;
            log::error!("Render failed on frame {}: {e}", self.stats.frames);
            return Err(e);
        }

        Ok(pose)
    }

    /// Calls [`frame`](Self::frame) until `keep_running` returns `false`.
    ///
    /// `keep_running` is asked before every frame.
    pub fn run<F>(&mut self, mut keep_running: F)
    where
        F: FnMut(&FrameStats) -> bool,
    {
        while keep_running(&self.stats) {
            // Already logged and counted.
            let _ = self.frame();
        }
        log::info!(
            "Frame loop stopped after {} frames ({} skipped, {} render failures)",
            self.stats.frames,
            self.stats.skipped,
            self.stats.render_failures
        );
    }

    /// Forwards a display resize to the renderer.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            log::debug!("Ignoring resize to {width}x{height}");
            return;
        }
        self.renderer.resize(width, height);
    }

    #[inline]
    #[must_use]
    pub fn context(&self) -> &SwimContext {
        &self.context
    }

    #[inline]
    pub fn context_mut(&mut self) -> &mut SwimContext {
        &mut self.context
    }

    #[inline]
    #[must_use]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    #[inline]
    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    #[inline]
    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    #[inline]
    #[must_use]
    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    #[must_use]
    pub fn current_fps(&self) -> f32 {
        self.fps.current_fps
    }

    pub fn into_context(self) -> SwimContext {
        self.context
    }
}

/// Renderer that only records what it was handed. Useful for headless runs.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames: u64,
    pub size: Option<(u32, u32)>,
}

impl Renderer for NullRenderer {
    fn render(&mut self, scene: &Scene) -> Result<()> {
        if scene.nodes.is_empty() {
            return Err(RigError::Render("empty scene".to_string()));
        }
        self.frames += 1;
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        self.size = Some((width, height));
    }
}
