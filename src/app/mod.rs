//! Application Layer
//!
//! - [`SwimContext`]: the rigged swimmer and its animation state
//! - [`FrameLoop`]: clock → update → render, once per frame
//! - [`Renderer`]: what the host plugs in to draw the scene
//!
//! # Example
//!
//! ```rust,ignore
//! use finrig::app::{FrameLoop, NullRenderer, SwimContext};
//! use finrig::utils::SystemClock;
//!
//! let context = SwimContext::load(&source, SwimConfig::default())?;
//! let mut frame_loop = FrameLoop::new(context, SystemClock::new(), NullRenderer::default());
//! frame_loop.run(|stats| stats.frames < 600);
//! ```

pub mod context;
pub mod frame_loop;

pub use context::{MESH_NODE, SWIMMER_NODE, SwimContext};
pub use frame_loop::{FrameLoop, FrameStats, NullRenderer};

use crate::errors::Result;
use crate::scene::Scene;

/// Draws the scene once its matrices are up to date.
///
/// Lights, camera and materials are the renderer's business; the scene only
/// carries the swimmer's nodes, skinned mesh and joint matrices.
pub trait Renderer {
    fn render(&mut self, scene: &Scene) -> Result<()>;

    /// Called when the display surface changes size.
    fn resize(&mut self, _width: u32, _height: u32) {}
}
