//! Headless swim demo.
//!
//! Rigs a procedural ellipsoid body, then runs the frame loop for a few
//! seconds against a renderer that logs the swimmer's placement.
//!
//! ```text
//! RUST_LOG=debug cargo run --example swim
//! FINRIG_CONFIG=my_swim.json FINRIG_MESH=body.json cargo run --example swim
//! ```

use finrig::app::{FrameLoop, Renderer, SWIMMER_NODE, SwimContext};
use finrig::assets::{InMemoryMesh, JsonMeshFile, MeshSource};
use finrig::config::SwimConfig;
use finrig::resources::primitives::{EllipsoidOptions, create_ellipsoid};
use finrig::scene::Scene;
use finrig::tuning::ParameterPanel;
use finrig::utils::SystemClock;

const RUN_SECONDS: f64 = 5.0;

/// Prints the swimmer's world position twice per second.
struct LogRenderer {
    frames: u64,
}

impl Renderer for LogRenderer {
    fn render(&mut self, scene: &Scene) -> finrig::Result<()> {
        self.frames += 1;
        if self.frames % 30 == 0
            && let Some(node) = scene.find_node_by_name(SWIMMER_NODE).and_then(|h| scene.get_node(h))
        {
            log::info!("frame {:>5}: swimmer at {}", self.frames, node.transform.world_position());
        }
        Ok(())
    }

    fn resize(&mut self, width: u32, height: u32) {
        log::info!("Resized to {width}x{height}");
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = match std::env::var("FINRIG_CONFIG") {
        Ok(path) => SwimConfig::from_json_str(&std::fs::read_to_string(path)?)?,
        Err(_) => SwimConfig::default(),
    };

    let source: Box<dyn MeshSource> = match std::env::var("FINRIG_MESH") {
        Ok(path) => Box::new(JsonMeshFile::new(path)),
        Err(_) => Box::new(InMemoryMesh::new(
            "ellipsoid",
            create_ellipsoid(&EllipsoidOptions::default()),
        )),
    };

    let context = SwimContext::load(source.as_ref(), config)?;
    for parameter in ParameterPanel::parameters(context.skeleton()) {
        log::debug!(
            "{:>14} {:<10} = {:+.3} [{:.3}, {:.3}]",
            parameter.bone,
            parameter.channel.label(),
            parameter.value,
            parameter.min,
            parameter.max
        );
    }

    let mut frame_loop = FrameLoop::new(context, SystemClock::new(), LogRenderer { frames: 0 });
    frame_loop.resize(1280, 720);

    let start = std::time::Instant::now();
    frame_loop.run(|_| {
        std::thread::sleep(std::time::Duration::from_millis(16));
        start.elapsed().as_secs_f64() < RUN_SECONDS
    });

    let stats = frame_loop.stats();
    log::info!(
        "{} frames, {} skipped, {} render failures, {:.1} fps",
        stats.frames,
        stats.skipped,
        stats.render_failures,
        frame_loop.current_fps()
    );
    Ok(())
}
