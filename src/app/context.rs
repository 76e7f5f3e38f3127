use crate::animation::pose::{Pose, PoseDriver, SwimState};
use crate::assets::MeshSource;
use crate::config::SwimConfig;
use crate::errors::{Result, RigError};
use crate::resources::geometry::Geometry;
use crate::resources::mesh::SkinnedMesh;
use crate::rig::builder::SkeletonBuilder;
use crate::rig::skinning::SkinBinder;
use crate::scene::node::Node;
use crate::scene::scene::Scene;
use crate::scene::skeleton::Skeleton;
use crate::scene::transform::Transform;
use crate::scene::{NodeHandle, SkeletonKey};

/// Name of the node that follows the swim path.
pub const SWIMMER_NODE: &str = "Swimmer";
/// Name of the skinned mesh and of the node carrying it.
pub const MESH_NODE: &str = "Swimmer Mesh";

/// Everything one animated swimmer needs, owned in one place.
///
/// Built once at load time: the skeleton is assembled, the mesh is skinned
/// and normalized, and the scene is wired as
///
/// ```text
/// Swimmer            <- path placement, rewritten every frame
/// └── Swimmer Mesh   <- normalization, skin binding
///     └── (skeleton) <- bone matrices propagated from the mesh node
/// ```
///
/// After that, [`SwimContext::update`] is the whole per-frame interface.
pub struct SwimContext {
    scene: Scene,
    skeleton: SkeletonKey,
    swimmer: NodeHandle,
    mesh_node: NodeHandle,

    driver: PoseDriver,
    state: SwimState,
    config: SwimConfig,
}

impl SwimContext {
    /// Loads the base mesh from `source` and rigs it.
    ///
    /// A load failure is terminal: it is logged and returned, and no context
    /// is created.
    pub fn load<S: MeshSource + ?Sized>(source: &S, config: SwimConfig) -> Result<Self> {
        let geometry = source.load().inspect_err(|e| {
            log::error!("Failed to load swimmer mesh from {}: {e}", source.describe());
        })?;
        log::info!("Loaded {} vertices from {}", geometry.vertex_count(), source.describe());
        Self::new(geometry, config)
    }

    /// Rigs already-loaded geometry. `config` is validated first.
    pub fn new(geometry: Geometry, config: SwimConfig) -> Result<Self> {
        config.validate()?;
        let skeleton = SkeletonBuilder::from_specs(&config.skeleton_name, config.skeleton.clone()).build()?;
        let driver = PoseDriver::new(
            config.path.build(),
            config.resolved_drivers(),
            &skeleton,
            config.swim_speed,
        );

        let mut scene = Scene::new();
        let swimmer = scene.add_node(Node::new(SWIMMER_NODE));
        let skeleton_key = scene.add_skeleton(skeleton);

        let binder = SkinBinder::new(config.banding, config.target_size);
        let mesh = binder.bind(MESH_NODE, geometry, skeleton_key, &scene.skeletons[skeleton_key])?;
        let mesh_node = scene.add_skinned_mesh(mesh, swimmer);

        let mut context = Self {
            scene,
            skeleton: skeleton_key,
            swimmer,
            mesh_node,
            driver,
            state: SwimState::new(),
            config,
        };

        // Frame zero: place the swimmer at the start of its path.
        let pose = context.driver.evaluate(0.0, 0.0);
        let (skeleton, root) = context.rig_mut();
        PoseDriver::apply(&pose, skeleton, root);
        context.scene.update_matrix_world();

        Ok(context)
    }

    /// Advances the animation to `elapsed` seconds, `delta` seconds after the
    /// previous frame, and propagates every world and joint matrix.
    ///
    /// Non-finite times are rejected without touching any state. Negative
    /// deltas count as zero and long stalls are clamped to
    /// `max_frame_delta`.
    pub fn update(&mut self, elapsed: f64, delta: f64) -> Result<Pose> {
        if !elapsed.is_finite() || !delta.is_finite() {
            return Err(RigError::NonFiniteTime { elapsed, delta });
        }
        let delta = delta.max(0.0).min(self.config.max_frame_delta);

        let Self {
            scene,
            skeleton,
            swimmer,
            driver,
            state,
            ..
        } = self;
        let pose = driver.step(
            state,
            elapsed,
            delta,
            &mut scene.skeletons[*skeleton],
            &mut scene.nodes[*swimmer].transform,
        );

        self.scene.update_matrix_world();
        Ok(pose)
    }

    /// Rewinds to the start of the path and restores the bind pose,
    /// dropping every tuning override.
    pub fn reset(&mut self) -> Result<Pose> {
        self.state = SwimState::new();
        self.skeleton_mut().reset_pose();
        self.update(0.0, 0.0)
    }

    fn rig_mut(&mut self) -> (&mut Skeleton, &mut Transform) {
        (
            &mut self.scene.skeletons[self.skeleton],
            &mut self.scene.nodes[self.swimmer].transform,
        )
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[inline]
    #[must_use]
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    #[must_use]
    pub fn skeleton(&self) -> &Skeleton {
        &self.scene.skeletons[self.skeleton]
    }

    /// Mutable skeleton access for live tuning.
    pub fn skeleton_mut(&mut self) -> &mut Skeleton {
        &mut self.scene.skeletons[self.skeleton]
    }

    #[inline]
    #[must_use]
    pub fn skeleton_key(&self) -> SkeletonKey {
        self.skeleton
    }

    #[inline]
    #[must_use]
    pub fn swimmer(&self) -> NodeHandle {
        self.swimmer
    }

    #[inline]
    #[must_use]
    pub fn mesh_node(&self) -> NodeHandle {
        self.mesh_node
    }

    #[must_use]
    pub fn mesh(&self) -> Option<&SkinnedMesh> {
        let key = self.scene.get_node(self.mesh_node)?.mesh?;
        self.scene.mesh(key)
    }

    #[inline]
    #[must_use]
    pub fn driver(&self) -> &PoseDriver {
        &self.driver
    }

    #[inline]
    #[must_use]
    pub fn state(&self) -> &SwimState {
        &self.state
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &SwimConfig {
        &self.config
    }
}
