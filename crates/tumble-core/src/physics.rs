//! Rigid body physics for the ground slab and the falling box

use glam::Vec2;
use rapier2d::prelude::*;
use std::num::NonZeroUsize;

use crate::config::{BodyConfig, BodyKind, SceneConfig};

/// The two bodies in the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BodyId {
    Ground,
    Box,
}

impl BodyId {
    /// Draw order: ground first so the box renders on top
    pub const ALL: [BodyId; 2] = [BodyId::Ground, BodyId::Box];
}

/// Position and orientation of a body, read after a step
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Pose {
    /// Center of the body in meters
    pub position: Vec2,
    /// Rotation in radians, counter-clockwise positive
    pub angle: f32,
}

/// Handles of one body and its cuboid collider
#[derive(Debug, Clone, Copy)]
struct BodyHandles {
    body: RigidBodyHandle,
    collider: ColliderHandle,
}

/// Manages the rapier2d physics world
pub struct PhysicsWorld {
    /// Gravity applied every step
    gravity: Vector<Real>,

    /// Rapier rigid body set
    rigid_body_set: RigidBodySet,

    /// Rapier collider set
    collider_set: ColliderSet,

    /// Physics pipeline
    pipeline: PhysicsPipeline,

    /// Integration parameters
    integration_parameters: IntegrationParameters,

    /// Island manager
    island_manager: IslandManager,

    /// Broad phase
    broad_phase: BroadPhase,

    /// Narrow phase
    narrow_phase: NarrowPhase,

    /// Impulse joint set
    impulse_joint_set: ImpulseJointSet,

    /// Multibody joint set
    multibody_joint_set: MultibodyJointSet,

    /// CCD solver
    ccd_solver: CCDSolver,

    /// Query pipeline
    query_pipeline: QueryPipeline,

    ground: BodyHandles,
    falling_box: BodyHandles,
}

impl PhysicsWorld {
    pub fn new(config: &SceneConfig) -> Self {
        // Velocity iterations drive the main solver loop, position iterations
        // the inner stabilization passes.
        let integration_parameters = IntegrationParameters {
            dt: config.time_step,
            num_solver_iterations: NonZeroUsize::new(config.velocity_iterations)
                .unwrap_or(NonZeroUsize::MIN),
            num_internal_pgs_iterations: config.position_iterations.max(1),
            ..Default::default()
        };

        let mut rigid_body_set = RigidBodySet::new();
        let mut collider_set = ColliderSet::new();

        let ground = Self::insert_body(&mut rigid_body_set, &mut collider_set, &config.ground);
        let falling_box =
            Self::insert_body(&mut rigid_body_set, &mut collider_set, &config.falling_box);

        log::info!(
            "Physics: world created, gravity=({:.2}, {:.2}), dt={:.4}s",
            config.gravity.x,
            config.gravity.y,
            config.time_step
        );

        Self {
            gravity: vector![config.gravity.x, config.gravity.y],
            rigid_body_set,
            collider_set,
            pipeline: PhysicsPipeline::new(),
            integration_parameters,
            island_manager: IslandManager::new(),
            broad_phase: BroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
            ground,
            falling_box,
        }
    }

    /// Create a rigid body with a single cuboid collider
    fn insert_body(
        rigid_body_set: &mut RigidBodySet,
        collider_set: &mut ColliderSet,
        def: &BodyConfig,
    ) -> BodyHandles {
        let builder = match def.kind {
            BodyKind::Static => RigidBodyBuilder::fixed(),
            BodyKind::Dynamic => RigidBodyBuilder::dynamic(),
        };
        let rigid_body = builder
            .translation(vector![def.position.x, def.position.y])
            .rotation(def.angle)
            .build();
        let body = rigid_body_set.insert(rigid_body);

        // Friction mixes multiplicatively and restitution takes the larger
        // value, so a frictionless box stays frictionless on any ground.
        let collider = ColliderBuilder::cuboid(def.half_extents.x, def.half_extents.y)
            .density(def.material.density)
            .friction(def.material.friction)
            .friction_combine_rule(CoefficientCombineRule::Multiply)
            .restitution(def.material.restitution)
            .restitution_combine_rule(CoefficientCombineRule::Max)
            .build();
        let collider = collider_set.insert_with_parent(collider, body, rigid_body_set);

        log::debug!(
            "Physics: created {:?} body at ({:.2}, {:.2}), half extents {:.2}x{:.2}",
            def.kind,
            def.position.x,
            def.position.y,
            def.half_extents.x,
            def.half_extents.y
        );

        BodyHandles { body, collider }
    }

    fn handles(&self, id: BodyId) -> BodyHandles {
        match id {
            BodyId::Ground => self.ground,
            BodyId::Box => self.falling_box,
        }
    }

    /// Advance the simulation by one fixed time step
    pub fn step(&mut self) {
        let physics_hooks = ();
        let event_handler = ();

        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &physics_hooks,
            &event_handler,
        );
    }

    /// Current position and rotation of a body
    pub fn pose(&self, id: BodyId) -> Pose {
        let body = &self.rigid_body_set[self.handles(id).body];
        let translation = body.translation();
        Pose {
            position: Vec2::new(translation.x, translation.y),
            angle: body.rotation().angle(),
        }
    }

    /// Current linear velocity of a body in m/s
    pub fn linear_velocity(&self, id: BodyId) -> Vec2 {
        let linvel = self.rigid_body_set[self.handles(id).body].linvel();
        Vec2::new(linvel.x, linvel.y)
    }

    /// Whether the box is touching the ground
    pub fn has_contact(&self) -> bool {
        self.narrow_phase
            .contact_pair(self.ground.collider, self.falling_box.collider)
            .is_some_and(|pair| pair.has_any_active_contact)
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new(&SceneConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_poses() {
        let world = PhysicsWorld::default();
        let ground = world.pose(BodyId::Ground);
        let falling_box = world.pose(BodyId::Box);

        assert_eq!(ground.position, Vec2::new(0.0, -10.0));
        assert!((ground.angle + 0.01 * std::f32::consts::PI).abs() < 1e-6);
        assert_eq!(falling_box.position, Vec2::new(0.0, 10.0));
        assert_eq!(falling_box.angle, 0.0);
        assert!(!world.has_contact());
    }

    #[test]
    fn test_step_applies_gravity() {
        let mut world = PhysicsWorld::default();
        world.step();

        let velocity = world.linear_velocity(BodyId::Box);
        assert!(velocity.y < 0.0);
        assert!(velocity.x.abs() < 1e-6);
        assert!(world.pose(BodyId::Box).position.y < 10.0);
    }

    #[test]
    fn test_step_uses_fixed_dt() {
        let mut world = PhysicsWorld::default();
        world.step();

        // One step of free fall: v = g * dt
        let expected = -9.81 / 60.0;
        assert!((world.linear_velocity(BodyId::Box).y - expected).abs() < 1e-4);
    }
}
