//! Rapier-backed simulation world for wandering props.
//!
//! Static scenery is built once from [`WorldStaticDef`]s; props are dynamic bodies that switch
//! to kinematic while they are dragged or focused. Each prop is reached through a
//! [`RapierBody`] view, which implements [`PhysicsBody`] for the interaction core.
//!
//! Design goals
//! - Deterministic: statics are inserted sorted by `id`.
//! - Forgiving: a stale or removed handle turns every body call into a no-op.

// Re-export Rapier so the client can build descriptors without depending on `rapier3d` directly.
pub use rapier3d;

use log::warn;
use nalgebra::{Point3, UnitQuaternion, Vector3};
use rapier3d::na::Translation3;
use rapier3d::prelude::*;

use crate::{body::PhysicsBody, camera::Pose, constants::GRAVITY_MPS2};

/// Immutable scenery collider.
///
/// Conventions
/// - Units are meters.
/// - For planes the normal is `rotation * +Y`, passing through `translation`.
#[derive(Clone, Debug)]
pub struct WorldStaticDef {
    /// Stable unique identifier used to ensure deterministic insertion order.
    pub id: u32,
    pub translation: Vector3<f32>,
    pub rotation: UnitQuaternion<f32>,
    pub shape: ColliderShapeDef,
}

/// Supported collider shapes.
#[derive(Clone, Debug)]
pub enum ColliderShapeDef {
    /// Infinite plane (half-space), offset along its normal.
    Plane { offset_along_normal: f32 },

    /// Oriented cuboid with given half-extents (meters).
    Cuboid { half_extents: Vector3<f32> },

    /// Sphere/ball (meters).
    Sphere { radius: f32 },
}

/// A prop's rigid body.
#[derive(Clone, Debug)]
pub struct PropBodyDef {
    pub pose: Pose,
    pub shape: ColliderShapeDef,
    pub density: f32,
    /// Props spawn kinematic and only start simulating once they are released into `Idle`.
    pub kinematic: bool,
}

impl PropBodyDef {
    pub fn cuboid(pose: Pose, half_extents: Vector3<f32>) -> Self {
        Self {
            pose,
            shape: ColliderShapeDef::Cuboid { half_extents },
            density: 1.0,
            kinematic: true,
        }
    }
}

/// Rigid bodies, colliders, and the pipeline that steps them.
pub struct PropWorld {
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: BroadPhaseBvh,
    narrow_phase: NarrowPhase,
    ccd_solver: CCDSolver,
    gravity: Vector<Real>,
}

impl Default for PropWorld {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl PropWorld {
    /// Build a world around a set of static collider definitions.
    pub fn new(mut statics: Vec<WorldStaticDef>) -> Self {
        // Ensure deterministic insertion order.
        statics.sort_by_key(|d| d.id);

        let mut bodies = RigidBodySet::new();
        let mut colliders = ColliderSet::new();

        for def in statics.into_iter() {
            let iso = Isometry::from_parts(Translation3::from(def.translation), def.rotation);
            let rb_handle = bodies.insert(RigidBodyBuilder::fixed().pose(iso).build());

            let collider = collider_builder(&def.shape).build();
            colliders.insert_with_parent(collider, rb_handle, &mut bodies);
        }

        Self {
            bodies,
            colliders,
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            integration_parameters: IntegrationParameters::default(),
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: BroadPhaseBvh::new(),
            narrow_phase: NarrowPhase::new(),
            ccd_solver: CCDSolver::new(),
            gravity: Vector::new(0.0, -GRAVITY_MPS2, 0.0),
        }
    }

    /// Insert a prop body and return its handle.
    pub fn spawn_prop(&mut self, def: &PropBodyDef) -> RigidBodyHandle {
        let iso = Isometry::from_parts(
            Translation3::from(def.pose.translation.coords),
            def.pose.rotation,
        );
        let builder = if def.kinematic {
            RigidBodyBuilder::kinematic_position_based()
        } else {
            RigidBodyBuilder::dynamic()
        };
        let handle = self.bodies.insert(builder.pose(iso).build());

        let collider = collider_builder(&def.shape)
            .density(def.density.max(0.0))
            .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        handle
    }

    /// Remove a prop body and its colliders. Unknown handles are ignored.
    pub fn remove_prop(&mut self, handle: RigidBodyHandle) {
        self.bodies.remove(
            handle,
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    /// Step the simulation forward by `dt` seconds.
    pub fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt.max(0.0);

        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            &(),
            &(),
        );
    }

    /// Current pose of a prop, if it still exists.
    pub fn pose(&self, handle: RigidBodyHandle) -> Option<Pose> {
        self.bodies.get(handle).map(pose_of)
    }

    /// Borrow a prop body for the interaction core.
    pub fn body(&mut self, handle: RigidBodyHandle) -> RapierBody<'_> {
        RapierBody {
            bodies: &mut self.bodies,
            colliders: &self.colliders,
            handle,
        }
    }
}

/// Mutable view of one prop body inside a [`PropWorld`].
pub struct RapierBody<'a> {
    bodies: &'a mut RigidBodySet,
    colliders: &'a ColliderSet,
    handle: RigidBodyHandle,
}

impl RapierBody<'_> {
    fn with_body(&mut self, op: &str, f: impl FnOnce(&mut RigidBody)) {
        match self.bodies.get_mut(self.handle) {
            Some(rb) => f(rb),
            None => warn!("{op} ignored: body {:?} no longer exists", self.handle),
        }
    }
}

impl PhysicsBody for RapierBody<'_> {
    fn pose(&self) -> Pose {
        self.bodies
            .get(self.handle)
            .map(pose_of)
            .unwrap_or_default()
    }

    fn set_kinematic(&mut self, kinematic: bool) {
        let colliders = self.colliders;
        self.with_body("set_kinematic", |rb| {
            let body_type = if kinematic {
                RigidBodyType::KinematicPositionBased
            } else {
                RigidBodyType::Dynamic
            };
            rb.set_body_type(body_type, true);
            // Kinematic bodies carry zero effective mass until the next step; refresh it now
            // so an impulse in the same tick isn't dropped.
            rb.recompute_mass_properties_from_colliders(colliders);
            // Drop any momentum from before the switch so a released prop doesn't fly off.
            rb.set_linvel(Vector::zeros(), true);
            rb.set_angvel(Vector::zeros(), true);
        });
    }

    fn is_kinematic(&self) -> bool {
        self.bodies
            .get(self.handle)
            .is_some_and(|rb| rb.is_kinematic())
    }

    fn move_to(&mut self, position: Point3<f32>) {
        self.with_body("move_to", |rb| {
            rb.set_next_kinematic_translation(position.coords);
        });
    }

    fn apply_impulse(&mut self, impulse: Vector3<f32>) {
        self.with_body("apply_impulse", |rb| rb.apply_impulse(impulse, true));
    }

    fn set_rotation(&mut self, rotation: UnitQuaternion<f32>) {
        self.with_body("set_rotation", |rb| rb.set_rotation(rotation, true));
    }
}

fn pose_of(rb: &RigidBody) -> Pose {
    Pose::new(Point3::from(*rb.translation()), *rb.rotation())
}

/// Build a Rapier collider for a shape, expressed in its parent body's local frame.
///
/// The parent body carries the pose, so a plane is just the local +Y half-space shifted along
/// its normal.
fn collider_builder(shape: &ColliderShapeDef) -> ColliderBuilder {
    match shape {
        ColliderShapeDef::Plane {
            offset_along_normal,
        } => ColliderBuilder::new(SharedShape::new(HalfSpace::new(Vector::y_axis())))
            .translation(Vector::y() * *offset_along_normal),

        ColliderShapeDef::Cuboid { half_extents } => {
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z)
        }

        ColliderShapeDef::Sphere { radius } => ColliderBuilder::ball(*radius),
    }
}
