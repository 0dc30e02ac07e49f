//! Fixed-timestep collision detection and response for 2D planes, circles
//! and axis-aligned boxes.

/// Open a profiler span that lasts until the returned value is dropped.
/// Does nothing unless the `tracy` feature is enabled and a profiler is connected.
macro_rules! tracy_span {
    ($name:literal, $fn_name:literal) => {
        tracy_client::Client::running()
            .map(|client| client.span_alloc(Some($name), $fn_name, file!(), line!(), 0))
    };
}

pub mod gizmo;
pub use gizmo::Gizmo;

pub mod math;
pub use math::{uv, Angle, Unit, Vec2};

pub mod physics;
pub use physics::{
    collision::{self, Contact},
    solver, Aabb, AabbParams, Body, BodyError, Color, Plane, PlaneParams, RigidBody,
    RigidBodyParams, ShapeKind, Sphere, SphereParams,
};

pub mod scene;
pub use scene::{ActorHandle, ContactEvent, Scene, SceneError, SceneParams};
