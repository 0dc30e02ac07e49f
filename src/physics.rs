//! Bodies, collision detection and contact resolution.

pub mod body;
pub use body::{Body, BodyError, ShapeKind};

pub mod collision;
pub use collision::{collide, Contact};

pub mod rigidbody;
pub use rigidbody::{Mass, RigidBody, RigidBodyParams};

pub mod shape;
pub use shape::{Aabb, AabbParams, Color, Plane, PlaneParams, Sphere, SphereParams};

pub mod solver;
