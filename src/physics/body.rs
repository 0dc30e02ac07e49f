use super::{
    rigidbody::RigidBody,
    shape::{Aabb, Plane, Sphere},
};
use crate::{gizmo::Gizmo, math as m};

use std::fmt;

/// Error produced when constructing a body from parameters that make no physical sense.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum BodyError {
    #[error("Invalid body parameters: {parameter} cannot be {value}")]
    InvalidBodyParameters {
        parameter: &'static str,
        value: f64,
    },
}

impl BodyError {
    pub(crate) fn invalid(parameter: &'static str, value: f64) -> Self {
        BodyError::InvalidBodyParameters { parameter, value }
    }
}

/// Number of distinct shape kinds, i.e. the size of each dimension of the dispatch table.
pub const SHAPE_COUNT: usize = 3;

/// The kind of shape a body has. Used as a key to pick a collision test.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ShapeKind {
    Plane = 0,
    Sphere = 1,
    Box = 2,
}

impl ShapeKind {
    /// Index of this kind in the collision dispatch table.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }
}

/// Any object that can take part in a physics scene.
#[derive(Clone, Copy, Debug)]
pub enum Body {
    Plane(Plane),
    Sphere(Sphere),
    Box(Aabb),
}

impl From<Plane> for Body {
    fn from(plane: Plane) -> Self {
        Body::Plane(plane)
    }
}
impl From<Sphere> for Body {
    fn from(sphere: Sphere) -> Self {
        Body::Sphere(sphere)
    }
}
impl From<Aabb> for Body {
    fn from(aabb: Aabb) -> Self {
        Body::Box(aabb)
    }
}

impl Body {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Body::Plane(_) => ShapeKind::Plane,
            Body::Sphere(_) => ShapeKind::Sphere,
            Body::Box(_) => ShapeKind::Box,
        }
    }

    /// Whether this body can be moved by collisions.
    ///
    /// Only planes are static. This is decided by shape alone, not by mass,
    /// so a box is never static no matter how heavy it is.
    #[inline]
    pub fn is_static(&self) -> bool {
        self.kind() == ShapeKind::Plane
    }

    /// Advance the body by one fixed step. Planes don't move.
    pub fn advance(&mut self, gravity: m::Vec2, dt: f64) {
        if let Some(rb) = self.as_rigidbody_mut() {
            rb.advance(gravity, dt);
        }
    }

    /// Current drawable shape of the body.
    pub fn gizmo(&self) -> Gizmo {
        Gizmo::from_body(self)
    }

    /// Check whether a point is inside the body.
    /// For planes, everything behind the front side counts as inside.
    pub fn contains_point(&self, point: m::Vec2) -> bool {
        match self {
            Body::Plane(plane) => plane.signed_distance(point) <= 0.0,
            Body::Sphere(sphere) => sphere.contains_point(point),
            Body::Box(aabb) => aabb.contains_point(point),
        }
    }

    // capability accessors

    pub fn as_plane(&self) -> Option<&Plane> {
        match self {
            Body::Plane(plane) => Some(plane),
            _ => None,
        }
    }

    pub fn as_sphere(&self) -> Option<&Sphere> {
        match self {
            Body::Sphere(sphere) => Some(sphere),
            _ => None,
        }
    }

    pub fn as_box(&self) -> Option<&Aabb> {
        match self {
            Body::Box(aabb) => Some(aabb),
            _ => None,
        }
    }

    pub fn as_rigidbody(&self) -> Option<&RigidBody> {
        match self {
            Body::Plane(_) => None,
            Body::Sphere(sphere) => Some(&sphere.body),
            Body::Box(aabb) => Some(&aabb.body),
        }
    }

    pub fn as_rigidbody_mut(&mut self) -> Option<&mut RigidBody> {
        match self {
            Body::Plane(_) => None,
            Body::Sphere(sphere) => Some(&mut sphere.body),
            Body::Box(aabb) => Some(&mut aabb.body),
        }
    }

    /// Position of a dynamic body. Planes have none.
    pub fn position(&self) -> Option<m::Vec2> {
        self.as_rigidbody().map(|rb| rb.position())
    }

    /// Velocity of the body, which is always zero for planes.
    pub fn velocity_or_zero(&self) -> m::Vec2 {
        self.as_rigidbody()
            .map(|rb| rb.velocity())
            .unwrap_or_else(m::Vec2::zero)
    }

    /// Returns the inverse mass of the body, which is zero if it's static.
    pub fn inverse_mass(&self) -> f64 {
        self.as_rigidbody().map(|rb| rb.inverse_mass()).unwrap_or(0.0)
    }
}

/// One-line description of the body's state for debug logging.
impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn vec(v: m::Vec2) -> String {
            format!("({:.3}, {:.3})", v.x, v.y)
        }
        match self {
            Body::Plane(plane) => write!(
                f,
                "Plane normal: {} distance: {:.3}",
                vec(*plane.normal()),
                plane.distance()
            ),
            Body::Sphere(sphere) => write!(
                f,
                "Sphere position: {} velocity: {} radius: {:.3}",
                vec(sphere.position()),
                vec(sphere.rigidbody().velocity()),
                sphere.radius()
            ),
            Body::Box(aabb) => write!(
                f,
                "Box position: {} velocity: {} extents: {}",
                vec(aabb.position()),
                vec(aabb.rigidbody().velocity()),
                vec(aabb.half_extents())
            ),
        }
    }
}
