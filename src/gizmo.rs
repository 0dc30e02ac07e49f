//! Drawable geometry for visualizing a scene.
//!
//! The physics doesn't draw anything itself. Instead every body can describe its current
//! shape as a [`Gizmo`][self::Gizmo] that an external renderer turns into lines and polygons.

use crate::{
    math as m,
    physics::{shape::Color, Aabb, Body, Plane, Sphere},
};

/// Half the length of the line segment drawn for an infinite plane.
pub const PLANE_GIZMO_HALF_LENGTH: f64 = 300.0;

/// A flat-colored primitive shape in world space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Gizmo {
    Line {
        start: m::Vec2,
        end: m::Vec2,
        color: Color,
    },
    Circle {
        center: m::Vec2,
        r: f64,
        color: Color,
    },
    Rect {
        center: m::Vec2,
        half_extents: m::Vec2,
        color: Color,
    },
}

impl Gizmo {
    /// Create a Gizmo that matches the given body's current state.
    pub fn from_body(body: &Body) -> Self {
        match body {
            Body::Plane(plane) => Self::from_plane(plane),
            Body::Sphere(sphere) => Self::from_sphere(sphere),
            Body::Box(aabb) => Self::from_aabb(aabb),
        }
    }

    pub fn from_plane(plane: &Plane) -> Self {
        let center = plane.center();
        let parallel = *m::unit_right_normal(plane.normal()) * PLANE_GIZMO_HALF_LENGTH;
        Gizmo::Line {
            start: center + parallel,
            end: center - parallel,
            color: plane.color(),
        }
    }

    pub fn from_sphere(sphere: &Sphere) -> Self {
        Gizmo::Circle {
            center: sphere.position(),
            r: sphere.radius(),
            color: sphere.color(),
        }
    }

    pub fn from_aabb(aabb: &Aabb) -> Self {
        Gizmo::Rect {
            center: aabb.position(),
            half_extents: aabb.half_extents(),
            color: aabb.color(),
        }
    }
}
