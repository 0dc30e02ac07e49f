//! The concrete shapes a body can have.

use super::{
    rigidbody::{RigidBody, RigidBodyParams},
    BodyError,
};
use crate::math::{self as m, Unit};

/// RGBA color, only carried around for whoever draws the scene.
pub type Color = [f32; 4];

const WHITE: Color = [1.0, 1.0, 1.0, 1.0];

//
// PLANE
//

/// An infinite static line splitting the world into two halves.
///
/// Immutable after construction.
#[derive(Clone, Copy, Debug)]
pub struct Plane {
    normal: Unit<m::Vec2>,
    distance: f64,
    color: Color,
}

#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde-types", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-types", serde(default))]
pub struct PlaneParams {
    /// Direction of the plane's front side. Doesn't need to be normalized.
    pub normal: [f64; 2],
    /// Signed distance from the origin along the normal.
    pub distance: f64,
    pub color: Color,
}

impl Default for PlaneParams {
    fn default() -> Self {
        PlaneParams {
            normal: [0.0, 1.0],
            distance: 0.0,
            color: WHITE,
        }
    }
}

impl PlaneParams {
    pub fn new(normal: impl Into<[f64; 2]>, distance: f64) -> Self {
        PlaneParams {
            normal: normal.into(),
            distance,
            ..Default::default()
        }
    }
    #[inline]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn build(self) -> Result<Plane, BodyError> {
        let normal_vec = m::Vec2::from(self.normal);
        let normal = Unit::try_new_normalize(normal_vec).ok_or_else(|| {
            let bad = m::non_finite_component(normal_vec).unwrap_or_else(|| normal_vec.mag());
            BodyError::invalid("normal", bad)
        })?;
        if !self.distance.is_finite() {
            return Err(BodyError::invalid("distance", self.distance));
        }
        Ok(Plane {
            normal,
            distance: self.distance,
            color: self.color,
        })
    }
}

impl Plane {
    pub fn normal(&self) -> Unit<m::Vec2> {
        self.normal
    }

    pub fn distance(&self) -> f64 {
        self.distance
    }

    pub fn color(&self) -> Color {
        self.color
    }

    /// Signed distance of a point from the plane, positive on the front side.
    #[inline]
    pub fn signed_distance(&self, point: m::Vec2) -> f64 {
        point.dot(*self.normal) - self.distance
    }

    /// The point on the plane closest to the origin.
    pub fn center(&self) -> m::Vec2 {
        *self.normal * self.distance
    }
}

//
// SPHERE
//

/// A dynamic circle.
#[derive(Clone, Copy, Debug)]
pub struct Sphere {
    pub(crate) body: RigidBody,
    radius: f64,
    color: Color,
}

#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde-types", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-types", serde(default))]
pub struct SphereParams {
    pub body: RigidBodyParams,
    pub radius: f64,
    pub color: Color,
}

impl Default for SphereParams {
    fn default() -> Self {
        SphereParams {
            body: RigidBodyParams::default(),
            radius: 1.0,
            color: WHITE,
        }
    }
}

impl SphereParams {
    pub fn new(body: RigidBodyParams, radius: f64) -> Self {
        SphereParams {
            body,
            radius,
            color: WHITE,
        }
    }
    #[inline]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn build(self) -> Result<Sphere, BodyError> {
        if !(self.radius > 0.0 && self.radius.is_finite()) {
            return Err(BodyError::invalid("radius", self.radius));
        }
        Ok(Sphere {
            body: self.body.build()?,
            radius: self.radius,
            color: self.color,
        })
    }
}

impl Sphere {
    pub fn rigidbody(&self) -> &RigidBody {
        &self.body
    }

    pub fn rigidbody_mut(&mut self) -> &mut RigidBody {
        &mut self.body
    }

    #[inline]
    pub fn position(&self) -> m::Vec2 {
        self.body.position
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn contains_point(&self, point: m::Vec2) -> bool {
        (point - self.position()).mag_sq() < self.radius * self.radius
    }
}

//
// AABB
//

/// A dynamic axis-aligned box.
///
/// The corners are derived from the position whenever they're asked for,
/// so they always agree with where the body actually is.
#[derive(Clone, Copy, Debug)]
pub struct Aabb {
    pub(crate) body: RigidBody,
    half_extents: m::Vec2,
    color: Color,
}

#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde-types", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-types", serde(default))]
pub struct AabbParams {
    pub body: RigidBodyParams,
    pub half_extents: [f64; 2],
    pub color: Color,
}

impl Default for AabbParams {
    fn default() -> Self {
        AabbParams {
            body: RigidBodyParams::default(),
            half_extents: [1.0, 1.0],
            color: WHITE,
        }
    }
}

impl AabbParams {
    pub fn new(body: RigidBodyParams, half_extents: impl Into<[f64; 2]>) -> Self {
        AabbParams {
            body,
            half_extents: half_extents.into(),
            color: WHITE,
        }
    }
    #[inline]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    pub fn build(self) -> Result<Aabb, BodyError> {
        for he in self.half_extents {
            if !(he > 0.0 && he.is_finite()) {
                return Err(BodyError::invalid("half_extents", he));
            }
        }
        Ok(Aabb {
            body: self.body.build()?,
            half_extents: m::Vec2::from(self.half_extents),
            color: self.color,
        })
    }
}

impl Aabb {
    pub fn rigidbody(&self) -> &RigidBody {
        &self.body
    }

    pub fn rigidbody_mut(&mut self) -> &mut RigidBody {
        &mut self.body
    }

    #[inline]
    pub fn position(&self) -> m::Vec2 {
        self.body.position
    }

    pub fn half_extents(&self) -> m::Vec2 {
        self.half_extents
    }

    pub fn color(&self) -> Color {
        self.color
    }

    #[inline]
    pub fn min(&self) -> m::Vec2 {
        self.position() - self.half_extents
    }

    #[inline]
    pub fn max(&self) -> m::Vec2 {
        self.position() + self.half_extents
    }

    /// Corners in counterclockwise order starting from the bottom left.
    pub fn corners(&self) -> [m::Vec2; 4] {
        let (min, max) = (self.min(), self.max());
        [
            min,
            m::Vec2::new(max.x, min.y),
            max,
            m::Vec2::new(min.x, max.y),
        ]
    }

    pub fn contains_point(&self, point: m::Vec2) -> bool {
        let (min, max) = (self.min(), self.max());
        point.x > min.x && point.x < max.x && point.y > min.y && point.y < max.y
    }
}
