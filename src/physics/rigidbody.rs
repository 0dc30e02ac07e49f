use super::BodyError;
use crate::math::{self as m, Angle};

/// Kinematic state shared by every body that moves.
///
/// Spheres and boxes each own one of these. Planes don't, which is what makes
/// them impossible to move.
#[derive(Clone, Copy, Debug)]
pub struct RigidBody {
    pub(crate) position: m::Vec2,
    pub(crate) velocity: m::Vec2,
    // accumulated from forces during a step, cleared after integration
    acceleration: m::Vec2,
    rotation: Angle,
    mass: Mass,
    elasticity: f64,
    linear_drag: f64,
    min_linear_speed: f64,
}

/// Builder for the state of a [`RigidBody`][self::RigidBody].
///
/// Everything except the mass has a sensible default: the body starts at the
/// origin at rest, bounces perfectly and isn't slowed down by drag.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "serde-types", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde-types", serde(default))]
pub struct RigidBodyParams {
    pub position: [f64; 2],
    pub velocity: [f64; 2],
    pub rotation: Angle,
    pub mass: f64,
    pub elasticity: f64,
    pub linear_drag: f64,
    pub min_linear_speed: f64,
}

impl Default for RigidBodyParams {
    fn default() -> Self {
        RigidBodyParams {
            position: [0.0, 0.0],
            velocity: [0.0, 0.0],
            rotation: Angle::default(),
            mass: 1.0,
            elasticity: 1.0,
            linear_drag: 0.0,
            min_linear_speed: 0.0,
        }
    }
}

impl RigidBodyParams {
    pub fn new(mass: f64) -> Self {
        RigidBodyParams {
            mass,
            ..Default::default()
        }
    }
    #[inline]
    pub fn with_position(mut self, pos: impl Into<[f64; 2]>) -> Self {
        self.position = pos.into();
        self
    }
    #[inline]
    pub fn with_velocity(mut self, vel: impl Into<[f64; 2]>) -> Self {
        self.velocity = vel.into();
        self
    }
    #[inline]
    pub fn with_rotation(mut self, angle: Angle) -> Self {
        self.rotation = angle;
        self
    }
    #[inline]
    pub fn with_elasticity(mut self, elasticity: f64) -> Self {
        self.elasticity = elasticity;
        self
    }
    /// Set the linear drag coefficient and the speed below which the body stops entirely.
    #[inline]
    pub fn with_linear_drag(mut self, drag: f64, min_speed: f64) -> Self {
        self.linear_drag = drag;
        self.min_linear_speed = min_speed;
        self
    }

    pub fn build(self) -> Result<RigidBody, BodyError> {
        let position = m::Vec2::from(self.position);
        let velocity = m::Vec2::from(self.velocity);
        if let Some(c) = m::non_finite_component(position) {
            return Err(BodyError::invalid("position", c));
        }
        if let Some(c) = m::non_finite_component(velocity) {
            return Err(BodyError::invalid("velocity", c));
        }
        if !(self.mass > 0.0 && self.mass.is_finite()) {
            return Err(BodyError::invalid("mass", self.mass));
        }
        if !(0.0..=1.0).contains(&self.elasticity) {
            return Err(BodyError::invalid("elasticity", self.elasticity));
        }
        if !(self.linear_drag >= 0.0 && self.linear_drag.is_finite()) {
            return Err(BodyError::invalid("linear_drag", self.linear_drag));
        }
        if !(self.min_linear_speed >= 0.0 && self.min_linear_speed.is_finite()) {
            return Err(BodyError::invalid(
                "min_linear_speed",
                self.min_linear_speed,
            ));
        }

        Ok(RigidBody {
            position,
            velocity,
            acceleration: m::Vec2::zero(),
            rotation: self.rotation,
            mass: Mass::from(self.mass),
            elasticity: self.elasticity,
            linear_drag: self.linear_drag,
            min_linear_speed: self.min_linear_speed,
        })
    }
}

impl RigidBody {
    /// Semi-implicit Euler step.
    pub fn advance(&mut self, gravity: m::Vec2, dt: f64) {
        self.apply_force(gravity * self.mass.value());
        self.velocity += self.acceleration * dt;
        self.velocity -= self.velocity * self.linear_drag * dt;
        self.position += self.velocity * dt;
        self.acceleration = m::Vec2::zero();

        // stop perpetual creep
        if self.velocity.mag() < self.min_linear_speed {
            self.velocity = m::Vec2::zero();
        }
    }

    /// Accumulate a force to be applied during the next step.
    pub fn apply_force(&mut self, force: m::Vec2) {
        self.acceleration += force * self.mass.inv();
    }

    /// Apply a force to this body and an equal and opposite force to another.
    pub fn apply_force_to(&mut self, other: &mut RigidBody, force: m::Vec2) {
        self.apply_force(force);
        other.apply_force(-force);
    }

    // accessors

    pub fn position(&self) -> m::Vec2 {
        self.position
    }

    pub fn set_position(&mut self, position: m::Vec2) {
        self.position = position;
    }

    pub fn velocity(&self) -> m::Vec2 {
        self.velocity
    }

    pub fn set_velocity(&mut self, velocity: m::Vec2) {
        self.velocity = velocity;
    }

    /// Acceleration accumulated since the last step.
    pub fn acceleration(&self) -> m::Vec2 {
        self.acceleration
    }

    pub fn rotation(&self) -> Angle {
        self.rotation
    }

    pub fn mass(&self) -> f64 {
        self.mass.value()
    }

    pub fn inverse_mass(&self) -> f64 {
        self.mass.inv()
    }

    pub fn elasticity(&self) -> f64 {
        self.elasticity
    }

    pub fn linear_drag(&self) -> f64 {
        self.linear_drag
    }

    pub fn min_linear_speed(&self) -> f64 {
        self.min_linear_speed
    }
}

/// A mass together with its inverse, which is what the impulse solver divides by.
#[derive(Clone, Copy, Debug)]
pub struct Mass {
    mass: f64,
    inverse: f64,
}

impl From<f64> for Mass {
    #[inline]
    fn from(mass: f64) -> Self {
        Mass {
            mass,
            inverse: 1.0 / mass,
        }
    }
}

impl Mass {
    #[inline]
    pub fn value(&self) -> f64 {
        self.mass
    }

    #[inline]
    pub fn inv(&self) -> f64 {
        self.inverse
    }
}
