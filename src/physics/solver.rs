//! Contact resolution: pushing overlapping bodies apart and bouncing them off each other.
//!
//! Both steps expect the contact normal to point from `obj2` towards `obj1`,
//! as produced by [`collide`][crate::physics::collision::collide].

use super::{collision::Contact, Body};

/// Resolve a contact by first removing the penetration and then applying an impulse.
pub fn resolve_contact(obj1: &mut Body, obj2: &mut Body, contact: &Contact) {
    separate(obj1, obj2, contact);
    apply_impulse(obj1, obj2, contact);
}

/// Move bodies out of each other along the contact normal.
///
/// A static body never moves, so its partner takes the whole correction.
/// Two dynamic bodies split it evenly regardless of mass.
pub fn separate(obj1: &mut Body, obj2: &mut Body, contact: &Contact) {
    let correction = contact.depth * *contact.normal;
    let (share1, share2) = match (obj1.is_static(), obj2.is_static()) {
        (true, true) => return,
        (true, false) => (0.0, 1.0),
        (false, true) => (1.0, 0.0),
        (false, false) => (0.5, 0.5),
    };

    if let Some(rb) = obj1.as_rigidbody_mut() {
        rb.position += share1 * correction;
    }
    if let Some(rb) = obj2.as_rigidbody_mut() {
        rb.position -= share2 * correction;
    }
}

/// Change velocities with an impulse along the contact normal.
///
/// Static bodies act as if they had infinite mass.
/// Restitution is the average of both bodies' elasticities,
/// or just the dynamic body's own if the other is static.
/// Bodies that are already moving apart along the normal are left alone.
pub fn apply_impulse(obj1: &mut Body, obj2: &mut Body, contact: &Contact) {
    let normal = *contact.normal;
    let relative_vel = obj1.velocity_or_zero() - obj2.velocity_or_zero();
    let normal_vel = relative_vel.dot(normal);
    // already moving apart
    if normal_vel > 0.0 {
        return;
    }

    let inv_masses = [obj1.inverse_mass(), obj2.inverse_mass()];
    let inv_mass_sum = inv_masses[0] + inv_masses[1];
    if inv_mass_sum == 0.0 {
        return;
    }

    let elasticity = match (obj1.as_rigidbody(), obj2.as_rigidbody()) {
        (Some(rb1), Some(rb2)) => (rb1.elasticity() + rb2.elasticity()) / 2.0,
        (Some(rb), None) | (None, Some(rb)) => rb.elasticity(),
        (None, None) => return,
    };

    let impulse_mag = -(1.0 + elasticity) * normal_vel / (normal.dot(normal) * inv_mass_sum);
    let impulse = impulse_mag * normal;

    if let Some(rb) = obj1.as_rigidbody_mut() {
        rb.velocity += impulse * inv_masses[0];
    }
    if let Some(rb) = obj2.as_rigidbody_mut() {
        rb.velocity -= impulse * inv_masses[1];
    }
}
