//! Choosing the right narrow phase test for a pair of bodies.
//!
//! Tests are looked up from a fixed table indexed by the [`ShapeKind`][crate::physics::ShapeKind]s
//! of both bodies. Below the diagonal, entries call their mirror image above it
//! with the arguments swapped and flip the result.

use super::shape_shape::{self as ss, Contact};
use crate::physics::{body::SHAPE_COUNT, Body};

/// A narrow phase test between two bodies of any shape.
/// Returns None if there is no contact or the bodies aren't the expected shapes.
pub type NarrowPhaseFn = fn(&Body, &Body) -> Option<Contact>;

/// Collision tests for every pair of shape kinds, indexed `[kind1][kind2]`.
pub const DISPATCH_TABLE: [[NarrowPhaseFn; SHAPE_COUNT]; SHAPE_COUNT] = [
    [plane_plane, plane_sphere, plane_box],
    [sphere_plane, sphere_sphere, sphere_box],
    [box_plane, box_sphere, box_box],
];

/// Checks two bodies for intersection.
///
/// The normal of the resulting contact points from `obj2` towards `obj1`.
pub fn collide(obj1: &Body, obj2: &Body) -> Option<Contact> {
    DISPATCH_TABLE[obj1.kind().index()][obj2.kind().index()](obj1, obj2)
}

// two static objects won't collide anyway
fn plane_plane(_: &Body, _: &Body) -> Option<Contact> {
    None
}

fn plane_sphere(obj1: &Body, obj2: &Body) -> Option<Contact> {
    sphere_plane(obj2, obj1).map(Contact::flipped)
}

fn plane_box(obj1: &Body, obj2: &Body) -> Option<Contact> {
    box_plane(obj2, obj1).map(Contact::flipped)
}

fn sphere_plane(obj1: &Body, obj2: &Body) -> Option<Contact> {
    ss::sphere_plane(obj1.as_sphere()?, obj2.as_plane()?)
}

fn sphere_sphere(obj1: &Body, obj2: &Body) -> Option<Contact> {
    ss::sphere_sphere(obj1.as_sphere()?, obj2.as_sphere()?)
}

fn sphere_box(obj1: &Body, obj2: &Body) -> Option<Contact> {
    box_sphere(obj2, obj1).map(Contact::flipped)
}

fn box_plane(obj1: &Body, obj2: &Body) -> Option<Contact> {
    ss::box_plane(obj1.as_box()?, obj2.as_plane()?)
}

fn box_sphere(obj1: &Body, obj2: &Body) -> Option<Contact> {
    ss::box_sphere(obj1.as_box()?, obj2.as_sphere()?)
}

fn box_box(obj1: &Body, obj2: &Body) -> Option<Contact> {
    ss::box_box(obj1.as_box()?, obj2.as_box()?)
}
