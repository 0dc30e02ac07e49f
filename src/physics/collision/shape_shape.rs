//! Narrow phase intersection tests between concrete shapes.
//!
//! Every test returns contacts with the same orientation:
//! the normal points from the second shape towards the first,
//! which is the direction the first shape has to move to get out of the second.

use crate::{
    math::{self as m, Unit},
    physics::{Aabb, Plane, Sphere},
};

/// An intersection between two objects.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Contact {
    /// The normal, facing towards obj1
    pub normal: Unit<m::Vec2>,
    /// Penetration depth, always positive
    pub depth: f64,
}

impl Contact {
    /// The same contact seen from the other object.
    pub fn flipped(self) -> Self {
        Contact {
            normal: -self.normal,
            depth: self.depth,
        }
    }
}

//
// SPHERE <-> PLANE
//

pub fn sphere_plane(sphere: &Sphere, plane: &Plane) -> Option<Contact> {
    let mut normal = plane.normal();
    let mut dist = plane.signed_distance(sphere.position());
    // sphere is behind the plane, push it further back
    if dist < 0.0 {
        normal = -normal;
        dist = -dist;
    }

    let depth = sphere.radius() - dist;
    if depth > 0.0 {
        Some(Contact { normal, depth })
    } else {
        None
    }
}

//
// SPHERE <-> SPHERE
//

/// Contact between two circles.
///
/// Coincident centers push the larger circle towards +x,
/// so only two identical circles on top of each other get the same normal in both orders.
pub fn sphere_sphere(s1: &Sphere, s2: &Sphere) -> Option<Contact> {
    let offset = s1.position() - s2.position();
    let dist_sq = offset.mag_sq();
    let r_sum = s1.radius() + s2.radius();
    if dist_sq >= r_sum * r_sum {
        return None;
    }

    let dist = dist_sq.sqrt();
    // same position, consider penetration to be on x axis
    let normal = Unit::try_new_normalize(offset).unwrap_or_else(|| {
        if s1.radius() < s2.radius() {
            -Unit::unit_x()
        } else {
            Unit::unit_x()
        }
    });
    Some(Contact {
        normal,
        depth: r_sum - dist,
    })
}

//
// BOX <-> PLANE
//

pub fn box_plane(aabb: &Aabb, plane: &Plane) -> Option<Contact> {
    // the corner furthest behind the plane decides the depth
    let deepest = aabb
        .corners()
        .iter()
        .map(|corner| plane.signed_distance(*corner))
        .fold(f64::INFINITY, f64::min);

    if deepest < 0.0 {
        Some(Contact {
            normal: plane.normal(),
            depth: -deepest,
        })
    } else {
        None
    }
}

//
// BOX <-> SPHERE
//

pub fn box_sphere(aabb: &Aabb, sphere: &Sphere) -> Option<Contact> {
    let center = sphere.position();
    let r = sphere.radius();
    let (min, max) = (aabb.min(), aabb.max());
    let closest = m::Vec2::new(center.x.clamp(min.x, max.x), center.y.clamp(min.y, max.y));
    let box_to_center = center - closest;

    match Unit::try_new_normalize(box_to_center) {
        Some(dir) => {
            let dist = box_to_center.mag();
            if dist >= r {
                return None;
            }
            Some(Contact {
                normal: -dir,
                depth: r - dist,
            })
        }
        None => {
            // circle center is on or inside the box,
            // push the box away through the face closest to the center
            let faces = [
                (center.x - min.x, Unit::unit_x()),
                (max.x - center.x, -Unit::unit_x()),
                (center.y - min.y, Unit::unit_y()),
                (max.y - center.y, -Unit::unit_y()),
            ];
            let (face_dist, normal) = faces
                .into_iter()
                .fold((f64::INFINITY, Unit::unit_x()), |nearest, face| {
                    if face.0 < nearest.0 {
                        face
                    } else {
                        nearest
                    }
                });
            Some(Contact {
                normal,
                depth: r + face_dist,
            })
        }
    }
}

//
// BOX <-> BOX
//

/// Minimum translation out of an overlap between two boxes.
///
/// When both directions along an axis are equally deep, the direction is picked
/// from the offset on the other axis and then the difference in size,
/// which flips when the boxes swap places. Identical boxes fall back to +x / +y.
pub fn box_box(b1: &Aabb, b2: &Aabb) -> Option<Contact> {
    let (min1, max1) = (b1.min(), b1.max());
    let (min2, max2) = (b2.min(), b2.max());

    // separating axis test on the world axes
    if max1.x <= min2.x || max2.x <= min1.x || max1.y <= min2.y || max2.y <= min1.y {
        return None;
    }

    // distances b1 would have to move in each direction to get out
    let to_left = max1.x - min2.x;
    let to_right = max2.x - min1.x;
    let to_bottom = max1.y - min2.y;
    let to_top = max2.y - min1.y;

    // both of these change sign when b1 and b2 are swapped
    let center_offset = (min1 + max1) - (min2 + max2);
    let size_diff = (max1 - min1) - (max2 - min2);
    let tiebreak = |other_axis_offset: f64| {
        [other_axis_offset, size_diff.x, size_diff.y]
            .into_iter()
            .find(|v| *v != 0.0)
            .unwrap_or(1.0)
    };

    let x_axis = if to_left < to_right
        || (to_left == to_right && tiebreak(center_offset.y) < 0.0)
    {
        (to_left, -Unit::unit_x())
    } else {
        (to_right, Unit::unit_x())
    };
    let y_axis = if to_bottom < to_top
        || (to_bottom == to_top && tiebreak(center_offset.x) < 0.0)
    {
        (to_bottom, -Unit::unit_y())
    } else {
        (to_top, Unit::unit_y())
    };
    let (depth, normal) = if x_axis.0 <= y_axis.0 { x_axis } else { y_axis };

    Some(Contact { normal, depth })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::{AabbParams, PlaneParams, RigidBodyParams, SphereParams};

    fn sphere(pos: [f64; 2], r: f64) -> Sphere {
        SphereParams::new(RigidBodyParams::new(1.0).with_position(pos), r)
            .build()
            .unwrap()
    }

    fn aabb(pos: [f64; 2], half_extents: [f64; 2]) -> Aabb {
        AabbParams::new(RigidBodyParams::new(1.0).with_position(pos), half_extents)
            .build()
            .unwrap()
    }

    fn plane(normal: [f64; 2], distance: f64) -> Plane {
        PlaneParams::new(normal, distance).build().unwrap()
    }

    fn assert_contact(c: Option<Contact>, normal: [f64; 2], depth: f64) {
        let c = c.expect("Expected a contact");
        assert!(
            (*c.normal - m::Vec2::from(normal)).mag() < 1e-9,
            "Wrong normal {:?}",
            c.normal
        );
        assert!((c.depth - depth).abs() < 1e-9, "Wrong depth {}", c.depth);
    }

    #[test]
    fn sphere_plane_both_sides() {
        let floor = plane([0.0, 1.0], -50.0);
        assert_contact(sphere_plane(&sphere([0.0, -48.0], 3.0), &floor), [0.0, 1.0], 1.0);
        // behind the plane the normal flips
        assert_contact(sphere_plane(&sphere([0.0, -52.0], 3.0), &floor), [0.0, -1.0], 1.0);
        // just touching isn't a contact
        assert!(sphere_plane(&sphere([0.0, -47.0], 3.0), &floor).is_none());
    }

    #[test]
    fn sphere_sphere_normal_points_to_first() {
        assert_contact(
            sphere_sphere(&sphere([-4.0, 0.0], 5.0), &sphere([4.0, 0.0], 5.0)),
            [-1.0, 0.0],
            2.0,
        );
        assert!(sphere_sphere(&sphere([-6.0, 0.0], 5.0), &sphere([6.0, 0.0], 5.0)).is_none());
        assert!(sphere_sphere(&sphere([-5.0, 0.0], 5.0), &sphere([5.0, 0.0], 5.0)).is_none());
    }

    #[test]
    fn coincident_spheres_use_x_axis() {
        let (small, large) = (sphere([1.0, 1.0], 2.0), sphere([1.0, 1.0], 3.0));
        assert_contact(sphere_sphere(&large, &small), [1.0, 0.0], 5.0);
        assert_contact(sphere_sphere(&small, &large), [-1.0, 0.0], 5.0);
        // identical spheres can't be told apart
        assert_contact(sphere_sphere(&small, &small), [1.0, 0.0], 4.0);
    }

    #[test]
    fn box_plane_uses_deepest_corner() {
        let floor = plane([0.0, 1.0], 0.0);
        assert_contact(box_plane(&aabb([0.0, 0.5], [1.0, 1.0]), &floor), [0.0, 1.0], 0.5);
        assert!(box_plane(&aabb([0.0, 1.5], [1.0, 1.0]), &floor).is_none());

        // tilted plane touches one corner deeper than the others
        let slope = plane([1.0, 1.0], 0.0);
        let c = box_plane(&aabb([1.0, 1.0], [1.5, 1.5]), &slope).unwrap();
        let expected = (-0.5 - 0.5) / 2.0_f64.sqrt();
        assert!((c.depth + expected).abs() < 1e-9);
    }

    #[test]
    fn box_sphere_outside() {
        // sphere to the right of the box: box has to move left
        assert_contact(
            box_sphere(&aabb([0.0, 0.0], [1.0, 1.0]), &sphere([2.5, 0.0], 2.0)),
            [-1.0, 0.0],
            0.5,
        );
        // corner region
        let c = box_sphere(&aabb([0.0, 0.0], [1.0, 1.0]), &sphere([2.0, 2.0], 2.0)).unwrap();
        let diag = -1.0 / 2.0_f64.sqrt();
        assert_contact(Some(c), [diag, diag], 2.0 - 2.0_f64.sqrt());
        assert!(box_sphere(&aabb([0.0, 0.0], [1.0, 1.0]), &sphere([3.0, 0.0], 2.0)).is_none());
    }

    #[test]
    fn box_sphere_center_inside_box() {
        // closest face is the top one, sphere exits upwards so the box goes down
        assert_contact(
            box_sphere(&aabb([0.0, 0.0], [2.0, 2.0]), &sphere([0.5, 1.5], 1.0)),
            [0.0, -1.0],
            1.5,
        );
    }

    #[test]
    fn box_box_minimum_translation() {
        let b1 = aabb([0.0, 0.0], [1.0, 1.0]);
        assert_contact(box_box(&b1, &aabb([1.5, 0.2], [1.0, 1.0])), [-1.0, 0.0], 0.5);
        assert_contact(box_box(&b1, &aabb([0.2, -1.8], [1.0, 1.0])), [0.0, 1.0], 0.2);
        assert!(box_box(&b1, &aabb([2.0, 0.0], [1.0, 1.0])).is_none());
        assert!(box_box(&b1, &aabb([0.0, 3.0], [1.0, 1.0])).is_none());
    }

    #[test]
    fn box_box_aligned_centers_give_opposite_normals() {
        // same x, shallowest exit is sideways with both sides equally deep
        let (low, high) = (aabb([0.0, 0.0], [1.0, 5.0]), aabb([0.0, 1.0], [1.0, 5.0]));
        assert_contact(box_box(&low, &high), [-1.0, 0.0], 2.0);
        assert_contact(box_box(&high, &low), [1.0, 0.0], 2.0);

        // concentric boxes of different widths
        let (narrow, wide) = (aabb([0.0, 0.0], [1.0, 1.0]), aabb([0.0, 0.0], [2.0, 1.0]));
        assert_contact(box_box(&narrow, &wide), [0.0, -1.0], 2.0);
        assert_contact(box_box(&wide, &narrow), [0.0, 1.0], 2.0);

        // identical boxes can't be told apart
        assert_contact(box_box(&narrow, &narrow), [1.0, 0.0], 2.0);
    }
}
