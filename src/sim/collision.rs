//! Coarse proximity tests between bodies
//!
//! One body's sample points are carried into another body's local frame,
//! where the other body is a unit sphere (or cube). No contact normal or
//! penetration is computed; a hit is a yes/no answer.

use glam::{Mat4, Vec3};

use super::body::Body;

/// Containment test run in the reference body's local space
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntersectTest {
    Sphere,
    Cube,
}

impl IntersectTest {
    #[inline]
    pub fn contains(self, p: Vec3, margin: f32) -> bool {
        match self {
            IntersectTest::Sphere => intersect_sphere(p, margin),
            IntersectTest::Cube => intersect_cube(p, margin),
        }
    }
}

/// `p` lies within the unit sphere, radius² grown by `margin`
#[inline]
pub fn intersect_sphere(p: Vec3, margin: f32) -> bool {
    p.dot(p) < 1.0 + margin
}

/// `p` lies within the unit cube grown by `margin` on every side
#[inline]
pub fn intersect_cube(p: Vec3, margin: f32) -> bool {
    p.abs().max_element() <= 1.0 + margin
}

/// Sample points and the test they are checked against
#[derive(Debug, Clone)]
pub struct Collider {
    pub test: IntersectTest,
    pub points: Vec<Vec3>,
    pub leeway: f32,
}

impl Collider {
    /// Unit-sphere collider sampled on a subdivided tetrahedron
    pub fn sphere(subdivisions: u32, leeway: f32) -> Self {
        Self {
            test: IntersectTest::Sphere,
            points: sphere_sample_points(subdivisions),
            leeway,
        }
    }
}

/// Vertices of a tetrahedron subdivided onto the unit sphere.
///
/// Each level splits every triangle in four, pushing edge midpoints out to
/// the sphere. Shared edges produce duplicate points; they are harmless for
/// containment tests and kept to avoid a dedup pass.
pub fn sphere_sample_points(subdivisions: u32) -> Vec<Vec3> {
    let mut points = vec![
        Vec3::new(0.0, 0.0, -1.0),
        Vec3::new(0.0, 0.9428, 0.3333),
        Vec3::new(-0.8165, -0.4714, 0.3333),
        Vec3::new(0.8165, -0.4714, 0.3333),
    ];
    for (a, b, c) in [(0, 1, 2), (3, 2, 1), (1, 0, 3), (0, 2, 3)] {
        subdivide_triangle(&mut points, a, b, c, subdivisions);
    }
    points
}

fn subdivide_triangle(points: &mut Vec<Vec3>, a: usize, b: usize, c: usize, count: u32) {
    if count == 0 {
        return;
    }
    let midpoint = |p: Vec3, q: Vec3| p.lerp(q, 0.5).normalize_or_zero();
    let ab_vert = midpoint(points[a], points[b]);
    let ac_vert = midpoint(points[a], points[c]);
    let bc_vert = midpoint(points[b], points[c]);

    let ab = points.len();
    points.push(ab_vert);
    let ac = points.len();
    points.push(ac_vert);
    let bc = points.len();
    points.push(bc_vert);

    subdivide_triangle(points, a, ab, ac, count - 1);
    subdivide_triangle(points, ab, b, bc, count - 1);
    subdivide_triangle(points, ac, bc, c, count - 1);
    subdivide_triangle(points, ab, bc, ac, count - 1);
}

impl Body {
    /// Whether any of `other`'s sample points fall inside this body.
    ///
    /// Asymmetric: `other` is carried into this body's frame, so
    /// `a.check_if_colliding(b)` and `b.check_if_colliding(a)` can differ
    /// for non-uniformly scaled bodies.
    pub fn check_if_colliding(&self, other: &Body, collider: &Collider) -> bool {
        if self.id == other.id {
            return false;
        }
        let to_local = self.drawn_location.inverse() * other.drawn_location;
        points_inside(to_local, collider)
    }
}

fn points_inside(transform: Mat4, collider: &Collider) -> bool {
    collider
        .points
        .iter()
        .any(|&p| collider.test.contains(transform.transform_point3(p), collider.leeway))
}
