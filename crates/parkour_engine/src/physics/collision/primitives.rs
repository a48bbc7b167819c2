//! Primitive collision shapes and intersection algorithms
//!
//! Provides basic geometric primitives (rays, spheres, triangles) with
//! intersection tests used by the ground probe and the movement sweep.

use serde::{Deserialize, Serialize};

use crate::foundation::math::Vec3;

/// Sine of the angle between ray and triangle plane below which they count as parallel
///
/// The determinant is compared against this scaled by the ray length and the
/// triangle's doubled area, so tiny triangles and short directions still hit.
pub const PARALLEL_EPSILON: f32 = 0.000_001;

/// A ray for ray casting
///
/// The direction is stored as given. Distances reported against this ray are
/// parametric, in multiples of `direction`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec3,
    /// The direction of the ray (not necessarily normalized)
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray with the given origin and direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Creates a ray with a unit direction, or `None` for a degenerate direction
    pub fn normalized(origin: Vec3, direction: Vec3, min_length: f32) -> Option<Self> {
        direction
            .try_normalize(min_length)
            .map(|direction| Self { origin, direction })
    }

    /// Ray pointing straight down (-Y) from `origin`
    pub fn down(origin: Vec3) -> Self {
        Self::new(origin, Vec3::new(0.0, -1.0, 0.0))
    }

    /// Get a point along the ray at parameter t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Whether the direction is too short to cast
    pub fn is_degenerate(&self) -> bool {
        self.direction.magnitude_squared() <= f32::EPSILON * f32::EPSILON
    }
}

/// Result of a ray intersection test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayHit {
    /// Parametric distance along the ray (world distance when the ray is unit length)
    pub distance: f32,
    /// The point of intersection in world space
    pub point: Vec3,
    /// The surface normal at the intersection point
    pub normal: Vec3,
    /// Index of the triangle that was hit within the tested slice
    pub triangle: usize,
}

impl RayHit {
    /// Keep whichever of two optional hits is nearer
    pub fn nearer(current: Option<Self>, candidate: Option<Self>) -> Option<Self> {
        match (current, candidate) {
            (Some(a), Some(b)) => Some(if b.distance < a.distance { b } else { a }),
            (a, None) => a,
            (None, b) => b,
        }
    }
}

/// Which triangle faces a ray may hit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CullMode {
    /// Both faces are solid
    #[default]
    None,
    /// Faces whose winding points away from the ray origin are ignored
    Back,
}

/// A bounding sphere used as a cheap early-out before triangle tests
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingSphere {
    /// The center position of the sphere in world space
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new bounding sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Sphere around the axis-aligned bounds of a point set
    pub fn enclosing(points: impl IntoIterator<Item = Vec3> + Clone) -> Option<Self> {
        let mut iter = points.clone().into_iter();
        let first = iter.next()?;
        let (min, max) = iter.fold((first, first), |(min, max), p| (min.inf(&p), max.sup(&p)));

        let center = (min + max) * 0.5;
        let radius = points
            .into_iter()
            .map(|p| (p - center).magnitude())
            .fold(0.0_f32, f32::max);

        Some(Self::new(center, radius))
    }

    /// Whether the ray passes through the sphere at a non-negative parameter
    pub fn intersects_ray(&self, ray: &Ray) -> bool {
        let oc = ray.origin - self.center;
        let c = oc.dot(&oc) - self.radius * self.radius;
        if c <= 0.0 {
            return true; // Origin inside the sphere
        }

        let a = ray.direction.dot(&ray.direction);
        let b = 2.0 * oc.dot(&ray.direction);
        if a <= 0.0 || b > 0.0 {
            return false; // Degenerate, or pointing away from the sphere
        }

        b * b - 4.0 * a * c >= 0.0
    }
}

/// A triangle for collision detection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// First vertex
    pub v0: Vec3,
    /// Second vertex
    pub v1: Vec3,
    /// Third vertex
    pub v2: Vec3,
}

impl Triangle {
    /// Creates a new triangle
    pub fn new(v0: Vec3, v1: Vec3, v2: Vec3) -> Self {
        Self { v0, v1, v2 }
    }

    /// Vertices in winding order
    pub fn vertices(&self) -> [Vec3; 3] {
        [self.v0, self.v1, self.v2]
    }

    /// Calculates the normal of the triangle (right-hand rule)
    pub fn normal(&self) -> Vec3 {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;
        edge1.cross(&edge2).try_normalize(f32::EPSILON).unwrap_or_else(Vec3::zeros)
    }

    /// Calculates the centroid (center point) of the triangle
    pub fn centroid(&self) -> Vec3 {
        (self.v0 + self.v1 + self.v2) / 3.0
    }

    /// Triangle with every vertex passed through `f`
    pub fn map(&self, mut f: impl FnMut(Vec3) -> Vec3) -> Self {
        Self::new(f(self.v0), f(self.v1), f(self.v2))
    }

    /// Möller-Trumbore ray-triangle intersection algorithm
    /// Returns (t, u, v) barycentric coordinates if hit, None otherwise
    ///
    /// See: "Fast, Minimum Storage Ray/Triangle Intersection" by Möller & Trumbore
    pub fn intersect_ray(&self, ray: &Ray, cull: CullMode) -> Option<(f32, f32, f32)> {
        let edge1 = self.v1 - self.v0;
        let edge2 = self.v2 - self.v0;

        let h = ray.direction.cross(&edge2);
        let a = edge1.dot(&h);

        // Zero for a degenerate triangle, which is then always rejected
        let threshold = PARALLEL_EPSILON * ray.direction.magnitude() * edge1.cross(&edge2).magnitude();
        let rejected = match cull {
            CullMode::None => a.abs() <= threshold,
            CullMode::Back => a <= threshold,
        };
        if rejected {
            return None;
        }

        let f = 1.0 / a;
        let s = ray.origin - self.v0;
        let u = f * s.dot(&h);
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        let q = s.cross(&edge1);
        let v = f * ray.direction.dot(&q);
        if v < 0.0 || u + v > 1.0 {
            return None;
        }

        let t = f * edge2.dot(&q);
        if t >= 0.0 {
            Some((t, u, v))
        } else {
            None // Behind ray origin
        }
    }

    /// Signed distance from a point to the triangle plane
    pub fn distance_to_point(&self, point: Vec3) -> f32 {
        self.normal().dot(&(point - self.v0))
    }
}
