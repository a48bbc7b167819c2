//! Nearest-hit ray queries over triangle soups

use super::primitives::{CullMode, Ray, RayHit, Triangle};

/// Find the closest intersection of `ray` with any of `triangles`
///
/// Returns `None` for an empty slice or a degenerate ray direction. Among hits
/// at equal distance the first one tested wins. Pure function; callers may run
/// it concurrently over independent triangle sets.
pub fn nearest_hit(ray: &Ray, triangles: &[Triangle], cull: CullMode) -> Option<RayHit> {
    if triangles.is_empty() || ray.is_degenerate() {
        return None;
    }

    let mut closest: Option<RayHit> = None;

    for (index, triangle) in triangles.iter().enumerate() {
        let Some((t, _u, _v)) = triangle.intersect_ray(ray, cull) else {
            continue;
        };

        if closest.map_or(true, |hit| t < hit.distance) {
            closest = Some(RayHit {
                distance: t,
                point: ray.point_at(t),
                normal: triangle.normal(),
                triangle: index,
            });
        }
    }

    closest
}
