//! Registry of collidable mesh instances
//!
//! Each registered instance pairs the geometry of a loaded mesh with the
//! placement the renderer currently draws it at. World-space triangles are
//! cached per instance and rebuilt only after the placement changes.
//!
//! Instances whose mesh failed to load or has no triangles stay registered
//! but are skipped by every query: a partially loaded level must keep
//! running.

use slotmap::{new_key_type, SlotMap};

use crate::physics::collision::{world_triangles, CullMode, MeshSnapshot, Placement, Ray, RayHit, WorldSpaceCollisionMesh};
use crate::physics::collision_roles::CollisionRoles;

new_key_type! {
    /// Handle to a collidable registered in a [`CollisionWorld`]
    pub struct CollidableId;
}

/// One collidable mesh instance
#[derive(Debug, Clone)]
pub struct Collidable {
    name: String,
    snapshot: Option<MeshSnapshot>,
    placement: Placement,
    roles: CollisionRoles,
    world: Option<WorldSpaceCollisionMesh>,
}

impl Collidable {
    /// Create a collidable; `snapshot` is `None` when its mesh did not load
    pub fn new(
        name: impl Into<String>,
        snapshot: Option<MeshSnapshot>,
        placement: Placement,
        roles: CollisionRoles,
    ) -> Self {
        Self {
            name: name.into(),
            snapshot,
            placement,
            roles,
            world: None,
        }
    }

    /// Instance name used in logs
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current placement
    pub fn placement(&self) -> &Placement {
        &self.placement
    }

    /// Collision passes this instance takes part in
    pub fn roles(&self) -> CollisionRoles {
        self.roles
    }

    /// Model-space geometry, if the mesh loaded
    pub fn snapshot(&self) -> Option<&MeshSnapshot> {
        self.snapshot.as_ref()
    }

    /// Whether queries can hit this instance at all
    pub fn has_geometry(&self) -> bool {
        self.snapshot.as_ref().is_some_and(|s| !s.is_empty())
    }

    /// Move the instance; the cached world geometry is dropped if it changed
    pub fn set_placement(&mut self, placement: Placement) {
        if placement != self.placement {
            self.placement = placement;
            self.world = None;
        }
    }

    /// World-space geometry, rebuilt if the placement changed since last use
    pub fn world_mesh(&mut self) -> Option<&WorldSpaceCollisionMesh> {
        let snapshot = self.snapshot.as_ref().filter(|s| !s.is_empty())?;
        if self.world.is_none() {
            log::trace!("Rebuilding world triangles for '{}'", self.name);
        }
        let placement = &self.placement;
        Some(self.world.get_or_insert_with(|| world_triangles(snapshot, placement)))
    }
}

/// All collidable instances of a scene
#[derive(Debug, Default)]
pub struct CollisionWorld {
    collidables: SlotMap<CollidableId, Collidable>,
}

impl CollisionWorld {
    /// Create an empty world
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an instance and return its handle
    pub fn register(&mut self, collidable: Collidable) -> CollidableId {
        if !collidable.has_geometry() {
            log::warn!(
                "Collidable '{}' has no collision geometry; it will be ignored",
                collidable.name()
            );
        }
        self.collidables.insert(collidable)
    }

    /// Remove an instance
    pub fn unregister(&mut self, id: CollidableId) -> Option<Collidable> {
        self.collidables.remove(id)
    }

    /// Look up an instance
    pub fn get(&self, id: CollidableId) -> Option<&Collidable> {
        self.collidables.get(id)
    }

    /// Look up an instance mutably, e.g. to animate its placement
    pub fn get_mut(&mut self, id: CollidableId) -> Option<&mut Collidable> {
        self.collidables.get_mut(id)
    }

    /// Find an instance by name
    pub fn find(&self, name: &str) -> Option<CollidableId> {
        self.collidables
            .iter()
            .find_map(|(id, c)| (c.name() == name).then_some(id))
    }

    /// Number of registered instances
    pub fn len(&self) -> usize {
        self.collidables.len()
    }

    /// Whether nothing is registered
    pub fn is_empty(&self) -> bool {
        self.collidables.is_empty()
    }

    /// Whether any instance with geometry takes part in `role`
    pub fn has_role(&self, role: CollisionRoles) -> bool {
        self.collidables
            .values()
            .any(|c| c.roles().intersects(role) && c.has_geometry())
    }

    /// Nearest hit of `ray` over every instance taking part in `role`
    pub fn cast(&mut self, ray: &Ray, role: CollisionRoles, cull: CullMode) -> Option<RayHit> {
        let mut nearest = None;

        for collidable in self.collidables.values_mut() {
            if !collidable.roles().intersects(role) {
                continue;
            }
            let Some(mesh) = collidable.world_mesh() else {
                continue;
            };
            nearest = RayHit::nearer(nearest, mesh.intersect_ray(ray, cull));
        }

        nearest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::math::Vec3;
    use crate::physics::collision::Triangle;
    use approx::assert_relative_eq;

    fn floor(y: f32) -> MeshSnapshot {
        let a = Vec3::new(-5.0, y, 5.0);
        let b = Vec3::new(5.0, y, 5.0);
        let c = Vec3::new(5.0, y, -5.0);
        let d = Vec3::new(-5.0, y, -5.0);
        MeshSnapshot::from_triangles(vec![Triangle::new(a, b, c), Triangle::new(a, c, d)])
    }

    #[test]
    fn test_cast_picks_nearest_across_instances() {
        let mut world = CollisionWorld::new();
        world.register(Collidable::new("low", Some(floor(0.0)), Placement::identity(), CollisionRoles::GROUND));
        world.register(Collidable::new("high", Some(floor(0.0)), Placement::at(Vec3::new(0.0, 2.0, 0.0)), CollisionRoles::PLATFORM));

        let hit = world
            .cast(&Ray::down(Vec3::new(1.0, 10.0, 1.0)), CollisionRoles::GROUND_PROBE, CullMode::None)
            .unwrap();
        assert_relative_eq!(hit.point.y, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_cast_respects_roles() {
        let mut world = CollisionWorld::new();
        world.register(Collidable::new("floor", Some(floor(0.0)), Placement::identity(), CollisionRoles::GROUND));

        assert!(!world.has_role(CollisionRoles::SWEEP));
        assert!(world
            .cast(&Ray::down(Vec3::new(0.0, 3.0, 0.0)), CollisionRoles::SWEEP, CullMode::None)
            .is_none());
    }

    #[test]
    fn test_missing_and_empty_meshes_are_skipped() {
        let mut world = CollisionWorld::new();
        world.register(Collidable::new("missing", None, Placement::identity(), CollisionRoles::PLATFORM));
        world.register(Collidable::new("empty", Some(MeshSnapshot::empty()), Placement::identity(), CollisionRoles::PLATFORM));

        assert_eq!(world.len(), 2);
        assert!(!world.has_role(CollisionRoles::SWEEP));
        assert!(world
            .cast(&Ray::down(Vec3::new(0.0, 3.0, 0.0)), CollisionRoles::all(), CullMode::None)
            .is_none());
    }

    #[test]
    fn test_placement_change_invalidates_cache() {
        let mut world = CollisionWorld::new();
        let id = world.register(Collidable::new("lift", Some(floor(0.0)), Placement::identity(), CollisionRoles::PLATFORM));
        let ray = Ray::down(Vec3::new(0.0, 10.0, 0.0));

        let before = world.cast(&ray, CollisionRoles::GROUND_PROBE, CullMode::None).unwrap();
        assert_relative_eq!(before.point.y, 0.0, epsilon = 1e-5);

        world.get_mut(id).unwrap().set_placement(Placement::at(Vec3::new(0.0, 4.0, 0.0)));
        let after = world.cast(&ray, CollisionRoles::GROUND_PROBE, CullMode::None).unwrap();
        assert_relative_eq!(after.point.y, 4.0, epsilon = 1e-5);
    }

    #[test]
    fn test_cached_mesh_matches_recomputation() {
        let placement = Placement::new(Vec3::new(-8.0, -3.0, -8.0), Vec3::new(1.0, 0.3, 0.5));
        let mut collidable = Collidable::new("p", Some(floor(1.0)), placement, CollisionRoles::PLATFORM);

        let first = collidable.world_mesh().cloned().unwrap();
        let second = collidable.world_mesh().cloned().unwrap();
        assert_eq!(first, second);
        assert_eq!(first, world_triangles(&floor(1.0), &placement));
    }

    #[test]
    fn test_find_and_unregister() {
        let mut world = CollisionWorld::new();
        let id = world.register(Collidable::new("floor", Some(floor(0.0)), Placement::identity(), CollisionRoles::GROUND));

        assert_eq!(world.find("floor"), Some(id));
        assert!(world.find("ceiling").is_none());
        assert_eq!(world.unregister(id).map(|c| c.name().to_string()), Some("floor".to_string()));
        assert!(world.is_empty());
    }
}
