//! Level description and collision world construction
//!
//! A level lists the meshes it needs and the instances placed from them.
//! Meshes are procedural primitives stored under an asset path; instances
//! refer to meshes by that path, so a level can name a mesh nobody provided
//! and still load, just without that instance's collision.

use serde::{Deserialize, Serialize};

use crate::assets::{MeshLibrary, MeshLoader, PrimitiveShape};
use crate::config::ConfigError;
use crate::foundation::math::{utils, Mat4, Mat4Ext};
use crate::physics::{Collidable, CollisionRoles, CollisionWorld, MeshSnapshot, Placement};

fn unit_scale() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

/// How an instance takes part in collision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceRole {
    /// Stood on; never blocks movement
    Ground,
    /// Stood on and blocks movement
    #[default]
    Platform,
    /// Drawn only
    Decoration,
}

impl SurfaceRole {
    /// Collision passes for this role
    pub fn roles(self) -> CollisionRoles {
        match self {
            Self::Ground => CollisionRoles::GROUND,
            Self::Platform => CollisionRoles::PLATFORM,
            Self::Decoration => CollisionRoles::empty(),
        }
    }
}

/// A mesh made available to the level under an asset path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshEntry {
    /// Asset path instances refer to
    pub path: String,
    /// Generated geometry
    pub primitive: PrimitiveShape,
    /// Root node translation baked into the asset
    #[serde(default)]
    pub node_translation: [f32; 3],
    /// Root node scale baked into the asset
    #[serde(default = "unit_scale")]
    pub node_scale: [f32; 3],
}

impl MeshEntry {
    /// Mesh entry with an identity node transform
    pub fn new(path: impl Into<String>, primitive: PrimitiveShape) -> Self {
        Self {
            path: path.into(),
            primitive,
            node_translation: [0.0; 3],
            node_scale: unit_scale(),
        }
    }

    /// Set the root node translation
    pub fn with_node_translation(mut self, translation: [f32; 3]) -> Self {
        self.node_translation = translation;
        self
    }

    /// Node transform matrix
    pub fn node_transform(&self) -> Mat4 {
        Mat4::translate_scale(utils::vec3(self.node_translation), utils::vec3(self.node_scale))
    }
}

/// A placed mesh instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceConfig {
    /// Unique instance name
    pub name: String,
    /// Asset path of the mesh to place
    pub mesh: String,
    /// World translation
    #[serde(default)]
    pub translation: [f32; 3],
    /// Per-axis scale
    #[serde(default = "unit_scale")]
    pub scale: [f32; 3],
    /// Collision role
    #[serde(default)]
    pub role: SurfaceRole,
}

impl InstanceConfig {
    /// Instance with unit scale
    pub fn new(name: impl Into<String>, mesh: impl Into<String>, role: SurfaceRole) -> Self {
        Self {
            name: name.into(),
            mesh: mesh.into(),
            translation: [0.0; 3],
            scale: unit_scale(),
            role,
        }
    }

    /// Set the world translation
    pub fn at(mut self, translation: [f32; 3]) -> Self {
        self.translation = translation;
        self
    }

    /// Set the per-axis scale
    pub fn scaled(mut self, scale: [f32; 3]) -> Self {
        self.scale = scale;
        self
    }

    /// Placement handed to both renderer and collision
    pub fn placement(&self) -> Placement {
        Placement::new(utils::vec3(self.translation), utils::vec3(self.scale))
    }
}

/// Level description
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    /// Level name used in logs
    pub name: String,
    /// Meshes the level provides
    pub meshes: Vec<MeshEntry>,
    /// Placed instances
    pub instances: Vec<InstanceConfig>,
}

impl LevelConfig {
    /// Ground slab at y = -3 with one low platform to climb
    pub fn parkour() -> Self {
        Self {
            name: "parkour".to_string(),
            meshes: vec![
                ground_mesh(),
                // Base on y = 0 so scaling keeps it on the floor it is placed at
                MeshEntry::new("models/platform.glb", PrimitiveShape::cuboid(4.0, 2.5, 4.0))
                    .with_node_translation([0.0, 2.5, 0.0]),
            ],
            instances: vec![
                InstanceConfig::new("ground", "models/ground.glb", SurfaceRole::Ground)
                    .at([0.0, -3.0, 0.0]),
                InstanceConfig::new("platform1", "models/platform.glb", SurfaceRole::Platform)
                    .at([-8.0, -3.0, -8.0])
                    .scaled([1.0, 0.3, 0.5]),
            ],
        }
    }

    /// Open ground with nothing on it
    pub fn flat() -> Self {
        Self {
            name: "flat".to_string(),
            meshes: vec![ground_mesh()],
            instances: vec![
                InstanceConfig::new("ground", "models/ground.glb", SurfaceRole::Ground)
                    .at([0.0, -3.0, 0.0]),
            ],
        }
    }

    /// Check names and numbers; unknown mesh paths are allowed
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut names = std::collections::HashSet::new();
        for instance in &self.instances {
            if instance.name.is_empty() {
                return Err(ConfigError::Invalid("instance name must not be empty".to_string()));
            }
            if !names.insert(instance.name.as_str()) {
                return Err(ConfigError::Invalid(format!("duplicate instance '{}'", instance.name)));
            }
            if instance.translation.iter().chain(&instance.scale).any(|v| !v.is_finite()) {
                return Err(ConfigError::Invalid(format!(
                    "instance '{}' has a non-finite placement",
                    instance.name
                )));
            }
        }

        for mesh in &self.meshes {
            let extents_ok = match mesh.primitive {
                PrimitiveShape::Box { half_extents } => half_extents.iter().all(|v| *v > 0.0),
                PrimitiveShape::Plane { half_width, half_depth } => half_width > 0.0 && half_depth > 0.0,
            };
            if !extents_ok {
                return Err(ConfigError::Invalid(format!("mesh '{}' has non-positive extents", mesh.path)));
            }
        }

        Ok(())
    }

    /// Generate every mesh into an in-memory library
    pub fn mesh_library(&self) -> MeshLibrary {
        let mut library = MeshLibrary::new();
        for entry in &self.meshes {
            library.insert(entry.path.clone(), entry.primitive.build().with_node_transform(entry.node_transform()));
        }
        library
    }

    /// Load every instance's mesh through `loader` and register it
    ///
    /// Instances whose mesh is missing or invalid are still registered, with
    /// no geometry, and are ignored by collision.
    pub fn build_collision_world(&self, loader: &dyn MeshLoader) -> CollisionWorld {
        let mut world = CollisionWorld::new();

        for instance in &self.instances {
            let snapshot = load_snapshot(loader, &instance.mesh);
            world.register(Collidable::new(
                instance.name.clone(),
                snapshot,
                instance.placement(),
                instance.role.roles(),
            ));
        }

        log::info!(
            "Level '{}' loaded with {} collidables",
            self.name,
            world.len()
        );
        world
    }
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self::parkour()
    }
}

fn ground_mesh() -> MeshEntry {
    // Top face on y = 0
    MeshEntry::new("models/ground.glb", PrimitiveShape::cuboid(50.0, 0.5, 50.0))
        .with_node_translation([0.0, -0.5, 0.0])
}

fn load_snapshot(loader: &dyn MeshLoader, path: &str) -> Option<MeshSnapshot> {
    let asset = match loader.load_mesh(path) {
        Ok(asset) => asset,
        Err(err) => {
            log::warn!("Failed to load mesh '{}': {}", path, err);
            return None;
        }
    };

    if let Err(err) = asset.validate() {
        log::warn!("Mesh '{}' rejected: {}", path, err);
        return None;
    }

    Some(asset.collision_snapshot())
}
