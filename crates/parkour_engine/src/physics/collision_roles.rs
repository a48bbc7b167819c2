//! Roles a collidable plays in the per-frame collision passes

use bitflags::bitflags;

bitflags! {
    /// Which collision passes test a collidable
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct CollisionRoles: u32 {
        /// Tested by the downward ground probe
        const GROUND_PROBE = 1 << 0;
        /// Tested by the swept movement clamp
        const SWEEP = 1 << 1;

        /// Floors: stand on them, walk over their edges freely
        const GROUND = Self::GROUND_PROBE.bits();
        /// Platforms: stand on them and bump into them
        const PLATFORM = Self::GROUND_PROBE.bits() | Self::SWEEP.bits();
    }
}

impl Default for CollisionRoles {
    fn default() -> Self {
        Self::PLATFORM
    }
}
