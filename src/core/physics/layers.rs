//=========================================================================
// Collision Layers
//=========================================================================
//
// Which categories of body are allowed to touch which.
//
// Every body lives on exactly one `CollisionLayer`. Each layer carries a
// `CollisionFlags` mask naming the layers it wants to collide with. Two
// layers interact only when each one lists the other.
//
// Masks are plain data: the matrix can be built, inspected and compared
// without a running simulation.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;
use std::ops::{BitOr, BitOrAssign};

//=== CollisionLayer ======================================================

/// Collision category a body belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CollisionLayer {
    Friendly,
    FriendlyProjectiles,
    Hostile,
    HostileProjectiles,
    Platforms,
}

impl CollisionLayer {
    /// All layers, in declaration order.
    pub const ALL: [CollisionLayer; 5] = [
        CollisionLayer::Friendly,
        CollisionLayer::FriendlyProjectiles,
        CollisionLayer::Hostile,
        CollisionLayer::HostileProjectiles,
        CollisionLayer::Platforms,
    ];

    /// Number of layers.
    pub const COUNT: usize = Self::ALL.len();

    fn index(self) -> usize {
        self as usize
    }

    /// The single-bit flag naming this layer.
    pub fn flag(self) -> CollisionFlags {
        CollisionFlags(1 << self.index())
    }
}

//=== CollisionFlags ======================================================

/// Bit set of collision layers.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CollisionFlags(u8);

impl CollisionFlags {
    pub const NONE: Self = Self(0);
    pub const FRIENDLY: Self = Self(1 << 0);
    pub const FRIENDLY_PROJECTILES: Self = Self(1 << 1);
    pub const HOSTILE: Self = Self(1 << 2);
    pub const HOSTILE_PROJECTILES: Self = Self(1 << 3);
    pub const PLATFORMS: Self = Self(1 << 4);

    /// Raw bit pattern.
    pub const fn bits(self) -> u8 {
        self.0
    }

    /// Returns `true` if every bit of `other` is set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns `true` if `layer`'s bit is set.
    pub fn has_layer(self, layer: CollisionLayer) -> bool {
        self.contains(layer.flag())
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Layers named by this mask, in declaration order.
    pub fn layers(self) -> impl Iterator<Item = CollisionLayer> {
        CollisionLayer::ALL
            .into_iter()
            .filter(move |layer| self.has_layer(*layer))
    }
}

impl BitOr for CollisionFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl BitOrAssign for CollisionFlags {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

impl From<CollisionLayer> for CollisionFlags {
    fn from(layer: CollisionLayer) -> Self {
        layer.flag()
    }
}

impl fmt::Debug for CollisionFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.layers()).finish()
    }
}

//=== CollisionMatrix =====================================================

/// Per-layer collision masks.
///
/// A fresh matrix has every mask empty: nothing collides until configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionMatrix {
    masks: [CollisionFlags; CollisionLayer::COUNT],
}

impl CollisionMatrix {
    pub fn new() -> Self {
        Self::default()
    }

    /// The rule set installed by the GameManager at startup.
    ///
    /// | layer               | collides with                                       |
    /// |---------------------|-----------------------------------------------------|
    /// | Friendly            | Hostile, HostileProjectiles, Platforms              |
    /// | FriendlyProjectiles | Hostile                                             |
    /// | Hostile             | Friendly, FriendlyProjectiles                       |
    /// | HostileProjectiles  | Friendly                                            |
    /// | Platforms           | Friendly, FriendlyProjectiles, HostileProjectiles   |
    pub fn game_rules() -> Self {
        let mut matrix = Self::new();
        for (layer, mask) in Self::GAME_RULES {
            matrix.set_mask(layer, mask);
        }
        matrix
    }

    /// Startup rules as (layer, mask) pairs, in the order they are applied.
    pub const GAME_RULES: [(CollisionLayer, CollisionFlags); CollisionLayer::COUNT] = [
        (
            CollisionLayer::Friendly,
            CollisionFlags(
                CollisionFlags::HOSTILE.0
                    | CollisionFlags::HOSTILE_PROJECTILES.0
                    | CollisionFlags::PLATFORMS.0,
            ),
        ),
        (CollisionLayer::FriendlyProjectiles, CollisionFlags::HOSTILE),
        (
            CollisionLayer::Hostile,
            CollisionFlags(CollisionFlags::FRIENDLY.0 | CollisionFlags::FRIENDLY_PROJECTILES.0),
        ),
        (CollisionLayer::HostileProjectiles, CollisionFlags::FRIENDLY),
        (
            CollisionLayer::Platforms,
            CollisionFlags(
                CollisionFlags::FRIENDLY.0
                    | CollisionFlags::FRIENDLY_PROJECTILES.0
                    | CollisionFlags::HOSTILE_PROJECTILES.0,
            ),
        ),
    ];

    //--- Access -----------------------------------------------------------

    /// Replaces the mask of `layer`.
    pub fn set_mask(&mut self, layer: CollisionLayer, mask: CollisionFlags) {
        self.masks[layer.index()] = mask;
    }

    /// Mask currently configured for `layer`.
    pub fn mask(&self, layer: CollisionLayer) -> CollisionFlags {
        self.masks[layer.index()]
    }

    //--- Policy -----------------------------------------------------------

    /// Returns `true` when `a` and `b` list each other.
    pub fn interacts(&self, a: CollisionLayer, b: CollisionLayer) -> bool {
        self.mask(a).has_layer(b) && self.mask(b).has_layer(a)
    }

    /// Pairs `(a, b)` where `a` lists `b` but `b` does not list `a`.
    ///
    /// Such entries never produce contacts; they are reported so a
    /// misconfigured rule set shows up in the log.
    pub fn asymmetric_pairs(&self) -> Vec<(CollisionLayer, CollisionLayer)> {
        let mut pairs = Vec::new();
        for a in CollisionLayer::ALL {
            for b in self.mask(a).layers() {
                if !self.mask(b).has_layer(a) {
                    pairs.push((a, b));
                }
            }
        }
        pairs
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
