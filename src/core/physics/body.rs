//=========================================================================
// Physics Bodies
//
// Axis-aligned boxes registered with the PhysicsManager, and the contacts
// produced when two of them overlap.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::layers::CollisionLayer;

//=== Aabb ================================================================

/// Axis-aligned bounding box, stored as min corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Aabb {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Aabb {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Strict overlap test: boxes that only share an edge do not overlap.
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Returns a copy moved by `(dx, dy)`.
    pub fn translated(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }
}

//=== BodyId ==============================================================

/// Opaque handle to a registered body. Never reused within one manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BodyId(pub(super) u32);

impl BodyId {
    pub fn raw(self) -> u32 {
        self.0
    }
}

//=== Body ================================================================

#[derive(Debug, Clone, Copy)]
pub(super) struct Body {
    pub id: BodyId,
    pub layer: CollisionLayer,
    pub bounds: Aabb,
}

//=== Contact =============================================================

/// Two overlapping bodies whose layers interact.
///
/// `a` is always the body with the smaller id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Contact {
    pub a: BodyId,
    pub b: BodyId,
}

impl Contact {
    pub(super) fn ordered(first: BodyId, second: BodyId) -> Self {
        if first <= second {
            Self { a: first, b: second }
        } else {
            Self { a: second, b: first }
        }
    }

    /// Returns `true` if either side is `id`.
    pub fn involves(&self, id: BodyId) -> bool {
        self.a == id || self.b == id
    }

    /// The other side of the contact, if `id` is one of them.
    pub fn other(&self, id: BodyId) -> Option<BodyId> {
        if self.a == id {
            Some(self.b)
        } else if self.b == id {
            Some(self.a)
        } else {
            None
        }
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_boxes() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.overlaps(&b));
        assert!(b.overlaps(&a));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Aabb::new(0.0, 0.0, 10.0, 10.0);
        let b = Aabb::new(10.0, 0.0, 10.0, 10.0);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn translated_keeps_size() {
        let moved = Aabb::new(1.0, 2.0, 3.0, 4.0).translated(10.0, -2.0);
        assert_eq!(moved, Aabb::new(11.0, 0.0, 3.0, 4.0));
        assert_eq!(moved.center(), (12.5, 2.0));
    }

    #[test]
    fn contact_is_ordered_by_id() {
        let contact = Contact::ordered(BodyId(7), BodyId(2));
        assert_eq!(contact.a, BodyId(2));
        assert_eq!(contact.b, BodyId(7));
        assert_eq!(contact.other(BodyId(7)), Some(BodyId(2)));
        assert_eq!(contact.other(BodyId(3)), None);
        assert!(contact.involves(BodyId(2)));
    }
}
