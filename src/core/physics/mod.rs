//=========================================================================
// Physics System
//
// Collision bookkeeping for the framework.
//
// Responsibilities:
// - Hold the per-layer collision masks (`CollisionMatrix`)
// - Keep a registry of axis-aligned bodies, one layer each
// - Recompute the set of contacts once per late update
//
// Notes:
// There is no integration or response here. Screens move bodies through
// `set_body_bounds` during their update and read `contacts()` on the next
// frame, after the GameManager has run `PhysicsService::update()`.
//
//=========================================================================

//=== Submodules ==========================================================

mod body;
mod layers;

//=== Public Exports ======================================================

pub use body::{Aabb, BodyId, Contact};
pub use layers::{CollisionFlags, CollisionLayer, CollisionMatrix};

//=== External Crates =====================================================

use log::{debug, trace, warn};

//=== Internal Imports ====================================================

use crate::core::Subsystem;
use body::Body;

//=== PhysicsService ======================================================

/// Collision contract used by the GameManager and screens.
pub trait PhysicsService: Subsystem {
    //--- Layer policy -----------------------------------------------------

    /// Replaces the collision mask of `layer`.
    fn set_layer_collision_mask(&mut self, layer: CollisionLayer, mask: CollisionFlags);

    fn layer_collision_mask(&self, layer: CollisionLayer) -> CollisionFlags;

    //--- Step -------------------------------------------------------------

    /// Recomputes contacts from the current body bounds.
    fn update(&mut self);

    //--- Bodies -----------------------------------------------------------

    fn add_body(&mut self, layer: CollisionLayer, bounds: Aabb) -> BodyId;

    /// Removes a body. Returns `false` if `id` is unknown.
    fn remove_body(&mut self, id: BodyId) -> bool;

    /// Moves or resizes a body. Returns `false` if `id` is unknown.
    fn set_body_bounds(&mut self, id: BodyId, bounds: Aabb) -> bool;

    fn body_bounds(&self, id: BodyId) -> Option<Aabb>;

    /// Contacts found by the last `update()`.
    fn contacts(&self) -> &[Contact];
}

//=== PhysicsManager ======================================================

/// Default [`PhysicsService`]: brute-force pair test over all bodies.
#[derive(Debug, Default)]
pub struct PhysicsManager {
    matrix: CollisionMatrix,
    bodies: Vec<Body>,
    contacts: Vec<Contact>,
    next_id: u32,
}

impl PhysicsManager {
    /// Creates a manager with an empty matrix and no bodies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the configured masks.
    pub fn matrix(&self) -> CollisionMatrix {
        self.matrix
    }

    pub fn body_count(&self) -> usize {
        self.bodies.len()
    }

    fn find_mut(&mut self, id: BodyId) -> Option<&mut Body> {
        self.bodies.iter_mut().find(|body| body.id == id)
    }
}

impl PhysicsService for PhysicsManager {
    fn set_layer_collision_mask(&mut self, layer: CollisionLayer, mask: CollisionFlags) {
        debug!(target: "physics", "Collision mask {:?} -> {:?}", layer, mask);
        self.matrix.set_mask(layer, mask);
    }

    fn layer_collision_mask(&self, layer: CollisionLayer) -> CollisionFlags {
        self.matrix.mask(layer)
    }

    fn update(&mut self) {
        self.contacts.clear();

        for (i, first) in self.bodies.iter().enumerate() {
            for second in &self.bodies[i + 1..] {
                if self.matrix.interacts(first.layer, second.layer)
                    && first.bounds.overlaps(&second.bounds)
                {
                    self.contacts.push(Contact::ordered(first.id, second.id));
                }
            }
        }

        if !self.contacts.is_empty() {
            trace!(target: "physics", "{} contacts", self.contacts.len());
        }
    }

    fn add_body(&mut self, layer: CollisionLayer, bounds: Aabb) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id = self.next_id.wrapping_add(1);
        self.bodies.push(Body { id, layer, bounds });
        id
    }

    fn remove_body(&mut self, id: BodyId) -> bool {
        let before = self.bodies.len();
        self.bodies.retain(|body| body.id != id);
        self.contacts.retain(|contact| !contact.involves(id));

        let removed = self.bodies.len() != before;
        if !removed {
            warn!(target: "physics", "remove_body: unknown {:?}", id);
        }
        removed
    }

    fn set_body_bounds(&mut self, id: BodyId, bounds: Aabb) -> bool {
        match self.find_mut(id) {
            Some(body) => {
                body.bounds = bounds;
                true
            }
            None => false,
        }
    }

    fn body_bounds(&self, id: BodyId) -> Option<Aabb> {
        self.bodies
            .iter()
            .find(|body| body.id == id)
            .map(|body| body.bounds)
    }

    fn contacts(&self) -> &[Contact] {
        &self.contacts
    }
}

impl Subsystem for PhysicsManager {
    fn name(&self) -> &'static str {
        "physics"
    }

    fn release(&mut self) {
        debug!(target: "physics", "Releasing {} bodies", self.bodies.len());
        self.bodies.clear();
        self.contacts.clear();
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
