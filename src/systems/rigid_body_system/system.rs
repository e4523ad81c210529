use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::{PhysicsError, PhysicsResult, MAX_PHYSIC_BODIES};
use crate::rigid_body::PhysicBody;

/// Stable reference to a pooled body.
///
/// Destroying a body bumps its slot generation, so handles issued before
/// the destroy are rejected instead of aliasing whatever reuses the slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BodyHandle {
    index: u32,
    generation: u32,
}

impl BodyHandle {
    pub fn index(&self) -> u32 {
        self.index
    }

    pub fn generation(&self) -> u32 {
        self.generation
    }

    /// Pack into one integer (generation high, index low) for FFI.
    pub fn to_bits(&self) -> u64 {
        ((self.generation as u64) << 32) | self.index as u64
    }

    pub fn from_bits(bits: u64) -> Self {
        Self {
            index: bits as u32,
            generation: (bits >> 32) as u32,
        }
    }
}

impl fmt::Display for BodyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}v{}", self.index, self.generation)
    }
}

struct Slot {
    generation: u32,
    body: Option<PhysicBody>,
}

/// Owns every body in the simulation
pub struct RigidBodySystem {
    slots: Vec<Slot>,
    free: Vec<u32>,
    /// Live slot indices in creation order; position == body id
    order: Vec<u32>,
    capacity: usize,
}

impl RigidBodySystem {
    pub fn new() -> Self {
        Self::with_capacity(MAX_PHYSIC_BODIES)
    }

    /// Pool holding at most `capacity` bodies (never more than `MAX_PHYSIC_BODIES`)
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.min(MAX_PHYSIC_BODIES);
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            order: Vec::with_capacity(capacity),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Add a body at the end of pool order.
    ///
    /// The body's `id` is overwritten with its dense index.
    pub fn add_body(&mut self, mut body: PhysicBody) -> PhysicsResult<BodyHandle> {
        if self.order.len() >= self.capacity {
            return Err(PhysicsError::PoolExhausted { capacity: self.capacity });
        }

        body.id = self.order.len() as u32;

        let index = match self.free.pop() {
            Some(index) => {
                self.slots[index as usize].body = Some(body);
                index
            }
            None => {
                self.slots.push(Slot { generation: 0, body: Some(body) });
                (self.slots.len() - 1) as u32
            }
        };
        self.order.push(index);

        Ok(BodyHandle {
            index,
            generation: self.slots[index as usize].generation,
        })
    }

    /// Remove a body and renumber the ids of the bodies left in the pool.
    ///
    /// Pool position comes from the handle, never from the body's `id`.
    pub fn remove_body(&mut self, handle: BodyHandle) -> PhysicsResult<PhysicBody> {
        self.get(handle)?;
        let pos = self
            .order
            .iter()
            .position(|&index| index == handle.index)
            .ok_or(PhysicsError::StaleHandle(handle))?;

        let slot = &mut self.slots[handle.index as usize];
        let mut body = slot.body.take().ok_or(PhysicsError::StaleHandle(handle))?;
        slot.generation = slot.generation.wrapping_add(1);
        self.free.push(handle.index);

        self.order.remove(pos);
        body.id = pos as u32;
        self.renumber();

        Ok(body)
    }

    fn renumber(&mut self) {
        for (dense, &index) in self.order.iter().enumerate() {
            if let Some(b) = self.slots[index as usize].body.as_mut() {
                b.id = dense as u32;
            }
        }
    }

    /// Remove all bodies. Outstanding handles become stale.
    pub fn clear(&mut self) {
        for &index in &self.order {
            let slot = &mut self.slots[index as usize];
            slot.body = None;
            slot.generation = slot.generation.wrapping_add(1);
            self.free.push(index);
        }
        self.order.clear();
    }

    pub fn body_count(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn contains(&self, handle: BodyHandle) -> bool {
        self.get(handle).is_ok()
    }

    pub fn get(&self, handle: BodyHandle) -> PhysicsResult<&PhysicBody> {
        match self.slots.get(handle.index as usize) {
            Some(slot) if slot.generation == handle.generation => {
                slot.body.as_ref().ok_or(PhysicsError::StaleHandle(handle))
            }
            _ => Err(PhysicsError::StaleHandle(handle)),
        }
    }

    pub fn get_mut(&mut self, handle: BodyHandle) -> PhysicsResult<&mut PhysicBody> {
        match self.slots.get_mut(handle.index as usize) {
            Some(slot) if slot.generation == handle.generation => {
                slot.body.as_mut().ok_or(PhysicsError::StaleHandle(handle))
            }
            _ => Err(PhysicsError::StaleHandle(handle)),
        }
    }

    /// Handle of the body currently at dense index `id`
    pub fn handle_at(&self, id: usize) -> Option<BodyHandle> {
        let index = *self.order.get(id)?;
        Some(BodyHandle {
            index,
            generation: self.slots[index as usize].generation,
        })
    }

    pub fn body_at(&self, id: usize) -> Option<&PhysicBody> {
        let index = *self.order.get(id)?;
        self.slots[index as usize].body.as_ref()
    }

    /// Handles in pool order
    pub fn handles(&self) -> impl Iterator<Item = BodyHandle> + '_ {
        self.order.iter().map(move |&index| BodyHandle {
            index,
            generation: self.slots[index as usize].generation,
        })
    }

    /// Bodies in pool order
    pub fn iter(&self) -> impl Iterator<Item = &PhysicBody> + '_ {
        self.order
            .iter()
            .filter_map(move |&index| self.slots[index as usize].body.as_ref())
    }

    /// Every live body, in slot order (not pool order)
    pub(crate) fn bodies_mut(&mut self) -> impl Iterator<Item = &mut PhysicBody> + '_ {
        self.slots.iter_mut().filter_map(|slot| slot.body.as_mut())
    }

    #[cfg(feature = "parallel")]
    pub(crate) fn par_bodies_mut(
        &mut self,
    ) -> impl rayon::iter::ParallelIterator<Item = &mut PhysicBody> + '_ {
        use rayon::prelude::*;
        self.slots.par_iter_mut().filter_map(|slot| slot.body.as_mut())
    }

    /// Slot indices in pool order, for the pair loop
    pub(crate) fn order(&self) -> &[u32] {
        &self.order
    }

    /// Two distinct bodies by slot index, mutably
    pub(crate) fn pair_mut(&mut self, a: u32, b: u32) -> Option<(&mut PhysicBody, &mut PhysicBody)> {
        let (a, b) = (a as usize, b as usize);
        if a == b || a >= self.slots.len() || b >= self.slots.len() {
            return None;
        }
        if a < b {
            let (lo, hi) = self.slots.split_at_mut(b);
            Some((lo[a].body.as_mut()?, hi[0].body.as_mut()?))
        } else {
            let (lo, hi) = self.slots.split_at_mut(a);
            Some((hi[0].body.as_mut()?, lo[b].body.as_mut()?))
        }
    }
}

impl Default for RigidBodySystem {
    fn default() -> Self {
        Self::new()
    }
}
