use serde::Serialize;

use crate::rigid_body::Vec2;
use crate::rigid_body_system::BodyHandle;

/// Result of the narrow phase for one ordered body pair
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Contact {
    /// Unit normal pointing from the first body to the second (world orientation)
    pub normal: Vec2,
    /// Overlap along the normal, never negative
    pub depth: f32,
}

impl Contact {
    #[inline]
    pub fn new(normal: Vec2, depth: f32) -> Self {
        Self { normal, depth: depth.max(0.0) }
    }

    /// Same contact seen from the other body
    #[inline]
    pub fn reversed(self) -> Self {
        Self { normal: -self.normal, depth: self.depth }
    }
}

/// A pair skipped during a step because it could not be resolved
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct PairFault {
    pub first: BodyHandle,
    pub second: BodyHandle,
    pub reason: String,
}
