//! Error handling for StepKit
//!
//! The layout core has a deliberately narrow error taxonomy. Every variant
//! describes a refused mutation: when an operation returns one of these the
//! object store is left exactly as it was. Hosts are free to ignore the error
//! and render the returned flag instead.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

use crate::geometry::{Footprint, GridResolution, LocalCell};
use crate::ids::ObjectId;

/// Layout error type
///
/// Represents refused placements and mutations in the canvas layout engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// The referenced object is not in the store, or is of the wrong kind
    /// for the requested role (e.g. attaching to something that is not a step).
    #[error("Invalid target: {id}")]
    InvalidTarget {
        /// The id that could not be resolved.
        id: ObjectId,
    },

    /// The step grid cannot hold the requested footprint.
    #[error("Step {step_id} grid {resolution} cannot hold footprint {footprint}")]
    CapacityExceeded {
        /// The step whose grid was too small.
        step_id: ObjectId,
        /// The step's grid resolution at the time of the request.
        resolution: GridResolution,
        /// The footprint that did not fit.
        footprint: Footprint,
    },

    /// The requested cells are already occupied by another attached object.
    #[error("Cell {cell} in step {step_id} is occupied by {occupant}")]
    OverlapConflict {
        /// The step being placed into.
        step_id: ObjectId,
        /// The clamped target cell.
        cell: LocalCell,
        /// The first object found in the way.
        occupant: ObjectId,
    },

    /// Only icons can be attached to a step.
    #[error("Object {id} cannot be attached to a step")]
    NotAttachable {
        /// The object that was asked to attach.
        id: ObjectId,
    },

    /// A property update does not apply to the object's kind.
    #[error("Property '{property}' does not apply to {kind} object {id}")]
    PropertyMismatch {
        /// The object being edited.
        id: ObjectId,
        /// The object's kind name.
        kind: &'static str,
        /// The property name.
        property: &'static str,
    },

    /// A layout constant is outside its usable range.
    #[error("Invalid layout config '{key}': {reason}")]
    InvalidConfig {
        /// The offending key.
        key: &'static str,
        /// Why the value was rejected.
        reason: String,
    },
}

impl LayoutError {
    /// Check if this error means the placement was blocked by the grid itself
    /// (too small) or by another occupant.
    pub fn is_placement_refusal(&self) -> bool {
        matches!(
            self,
            LayoutError::CapacityExceeded { .. } | LayoutError::OverlapConflict { .. }
        )
    }
}

/// Result type using LayoutError
pub type Result<T> = std::result::Result<T, LayoutError>;
