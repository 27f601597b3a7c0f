//! Error types for sway-rig.

use crate::skeleton::BoneId;
use thiserror::Error;

/// Errors raised by skeleton construction and rig mutation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RigError {
    /// No bone carries the given name.
    #[error("bone not found: {0:?}")]
    BoneNotFound(String),

    /// Bone ID does not belong to this skeleton.
    #[error("invalid bone: {0}")]
    InvalidBone(BoneId),

    /// Parent must already exist when a bone is added.
    #[error("bone {bone} references missing parent {parent}")]
    InvalidParent {
        /// The bone being added.
        bone: BoneId,
        /// The parent it referenced.
        parent: BoneId,
    },
}
