//! Bone-local forward axis selection.

use glam::Vec3;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The bone-local direction a jiggle bone points along at rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ForwardAxis {
    /// +X.
    XPlus,
    /// +Y.
    YPlus,
    /// +Z.
    ZPlus,
    /// -X.
    XMinus,
    /// -Y.
    YMinus,
    /// -Z.
    #[default]
    ZMinus,
}

impl ForwardAxis {
    /// All six axes.
    pub const ALL: [ForwardAxis; 6] = [
        ForwardAxis::XPlus,
        ForwardAxis::YPlus,
        ForwardAxis::ZPlus,
        ForwardAxis::XMinus,
        ForwardAxis::YMinus,
        ForwardAxis::ZMinus,
    ];

    /// Unit vector for this axis.
    pub const fn direction(self) -> Vec3 {
        match self {
            ForwardAxis::XPlus => Vec3::X,
            ForwardAxis::YPlus => Vec3::Y,
            ForwardAxis::ZPlus => Vec3::Z,
            ForwardAxis::XMinus => Vec3::NEG_X,
            ForwardAxis::YMinus => Vec3::NEG_Y,
            ForwardAxis::ZMinus => Vec3::NEG_Z,
        }
    }
}

impl From<ForwardAxis> for Vec3 {
    fn from(axis: ForwardAxis) -> Self {
        axis.direction()
    }
}
