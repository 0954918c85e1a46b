//! Generation error type.
//!
//! Only the primary strategy surfaces errors; the public `generate`
//! entry point converts them into a fallback map instead of failing.

use thiserror::Error;

/// Reasons the primary BSP strategy can refuse to produce a map.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenError {
    #[error("grid {width}x{height} is too small to host any partition")]
    GridTooSmall { width: u32, height: u32 },

    #[error("no rooms could be placed in any leaf partition")]
    NoRoomsPlaced,
}
