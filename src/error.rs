//! Error types for layout computations

use thiserror::Error;

/// Errors that can occur when deriving radar geometry from the layout
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// A radar-frame transform was asked for an object whose geometry is
    /// not a point. Only radar devices (point geometry) may anchor a
    /// coordinate transform, so this is a caller-side invariant violation.
    #[error("object {id} has {kind} geometry, expected a point")]
    NotPointGeometry { id: String, kind: &'static str },

    /// An area id outside the hardware range 0-15
    #[error("area id {0} out of range (0-15)")]
    AreaIdOutOfRange(u8),
}
