//! Device error type.

/// Errors surfaced by the device layer.
///
/// The arithmetic core never fails; out-of-range indices and seeks are
/// clamped. The only runtime failure is a second concurrent attach.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeviceError {
    /// Another session already holds the device.
    #[error("device /dev/{name} is busy")]
    Busy {
        /// Device name.
        name: String,
    },

    /// A raw seek origin outside `0..=2`.
    #[error("invalid seek origin: {0}")]
    InvalidOrigin(i32),
}
