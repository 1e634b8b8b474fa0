//! Error handling and exit codes.

use fibdrv_core::constants::exit_codes;
use fibdrv_device::DeviceError;

/// Map a device error to its exit code.
pub fn handle_error(err: &DeviceError) -> i32 {
    match err {
        DeviceError::Busy { .. } => exit_codes::ERROR_BUSY,
        DeviceError::InvalidOrigin(_) => exit_codes::ERROR_CONFIG,
    }
}

/// Exit code for any error returned by [`crate::app::run`].
pub fn exit_code(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<DeviceError>()
        .map_or(exit_codes::ERROR_GENERIC, handle_error)
}
