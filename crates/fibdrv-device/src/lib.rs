//! # fibdrv-device
//!
//! The request surface around the arithmetic core: a per-client
//! `SequenceSession` (cursor, last value, last elapsed time) and a
//! `FibDevice` that hands out at most one `FibFile` at a time.

pub mod device;
pub mod errors;
pub mod session;

pub use device::{FibDevice, FibFile};
pub use errors::DeviceError;
pub use session::{SeekOrigin, SequenceSession};
