//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Frame scheduling
//! - Input events
//! - Device detection
//! - Storage (LocalStorage on web)

pub mod device;
pub mod frame;
pub mod input;
pub mod storage;

pub use device::DeviceProfile;
pub use frame::{FrameHandle, FrameHost, FrameLoop};
pub use input::{TouchThrottle, command_for_key, command_for_pointer};
#[cfg(target_arch = "wasm32")]
pub use storage::LocalStore;
pub use storage::{KeyValueStore, MemoryStore};
