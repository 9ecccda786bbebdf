//! Win32 backend: the live window directory, virtual-desktop membership, the
//! two input sources, and the single-instance guard.

pub mod desktop;
pub mod hotkey;
pub mod keyboard_hook;
pub mod single_instance;
pub mod window_system;

pub use window_system::Win32WindowSystem;
