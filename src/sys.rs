pub mod window;

#[cfg(windows)]
pub mod win32;
