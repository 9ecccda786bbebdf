//! Virtual-desktop membership via the shell's `IVirtualDesktopManager`.
//!
//! The manager is a COM object, so every thread that asks gets its own
//! instance, created lazily after per-thread COM initialization. A machine
//! without the service (or a failing shell) degrades to "one desktop".

use tracing::debug;
use windows::Win32::System::Com::{
    CLSCTX_ALL, COINIT_MULTITHREADED, CoCreateInstance, CoInitializeEx,
};
use windows::Win32::UI::Shell::{IVirtualDesktopManager, VirtualDesktopManager};

use crate::sys::win32::window_system;
use crate::sys::window::{DesktopId, WindowId};

thread_local! {
    static DESKTOP_MANAGER: Option<IVirtualDesktopManager> = create_manager();
}

fn create_manager() -> Option<IVirtualDesktopManager> {
    unsafe {
        let _ = CoInitializeEx(None, COINIT_MULTITHREADED);
        match CoCreateInstance(&VirtualDesktopManager, None, CLSCTX_ALL) {
            Ok(manager) => Some(manager),
            Err(error) => {
                debug!(%error, "virtual desktop manager unavailable");
                None
            }
        }
    }
}

/// Identifier of the desktop currently in front, read off the foreground
/// window. `None` when the desktop service is unavailable or there is no
/// foreground window to ask about.
pub fn current_desktop_id() -> Option<DesktopId> {
    DESKTOP_MANAGER.with(|manager| {
        let manager = manager.as_ref()?;
        let foreground = window_system::foreground_window()?;
        let guid = unsafe { manager.GetWindowDesktopId(window_system::hwnd(foreground)) }.ok()?;
        Some(DesktopId::new(format!("{guid:?}")))
    })
}

/// Whether the window sits on the desktop currently in front. Anything that
/// cannot be answered (no service, query failure) counts as on it.
pub fn is_on_current_desktop(window: WindowId) -> bool {
    DESKTOP_MANAGER.with(|manager| {
        let Some(manager) = manager.as_ref() else {
            return true;
        };
        match unsafe { manager.IsWindowOnCurrentVirtualDesktop(window_system::hwnd(window)) } {
            Ok(on_current) => on_current.as_bool(),
            Err(_) => true,
        }
    })
}
