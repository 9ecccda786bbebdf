use std::ffi::c_void;

use windows::Win32::Foundation::{
    BOOL, CloseHandle, FALSE, HANDLE, HWND, LPARAM, MAX_PATH, RECT, TRUE,
};
use windows::Win32::System::Threading::{
    OpenProcess, PROCESS_NAME_WIN32, PROCESS_QUERY_LIMITED_INFORMATION,
    QueryFullProcessImageNameW,
};
use windows::Win32::UI::WindowsAndMessaging::{
    EnumWindows, GW_OWNER, GWL_EXSTYLE, GWL_STYLE, GetForegroundWindow, GetWindow,
    GetWindowLongW, GetWindowRect, GetWindowThreadProcessId, IsIconic, IsWindow, IsWindowVisible,
    SW_RESTORE, SetForegroundWindow, ShowWindow, WS_EX_APPWINDOW, WS_EX_TOOLWINDOW, WS_POPUP,
};
use windows::core::PWSTR;

use crate::sys::win32::desktop;
use crate::sys::window::{DesktopId, ProcessId, Rect, WindowId, WindowStyles, WindowSystem};

pub(crate) fn hwnd(window: WindowId) -> HWND { HWND(window.get() as *mut c_void) }

pub(crate) fn foreground_window() -> Option<WindowId> {
    let foreground = unsafe { GetForegroundWindow() };
    if foreground.0.is_null() { None } else { Some(WindowId::new(foreground.0 as isize)) }
}

/// Closes the process handle when the lookup is done with it.
struct ProcessHandle(HANDLE);

impl Drop for ProcessHandle {
    fn drop(&mut self) {
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

unsafe extern "system" fn push_window(handle: HWND, lparam: LPARAM) -> BOOL {
    let windows = unsafe { &mut *(lparam.0 as *mut Vec<WindowId>) };
    windows.push(WindowId::new(handle.0 as isize));
    TRUE
}

/// [`WindowSystem`] backed by the live Win32 window manager. Every call is a
/// direct OS query; nothing is cached.
#[derive(Clone, Copy, Debug, Default)]
pub struct Win32WindowSystem;

impl WindowSystem for Win32WindowSystem {
    fn foreground_window(&self) -> Option<WindowId> { foreground_window() }

    fn window_exists(&self, window: WindowId) -> bool {
        unsafe { IsWindow(hwnd(window)) }.as_bool()
    }

    fn is_minimized(&self, window: WindowId) -> bool {
        unsafe { IsIconic(hwnd(window)) }.as_bool()
    }

    fn is_visible(&self, window: WindowId) -> bool {
        unsafe { IsWindowVisible(hwnd(window)) }.as_bool()
    }

    fn has_owner(&self, window: WindowId) -> bool {
        unsafe { GetWindow(hwnd(window), GW_OWNER) }.is_ok_and(|owner| !owner.0.is_null())
    }

    fn styles(&self, window: WindowId) -> WindowStyles {
        let style = unsafe { GetWindowLongW(hwnd(window), GWL_STYLE) } as u32;
        let ex_style = unsafe { GetWindowLongW(hwnd(window), GWL_EXSTYLE) } as u32;
        let mut styles = WindowStyles::empty();
        styles.set(WindowStyles::POPUP, style & WS_POPUP.0 != 0);
        styles.set(WindowStyles::TOOL_WINDOW, ex_style & WS_EX_TOOLWINDOW.0 != 0);
        styles.set(WindowStyles::APP_WINDOW, ex_style & WS_EX_APPWINDOW.0 != 0);
        styles
    }

    fn frame(&self, window: WindowId) -> Option<Rect> {
        let mut rect = RECT::default();
        unsafe { GetWindowRect(hwnd(window), &mut rect) }.ok()?;
        Some(Rect::new(rect.left, rect.top, rect.right, rect.bottom))
    }

    fn owning_process(&self, window: WindowId) -> Option<ProcessId> {
        let mut pid = 0u32;
        unsafe { GetWindowThreadProcessId(hwnd(window), Some(&mut pid)) };
        (pid != 0).then(|| ProcessId::new(pid))
    }

    fn executable_path(&self, process: ProcessId) -> Option<String> {
        let handle = unsafe { OpenProcess(PROCESS_QUERY_LIMITED_INFORMATION, FALSE, process.get()) }
            .ok()
            .map(ProcessHandle)?;
        let mut buf = [0u16; MAX_PATH as usize];
        let mut len = buf.len() as u32;
        unsafe {
            QueryFullProcessImageNameW(
                handle.0,
                PROCESS_NAME_WIN32,
                PWSTR(buf.as_mut_ptr()),
                &mut len,
            )
        }
        .ok()?;
        Some(String::from_utf16_lossy(&buf[..len as usize]))
    }

    fn current_desktop_id(&self) -> Option<DesktopId> { desktop::current_desktop_id() }

    fn is_on_current_desktop(&self, window: WindowId) -> bool {
        desktop::is_on_current_desktop(window)
    }

    fn top_level_windows(&self) -> Vec<WindowId> {
        let mut windows: Vec<WindowId> = Vec::new();
        let _ = unsafe {
            EnumWindows(Some(push_window), LPARAM(&mut windows as *mut Vec<WindowId> as isize))
        };
        windows
    }

    fn raise_window(&self, window: WindowId) -> bool {
        let handle = hwnd(window);
        unsafe {
            if IsIconic(handle).as_bool() {
                let _ = ShowWindow(handle, SW_RESTORE);
            }
            SetForegroundWindow(handle).as_bool()
        }
    }
}
