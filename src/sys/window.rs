use std::fmt;

use bitflags::bitflags;

/// Handle to a top-level window. Nothing but an identity: the window behind
/// it can be destroyed at any moment, so validity must be re-checked at every
/// use.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(transparent)]
pub struct WindowId(isize);

impl WindowId {
    pub const fn new(id: isize) -> WindowId { WindowId(id) }

    pub fn get(&self) -> isize { self.0 }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { write!(f, "{:#x}", self.0) }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct ProcessId(u32);

impl ProcessId {
    pub const fn new(id: u32) -> ProcessId { ProcessId(id) }

    pub fn get(&self) -> u32 { self.0 }
}

/// Identifier of a virtual desktop, opaque to the engine. Stringly typed
/// because it only ever participates in scope-key concatenation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DesktopId(String);

impl DesktopId {
    pub fn new(id: impl Into<String>) -> DesktopId { DesktopId(id.into()) }

    pub fn as_str(&self) -> &str { &self.0 }
}

bitflags! {
    /// The style bits eligibility cares about, extracted from the platform's
    /// full style words by the backend.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct WindowStyles: u32 {
        /// Transient popup style.
        const POPUP = 1 << 0;
        /// Tool-window palettes and the like.
        const TOOL_WINDOW = 1 << 1;
        /// Window explicitly declared as an application window.
        const APP_WINDOW = 1 << 2;
    }
}

/// Window bounding rectangle in device units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Rect {
        Rect { left, top, right, bottom }
    }

    pub fn width(&self) -> i32 { self.right - self.left }

    pub fn height(&self) -> i32 { self.bottom - self.top }
}

/// The OS surface the engine runs against: window directory lookups, desktop
/// membership, and focus actuation.
///
/// Every query reflects live state at call time and fails fast. A query about
/// a window that has vanished answers with the "not there" value (`false`,
/// `None`, empty) rather than an error; the engine absorbs those silently.
pub trait WindowSystem {
    fn foreground_window(&self) -> Option<WindowId>;

    fn window_exists(&self, window: WindowId) -> bool;

    fn is_minimized(&self, window: WindowId) -> bool;

    fn is_visible(&self, window: WindowId) -> bool;

    /// Whether the window is owned by another window (dialogs, dropdowns).
    fn has_owner(&self, window: WindowId) -> bool;

    fn styles(&self, window: WindowId) -> WindowStyles;

    fn frame(&self, window: WindowId) -> Option<Rect>;

    fn owning_process(&self, window: WindowId) -> Option<ProcessId>;

    /// Full path of the process image. `None` when the process cannot be
    /// opened (gone, or insufficient privilege).
    fn executable_path(&self, process: ProcessId) -> Option<String>;

    /// Identifier of the virtual desktop currently in front, or `None` when
    /// the desktop service is unavailable.
    fn current_desktop_id(&self) -> Option<DesktopId>;

    /// Whether the window lives on the current virtual desktop. Reports
    /// `true` when the desktop service is unavailable, collapsing everything
    /// onto one desktop.
    fn is_on_current_desktop(&self, window: WindowId) -> bool;

    /// All top-level windows in the OS enumeration order.
    fn top_level_windows(&self) -> Vec<WindowId>;

    /// Brings the window to the foreground, restoring it first if minimized.
    /// Returns whether the OS accepted the request.
    fn raise_window(&self, window: WindowId) -> bool;
}
