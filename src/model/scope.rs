use std::fmt;

use tracing::trace;

use crate::sys::window::{DesktopId, WindowId, WindowSystem};

/// Identity of "one application on one virtual desktop": the current desktop
/// id concatenated with the owning executable's full path. Purely path and
/// desktop based, so relaunching the same binary lands in the same scope.
///
/// The empty string is the failure sentinel ("no scope"); callers never key a
/// store mutation by it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct ScopeId(String);

impl ScopeId {
    pub fn empty() -> ScopeId { ScopeId::default() }

    pub fn from_parts(desktop: Option<&DesktopId>, executable_path: &str) -> ScopeId {
        if executable_path.is_empty() {
            return ScopeId::empty();
        }
        match desktop {
            Some(desktop) => ScopeId(format!("{}{}", desktop.as_str(), executable_path)),
            None => ScopeId(executable_path.to_owned()),
        }
    }

    pub fn is_empty(&self) -> bool { self.0.is_empty() }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for ScopeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

/// Resolves the scope a window belongs to from live OS state. Deliberately
/// uncached: the path behind a pid and the desktop in front can both change
/// over the process lifetime.
pub fn resolve<S: WindowSystem>(system: &S, window: WindowId) -> ScopeId {
    let Some(process) = system.owning_process(window) else {
        trace!(%window, "scope: no owning process");
        return ScopeId::empty();
    };
    let Some(path) = system.executable_path(process) else {
        trace!(%window, process = process.get(), "scope: executable path unreadable");
        return ScopeId::empty();
    };
    ScopeId::from_parts(system.current_desktop_id().as_ref(), &path)
}

/// Whether two windows resolve to the same (non-empty) scope.
pub fn same_scope<S: WindowSystem>(system: &S, a: WindowId, b: WindowId) -> bool {
    let scope = resolve(system, a);
    !scope.is_empty() && scope == resolve(system, b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sys::window::ProcessId;
    use crate::sys::window::testing::{FakeWindow, FakeWindowSystem};

    const EDITOR: ProcessId = ProcessId::new(100);
    const SHELL: ProcessId = ProcessId::new(200);

    #[test]
    fn resolves_desktop_plus_path() {
        let system = FakeWindowSystem::new();
        let window = WindowId::new(1);
        system.put(window, FakeWindow::app(EDITOR));
        system.set_path(EDITOR, r"C:\editor.exe");

        let scope = resolve(&system, window);
        assert_eq!(scope.as_str(), r"desktop-aC:\editor.exe");
    }

    #[test]
    fn missing_desktop_service_leaves_path_only() {
        let system = FakeWindowSystem::without_desktop();
        let window = WindowId::new(1);
        system.put(window, FakeWindow::app(EDITOR));
        system.set_path(EDITOR, r"C:\editor.exe");

        assert_eq!(resolve(&system, window).as_str(), r"C:\editor.exe");
    }

    #[test]
    fn unreadable_path_resolves_to_the_empty_sentinel() {
        let system = FakeWindowSystem::new();
        let window = WindowId::new(1);
        system.put(window, FakeWindow::app(EDITOR));

        assert!(resolve(&system, window).is_empty());
    }

    #[test]
    fn destroyed_window_resolves_to_the_empty_sentinel() {
        let system = FakeWindowSystem::new();
        let window = WindowId::new(1);
        system.put(window, FakeWindow::app(EDITOR));
        system.set_path(EDITOR, r"C:\editor.exe");
        system.destroy(window);

        assert!(resolve(&system, window).is_empty());
    }

    #[test]
    fn same_scope_requires_equal_and_non_empty() {
        let system = FakeWindowSystem::new();
        let (a, b, c, broken) =
            (WindowId::new(1), WindowId::new(2), WindowId::new(3), WindowId::new(4));
        system.put(a, FakeWindow::app(EDITOR));
        system.put(b, FakeWindow::app(EDITOR));
        system.put(c, FakeWindow::app(SHELL));
        system.put(broken, FakeWindow::app(ProcessId::new(999)));
        system.set_path(EDITOR, r"C:\editor.exe");
        system.set_path(SHELL, r"C:\shell.exe");

        assert!(same_scope(&system, a, b));
        assert!(!same_scope(&system, a, c));
        assert!(!same_scope(&system, broken, broken));
    }
}
