use tracing::trace;

use crate::model::scope::{self, ScopeId};
use crate::sys::window::{WindowId, WindowStyles, WindowSystem};

/// Decides which windows count as cycle candidates during a scope refresh.
#[derive(Debug, Clone, Copy)]
pub struct EligibilityPolicy {
    ignore_minimized: bool,
}

impl EligibilityPolicy {
    pub fn new(ignore_minimized: bool) -> EligibilityPolicy {
        EligibilityPolicy { ignore_minimized }
    }

    /// Whether minimized windows are excluded from cycling and pruned.
    pub fn ignore_minimized(&self) -> bool { self.ignore_minimized }

    /// Candidate filter for one scope refresh. Cheap attribute checks run
    /// before the per-window scope resolution.
    pub fn is_eligible<S: WindowSystem>(
        &self,
        system: &S,
        candidate: WindowId,
        foreground: WindowId,
        foreground_scope: &ScopeId,
    ) -> bool {
        if candidate == foreground {
            // The foreground window enters the list through a touch, never
            // through the candidate refresh.
            return false;
        }
        if self.ignore_minimized && system.is_minimized(candidate) {
            return false;
        }
        if system.has_owner(candidate) || !system.is_visible(candidate) {
            return false;
        }
        let styles = system.styles(candidate);
        // Popups stay out unless they declare themselves application windows,
        // which dialog-style main windows do.
        if styles.contains(WindowStyles::POPUP) && !styles.contains(WindowStyles::APP_WINDOW) {
            return false;
        }
        if styles.contains(WindowStyles::TOOL_WINDOW) {
            return false;
        }
        match system.frame(candidate) {
            Some(frame) if frame.width() > 1 && frame.height() > 1 => {}
            _ => return false,
        }
        if scope::resolve(system, candidate) != *foreground_scope {
            return false;
        }
        system.is_on_current_desktop(candidate)
    }

    /// All currently open windows eligible for `foreground`'s scope, in OS
    /// enumeration order.
    pub fn eligible_windows<S: WindowSystem>(
        &self,
        system: &S,
        foreground: WindowId,
        foreground_scope: &ScopeId,
    ) -> Vec<WindowId> {
        let candidates: Vec<WindowId> = system
            .top_level_windows()
            .into_iter()
            .filter(|&candidate| self.is_eligible(system, candidate, foreground, foreground_scope))
            .collect();
        trace!(%foreground, count = candidates.len(), "eligible candidates");
        candidates
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::sys::window::testing::{FakeWindow, FakeWindowSystem};
    use crate::sys::window::{ProcessId, Rect};

    const EDITOR: ProcessId = ProcessId::new(100);
    const SHELL: ProcessId = ProcessId::new(200);
    const FG: WindowId = WindowId::new(1);
    const CANDIDATE: WindowId = WindowId::new(2);

    fn system_with_foreground() -> (FakeWindowSystem, ScopeId) {
        let system = FakeWindowSystem::new();
        system.put(FG, FakeWindow::app(EDITOR));
        system.set_path(EDITOR, r"C:\editor.exe");
        system.set_foreground(Some(FG));
        let scope = scope::resolve(&system, FG);
        (system, scope)
    }

    fn eligible(system: &FakeWindowSystem, scope: &ScopeId, window: FakeWindow) -> bool {
        system.put(CANDIDATE, window);
        EligibilityPolicy::new(true).is_eligible(system, CANDIDATE, FG, scope)
    }

    #[test]
    fn plain_sibling_window_is_eligible() {
        let (system, scope) = system_with_foreground();
        assert!(eligible(&system, &scope, FakeWindow::app(EDITOR)));
    }

    #[test]
    fn the_foreground_window_itself_is_not_a_candidate() {
        let (system, scope) = system_with_foreground();
        assert!(!EligibilityPolicy::new(true).is_eligible(&system, FG, FG, &scope));
    }

    #[test]
    fn minimized_windows_follow_the_policy() {
        let (system, scope) = system_with_foreground();
        system.put(CANDIDATE, FakeWindow::app(EDITOR).minimized());
        assert!(!EligibilityPolicy::new(true).is_eligible(&system, CANDIDATE, FG, &scope));
        assert!(EligibilityPolicy::new(false).is_eligible(&system, CANDIDATE, FG, &scope));
    }

    #[test]
    fn owned_and_invisible_windows_are_rejected() {
        let (system, scope) = system_with_foreground();
        assert!(!eligible(&system, &scope, FakeWindow::app(EDITOR).owned()));
        assert!(!eligible(&system, &scope, FakeWindow::app(EDITOR).hidden()));
    }

    #[test]
    fn popups_are_rejected_unless_declared_app_windows() {
        let (system, scope) = system_with_foreground();
        assert!(!eligible(&system, &scope, FakeWindow::app(EDITOR).styles(WindowStyles::POPUP)));
        assert!(eligible(
            &system,
            &scope,
            FakeWindow::app(EDITOR).styles(WindowStyles::POPUP | WindowStyles::APP_WINDOW),
        ));
    }

    #[test]
    fn tool_windows_are_rejected() {
        let (system, scope) = system_with_foreground();
        assert!(!eligible(
            &system,
            &scope,
            FakeWindow::app(EDITOR).styles(WindowStyles::TOOL_WINDOW)
        ));
    }

    #[test]
    fn degenerate_frames_are_rejected() {
        let (system, scope) = system_with_foreground();
        let thin = FakeWindow::app(EDITOR).frame(Some(Rect::new(0, 0, 1, 600)));
        let flat = FakeWindow::app(EDITOR).frame(Some(Rect::new(0, 0, 800, 1)));
        assert!(!eligible(&system, &scope, thin));
        assert!(!eligible(&system, &scope, flat));
        assert!(!eligible(&system, &scope, FakeWindow::app(EDITOR).frame(None)));
    }

    #[test]
    fn windows_of_other_processes_are_rejected() {
        let (system, scope) = system_with_foreground();
        system.set_path(SHELL, r"C:\shell.exe");
        assert!(!eligible(&system, &scope, FakeWindow::app(SHELL)));
    }

    #[test]
    fn windows_on_other_desktops_are_rejected() {
        let (system, scope) = system_with_foreground();
        assert!(!eligible(&system, &scope, FakeWindow::app(EDITOR).on_other_desktop()));
    }

    #[test]
    fn enumeration_order_is_preserved() {
        let (system, scope) = system_with_foreground();
        let (a, b, c) = (WindowId::new(10), WindowId::new(11), WindowId::new(12));
        system.put(a, FakeWindow::app(EDITOR));
        system.put(b, FakeWindow::app(EDITOR).minimized());
        system.put(c, FakeWindow::app(EDITOR));

        let policy = EligibilityPolicy::new(true);
        assert_eq!(policy.eligible_windows(&system, FG, &scope), vec![a, c]);
    }
}
