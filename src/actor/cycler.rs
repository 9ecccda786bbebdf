//! The cycle controller: a press/release state machine that walks a scope's
//! MRU list on each hotkey press and commits the final selection when the
//! modifier is released.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tokio::task::JoinHandle;
use tracing::{debug, instrument, trace, warn};

use crate::actor;
use crate::model::eligibility::EligibilityPolicy;
use crate::model::mru::MruStore;
use crate::model::scope;
use crate::sys::window::{WindowId, WindowSystem};

#[derive(Debug)]
pub enum Event {
    /// The cycle hotkey fired: advance one step and arm the session.
    CyclePressed,
    /// The configured modifier came back up while the session was armed.
    /// Carries the window that was foreground at release time, captured
    /// inside the keyboard hook before it returned control to the OS.
    ModifierReleased { foreground: Option<WindowId> },
}

pub type Sender = actor::Sender<Event>;
pub type Receiver = actor::Receiver<Event>;

/// The armed bit of a cycle session, shared between this actor and the
/// keyboard hook. The hook test-and-clears it on modifier release, so each
/// armed cycle produces exactly one [`Event::ModifierReleased`].
#[derive(Clone, Debug, Default)]
pub struct ArmedFlag(Arc<AtomicBool>);

impl ArmedFlag {
    pub fn new() -> ArmedFlag { ArmedFlag::default() }

    pub fn is_armed(&self) -> bool { self.0.load(Ordering::SeqCst) }

    /// Atomically reads and clears the flag, returning the previous value.
    pub fn test_and_clear(&self) -> bool { self.0.swap(false, Ordering::SeqCst) }

    fn arm(&self) { self.0.store(true, Ordering::SeqCst) }

    fn clear(&self) { self.0.store(false, Ordering::SeqCst) }
}

pub struct Cycler<S> {
    system: S,
    store: MruStore,
    policy: EligibilityPolicy,
    armed: ArmedFlag,
    /// The window this engine last moved focus to. A foreground window that
    /// differs from it at press time means the user switched windows some
    /// other way in between, and the MRU list must resynchronize first.
    last_focused: Option<WindowId>,
    rx: Receiver,
}

impl<S: WindowSystem + Clone + Send + 'static> Cycler<S> {
    pub fn new(
        system: S,
        store: MruStore,
        policy: EligibilityPolicy,
        armed: ArmedFlag,
        rx: Receiver,
    ) -> Self {
        Self { system, store, policy, armed, last_focused: None, rx }
    }

    pub async fn run(mut self) {
        while let Some((span, event)) = self.rx.recv().await {
            let _guard = span.enter();
            self.handle_event(event);
        }
    }

    #[instrument(skip(self))]
    fn handle_event(&mut self, event: Event) {
        match event {
            Event::CyclePressed => self.handle_press(),
            Event::ModifierReleased { foreground } => {
                let _ = self.handle_commit(foreground);
            }
        }
    }

    /// One cycle step: resynchronize the foreground scope's list, walk the
    /// offset forward, raise the window it lands on, and arm the session for
    /// the release commit.
    fn handle_press(&mut self) {
        let Some(foreground) = self.system.foreground_window() else {
            trace!("press with no foreground window");
            return;
        };
        let scope = scope::resolve(&self.system, foreground);
        if scope.is_empty() {
            trace!(%foreground, "press in an unresolvable scope");
            return;
        }

        let system = &self.system;
        let ignore_minimized = self.policy.ignore_minimized();
        self.store.prune(&scope, |window| {
            system.window_exists(window) && !(ignore_minimized && system.is_minimized(window))
        });

        // A foreground window we did not put there means the user switched
        // some other way since the last step; fold it in before advancing.
        if self.last_focused != Some(foreground) {
            self.store.touch(&scope, foreground);
        }

        let candidates = self.policy.eligible_windows(&self.system, foreground, &scope);
        self.store.append_missing(&scope, &candidates);

        if self.store.is_empty(&scope) {
            debug!(%scope, "no cycle candidates");
            return;
        }

        if let Some(target) = self.store.advance(&scope)
            && target != foreground
        {
            // the handle may have gone stale since the prune above
            if self.system.window_exists(target) {
                if !self.system.raise_window(target) {
                    warn!(%target, "window raise rejected");
                }
                self.last_focused = Some(target);
            } else {
                trace!(%target, "cycle target vanished before raise");
            }
        }

        self.armed.arm();
        debug!(%scope, offset = self.store.offset(&scope), "cycle step");
    }

    /// The release commit: promote whatever was foreground at release time to
    /// the front of its scope's list. The store write runs on a blocking
    /// worker so this loop is immediately free for the next press; the
    /// reorder lands eventually, not synchronously with the release.
    fn handle_commit(&mut self, foreground: Option<WindowId>) -> Option<JoinHandle<()>> {
        self.armed.clear();
        self.last_focused = foreground;
        let window = foreground?;
        let system = self.system.clone();
        let store = self.store.clone();
        Some(tokio::task::spawn_blocking(move || {
            let scope = scope::resolve(&system, window);
            if scope.is_empty() {
                trace!(%window, "commit in an unresolvable scope");
                return;
            }
            store.touch(&scope, window);
            debug!(%scope, %window, "committed");
        }))
    }
}
