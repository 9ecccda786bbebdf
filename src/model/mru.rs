use std::collections::VecDeque;
use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;

use crate::common::collections::HashSet;
use crate::model::scope::ScopeId;
use crate::sys::window::WindowId;

/// One scope's cycle state: the MRU ordering plus the in-cycle offset.
#[derive(Debug, Default)]
struct ScopeMru {
    order: VecDeque<WindowId>,
    offset: usize,
}

/// Thread-safe map of per-scope MRU lists, most recently used first, no
/// duplicates. Operations on one scope serialize on that scope's shard lock;
/// different scopes proceed independently.
#[derive(Clone, Default, Debug)]
pub struct MruStore(Arc<DashMap<ScopeId, ScopeMru>>);

impl MruStore {
    pub fn new() -> Self { Self::default() }

    /// Moves `window` to the front of the scope's list, inserting it if
    /// absent, and resets the cycle offset.
    pub fn touch(&self, scope: &ScopeId, window: WindowId) {
        match self.0.entry(scope.clone()) {
            Entry::Occupied(mut entry) => {
                let mru = entry.get_mut();
                if let Some(position) = mru.order.iter().position(|&w| w == window) {
                    mru.order.remove(position);
                }
                mru.order.push_front(window);
                mru.offset = 0;
            }
            Entry::Vacant(entry) => {
                entry.insert(ScopeMru { order: VecDeque::from([window]), offset: 0 });
            }
        }
    }

    /// Drops every entry the predicate rejects. The offset is left alone;
    /// `advance` re-derives a valid one on the next cycle step.
    pub fn prune(&self, scope: &ScopeId, mut is_still_valid: impl FnMut(WindowId) -> bool) {
        if let Some(mut mru) = self.0.get_mut(scope) {
            mru.order.retain(|&window| is_still_valid(window));
        }
    }

    /// Appends candidates not yet in the list, keeping candidate order.
    /// Existing entries are never reordered.
    pub fn append_missing(&self, scope: &ScopeId, candidates: &[WindowId]) {
        let mut mru = self.0.entry(scope.clone()).or_default();
        let mut present: HashSet<WindowId> = mru.order.iter().copied().collect();
        for &candidate in candidates {
            if present.insert(candidate) {
                mru.order.push_back(candidate);
            }
        }
    }

    /// One cycle step: walks the offset forward, wrapping past the end back
    /// to the front, and names the window now under the offset.
    pub fn advance(&self, scope: &ScopeId) -> Option<WindowId> {
        let mut mru = self.0.get_mut(scope)?;
        if mru.order.is_empty() {
            mru.offset = 0;
            return None;
        }
        mru.offset = if mru.offset + 1 < mru.order.len() { mru.offset + 1 } else { 0 };
        mru.order.get(mru.offset).copied()
    }

    pub fn is_empty(&self, scope: &ScopeId) -> bool {
        self.0.get(scope).map(|mru| mru.order.is_empty()).unwrap_or(true)
    }

    /// Front-to-back copy of one scope's list.
    pub fn snapshot(&self, scope: &ScopeId) -> Vec<WindowId> {
        self.0.get(scope).map(|mru| mru.order.iter().copied().collect()).unwrap_or_default()
    }

    pub fn offset(&self, scope: &ScopeId) -> usize {
        self.0.get(scope).map(|mru| mru.offset).unwrap_or(0)
    }
}
