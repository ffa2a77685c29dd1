// File: crates/lumen-core/src/animation.rs
// Summary: Animation session owning every live animation handle, driven by injected time steps.

use indexmap::IndexMap;
use tracing::debug;

/// Something advanced by elapsed time until it finishes.
pub trait Animation {
    /// Advance by `dt_ms` milliseconds. Returns `false` once finished.
    fn advance(&mut self, dt_ms: f64) -> bool;

    fn is_finished(&self) -> bool;
}

/// Opaque id of an animation started on a session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AnimationHandle(u64);

/// The set of animations a renderer has scheduled.
///
/// Redraws driven by new filters go through [`AnimationSession::restart`], so
/// stale animations never keep advancing next to the new run.
pub struct AnimationSession<A> {
    next_id: u64,
    live: IndexMap<AnimationHandle, A>,
}

impl<A> Default for AnimationSession<A> {
    fn default() -> Self {
        Self { next_id: 0, live: IndexMap::new() }
    }
}

impl<A: Animation> AnimationSession<A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, animation: A) -> AnimationHandle {
        let handle = AnimationHandle(self.next_id);
        self.next_id += 1;
        self.live.insert(handle, animation);
        handle
    }

    /// Drop one animation. Returns whether it was live.
    pub fn cancel(&mut self, handle: AnimationHandle) -> bool {
        self.live.shift_remove(&handle).is_some()
    }

    /// Drop every animation; returns how many there were.
    pub fn cancel_all(&mut self) -> usize {
        let n = self.live.len();
        self.live.clear();
        if n > 0 {
            debug!(cancelled = n, "animations cancelled");
        }
        n
    }

    /// Cancel everything, then start `animations` in order.
    pub fn restart(&mut self, animations: impl IntoIterator<Item = A>) -> Vec<AnimationHandle> {
        self.cancel_all();
        animations.into_iter().map(|a| self.start(a)).collect()
    }

    /// Advance every unfinished animation. Finished ones stay readable until
    /// cancelled. Returns the number still running.
    pub fn tick(&mut self, dt_ms: f64) -> usize {
        self.live
            .values_mut()
            .filter(|a| !a.is_finished())
            .map(|a| a.advance(dt_ms))
            .filter(|&running| running)
            .count()
    }

    pub fn get(&self, handle: AnimationHandle) -> Option<&A> {
        self.live.get(&handle)
    }

    pub fn is_live(&self, handle: AnimationHandle) -> bool {
        self.live.contains_key(&handle)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AnimationHandle, &A)> {
        self.live.iter().map(|(h, a)| (*h, a))
    }

    pub fn len(&self) -> usize {
        self.live.len()
    }

    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Whether every live animation has finished.
    pub fn is_idle(&self) -> bool {
        self.live.values().all(|a| a.is_finished())
    }
}
