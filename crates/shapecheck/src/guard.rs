//! # Strictness Scope Guard
//!
//! A comparison object carries one persistent strictness flag, but the
//! `exact`/`like` family of entry points must override it for the duration
//! of a single call and then put it back, whatever happens inside the call.
//! That save/set/restore sequence is a scoped-resource acquisition: the
//! resource is the flag's original value, and `Drop` is the release.
//!
//! The guard restores on every exit path — normal return, early `?`, and
//! unwinding — so no caller can observe another call's override once that
//! call has finished.

use std::cell::Cell;

/// Forces a strictness flag for the lifetime of the guard and restores the
/// prior value on drop.
///
/// `exact = true` clears the flag (extra keys rejected); `exact = false`
/// sets it (extra keys ignored).
#[derive(Debug)]
pub struct StrictnessGuard<'a> {
    flag: &'a Cell<bool>,
    saved: bool,
}

impl<'a> StrictnessGuard<'a> {
    /// Saves the flag's current value and forces it to `!exact`.
    pub fn set(flag: &'a Cell<bool>, exact: bool) -> Self {
        let saved = flag.get();
        flag.set(!exact);
        StrictnessGuard { flag, saved }
    }
}

impl Drop for StrictnessGuard<'_> {
    fn drop(&mut self) {
        self.flag.set(self.saved);
    }
}
