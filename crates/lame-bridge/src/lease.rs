//! Scoped leases over caller-owned output buffers.
//!
//! A codec call never writes into a caller's output buffer directly. The
//! buffer is leased for the duration of one call: the codec writes into a
//! staged copy, and the lease is released exactly once, either committing
//! the staged contents back ([`Release::Commit`]) or discarding them
//! ([`Release::Abort`]). A lease that goes out of scope unreleased, including
//! during unwinding, aborts.
//!
//! Input buffers are not leased. They are handed to the codec in place, so
//! anything the codec does to them is visible to the caller on every path.

use derive_more::Debug;

/// How a lease hands its staged contents back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// Copy the staged contents into the caller's buffer.
    Commit,
    /// Leave the caller's buffer as it was before the call.
    Abort,
}

impl Release {
    /// Commit on a non-negative codec status, abort on a negative one.
    #[inline]
    pub fn for_status(ret: i32) -> Self {
        if ret < 0 { Self::Abort } else { Self::Commit }
    }
}

/// Exclusive, call-scoped lease over a caller's output buffer.
#[derive(Debug)]
pub struct OutputLease<'a, T: Copy> {
    target: &'a mut [T],
    #[debug(skip)]
    staged: Vec<T>,
    released: bool,
}

impl<'a, T: Copy> OutputLease<'a, T> {
    /// Leases `target`. The staged copy starts with the target's contents so
    /// a commit only changes what the codec wrote.
    pub fn acquire(target: &'a mut [T]) -> Self {
        let staged = target.to_vec();
        Self {
            target,
            staged,
            released: false,
        }
    }

    /// The staged buffer handed to the codec.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.staged
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.staged.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.staged.is_empty()
    }

    /// Releases the lease.
    pub fn release(mut self, mode: Release) {
        self.finish(mode);
    }

    /// Releases according to a codec status and returns the status.
    pub fn settle(self, ret: i32) -> i32 {
        self.release(Release::for_status(ret));
        ret
    }

    fn finish(&mut self, mode: Release) {
        if self.released {
            return;
        }
        self.released = true;
        if mode == Release::Commit {
            self.target.copy_from_slice(&self.staged);
        }
    }
}

impl<T: Copy> Drop for OutputLease<'_, T> {
    fn drop(&mut self) {
        self.finish(Release::Abort);
    }
}
