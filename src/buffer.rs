//! Position-tracked output buffers used by generated bodies.
//!
//! Generated code keeps its own cursor and only asks the buffer to grow
//! (`ensure`) before writing. Buffers never shrink while in use, so the
//! bytes before the cursor survive every growth step.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, OnceLock, PoisonError};

use crate::format_into::FormatInto;

/// Byte buffer written through a caller-held cursor.
pub trait Buffer {
    /// Grow so that at least `len` bytes are addressable.
    fn ensure(&mut self, len: usize);

    fn as_slice(&self) -> &[u8];

    fn as_mut_slice(&mut self) -> &mut [u8];

    /// Format `value` at `pos` and return the number of bytes written.
    ///
    /// Room for `max_len` bytes is made first. A value that still does not
    /// fit gets a doubled tail until it does.
    #[inline]
    fn format_at<T: FormatInto + ?Sized>(&mut self, pos: usize, value: &T) -> usize {
        let mut room = value.max_len().max(1);
        loop {
            self.ensure(pos + room);
            if let Some(written) = self
                .as_mut_slice()
                .get_mut(pos..)
                .and_then(|tail| value.try_format_into(tail))
            {
                return written;
            }
            room = room.saturating_mul(2);
            if room > MAX_FORMAT_LEN {
                return 0;
            }
        }
    }

    /// The first `len` bytes as a `String`. Invalid UTF-8 is replaced.
    fn finish(&self, len: usize) -> String {
        String::from_utf8_lossy(&self.as_slice()[..len]).into_owned()
    }

    /// The first `len` bytes as a `String`, unchecked.
    ///
    /// # Safety
    ///
    /// `len` must be within the buffer and the bytes must be valid UTF-8.
    unsafe fn finish_unchecked(&self, len: usize) -> String {
        unsafe { String::from_utf8_unchecked(self.as_slice().get_unchecked(..len).to_vec()) }
    }
}

/// Largest tail `format_at` offers a single value before giving up.
const MAX_FORMAT_LEN: usize = 1 << 30;

/// Growth target when a write does not fit.
fn grown(current: usize, needed: usize) -> usize {
    needed.max(current.saturating_mul(2))
}

/// `N` bytes on the stack, moving to the heap once a write needs more.
pub struct StackBuffer<const N: usize> {
    inline: [u8; N],
    spilled: Vec<u8>,
}

impl<const N: usize> StackBuffer<N> {
    #[inline]
    pub fn new() -> Self {
        Self {
            inline: [0; N],
            spilled: Vec::new(),
        }
    }

    #[cfg(test)]
    fn is_spilled(&self) -> bool {
        !self.spilled.is_empty()
    }
}

impl<const N: usize> Default for StackBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> Buffer for StackBuffer<N> {
    #[inline]
    fn ensure(&mut self, len: usize) {
        if self.spilled.is_empty() {
            if len <= N {
                return;
            }
            let mut heap = vec![0; grown(N, len)];
            heap[..N].copy_from_slice(&self.inline);
            self.spilled = heap;
        } else if len > self.spilled.len() {
            let target = grown(self.spilled.len(), len);
            self.spilled.resize(target, 0);
        }
    }

    #[inline]
    fn as_slice(&self) -> &[u8] {
        if self.spilled.is_empty() {
            &self.inline
        } else {
            &self.spilled
        }
    }

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [u8] {
        if self.spilled.is_empty() {
            &mut self.inline
        } else {
            &mut self.spilled
        }
    }
}

/// Most buffers a pool keeps for reuse.
const MAX_RETAINED: usize = 32;

/// Rent and return counts of a [`BufferPool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PoolStats {
    pub rented: usize,
    pub returned: usize,
}

impl PoolStats {
    /// Buffers rented and not yet returned.
    pub fn outstanding(&self) -> usize {
        self.rented.saturating_sub(self.returned)
    }
}

/// A pool of heap buffers for generated bodies with a large configured size.
#[derive(Debug, Default)]
pub struct BufferPool {
    free: Mutex<Vec<Vec<u8>>>,
    rented: AtomicUsize,
    returned: AtomicUsize,
}

impl BufferPool {
    pub fn new() -> Self {
        Self::default()
    }

    /// The process-wide pool generated code rents from.
    pub fn shared() -> &'static BufferPool {
        static INSTANCE: OnceLock<BufferPool> = OnceLock::new();
        INSTANCE.get_or_init(BufferPool::new)
    }

    /// Rent a buffer of at least `size` bytes. It goes back to the pool when
    /// the returned guard is dropped.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn rent(&self, size: usize) -> PooledBuffer<'_> {
        let reused = self
            .free
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop();
        let mut bytes = reused.unwrap_or_default();
        if bytes.len() < size {
            bytes.resize(size, 0);
        }
        self.rented.fetch_add(1, Ordering::Relaxed);
        PooledBuffer { pool: self, bytes }
    }

    fn give_back(&self, bytes: Vec<u8>) {
        self.returned.fetch_add(1, Ordering::Relaxed);
        let mut free = self.free.lock().unwrap_or_else(PoisonError::into_inner);
        if free.len() < MAX_RETAINED {
            free.push(bytes);
        }
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            rented: self.rented.load(Ordering::Relaxed),
            returned: self.returned.load(Ordering::Relaxed),
        }
    }

    /// Buffers currently waiting for reuse.
    pub fn idle(&self) -> usize {
        self.free.lock().unwrap_or_else(PoisonError::into_inner).len()
    }
}

/// A rented buffer; returned to its pool on drop.
pub struct PooledBuffer<'a> {
    pool: &'a BufferPool,
    bytes: Vec<u8>,
}

impl fmt::Debug for PooledBuffer<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PooledBuffer")
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl Buffer for PooledBuffer<'_> {
    #[inline]
    fn ensure(&mut self, len: usize) {
        if len > self.bytes.len() {
            let target = grown(self.bytes.len(), len);
            self.bytes.resize(target, 0);
        }
    }

    #[inline]
    fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

impl Drop for PooledBuffer<'_> {
    fn drop(&mut self) {
        self.pool.give_back(std::mem::take(&mut self.bytes));
    }
}
