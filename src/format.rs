//! Scratch-buffer formatting for the default strategy.

use std::fmt;

use crate::buffer::{Buffer, StackBuffer};

/// Returned by a generated body whose template could not be laid out.
pub const FALLBACK: &str = "<named-format: template mismatch>";

/// Format `args` through an `N`-byte stack scratch buffer.
///
/// Output longer than `N` bytes moves to the heap, so the result never
/// depends on `N`.
pub fn format_with_scratch<const N: usize>(args: fmt::Arguments<'_>) -> String {
    if let Some(text) = args.as_str() {
        return text.to_owned();
    }

    let mut scratch = Scratch::<N> {
        buf: StackBuffer::new(),
        pos: 0,
    };
    // Same contract as `format!`: the scratch writer never fails, so an error
    // can only come from a formatting impl.
    fmt::write(&mut scratch, args)
        .expect("a Display implementation returned an error unexpectedly");
    // SAFETY: only `&str` data is ever written.
    unsafe { scratch.buf.finish_unchecked(scratch.pos) }
}

struct Scratch<const N: usize> {
    buf: StackBuffer<N>,
    pos: usize,
}

impl<const N: usize> fmt::Write for Scratch<N> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let end = self.pos + s.len();
        self.buf.ensure(end);
        self.buf.as_mut_slice()[self.pos..end].copy_from_slice(s.as_bytes());
        self.pos = end;
        Ok(())
    }
}
