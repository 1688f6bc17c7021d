//! named-format
//!
//! Compile-time named string templates. Write a body-less stub with a
//! template and `#[named_formats]` generates the function that fills it:
//!
//! ```
//! use named_format::named_formats;
//!
//! pub struct Routes;
//!
//! #[named_formats]
//! impl Routes {
//!     #[template("/forum/{boardId}/{boardNameSlug}")]
//!     pub fn board(board_id: u32, slug: &str) -> String;
//! }
//!
//! assert_eq!(Routes::board(7, "rust"), "/forum/7/rust");
//! ```
//!
//! Placeholders are filled positionally. The template is checked when the
//! macro expands; a malformed template or a placeholder count that differs
//! from the parameter count is a compile error on the stub.
//!
//! ## Strategies
//!
//! By default a generated body is a single `format_args!` call. With
//! `#[named_formats(optimize)]` (or `NAMED_FORMAT_OPTIMIZATION_ENABLED=true`)
//! bodies write each piece straight into a buffer, using [`FormatInto`] for
//! integers, `bool` and `char`. `buffer_size = N` above 128 rents the buffer
//! from [`BufferPool::shared`].

extern crate self as named_format;

mod buffer;
mod format;
mod format_into;

pub use buffer::{BufferPool, PoolStats};
pub use format_into::FormatInto;
pub use named_format_macros::named_formats;

/// Support items for generated code. Not public API.
#[doc(hidden)]
pub mod __private {
    pub use crate::buffer::{Buffer, BufferPool, PooledBuffer, StackBuffer};
    pub use crate::format::{FALLBACK, format_with_scratch};
    pub use crate::format_into::FormatInto;
}

#[cfg(test)]
mod tests {
    use crate::named_formats;

    struct Routes;

    #[named_formats]
    impl Routes {
        #[template("/forum/{boardId}/{boardNameSlug}")]
        fn board(board_id: u32, slug: &str) -> String;
    }

    #[test]
    fn generated_code_resolves_inside_the_crate() {
        assert_eq!(Routes::board(3, "general"), "/forum/3/general");
    }
}
