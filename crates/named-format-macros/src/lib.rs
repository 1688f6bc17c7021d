//! named-format proc macros
//!
//! Front-end for the template compiler in `named-format-core`.
//!
//! # Macros
//!
//! - `#[named_formats]` - Generate the template stubs of an impl block
//!
//! # Example
//!
//! ```ignore
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

use proc_macro::TokenStream;

mod attrs;
mod named_formats;

/// Generate the bodies of template stubs in an inherent impl block.
///
/// A stub is an associated function without receiver and without body that
/// returns `String` and carries `#[template("...")]`. Each `{placeholder}`
/// in the template is filled by the parameter in the same position, so the
/// template needs exactly one placeholder per parameter. Other items in the
/// block are left untouched.
///
/// # Arguments
///
/// - `optimize` / `optimize = bool` - Use the optimizing emitter
/// - `buffer_size = N` - Initial buffer size for the optimizing emitter;
///   above 128 bytes the buffer is rented from a shared pool
/// - `strict_names` / `strict_names = bool` - Require placeholder names to
///   match parameter names
///
/// Arguments override the `NAMED_FORMAT_OPTIMIZATION_ENABLED`,
/// `NAMED_FORMAT_OPTIMIZATION_BUFFER_SIZE` and
/// `NAMED_FORMAT_STRICT_PLACEHOLDER_NAMES` environment variables read at
/// expansion time.
///
/// ## Parameter Formatting
///
/// Parameters are formatted by type: strings are copied, integers, `bool`
/// and `char` are written in place, and everything else goes through
/// `Display`. Use `#[fmt(...)]` on a parameter to choose explicitly:
///
/// ```ignore
/// #[template("{id}/{tags}")]
/// fn tagged(#[fmt(fast)] id: PostId, #[fmt(debug)] tags: Vec<&str>) -> String;
/// ```
///
/// # Errors
///
/// Template problems are reported on the stub as `NFG0001` to `NFG0006`;
/// the rest of the block is still generated.
#[proc_macro_attribute]
pub fn named_formats(attr: TokenStream, item: TokenStream) -> TokenStream {
    named_formats::named_formats_impl(attr, item)
}

// Note: #[template("...")] and #[fmt(...)] are inert helper attributes. They are
// consumed by #[named_formats] and never expanded on their own.
