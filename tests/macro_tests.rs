//! Integration tests for `#[named_formats]`.

use std::borrow::Cow;
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

use named_format::{FormatInto, named_formats};

// ============================================================================
// Default Strategy
// ============================================================================

struct Routes;

/// Test the default strategy on a typical route.
#[named_formats(optimize = false)]
impl Routes {
    #[template("/forum/{boardId}/{boardNameSlug}")]
    pub fn board(board_id: u32, slug: &str) -> String;

    #[template("prefix {a} mid {b} suffix")]
    fn wrapped(a: &str, b: &str) -> String;

    #[template("{a}x{b}")]
    fn pair(a: i32, b: i32) -> String;

    #[template("")]
    fn empty() -> String;

    #[template("/static/path")]
    fn constant() -> String;

    /// Regular items stay in the impl.
    fn helper() -> u32 {
        42
    }
}

#[test]
fn test_default_round_trip() {
    assert_eq!(Routes::board(7, "rust"), "/forum/7/rust");
    assert_eq!(Routes::wrapped("A", "B"), "prefix A mid B suffix");
    assert_eq!(Routes::pair(1, 2), "1x2");
}

#[test]
fn test_default_constants() {
    assert_eq!(Routes::empty(), "");
    assert_eq!(Routes::constant(), "/static/path");
}

#[test]
fn test_non_stub_items_survive() {
    assert_eq!(Routes::helper(), 42);
}

// ============================================================================
// Optimizing Strategy
// ============================================================================

struct FastRoutes;

/// Test the optimizing strategy with the stack buffer.
#[named_formats(optimize)]
impl FastRoutes {
    #[template("/forum/{boardId}/{boardNameSlug}")]
    pub fn board(board_id: u32, slug: &str) -> String;

    #[template("prefix {a} mid {b} suffix")]
    fn wrapped(a: &str, b: &str) -> String;

    #[template("{a}x{b}")]
    fn pair(a: i32, b: i32) -> String;

    #[template("{a}")]
    fn single(a: &str) -> String;

    #[template("")]
    fn empty() -> String;

    #[template("caf\u{e9}/{a}/\u{fc}")]
    fn accented(a: u8) -> String;

    #[template("{flag}:{letter}:{n}")]
    fn primitives(flag: bool, letter: char, n: i64) -> String;
}

#[test]
fn test_optimizing_round_trip() {
    assert_eq!(FastRoutes::board(7, "rust"), "/forum/7/rust");
    assert_eq!(FastRoutes::wrapped("A", "B"), "prefix A mid B suffix");
    assert_eq!(FastRoutes::single("only"), "only");
}

#[test]
fn test_optimizing_single_byte_literal() {
    assert_eq!(FastRoutes::pair(1, 2), "1x2");
    assert_eq!(FastRoutes::pair(-10, 300), "-10x300");
}

#[test]
fn test_optimizing_empty_template() {
    assert_eq!(FastRoutes::empty(), "");
}

#[test]
fn test_optimizing_non_ascii_literals() {
    assert_eq!(FastRoutes::accented(9), "caf\u{e9}/9/\u{fc}");
}

#[test]
fn test_optimizing_fast_primitives() {
    assert_eq!(FastRoutes::primitives(true, '\u{3bb}', i64::MIN), format!("true:\u{3bb}:{}", i64::MIN));
}

#[test]
fn test_strategies_agree() {
    for (id, slug) in [(0, ""), (1, "a"), (u32::MAX, "long-slug-with-dashes")] {
        assert_eq!(Routes::board(id, slug), FastRoutes::board(id, slug));
    }
}

// ============================================================================
// Capabilities
// ============================================================================

/// A type with its own in-place formatting.
#[derive(Clone, Copy)]
struct PostId(u32);

unsafe impl FormatInto for PostId {
    fn max_len(&self) -> usize {
        1 + self.0.max_len()
    }

    fn try_format_into(&self, buf: &mut [u8]) -> Option<usize> {
        let (first, rest) = buf.split_first_mut()?;
        *first = b'#';
        Some(1 + self.0.try_format_into(rest)?)
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Only `Debug`.
#[derive(Debug)]
struct Opaque {
    id: u8,
}

macro_rules! capability_impls {
    ($($owner:ident => $args:tt),*) => {$(
        struct $owner;

        #[named_formats $args]
        impl $owner {
            #[template("{s}|{owned}|{cow}|{shared}|{rc}|{boxed}|{by_ref}")]
            fn strings(
                s: &str,
                owned: String,
                cow: Cow<'_, str>,
                shared: Arc<str>,
                rc: Rc<str>,
                boxed: Box<str>,
                by_ref: &String,
            ) -> String;

            #[template("{ratio}/{id}/{as_display}")]
            fn display(ratio: f64, #[fmt(fast)] id: PostId, #[fmt(display)] as_display: u8) -> String;

            #[template("{value}:{tags}")]
            fn debug(#[fmt(debug)] value: Opaque, #[fmt(debug)] tags: Vec<&str>) -> String;

            #[template("{n}")]
            fn by_reference(n: &u16) -> String;
        }
    )*};
}

capability_impls!(PlainCaps => (optimize = false), FastCaps => (optimize = true));

#[test]
fn test_string_like_parameters() {
    let expected = "a|b|c|d|e|f|g";
    let make = || {
        (
            String::from("b"),
            Cow::Borrowed("c"),
            Arc::<str>::from("d"),
            Rc::<str>::from("e"),
            Box::<str>::from("f"),
            String::from("g"),
        )
    };

    let (owned, cow, shared, rc, boxed, by_ref) = make();
    assert_eq!(PlainCaps::strings("a", owned, cow, shared, rc, boxed, &by_ref), expected);
    let (owned, cow, shared, rc, boxed, by_ref) = make();
    assert_eq!(FastCaps::strings("a", owned, cow, shared, rc, boxed, &by_ref), expected);
}

#[test]
fn test_display_and_fast_overrides() {
    assert_eq!(PlainCaps::display(0.5, PostId(12), 3), "0.5/#12/3");
    assert_eq!(FastCaps::display(0.5, PostId(12), 3), "0.5/#12/3");
}

#[test]
fn test_debug_parameters() {
    let expected = r#"Opaque { id: 1 }:["x", "y"]"#;
    assert_eq!(PlainCaps::debug(Opaque { id: 1 }, vec!["x", "y"]), expected);
    assert_eq!(FastCaps::debug(Opaque { id: 1 }, vec!["x", "y"]), expected);
}

#[test]
fn test_reference_to_primitive() {
    assert_eq!(PlainCaps::by_reference(&65535), "65535");
    assert_eq!(FastCaps::by_reference(&65535), "65535");
}

// ============================================================================
// Buffer Sizes
// ============================================================================

struct Sized16;
struct Sized4096;

/// Test a small configured buffer, kept on the stack.
#[named_formats(optimize, buffer_size = 16)]
impl Sized16 {
    #[template("/user/{name}/posts/{page}")]
    fn posts(name: &str, page: usize) -> String;
}

/// Test a large configured buffer, rented from the pool.
#[named_formats(optimize, buffer_size = 4096)]
impl Sized4096 {
    #[template("/user/{name}/posts/{page}")]
    fn posts(name: &str, page: usize) -> String;
}

#[test]
fn test_buffer_size_does_not_change_output() {
    let long = "n".repeat(1000);
    for name in ["bob", long.as_str()] {
        let expected = format!("/user/{name}/posts/3");
        assert_eq!(Sized16::posts(name, 3), expected);
        assert_eq!(Sized4096::posts(name, 3), expected);
        assert_eq!(FastRoutes::single(name), name);
    }
}

// ============================================================================
// Owners and Names
// ============================================================================

struct Table<T>(std::marker::PhantomData<T>);

/// Test a generic owning type.
#[named_formats(optimize)]
impl<T: Clone> Table<T> {
    #[template("/table/{name}")]
    pub fn path(name: &str) -> String;

    pub fn new() -> Self {
        Table(std::marker::PhantomData)
    }
}

#[test]
fn test_generic_owner() {
    assert_eq!(Table::<u8>::path("users"), "/table/users");
    let _table: Table<String> = Table::new();
}

mod nested {
    use named_format::named_formats;

    pub struct Api;

    /// Test strict placeholder names in a nested module.
    #[named_formats(strict_names)]
    impl Api {
        #[template("/api/{version}/{r#type}")]
        pub fn endpoint(version: u8, r#type: &str) -> String;
    }
}

#[test]
fn test_strict_names_and_raw_identifiers() {
    assert_eq!(nested::Api::endpoint(2, "items"), "/api/2/items");
}

struct Documented;

/// Test that attributes on stubs carry over.
#[named_formats]
impl Documented {
    /// Returns the page path.
    #[must_use]
    #[inline(always)]
    #[template("/page/{n}")]
    pub fn page(n: u32) -> String;

    #[cfg(any())]
    #[template("/never/{n}")]
    pub fn never(n: u32) -> String;
}

#[test]
fn test_stub_attributes_carry_over() {
    assert_eq!(Documented::page(5), "/page/5");
}

// ============================================================================
// Hygiene
// ============================================================================

struct Shadowed;
struct ShadowedPooled;

/// Test parameters that share names with generated locals.
#[named_formats(optimize)]
impl Shadowed {
    #[template("/x/{pos}")]
    fn cursor(__pos: u32) -> String;

    #[template("/{pos}/{s}/{buf}")]
    fn all(__pos: u32, __s: &str, __buf: char) -> String;
}

#[named_formats(optimize, buffer_size = 1024)]
impl ShadowedPooled {
    #[template("/{buf}/{s}")]
    fn all(__buf: i64, __s: String) -> String;
}

#[test]
fn test_parameters_named_like_locals() {
    assert_eq!(Shadowed::cursor(77), "/x/77");
    assert_eq!(Shadowed::all(5, "slug", 'c'), "/5/slug/c");
    assert_eq!(ShadowedPooled::all(-3, String::from("s")), "/-3/s");
}

// ============================================================================
// Failing Display
// ============================================================================

/// Writes part of its output, then fails.
struct HalfWritten;

impl fmt::Display for HalfWritten {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("part")?;
        Err(fmt::Error)
    }
}

struct FailingDefault;
struct FailingOptimized;

#[named_formats(optimize = false)]
impl FailingDefault {
    #[template("a{v}b")]
    fn wrap(v: HalfWritten) -> String;
}

#[named_formats(optimize)]
impl FailingOptimized {
    #[template("a{v}b")]
    fn wrap(v: HalfWritten) -> String;
}

#[test]
fn test_failing_display_panics_in_both_strategies() {
    let default = std::panic::catch_unwind(|| FailingDefault::wrap(HalfWritten));
    let optimized = std::panic::catch_unwind(|| FailingOptimized::wrap(HalfWritten));
    assert!(default.is_err());
    assert!(optimized.is_err());
}

// ============================================================================
// Unchecked Buffer Writes
// ============================================================================

/// Run with `cargo test --features unsafe-buffer-ops`.
#[cfg(feature = "unsafe-buffer-ops")]
mod unchecked {
    use named_format::named_formats;

    struct Stack;
    struct Pooled;

    #[named_formats(optimize)]
    impl Stack {
        #[template("/forum/{boardId}/{slug}/{flag}{tail}")]
        fn board(board_id: u32, slug: &str, flag: bool, tail: f32) -> String;

        #[template("{a}x{b}")]
        fn pair(a: u8, b: u8) -> String;
    }

    #[named_formats(optimize, buffer_size = 2048)]
    impl Pooled {
        #[template("<{body}>")]
        fn wrap(body: &str) -> String;
    }

    #[test]
    fn test_unchecked_writes_round_trip() {
        assert_eq!(Stack::board(9, "rust", true, 0.5), "/forum/9/rust/true0.5");
        assert_eq!(Stack::pair(1, 2), "1x2");

        let long = "\u{e9}".repeat(600);
        assert_eq!(Stack::board(1, &long, false, 1.0), format!("/forum/1/{long}/false1"));
        assert_eq!(Pooled::wrap(&long), format!("<{long}>"));
    }
}
