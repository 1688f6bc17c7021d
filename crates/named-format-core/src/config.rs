//! Generation options and where they come from.

use rustc_hash::FxHashMap;

/// Selects the optimizing emitter.
pub const OPTIMIZATION_ENABLED: &str = "optimization-enabled";
/// Buffer size for the optimizing emitter; unparseable values count as unset.
pub const OPTIMIZATION_BUFFER_SIZE: &str = "optimization-buffer-size";
/// Reject templates whose placeholder names differ from parameter names.
pub const STRICT_PLACEHOLDER_NAMES: &str = "strict-placeholder-names";

/// Largest buffer the optimizing emitter places on the stack.
pub const STACK_BUFFER_THRESHOLD: usize = 128;

/// Key-value configuration lookup.
pub trait ConfigSource {
    fn get(&self, key: &str) -> Option<String>;
}

impl ConfigSource for FxHashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        FxHashMap::get(self, key).cloned()
    }
}

impl<S: ConfigSource + ?Sized> ConfigSource for &S {
    fn get(&self, key: &str) -> Option<String> {
        (**self).get(key)
    }
}

/// Reads keys from the process environment.
///
/// `optimization-enabled` becomes `NAMED_FORMAT_OPTIMIZATION_ENABLED`.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvSource;

impl EnvSource {
    pub fn var_name(key: &str) -> String {
        let mut name = String::from("NAMED_FORMAT_");
        name.extend(
            key.chars()
                .map(|c| if c == '-' { '_' } else { c.to_ascii_uppercase() }),
        );
        name
    }
}

impl ConfigSource for EnvSource {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(Self::var_name(key)).ok()
    }
}

/// Options for one generation pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EmitterOptions {
    /// Generated code may use unchecked buffer writes.
    pub allow_unsafe: bool,
    /// Use the optimizing emitter.
    pub optimize: bool,
    /// `None` means unset.
    pub buffer_size: Option<usize>,
    pub strict_placeholder_names: bool,
}

impl EmitterOptions {
    /// Build options from configuration. `allow_unsafe` comes from the
    /// host build, not from a key.
    pub fn from_source(source: &impl ConfigSource, allow_unsafe: bool) -> Self {
        Self {
            allow_unsafe,
            optimize: flag(source, OPTIMIZATION_ENABLED),
            buffer_size: source
                .get(OPTIMIZATION_BUFFER_SIZE)
                .and_then(|value| value.trim().parse().ok()),
            strict_placeholder_names: flag(source, STRICT_PLACEHOLDER_NAMES),
        }
    }

    /// Whether the optimizing emitter should rent from the buffer pool.
    pub fn uses_pooled_buffer(&self) -> bool {
        matches!(self.buffer_size, Some(size) if size > STACK_BUFFER_THRESHOLD)
    }
}

fn flag(source: &impl ConfigSource, key: &str) -> bool {
    source
        .get(key)
        .is_some_and(|value| value.trim().eq_ignore_ascii_case("true"))
}
