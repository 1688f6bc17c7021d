//! Whole-file generation, for build scripts and tests.
//!
//! The attribute macro sees one impl block at a time. [`generate_file`] runs
//! the same pipeline over a parsed source file instead, so impl blocks of one
//! type spread across the file end up in a single unit.

use syn::{File, Item, ItemImpl};

use crate::binding::bind;
use crate::config::EmitterOptions;
use crate::diagnostics::Diagnostic;
use crate::discovery::{Discovered, discover, owning_type};
use crate::driver::{GenerationOutput, Generator};
use crate::model::BoundMethod;

/// Name of the attribute marking impl blocks that hold template stubs.
pub const MARKER_ATTR: &str = "named_formats";

/// Parse `source` and generate every marked impl block in it.
///
/// Fails only when the source does not parse or a parameter attribute is
/// malformed; template problems are reported as diagnostics in the output.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn generate_file(source: &str, options: &EmitterOptions) -> syn::Result<GenerationOutput> {
    let file: File = syn::parse_file(source)?;

    let mut outcomes = Vec::new();
    let mut module = Vec::new();
    collect(&file.items, &mut module, options, &mut outcomes)?;

    Ok(Generator::new(*options).run(outcomes))
}

fn collect(
    items: &[Item],
    module: &mut Vec<String>,
    options: &EmitterOptions,
    outcomes: &mut Vec<Result<BoundMethod, Diagnostic>>,
) -> syn::Result<()> {
    for item in items {
        match item {
            Item::Impl(item_impl) if is_marked(item_impl) => {
                let path = module.join("::");
                let owner = owning_type(item_impl, (!path.is_empty()).then_some(path.as_str()));
                for impl_item in &item_impl.items {
                    match discover(impl_item)? {
                        Discovered::Skip => {}
                        Discovered::Candidate(candidate) => {
                            outcomes.push(bind(candidate, &owner, options));
                        }
                        Discovered::Rejected(diagnostic) => outcomes.push(Err(diagnostic)),
                    }
                }
            }
            Item::Mod(item_mod) => {
                if let Some((_, nested)) = &item_mod.content {
                    module.push(item_mod.ident.to_string());
                    collect(nested, module, options, outcomes)?;
                    module.pop();
                }
            }
            _ => {}
        }
    }
    Ok(())
}

/// `#[named_formats]` or any path ending in it.
pub fn is_marked(item: &ItemImpl) -> bool {
    item.attrs.iter().any(|attr| {
        attr.path()
            .segments
            .last()
            .is_some_and(|segment| segment.ident == MARKER_ATTR)
    })
}
