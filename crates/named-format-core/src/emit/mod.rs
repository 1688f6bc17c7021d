//! Code emission.
//!
//! Each owning-type group becomes one [`GeneratedUnit`]: a reopened `impl`
//! block holding one generated function per bound method. Only the function
//! bodies differ between strategies.

mod default;
mod optimizing;

use proc_macro2::{Span, TokenStream};
use quote::{format_ident, quote};
use syn::{FnArg, Ident, Signature, parse_quote};

use crate::config::EmitterOptions;
use crate::model::{BoundMethod, OwningType};

/// Path of the runtime support module generated code calls into.
pub(crate) fn runtime() -> TokenStream {
    quote!(::named_format::__private)
}

/// Suffix of every generated unit's file name.
pub const UNIT_SUFFIX: &str = "_NamedFormat.g.rs";

/// Code-generation strategy, picked once per pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    /// One `format_args!` call into a stack scratch buffer.
    Default,
    /// Hand-written, capability-dispatched writes into a position-tracked buffer.
    Optimizing,
}

impl Strategy {
    pub fn select(options: &EmitterOptions) -> Self {
        if options.optimize {
            Strategy::Optimizing
        } else {
            Strategy::Default
        }
    }

    /// Emit one unit for `methods`, which must all belong to `owner`.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn emit_group(
        self,
        owner: &OwningType,
        methods: &[BoundMethod],
        options: &EmitterOptions,
    ) -> GeneratedUnit {
        let functions = methods.iter().map(|method| {
            let body = match self {
                Strategy::Default => default::body(method),
                Strategy::Optimizing => optimizing::body(method, options),
            };
            function(method, body)
        });

        let (impl_generics, _, where_clause) = owner.generics.split_for_impl();
        let self_ty = &owner.self_ty;

        let tokens = quote! {
            impl #impl_generics #self_ty #where_clause {
                #(#functions)*
            }
        };

        GeneratedUnit {
            owner: owner.clone(),
            file_name: file_name(owner),
            tokens,
        }
    }
}

/// `{namespace with '_' separators}_{Type}_NamedFormat.g.rs`.
pub fn file_name(owner: &OwningType) -> String {
    let mut name = String::new();
    if let Some(ns) = &owner.namespace {
        name.push_str(&ns.replace("::", "_"));
        name.push('_');
    }
    name.push_str(&owner.name);
    name.push_str(UNIT_SUFFIX);
    name
}

/// One generated compilation unit.
#[derive(Debug, Clone)]
pub struct GeneratedUnit {
    pub owner: OwningType,
    pub file_name: String,
    pub tokens: TokenStream,
}

impl GeneratedUnit {
    /// Source text of the unit, with a generated-code header.
    pub fn source(&self) -> String {
        format!(
            "// <auto-generated/>\n// named-format: {}\n{}\n",
            self.owner.qualified_name(),
            self.tokens
        )
    }

    /// Stable hash of [`GeneratedUnit::source`].
    pub fn content_hash(&self) -> u64 {
        xxhash_rust::xxh64::xxh64(self.source().as_bytes(), 0)
    }
}

/// Wrap a body into the generated function for `method`.
fn function(method: &BoundMethod, body: TokenStream) -> TokenStream {
    let attrs = &method.attrs;
    let vis = &method.vis;
    let sig = signature(method);
    let inline = (!method.attrs.iter().any(|a| a.path().is_ident("inline")))
        .then(|| quote!(#[inline]));

    quote! {
        #(#attrs)*
        #inline
        #[allow(unused_mut, unused_variables, unused_assignments, clippy::all)]
        #vis #sig {
            #body
        }
    }
}

/// The stub signature with inputs rewritten to `name: Type`.
fn signature(method: &BoundMethod) -> Signature {
    let mut sig = method.sig.clone();
    sig.inputs = method
        .params
        .iter()
        .map(|param| -> FnArg {
            let name = &param.name;
            let ty = &param.ty;
            parse_quote!(#name: #ty)
        })
        .collect();
    sig
}

/// Identifier usable as a `format_args!` named argument.
fn format_arg_name(name: &Ident) -> Ident {
    let text = name.to_string();
    match text.strip_prefix("r#") {
        Some(raw) => format_ident!("__raw_{}", raw),
        None => name.clone(),
    }
}

fn call_site() -> Span {
    Span::call_site()
}
