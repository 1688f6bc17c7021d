//! Candidate discovery: finds template stubs in impl blocks.
//!
//! This is the boundary to the host's symbol model. Everything past it works
//! on plain data: the stub's signature, its raw template and a capability
//! tag per parameter.

use proc_macro2::Span;
use quote::{ToTokens, format_ident};
use syn::parse::{Parse, ParseStream};
use syn::{
    Attribute, Expr, FnArg, Ident, ImplItem, ItemImpl, Lit, Pat, ReturnType, Signature, Token,
    Type, TypePath, Visibility,
};

use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::model::{Capabilities, CapabilityTag, OwningType, ParameterDescriptor, TypeKind};
use crate::template::Template;

/// Name of the helper attribute carrying the template.
pub const TEMPLATE_ATTR: &str = "template";
/// Name of the parameter attribute overriding classification.
pub const FMT_ATTR: &str = "fmt";

/// A stub that carries a template and passed the shape checks.
#[derive(Debug, Clone)]
pub struct Candidate {
    /// Attributes other than `#[template]`.
    pub attrs: Vec<Attribute>,
    pub vis: Visibility,
    pub sig: Signature,
    pub params: Vec<ParameterDescriptor>,
    pub template: Template,
    pub span: Span,
}

/// Result of inspecting one impl item.
#[derive(Debug)]
pub enum Discovered {
    /// Not a template stub; the item is left alone.
    Skip,
    Candidate(Candidate),
    Rejected(Diagnostic),
}

/// A body-less associated function: `#[attrs] vis fn name(..) -> Ret;`.
struct StubFn {
    attrs: Vec<Attribute>,
    vis: Visibility,
    sig: Signature,
}

impl Parse for StubFn {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let attrs = input.call(Attribute::parse_outer)?;
        let vis: Visibility = input.parse()?;
        let sig: Signature = input.parse()?;
        let _: Token![;] = input.parse()?;
        Ok(StubFn { attrs, vis, sig })
    }
}

/// Inspect an impl item.
///
/// Only body-less, receiver-less functions returning `String` that carry
/// `#[template(..)]` are candidates; anything else is skipped silently.
/// Malformed `#[fmt(..)]` parameter attributes are hard errors.
pub fn discover(item: &ImplItem) -> syn::Result<Discovered> {
    // syn keeps body-less impl fns as verbatim tokens.
    let ImplItem::Verbatim(tokens) = item else {
        return Ok(Discovered::Skip);
    };
    let Ok(stub) = syn::parse2::<StubFn>(tokens.clone()) else {
        return Ok(Discovered::Skip);
    };

    if stub.sig.receiver().is_some() || !returns_string(&stub.sig.output) {
        return Ok(Discovered::Skip);
    }

    let Some(template_attr) = stub.attrs.iter().find(|a| a.path().is_ident(TEMPLATE_ATTR)) else {
        return Ok(Discovered::Skip);
    };

    let span = stub.sig.ident.span();
    let template = match template_argument(template_attr) {
        Ok(template) => template,
        Err(kind) => return Ok(Discovered::Rejected(Diagnostic::new(kind, span))),
    };

    let attrs = stub
        .attrs
        .iter()
        .filter(|a| !a.path().is_ident(TEMPLATE_ATTR))
        .cloned()
        .collect();
    let params = parameters(&stub.sig)?;

    Ok(Discovered::Candidate(Candidate {
        attrs,
        vis: stub.vis,
        sig: stub.sig,
        params,
        template,
        span,
    }))
}

/// Pull the single string argument out of `#[template(..)]`.
fn template_argument(attr: &Attribute) -> Result<Template, DiagnosticKind> {
    let args = match &attr.meta {
        syn::Meta::Path(_) => Vec::new(),
        syn::Meta::List(list) => list
            .parse_args_with(syn::punctuated::Punctuated::<Expr, Token![,]>::parse_terminated)
            .map(|args| args.into_iter().collect())
            .map_err(|_| DiagnosticKind::TemplateNotString)?,
        syn::Meta::NameValue(nv) => vec![nv.value.clone()],
    };

    if args.len() != 1 {
        return Err(DiagnosticKind::ArgumentCountMismatch { found: args.len() });
    }

    match &args[0] {
        Expr::Lit(expr) => match &expr.lit {
            Lit::Str(lit) => Ok(Template::new(lit.value())),
            _ => Err(DiagnosticKind::TemplateNotString),
        },
        _ => Err(DiagnosticKind::TemplateNotString),
    }
}

fn parameters(sig: &Signature) -> syn::Result<Vec<ParameterDescriptor>> {
    sig.inputs
        .iter()
        .filter_map(|arg| match arg {
            FnArg::Typed(pat_type) => Some(pat_type),
            FnArg::Receiver(_) => None,
        })
        .enumerate()
        .map(|(index, pat_type)| {
            let name = match pat_type.pat.as_ref() {
                Pat::Ident(ident) => ident.ident.clone(),
                _ => format_ident!("__arg{}", index),
            };
            let caps = match fmt_override(&pat_type.attrs)? {
                Some(caps) => caps,
                None => classify(&pat_type.ty),
            };
            Ok(ParameterDescriptor {
                name,
                ty: (*pat_type.ty).clone(),
                capability: CapabilityTag::from(caps),
            })
        })
        .collect()
}

/// `#[fmt(fast)]`, `#[fmt(display)]` or `#[fmt(debug)]` on a parameter.
fn fmt_override(attrs: &[Attribute]) -> syn::Result<Option<Capabilities>> {
    let Some(attr) = attrs.iter().find(|a| a.path().is_ident(FMT_ATTR)) else {
        return Ok(None);
    };

    let mode: Ident = attr.parse_args()?;
    let caps = match mode.to_string().as_str() {
        "fast" => Capabilities::FORMAT_INTO | Capabilities::DISPLAY,
        "display" => Capabilities::DISPLAY,
        "debug" => Capabilities::empty(),
        other => {
            return Err(syn::Error::new(
                mode.span(),
                format!("unknown fmt mode: {other} (expected fast, display or debug)"),
            ));
        }
    };
    Ok(Some(caps))
}

const FAST_PRIMITIVES: &[&str] = &[
    "i8", "i16", "i32", "i64", "i128", "isize", "u8", "u16", "u32", "u64", "u128", "usize",
    "bool", "char",
];

/// Classify a parameter type by the formatting operations it supports.
///
/// Purely syntactic: unknown types are assumed to implement `Display`.
pub fn classify(ty: &Type) -> Capabilities {
    match ty {
        Type::Reference(reference) => match reference.elem.as_ref() {
            Type::Path(path) if path.qself.is_none() && path.path.is_ident("str") => {
                Capabilities::STRING
            }
            elem => classify(elem),
        },
        Type::Paren(paren) => classify(&paren.elem),
        Type::Group(group) => classify(&group.elem),
        Type::Path(path) => classify_path(path),
        _ => Capabilities::DISPLAY,
    }
}

fn classify_path(path: &TypePath) -> Capabilities {
    let Some(last) = path.path.segments.last() else {
        return Capabilities::DISPLAY;
    };
    if path.qself.is_some() {
        return Capabilities::DISPLAY;
    }

    let ident = last.ident.to_string();
    match ident.as_str() {
        "String" if last.arguments.is_none() => Capabilities::STRING,
        "Box" | "Rc" | "Arc" | "Cow" if generic_args_contain_str(&last.arguments) => {
            Capabilities::STRING
        }
        name if FAST_PRIMITIVES.contains(&name) && last.arguments.is_none() => {
            Capabilities::FORMAT_INTO | Capabilities::DISPLAY
        }
        _ => Capabilities::DISPLAY,
    }
}

fn generic_args_contain_str(args: &syn::PathArguments) -> bool {
    let syn::PathArguments::AngleBracketed(args) = args else {
        return false;
    };
    args.args.iter().any(|arg| {
        matches!(arg, syn::GenericArgument::Type(Type::Path(p)) if p.path.is_ident("str"))
    })
}

/// `String`, `std::string::String` or `alloc::string::String`.
pub fn returns_string(output: &ReturnType) -> bool {
    let ReturnType::Type(_, ty) = output else {
        return false;
    };
    let Type::Path(path) = ty.as_ref() else {
        return false;
    };
    if path.qself.is_some() {
        return false;
    }

    let segments: Vec<String> = path
        .path
        .segments
        .iter()
        .map(|s| s.ident.to_string())
        .collect();
    let no_args = path.path.segments.iter().all(|s| s.arguments.is_none());

    no_args
        && match segments.as_slice() {
            [name] => name == "String",
            [root, module, name] => {
                (root == "std" || root == "alloc") && module == "string" && name == "String"
            }
            _ => false,
        }
}

/// Describe the self type of an impl block.
///
/// `module` is the namespace the impl sits in, if the caller knows it; any
/// path prefix on the self type is appended to it.
pub fn owning_type(item: &ItemImpl, module: Option<&str>) -> OwningType {
    let (prefix, name, kind) = match item.self_ty.as_ref() {
        Type::Path(path) => {
            let mut segments: Vec<String> = path
                .path
                .segments
                .iter()
                .map(|s| s.ident.to_string())
                .collect();
            let name = segments.pop().unwrap_or_default();
            (segments, name, TypeKind::Value)
        }
        Type::TraitObject(object) => {
            let name = object
                .bounds
                .iter()
                .find_map(|bound| match bound {
                    syn::TypeParamBound::Trait(t) => {
                        t.path.segments.last().map(|s| s.ident.to_string())
                    }
                    _ => None,
                })
                .unwrap_or_else(|| "dyn".to_owned());
            (Vec::new(), name, TypeKind::Reference)
        }
        other => (Vec::new(), sanitize(&other.to_token_stream().to_string()), TypeKind::Value),
    };

    let mut namespace: Vec<String> = module
        .into_iter()
        .flat_map(|m| m.split("::"))
        .filter(|s| !s.is_empty())
        .map(str::to_owned)
        .collect();
    namespace.extend(prefix);

    OwningType {
        namespace: (!namespace.is_empty()).then(|| namespace.join("::")),
        name,
        kind,
        generics: item.generics.clone(),
        self_ty: (*item.self_ty).clone(),
    }
}

fn sanitize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect()
}
