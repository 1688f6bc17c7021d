//! Signature model for bound template methods.

use std::hash::{Hash, Hasher};

use bitflags::bitflags;
use proc_macro2::Span;
use syn::{Generics, Ident, Signature, Type, Visibility};

use crate::template::Template;

bitflags! {
    /// Formatting operations a parameter type is known to support.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Capabilities: u8 {
        /// The value is string data (`AsRef<str>`).
        const STRING = 1 << 0;
        /// Implements `FormatInto`: renders straight into a byte buffer.
        const FORMAT_INTO = 1 << 1;
        /// Implements `Display`.
        const DISPLAY = 1 << 2;
    }
}

/// How a parameter gets written, picked from its [`Capabilities`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityTag {
    PlainString,
    FastSelfFormatting,
    GenericSelfFormatting,
    /// Only `Debug` is assumed.
    Opaque,
}

impl From<Capabilities> for CapabilityTag {
    fn from(caps: Capabilities) -> Self {
        if caps.contains(Capabilities::STRING) {
            CapabilityTag::PlainString
        } else if caps.contains(Capabilities::FORMAT_INTO) {
            CapabilityTag::FastSelfFormatting
        } else if caps.contains(Capabilities::DISPLAY) {
            CapabilityTag::GenericSelfFormatting
        } else {
            CapabilityTag::Opaque
        }
    }
}

/// One parameter of a template method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDescriptor {
    pub name: Ident,
    pub ty: Type,
    pub capability: CapabilityTag,
}

/// Value or reference flavour of the owning type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Value,
    /// Trait objects (`impl dyn Trait { .. }`).
    Reference,
}

/// The type whose impl block declares the template methods.
///
/// Two descriptors are equal when namespace and name match; generics and
/// the full self type only matter for reopening the impl.
#[derive(Debug, Clone)]
pub struct OwningType {
    pub namespace: Option<String>,
    pub name: String,
    pub kind: TypeKind,
    pub generics: Generics,
    pub self_ty: Type,
}

impl OwningType {
    /// `a::b::Name`, or just `Name` without a namespace.
    pub fn qualified_name(&self) -> String {
        match &self.namespace {
            Some(ns) => format!("{ns}::{}", self.name),
            None => self.name.clone(),
        }
    }
}

impl PartialEq for OwningType {
    fn eq(&self, other: &Self) -> bool {
        self.namespace == other.namespace && self.name == other.name
    }
}

impl Eq for OwningType {}

impl Hash for OwningType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.namespace.hash(state);
        self.name.hash(state);
    }
}

/// A template validated against its function signature, ready to emit.
#[derive(Debug, Clone)]
pub struct BoundMethod {
    pub owner: OwningType,
    pub name: Ident,
    pub vis: Visibility,
    /// Stub signature; emitters rewrite its inputs from `params`.
    pub sig: Signature,
    /// Attributes of the stub without `#[template]`.
    pub attrs: Vec<syn::Attribute>,
    pub params: Vec<ParameterDescriptor>,
    pub template: Template,
    pub span: Span,
}
