//! Bind-time diagnostics.
//!
//! Every diagnostic is an error attached to the span of the offending stub.
//! Codes are stable: `NFG0001` .. `NFG0006`.

use std::fmt;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use proc_macro2::{Span, TokenStream};
use thiserror::Error;

/// Diagnostic code, the numeric part of `NFGxxxx`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, IntoPrimitive, TryFromPrimitive)]
#[repr(u16)]
pub enum DiagnosticCode {
    ArgumentCountMismatch = 1,
    TemplateEmpty = 2,
    TemplateMalformed = 3,
    HoleCountMismatch = 4,
    TemplateNotString = 5,
    PlaceholderNameMismatch = 6,
}

impl DiagnosticCode {
    pub fn title(self) -> &'static str {
        match self {
            DiagnosticCode::ArgumentCountMismatch => "Argument count mismatch",
            DiagnosticCode::TemplateEmpty => "Template is empty",
            DiagnosticCode::TemplateMalformed => "Template not well-formed",
            DiagnosticCode::HoleCountMismatch => {
                "Template placeholders don't match parameter count"
            }
            DiagnosticCode::TemplateNotString => "Template is not a string literal",
            DiagnosticCode::PlaceholderNameMismatch => {
                "Placeholder name doesn't match parameter name"
            }
        }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NFG{:04}", u16::from(*self))
    }
}

/// What went wrong, with the values the message needs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagnosticKind {
    #[error("#[template] expects exactly 1 argument for the format, found {found}")]
    ArgumentCountMismatch { found: usize },

    #[error("the given template must not be empty or whitespace-only")]
    TemplateEmpty,

    #[error("the template's open ('{{') and close ('}}') brackets do not match")]
    TemplateMalformed,

    #[error("the template has {holes} placeholders, but {params} parameters are given")]
    HoleCountMismatch { holes: usize, params: usize },

    #[error("the template must be a string literal")]
    TemplateNotString,

    #[error("placeholder {{{placeholder}}} is filled by parameter `{parameter}`")]
    PlaceholderNameMismatch {
        placeholder: String,
        parameter: String,
    },
}

impl DiagnosticKind {
    pub fn code(&self) -> DiagnosticCode {
        match self {
            DiagnosticKind::ArgumentCountMismatch { .. } => DiagnosticCode::ArgumentCountMismatch,
            DiagnosticKind::TemplateEmpty => DiagnosticCode::TemplateEmpty,
            DiagnosticKind::TemplateMalformed => DiagnosticCode::TemplateMalformed,
            DiagnosticKind::HoleCountMismatch { .. } => DiagnosticCode::HoleCountMismatch,
            DiagnosticKind::TemplateNotString => DiagnosticCode::TemplateNotString,
            DiagnosticKind::PlaceholderNameMismatch { .. } => {
                DiagnosticCode::PlaceholderNameMismatch
            }
        }
    }
}

/// A bind-time error attached to a source location.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub span: Span,
}

impl Diagnostic {
    pub fn new(kind: DiagnosticKind, span: Span) -> Self {
        Self { kind, span }
    }

    pub fn code(&self) -> DiagnosticCode {
        self.kind.code()
    }

    /// `error[NFG0004]: <message>`-style text without the `error` prefix.
    pub fn message(&self) -> String {
        format!("{}: {}", self.code(), self.kind)
    }

    /// Render as a `compile_error!` invocation at the diagnostic's span.
    pub fn to_compile_error(&self) -> TokenStream {
        syn::Error::new(self.span, self.message()).to_compile_error()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "error[{}]: {}", self.code(), self.kind)
    }
}

impl std::error::Error for Diagnostic {}
