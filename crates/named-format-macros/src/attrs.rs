//! Attribute parsing for `#[named_formats(...)]`.

use named_format_core::EmitterOptions;
use proc_macro::TokenStream;
use syn::{LitBool, LitInt, meta::ParseNestedMeta};

/// Parsed `#[named_formats(...)]` arguments.
///
/// Each one overrides the matching configuration key; unset arguments leave
/// the configured value alone.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct NamedFormatsArgs {
    /// `optimize` or `optimize = <bool>`
    pub optimize: Option<bool>,
    /// `buffer_size = <usize>`
    pub buffer_size: Option<usize>,
    /// `strict_names` or `strict_names = <bool>`
    pub strict_names: Option<bool>,
}

impl NamedFormatsArgs {
    pub fn parse(attr: TokenStream) -> syn::Result<Self> {
        let mut result = Self::default();
        let parser = syn::meta::parser(|meta| result.parse_one(meta));
        syn::parse::Parser::parse(parser, attr)?;
        Ok(result)
    }

    fn parse_one(&mut self, meta: ParseNestedMeta) -> syn::Result<()> {
        if meta.path.is_ident("optimize") {
            self.optimize = Some(flag_value(&meta)?);
        } else if meta.path.is_ident("strict_names") {
            self.strict_names = Some(flag_value(&meta)?);
        } else if meta.path.is_ident("buffer_size") {
            let value: LitInt = meta.value()?.parse()?;
            self.buffer_size = Some(value.base10_parse()?);
        } else {
            return Err(meta.error(format!(
                "unknown named_formats argument: {}",
                meta.path.get_ident().map(|i| i.to_string()).unwrap_or_default()
            )));
        }
        Ok(())
    }

    /// Layer these arguments over configured options.
    pub fn apply(&self, mut options: EmitterOptions) -> EmitterOptions {
        if let Some(optimize) = self.optimize {
            options.optimize = optimize;
        }
        if let Some(size) = self.buffer_size {
            options.buffer_size = Some(size);
        }
        if let Some(strict) = self.strict_names {
            options.strict_placeholder_names = strict;
        }
        options
    }
}

/// A bare flag means `true`.
fn flag_value(meta: &ParseNestedMeta) -> syn::Result<bool> {
    if meta.input.peek(syn::Token![=]) {
        let value: LitBool = meta.value()?.parse()?;
        Ok(value.value)
    } else {
        Ok(true)
    }
}
