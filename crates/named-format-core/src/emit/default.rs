//! Default strategy: a single `format_args!` call.

use proc_macro2::TokenStream;
use quote::quote;
use syn::LitStr;

use super::{call_site, format_arg_name, runtime};
use crate::config::STACK_BUFFER_THRESHOLD;
use crate::model::{BoundMethod, CapabilityTag};

/// Body that formats all parameters positionally through a stack scratch
/// buffer of [`STACK_BUFFER_THRESHOLD`] bytes.
///
/// If the template runs out of holes before parameters, the remaining
/// parameters are left out instead of failing.
pub(super) fn body(method: &BoundMethod) -> TokenStream {
    let mut format = String::new();
    let mut args = Vec::with_capacity(method.params.len());
    let mut rest = method.template.as_str();

    for param in &method.params {
        let Some(open) = rest.find('{') else {
            break;
        };
        push_literal(&mut format, &rest[..open]);

        let arg = format_arg_name(&param.name);
        format.push('{');
        format.push_str(&arg.to_string());
        if param.capability == CapabilityTag::Opaque {
            format.push_str(":?");
        }
        format.push('}');

        let name = &param.name;
        args.push(quote!(#arg = #name));

        match rest[open..].find('}') {
            Some(close) => rest = &rest[open + close + 1..],
            None => {
                rest = "";
                break;
            }
        }
    }
    push_literal(&mut format, rest);

    let rt = runtime();
    let format = LitStr::new(&format, call_site());
    quote! {
        #rt::format_with_scratch::<#STACK_BUFFER_THRESHOLD>(
            ::core::format_args!(#format #(, #args)*)
        )
    }
}

/// Append literal text, escaping any brace a consistent template would not contain.
fn push_literal(format: &mut String, text: &str) {
    for c in text.chars() {
        match c {
            '{' => format.push_str("{{"),
            '}' => format.push_str("}}"),
            c => format.push(c),
        }
    }
}
