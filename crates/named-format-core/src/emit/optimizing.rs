//! Optimizing strategy: hand-written writes into a position-tracked buffer.
//!
//! Generated bodies look like
//!
//! ```text
//! use ::named_format::__private::Buffer as _;
//! let mut __buf = ::named_format::__private::StackBuffer::<128usize>::new();
//! let mut __pos: usize = 0;
//! __buf.ensure(__pos + 7usize);
//! __buf.as_mut_slice()[__pos..__pos + 7usize].copy_from_slice(b"/forum/");
//! __pos += 7usize;
//! __pos += __buf.format_at(__pos, &board_id);
//! __buf.finish(__pos)
//! ```

use proc_macro2::{Ident, Span, TokenStream};
use quote::quote;
use syn::{LitByte, LitByteStr};

use super::{call_site, runtime};
use crate::config::{EmitterOptions, STACK_BUFFER_THRESHOLD};
use crate::model::{BoundMethod, CapabilityTag, ParameterDescriptor};
use crate::template::Segment;

/// Locals of a generated body. Mixed-site hygiene keeps them apart from
/// parameters that happen to share a name.
struct Locals {
    buf: Ident,
    pos: Ident,
    s: Ident,
}

impl Locals {
    fn new() -> Self {
        let local = |name| Ident::new(name, Span::mixed_site());
        Self {
            buf: local("__buf"),
            pos: local("__pos"),
            s: local("__s"),
        }
    }
}

pub(super) fn body(method: &BoundMethod, options: &EmitterOptions) -> TokenStream {
    let rt = runtime();
    let unchecked = options.allow_unsafe;
    let locals = Locals::new();
    let Locals { buf, pos, .. } = &locals;

    let buffer = match options.buffer_size {
        Some(size) if options.uses_pooled_buffer() => {
            quote!(#rt::BufferPool::shared().rent(#size))
        }
        _ => quote!(#rt::StackBuffer::<#STACK_BUFFER_THRESHOLD>::new()),
    };
    let prelude = quote! {
        use #rt::Buffer as _;
        let mut #buf = #buffer;
        let mut #pos: usize = 0;
    };

    let mut writes = Vec::new();
    let mut params = method.params.iter();
    for segment in method.template.segments() {
        let write = match segment {
            Ok(Segment::Literal(text)) => literal(&locals, text.as_bytes(), unchecked),
            Ok(Segment::Hole(_)) => match params.next() {
                Some(param) => parameter(&locals, param, unchecked),
                None => return fallback(&locals, prelude, writes),
            },
            Err(_) => return fallback(&locals, prelude, writes),
        };
        writes.push(write);
    }

    let finish = if unchecked {
        quote!(unsafe { #buf.finish_unchecked(#pos) })
    } else {
        quote!(#buf.finish(#pos))
    };

    quote! {
        #prelude
        #(#writes)*
        #finish
    }
}

/// Body for a template that no longer matches what binding validated.
///
/// Keeps the buffer setup and the writes emitted so far, so a rented buffer
/// is still released by its guard, and returns the sentinel.
fn fallback(locals: &Locals, prelude: TokenStream, writes: Vec<TokenStream>) -> TokenStream {
    let rt = runtime();
    let Locals { buf, pos, .. } = locals;
    quote! {
        #prelude
        #(#writes)*
        let _ = (&mut #buf, #pos);
        ::std::string::String::from(#rt::FALLBACK)
    }
}

fn literal(locals: &Locals, bytes: &[u8], unchecked: bool) -> TokenStream {
    let Locals { buf, pos, .. } = locals;
    match bytes {
        [byte] => {
            let byte = LitByte::new(*byte, call_site());
            let store = if unchecked {
                quote!(unsafe { *#buf.as_mut_slice().get_unchecked_mut(#pos) = #byte; })
            } else {
                quote!(#buf.as_mut_slice()[#pos] = #byte;)
            };
            quote! {
                #buf.ensure(#pos + 1);
                #store
                #pos += 1;
            }
        }
        _ => {
            let len = bytes.len();
            let lit = LitByteStr::new(bytes, call_site());
            copy(locals, quote!(#lit), quote!(#len), unchecked)
        }
    }
}

fn parameter(locals: &Locals, param: &ParameterDescriptor, unchecked: bool) -> TokenStream {
    let Locals { buf, pos, s } = locals;
    let name = &param.name;
    let copy_s = || copy(locals, quote!(#s.as_bytes()), quote!(#s.len()), unchecked);
    match param.capability {
        CapabilityTag::PlainString => {
            let copy = copy_s();
            quote! {{
                let #s: &str = ::core::convert::AsRef::<str>::as_ref(&#name);
                #copy
            }}
        }
        CapabilityTag::FastSelfFormatting => quote! {
            #pos += #buf.format_at(#pos, &#name);
        },
        CapabilityTag::GenericSelfFormatting => {
            let copy = copy_s();
            quote! {{
                let #s = ::std::string::ToString::to_string(&#name);
                #copy
            }}
        }
        CapabilityTag::Opaque => {
            let copy = copy_s();
            quote! {{
                let #s = ::std::format!("{:?}", #name);
                #copy
            }}
        }
    }
}

/// Copy `len` bytes from `src` to the cursor in one operation and advance.
fn copy(locals: &Locals, src: TokenStream, len: TokenStream, unchecked: bool) -> TokenStream {
    let Locals { buf, pos, .. } = locals;
    let store = if unchecked {
        quote! {
            unsafe {
                ::core::ptr::copy_nonoverlapping(
                    (#src).as_ptr(),
                    #buf.as_mut_slice().as_mut_ptr().add(#pos),
                    #len,
                );
            }
        }
    } else {
        quote!(#buf.as_mut_slice()[#pos..#pos + #len].copy_from_slice(#src);)
    };
    quote! {
        #buf.ensure(#pos + #len);
        #store
        #pos += #len;
    }
}
