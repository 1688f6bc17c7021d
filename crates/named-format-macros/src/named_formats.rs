//! Implementation of the `#[named_formats]` attribute macro.

use named_format_core::{
    Diagnostic, Discovered, EmitterOptions, EnvSource, Generator, bind, discover, owning_type,
};
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{ItemImpl, parse_macro_input};

use crate::attrs::NamedFormatsArgs;

pub fn named_formats_impl(attr: TokenStream, item: TokenStream) -> TokenStream {
    let args = match NamedFormatsArgs::parse(attr) {
        Ok(args) => args,
        Err(err) => return err.to_compile_error().into(),
    };

    let input = parse_macro_input!(item as ItemImpl);

    match named_formats_inner(&args, input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}

fn named_formats_inner(args: &NamedFormatsArgs, mut input: ItemImpl) -> syn::Result<TokenStream2> {
    if let Some((_, path, _)) = &input.trait_ {
        return Err(syn::Error::new_spanned(
            path,
            "#[named_formats] applies to inherent impl blocks only",
        ));
    }

    let configured = EmitterOptions::from_source(&EnvSource, cfg!(feature = "unsafe-buffer-ops"));
    let options = args.apply(configured);
    let owner = owning_type(&input, None);

    // Stubs are taken out of the impl; everything else stays as written.
    let mut outcomes = Vec::new();
    let mut kept = Vec::with_capacity(input.items.len());
    for item in std::mem::take(&mut input.items) {
        match discover(&item)? {
            Discovered::Skip => kept.push(item),
            Discovered::Candidate(candidate) => outcomes.push(bind(candidate, &owner, &options)),
            Discovered::Rejected(diagnostic) => outcomes.push(Err(diagnostic)),
        }
    }
    input.items = kept;

    let output = Generator::new(options).run(outcomes);
    let units = output.units.iter().map(|unit| &unit.tokens);
    let errors = output.diagnostics.iter().map(Diagnostic::to_compile_error);

    Ok(quote! {
        #input
        #(#units)*
        #(#errors)*
    })
}
