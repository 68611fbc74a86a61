use proc_macro2::TokenStream;
use quote::quote;
use syn::{Error, Ident, ItemFn, ReturnType, Type};

/// Expands `#[fhub_runtime::main(profile)]` into a synchronous `main` that builds the runtime.
#[must_use]
pub fn expand_main(args: TokenStream, input: ItemFn) -> TokenStream {
    if input.sig.asyncness.is_none() {
        return Error::new_spanned(
            &input.sig.ident,
            "#[fhub_runtime::main] can only be used on async functions",
        )
        .to_compile_error();
    }

    if !returns_result(&input.sig.output) {
        return Error::new_spanned(
            &input.sig.output,
            "#[fhub_runtime::main] requires a Result return type",
        )
        .to_compile_error();
    }

    let preset = match preset(args) {
        Ok(preset) => preset,
        Err(err) => return err.to_compile_error(),
    };

    let ItemFn { attrs, vis, sig, block } = input;
    let name = &sig.ident;
    let output = &sig.output;

    quote! {
        #(#attrs)*
        #vis fn #name() #output {
            let config = ::fhub_runtime::RuntimeConfig::#preset();
            let runtime = ::fhub_runtime::build_runtime_with_config(&config)?;
            runtime.block_on(async #block)
        }
    }
}

fn preset(args: TokenStream) -> syn::Result<Ident> {
    if args.is_empty() {
        return Ok(Ident::new("default", proc_macro2::Span::call_site()));
    }

    let ident: Ident = syn::parse2(args)?;
    match ident.to_string().as_str() {
        "high_performance" | "memory_efficient" | "default" => Ok(ident),
        _ => Err(Error::new_spanned(
            ident,
            "Unknown runtime profile. Use: high_performance, memory_efficient, or default",
        )),
    }
}

fn returns_result(output: &ReturnType) -> bool {
    let ReturnType::Type(_, ty) = output else {
        return false;
    };
    let Type::Path(path) = &**ty else {
        return false;
    };
    path.path.segments.last().is_some_and(|seg| seg.ident == "Result")
}
