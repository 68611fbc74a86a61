use fxhash::FxHashSet;
use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{Attribute, Data, DeriveInput, Field, Fields, Ident, Type, Variant};

/// What the generator needs to know about one variant.
struct ErrorVariant<'a> {
    ident: &'a Ident,
    cfg: Vec<&'a Attribute>,
    source: Option<(&'a Ident, &'a Type)>,
    has_context: bool,
}

impl<'a> ErrorVariant<'a> {
    fn parse(variant: &'a Variant) -> syn::Result<Self> {
        let Fields::Named(fields) = &variant.fields else {
            return Err(syn::Error::new_spanned(
                variant,
                "fhub_error variants must use named fields (source/context are matched by name)",
            ));
        };

        let mut has_context = false;
        let mut source = None;

        for field in &fields.named {
            let Some(ident) = field.ident.as_ref() else { continue };

            if ident == "context" {
                if !is_context_type(&field.ty) {
                    return Err(syn::Error::new_spanned(
                        &field.ty,
                        "context field must be Option<Cow<'static, str>>",
                    ));
                }
                has_context = true;
            } else if ident == "source" || has_attr(field, "source") || has_attr(field, "from") {
                source = Some((ident, &field.ty));
            }
        }

        if source.is_some() && !has_context {
            return Err(syn::Error::new_spanned(
                &variant.ident,
                "fhub_error requires `context: Option<Cow<'static, str>>` for variants with a source",
            ));
        }

        Ok(Self {
            ident: &variant.ident,
            cfg: variant.attrs.iter().filter(|attr| attr.path().is_ident("cfg")).collect(),
            source,
            has_context,
        })
    }

    fn is_internal(&self) -> bool {
        self.ident == "Internal"
    }
}

pub fn expand_error(input: DeriveInput) -> TokenStream {
    let Data::Enum(data) = &input.data else {
        return syn::Error::new_spanned(&input.ident, "fhub_error can only be applied to enums")
            .to_compile_error();
    };

    let mut variants = Vec::with_capacity(data.variants.len());
    for variant in &data.variants {
        match ErrorVariant::parse(variant) {
            Ok(parsed) => variants.push(parsed),
            Err(err) => return err.to_compile_error(),
        }
    }

    let name = &input.ident;
    let ext = format_ident!("{name}Ext");

    let derives = missing_derives(&input.attrs);
    let context_trait = context_trait(name, &ext, &variants);
    let source_impls = variants
        .iter()
        .filter(|variant| !variant.is_internal())
        .filter_map(|variant| source_impls(name, &ext, variant));
    let message_impls = message_impls(name, &variants);

    quote! {
        #[allow(non_shorthand_field_patterns)]
        #derives
        #input

        #context_trait
        #(#source_impls)*
        #message_impls

        #[allow(dead_code, clippy::ref_option)]
        fn format_context(
            context: &Option<std::borrow::Cow<'static, str>>,
        ) -> std::borrow::Cow<'static, str> {
            match context {
                Some(context) => std::borrow::Cow::Owned(format!(" ({context})")),
                None => std::borrow::Cow::Borrowed(""),
            }
        }
    }
}

fn context_trait(name: &Ident, ext: &Ident, variants: &[ErrorVariant<'_>]) -> TokenStream {
    let arms = variants.iter().filter(|variant| variant.has_context).map(|variant| {
        let ident = variant.ident;
        let cfg = &variant.cfg;
        quote! { #(#cfg)* #name::#ident { context: slot, .. } => *slot = Some(context.into()), }
    });

    quote! {
        pub trait #ext<T> {
            fn context(
                self,
                context: impl Into<std::borrow::Cow<'static, str>>,
            ) -> ::core::result::Result<T, #name>;
        }

        #[automatically_derived]
        impl<T> #ext<T> for ::core::result::Result<T, #name> {
            #[inline]
            #[allow(unreachable_patterns, unused_variables)]
            fn context(self, context: impl Into<std::borrow::Cow<'static, str>>) -> Self {
                self.map_err(|mut error| {
                    match &mut error {
                        #(#arms)*
                        _ => {}
                    }
                    error
                })
            }
        }
    }
}

fn source_impls(name: &Ident, ext: &Ident, variant: &ErrorVariant<'_>) -> Option<TokenStream> {
    let (field, ty) = variant.source?;
    let ident = variant.ident;
    let cfg = &variant.cfg;

    Some(quote! {
        #(#cfg)*
        #[automatically_derived]
        impl From<#ty> for #name {
            #[inline]
            fn from(#field: #ty) -> Self {
                Self::#ident { #field, context: None }
            }
        }

        #(#cfg)*
        #[automatically_derived]
        impl<T> #ext<T> for ::core::result::Result<T, #ty> {
            #[inline]
            fn context(
                self,
                context: impl Into<std::borrow::Cow<'static, str>>,
            ) -> ::core::result::Result<T, #name> {
                self.map_err(|#field| #name::#ident { #field, context: Some(context.into()) })
            }
        }
    })
}

fn message_impls(name: &Ident, variants: &[ErrorVariant<'_>]) -> TokenStream {
    let Some(internal) = variants.iter().find(|variant| variant.is_internal()) else {
        return TokenStream::new();
    };
    let cfg = &internal.cfg;

    quote! {
        #(#cfg)*
        impl From<&'static str> for #name {
            #[inline]
            fn from(message: &'static str) -> Self {
                Self::Internal { message: std::borrow::Cow::Borrowed(message), context: None }
            }
        }

        #(#cfg)*
        impl From<String> for #name {
            #[inline]
            fn from(message: String) -> Self {
                Self::Internal { message: std::borrow::Cow::Owned(message), context: None }
            }
        }
    }
}

fn missing_derives(attrs: &[Attribute]) -> TokenStream {
    let mut present = FxHashSet::default();
    for attr in attrs.iter().filter(|attr| attr.path().is_ident("derive")) {
        let _ = attr.parse_nested_meta(|meta| {
            if let Some(last) = meta.path.segments.last() {
                present.insert(last.ident.to_string());
            }
            Ok(())
        });
    }

    let mut derives = Vec::new();
    if !present.contains("Debug") {
        derives.push(quote! { Debug });
    }
    if !present.contains("Error") {
        derives.push(quote! { ::thiserror::Error });
    }

    if derives.is_empty() { TokenStream::new() } else { quote! { #[derive(#(#derives),*)] } }
}

fn has_attr(field: &Field, name: &str) -> bool {
    field.attrs.iter().any(|attr| attr.path().is_ident(name))
}

/// Accepts `Option<Cow<'static, str>>` with or without a path prefix on `Cow`.
fn is_context_type(ty: &Type) -> bool {
    let rendered: String = quote!(#ty).to_string().chars().filter(|c| !c.is_whitespace()).collect();
    let Some(inner) = rendered.strip_prefix("Option<").and_then(|rest| rest.strip_suffix('>'))
    else {
        return false;
    };
    inner == "Cow<'static,str>" || inner.ends_with("::Cow<'static,str>")
}
