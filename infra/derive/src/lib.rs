#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros shared by every crate of the gateway workspace.
//!
//! * [`macro@main`] boots the Tokio runtime from an `async fn main`.
//! * [`macro@fhub_error`] turns an enum into a `thiserror` error with context support.
//! * [`macro@fhub_slice`] turns a struct into an `Arc`-backed feature slice.
//!
//! The examples below are `ignore`d because proc-macro crates cannot use their own macros
//! in doctests; the `tests/` directory exercises them for real.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, ItemFn, ItemStruct, parse_macro_input};

/// Attribute macro that runs an `async fn main` on a preconfigured Tokio runtime.
///
/// # Arguments
///
/// * `high_performance` - Server preset (larger stacks, longer keep-alive).
/// * `memory_efficient` - Small footprint preset for tooling and tests.
/// * `default` - Worker count from `TOKIO_WORKER_THREADS` or available parallelism.
///
/// # Examples
///
/// ```rust,ignore
/// #[fhub_runtime::main(high_performance)]
/// async fn main() -> anyhow::Result<()> {
///     Ok(())
/// }
/// ```
#[proc_macro_attribute]
pub fn main(args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemFn);
    macros::runtime::expand_main(args.into(), input).into()
}

/// Defines a crate error enum.
///
/// Every variant must use named fields. Variants may carry a
/// `context: Option<Cow<'static, str>>` field, and variants wrapping an upstream error
/// carry it in a field named `source` (or marked `#[source]` / `#[from]`), which then
/// requires the `context` field as well.
///
/// # Generated Items
///
/// * `#[derive(Debug, thiserror::Error)]` unless already derived.
/// * `<Name>Ext` trait adding `.context(..)` to `Result<T, Name>` and to
///   `Result<T, Source>` for each wrapped source type.
/// * `From<Source>` for each wrapped source type, so `?` works.
/// * `From<&'static str>` and `From<String>` when an `Internal` variant exists.
/// * A private `format_context` helper for use inside `#[error(..)]` strings.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[fhub_derive::fhub_error]
/// pub enum BackendError {
///     #[error("Transport error{}: {source}", format_context(.context))]
///     Transport { source: reqwest::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal backend error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
/// ```
#[proc_macro_attribute]
pub fn fhub_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_error(input).into()
}

/// Turns a struct into a cheaply clonable feature slice.
///
/// The annotated struct becomes `<Name>Inner`; `<Name>` wraps it in an `Arc`, derefs to it
/// and implements `fhub_kernel::domain::registry::FeatureSlice` so it can be registered in
/// the gateway state.
///
/// # Example
/// ```rust,ignore
/// #[fhub_derive::fhub_slice]
/// pub struct Catalog {
///     pub service: CatalogService,
/// }
///
/// let slice = Catalog::new(CatalogInner { service });
/// ```
#[proc_macro_attribute]
pub fn fhub_slice(_attr: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as ItemStruct);
    macros::slice::expand_slice(input).into()
}
