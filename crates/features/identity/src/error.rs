use fhub_kernel::backend::BackendError;
use std::borrow::Cow;

/// A specialized [`IdentityError`] enum of this crate.
#[fhub_derive::fhub_error]
pub enum IdentityError {
    /// The auth service client could not be built.
    #[error("Identity backend error{}: {source}", format_context(.context))]
    Backend { source: BackendError, context: Option<Cow<'static, str>> },
    /// Internal fallback for unexpected issues or logic errors.
    #[error("Internal identity error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}
