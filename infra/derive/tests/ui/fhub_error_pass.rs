use fhub_derive::fhub_error;
use std::borrow::Cow;

#[fhub_error]
pub enum DemoError {
    #[error("IO error{}: {source}", format_context(.context))]
    Io { source: std::io::Error, context: Option<Cow<'static, str>> },

    #[error("Upstream returned {status}{}: {message}", format_context(.context))]
    Status { status: u16, message: Cow<'static, str>, context: Option<Cow<'static, str>> },

    #[error("Internal error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

fn read() -> Result<(), DemoError> {
    Err(std::io::Error::other("disk")).context("reading cart snapshot")
}

fn main() {
    let err = read().unwrap_err();
    assert_eq!(err.to_string(), "IO error (reading cart snapshot): disk");

    let err: DemoError = "boom".into();
    assert!(matches!(err, DemoError::Internal { .. }));

    let status: Result<(), DemoError> = Err(DemoError::Status {
        status: 404,
        message: "missing".into(),
        context: None,
    });
    let err = status.context("loading menu").unwrap_err();
    assert_eq!(err.to_string(), "Upstream returned 404 (loading menu): missing");
}
