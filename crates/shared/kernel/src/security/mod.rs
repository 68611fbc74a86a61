//! Access decisions. Pure functions only; the middleware lives with the identity slice.

pub mod route;
