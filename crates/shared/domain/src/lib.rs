//! # Domain Models
//!
//! Pure data types shared by every gateway crate: configuration, roles and sessions,
//! the backend's resource shapes, sidebar navigation and the optimistic mutation
//! result. Keep it lean: no I/O or networking here.

pub mod config;
pub mod constants;
pub mod models;
pub mod mutation;
pub mod navigation;
pub mod registry;
pub mod role;
pub mod session;
