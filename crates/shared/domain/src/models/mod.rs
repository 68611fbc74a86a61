//! Resource shapes exchanged with the REST backend. Field names are camelCase on the wire.

pub mod cart;
pub mod menu;
pub mod order;
pub mod restaurant;
pub mod review;
pub mod user;
