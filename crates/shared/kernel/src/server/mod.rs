pub mod extract;
pub mod health;
pub mod reply;
pub mod router;
pub mod state;
