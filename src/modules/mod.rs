pub mod auth;
pub mod dev;
pub mod identity;
pub mod listing;
pub mod payment;
pub mod reminder;

mod router;
pub use router::get_router;
