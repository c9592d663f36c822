pub mod notification;
pub mod phone;
pub mod stripe;
