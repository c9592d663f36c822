use super::{auth, dev, identity, listing, payment, reminder};
use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .nest("/auth", auth::routes::get_router())
        .nest("/identity", identity::routes::get_router())
        .nest("/payments", payment::routes::get_router())
        .nest("/listings", listing::routes::get_router())
        .nest("/reminders", reminder::routes::get_router())
        .nest("/dev", dev::routes::get_router())
}
