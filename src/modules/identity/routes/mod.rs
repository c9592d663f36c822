mod create_session;
mod get_session;

use crate::types::Context;
use axum::routing::Router;
use std::sync::Arc;

pub fn get_router() -> Router<Arc<Context>> {
    Router::new()
        .nest("/sessions", create_session::get_router())
        .nest("/sessions/retrieve", get_session::get_router())
}
