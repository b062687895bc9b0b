use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
pub(crate) mod password;
pub mod repo;
pub mod services;
mod validate;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::submit_routes())
        .merge(handlers::read_routes())
}
