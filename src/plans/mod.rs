use crate::state::AppState;
use axum::Router;

pub mod dto;
pub mod handlers;
pub mod repo;
pub mod targets;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::dietitian_routes())
        .merge(handlers::patient_routes())
}
