mod candidates;
pub mod dto;
mod fallback;
mod full_body;
pub mod handlers;
mod prescription;
mod replacement;
mod selection;
mod services;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    handlers::routes()
}
