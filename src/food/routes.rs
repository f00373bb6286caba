use axum::{Router, routing::get};

use super::handlers;
use crate::state::AppState;

pub fn get_routes() -> Router<AppState> {
    Router::new()
        .route("/food", get(handlers::get_foods))
        .route("/food/{id}", get(handlers::get_food_by_id))
        .route("/food/categories/all", get(handlers::get_categories))
        .route("/food/popular/items", get(handlers::get_popular))
}
