use axum::{
    Router,
    routing::{delete, get, post, put},
};

use super::handlers;
use crate::state::AppState;

pub fn get_routes() -> Router<AppState> {
    Router::new()
        .route("/cart", get(handlers::get_cart))
        .route("/cart/add", post(handlers::add_to_cart))
        .route("/cart/update/{id}", put(handlers::update_cart_item))
        .route("/cart/remove/{id}", delete(handlers::remove_cart_item))
        .route("/cart/clear", delete(handlers::clear_cart))
}
