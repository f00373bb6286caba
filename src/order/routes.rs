use axum::{
    Router,
    routing::{get, post, put},
};

use super::handlers;
use crate::state::AppState;

pub fn get_routes() -> Router<AppState> {
    Router::new()
        .route("/orders/create", post(handlers::create_order))
        .route("/orders/my-orders", get(handlers::my_orders))
        .route("/orders/{id}", get(handlers::get_order))
        .route("/orders/{id}/status", put(handlers::update_order_status))
}
