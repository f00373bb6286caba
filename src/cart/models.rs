use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::utils::money;

use axum_food::schema::cart_items;

#[derive(Queryable, Selectable, Identifiable, Debug, PartialEq)]
#[diesel(table_name = cart_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct CartItem {
    pub id: i32,
    pub user_id: Uuid,
    pub food_id: i32,
    pub quantity: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = cart_items)]
pub struct NewCartItem {
    pub user_id: Uuid,
    pub food_id: i32,
    pub quantity: i32,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddToCartPayload {
    pub food_id: i32,
    #[serde(default = "default_quantity")]
    #[validate(range(min = 1, message = "Quantity must be a positive integer"))]
    pub quantity: i32,
}

fn default_quantity() -> i32 {
    1
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCartPayload {
    #[validate(range(min = 1, message = "Quantity must be at least 1"))]
    pub quantity: i32,
}

#[derive(Serialize, Debug, PartialEq)]
pub struct CartLineView {
    pub id: i32,
    pub food_id: i32,
    pub name: String,
    pub price: f64,
    pub image: String,
    pub description: String,
    pub quantity: i32,
}

#[derive(Serialize, Debug)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    pub total: String,
    pub count: i64,
}

impl CartView {
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: money::format_amount(0.0),
            count: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_payload_defaults_quantity_to_one() {
        let payload: AddToCartPayload = serde_json::from_str(r#"{"foodId": 3}"#).unwrap();
        assert_eq!(payload.food_id, 3);
        assert_eq!(payload.quantity, 1);
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn add_payload_rejects_non_positive_quantity() {
        let zero: AddToCartPayload =
            serde_json::from_str(r#"{"foodId": 3, "quantity": 0}"#).unwrap();
        assert!(zero.validate().is_err());

        let negative: AddToCartPayload =
            serde_json::from_str(r#"{"foodId": 3, "quantity": -2}"#).unwrap();
        assert!(negative.validate().is_err());
    }

    #[test]
    fn add_payload_rejects_non_numeric_quantity() {
        let res = serde_json::from_str::<AddToCartPayload>(r#"{"foodId": 3, "quantity": "two"}"#);
        assert!(res.is_err());
    }

    #[test]
    fn update_payload_requires_at_least_one() {
        let payload: UpdateCartPayload = serde_json::from_str(r#"{"quantity": 0}"#).unwrap();
        assert!(payload.validate().is_err());

        let payload: UpdateCartPayload = serde_json::from_str(r#"{"quantity": 4}"#).unwrap();
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn empty_cart_view_shape() {
        let view = CartView::empty();
        assert!(view.items.is_empty());
        assert_eq!(view.total, "0.00");
        assert_eq!(view.count, 0);
    }
}
