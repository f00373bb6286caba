use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use axum_food::schema::{order_items, orders};

pub const DELIVERY_ESTIMATE_MINUTES: i64 = 45;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    Delivered,
    Cancelled,
}

impl OrderStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "confirmed" => Some(Self::Confirmed),
            "preparing" => Some(Self::Preparing),
            "ready" => Some(Self::Ready),
            "delivered" => Some(Self::Delivered),
            "cancelled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

#[derive(Queryable, Selectable, Identifiable, Serialize, Debug)]
#[diesel(table_name = orders)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct Order {
    pub id: i32,
    pub user_id: Uuid,
    pub total_amount: f64,
    pub status: String,
    pub delivery_address: String,
    pub phone: String,
    pub notes: Option<String>,
    pub payment_method: String,
    pub payment_status: String,
    pub estimated_delivery_time: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}

#[derive(Insertable)]
#[diesel(table_name = orders)]
pub struct NewOrder {
    pub user_id: Uuid,
    pub total_amount: f64,
    pub status: String,
    pub delivery_address: String,
    pub phone: String,
    pub notes: Option<String>,
    pub payment_method: String,
    pub estimated_delivery_time: DateTime<Utc>,
}

/// Denormalized line captured at order creation; later catalog edits must
/// not alter it.
#[derive(Queryable, Selectable, Serialize, Debug, PartialEq)]
#[diesel(table_name = order_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct OrderItem {
    pub id: i32,
    pub order_id: i32,
    pub food_id: i32,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
    pub image: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = order_items)]
pub struct NewOrderItem {
    pub order_id: i32,
    pub food_id: i32,
    pub name: String,
    pub price: f64,
    pub quantity: i32,
    pub image: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderPayload {
    #[validate(length(min = 1, message = "Delivery address and phone are required"))]
    pub delivery_address: String,
    #[validate(length(min = 1, message = "Delivery address and phone are required"))]
    pub phone: String,
    pub notes: Option<String>,
    #[serde(default = "default_payment_method")]
    pub payment_method: String,
}

fn default_payment_method() -> String {
    "cash".to_string()
}

#[derive(Debug, Deserialize, Validate)]
pub struct StatusPayload {
    pub status: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreated {
    pub message: String,
    pub order_id: i32,
    pub total_amount: String,
    pub estimated_delivery_time: DateTime<Utc>,
}

#[derive(Serialize)]
pub struct OrderSummary {
    pub id: i32,
    pub total_amount: f64,
    pub status: String,
    pub delivery_address: String,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    #[serde(rename = "estimatedDeliveryTime")]
    pub estimated_delivery_time: DateTime<Utc>,
    pub items: String,
}

#[derive(Serialize)]
pub struct OrderDetail {
    #[serde(flatten)]
    pub order: Order,
    pub items: Vec<OrderItem>,
}

pub fn summarize_items(items: &[OrderItem]) -> String {
    items
        .iter()
        .map(|item| format!("{} x{}", item.name, item.quantity))
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips() {
        for status in [
            OrderStatus::Pending,
            OrderStatus::Confirmed,
            OrderStatus::Preparing,
            OrderStatus::Ready,
            OrderStatus::Delivered,
            OrderStatus::Cancelled,
        ] {
            assert_eq!(OrderStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn status_rejects_unknown_values() {
        assert_eq!(OrderStatus::parse("shipped"), None);
        assert_eq!(OrderStatus::parse("PENDING"), None);
        assert_eq!(OrderStatus::parse(""), None);
    }

    #[test]
    fn payment_method_defaults_to_cash() {
        let payload: CreateOrderPayload =
            serde_json::from_str(r#"{"deliveryAddress": "1 Test Lane", "phone": "555-0100"}"#)
                .unwrap();
        assert_eq!(payload.payment_method, "cash");
        assert!(payload.notes.is_none());
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn empty_address_or_phone_fails_validation() {
        let payload: CreateOrderPayload =
            serde_json::from_str(r#"{"deliveryAddress": "", "phone": "555-0100"}"#).unwrap();
        assert!(payload.validate().is_err());

        let payload: CreateOrderPayload =
            serde_json::from_str(r#"{"deliveryAddress": "1 Test Lane", "phone": ""}"#).unwrap();
        assert!(payload.validate().is_err());
    }

    fn item(name: &str, quantity: i32) -> OrderItem {
        OrderItem {
            id: 0,
            order_id: 1,
            food_id: 1,
            name: name.into(),
            price: 9.99,
            quantity,
            image: None,
        }
    }

    #[test]
    fn items_summarize_as_joined_string() {
        let items = vec![item("Margherita Pizza", 2), item("Club Sandwich", 1)];
        assert_eq!(
            summarize_items(&items),
            "Margherita Pizza x2, Club Sandwich x1"
        );
        assert_eq!(summarize_items(&[]), "");
    }

    #[test]
    fn order_summary_serializes_eta_in_camel_case() {
        let now = Utc::now();
        let summary = OrderSummary {
            id: 1,
            total_amount: 38.97,
            status: "pending".into(),
            delivery_address: "1 Test Lane".into(),
            phone: "555-0100".into(),
            created_at: now,
            estimated_delivery_time: now,
            items: "Margherita Pizza x3".into(),
        };
        let json = serde_json::to_value(&summary).unwrap();
        assert!(json.get("estimatedDeliveryTime").is_some());
        assert!(json.get("total_amount").is_some());
    }
}
