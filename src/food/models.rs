use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use axum_food::schema::food_items;

#[derive(Queryable, Selectable, Serialize, Debug, PartialEq)]
#[diesel(table_name = food_items)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct FoodItem {
    pub id: i32,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub image: String,
    pub category: String,
    pub available: bool,
    pub rating: f64,
    pub reviews: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct FoodQuery {
    pub category: Option<String>,
    pub search: Option<String>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodPage {
    pub foods: Vec<FoodItem>,
    pub total_pages: i64,
    pub current_page: i64,
    pub total: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn food_page_serializes_with_camel_case_keys() {
        let page = FoodPage {
            foods: Vec::new(),
            total_pages: 3,
            current_page: 1,
            total: 25,
        };
        let json = serde_json::to_value(&page).unwrap();
        assert!(json.get("totalPages").is_some());
        assert!(json.get("currentPage").is_some());
        assert!(json.get("total_pages").is_none());
        assert_eq!(json["total"], 25);
    }
}
