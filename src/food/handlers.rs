use axum::extract::{Json, Path, Query, State};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use super::models::{FoodItem, FoodPage, FoodQuery};
use crate::utils::{error::ApiError, internal, types::Pool};

pub async fn get_foods(
    State(pool): State<Pool>,
    Query(params): Query<FoodQuery>,
) -> Result<Json<FoodPage>, ApiError> {
    use axum_food::schema::food_items;

    let page = params.page.unwrap_or(1).max(1);
    let limit = params.limit.unwrap_or(10).clamp(1, 100);

    let mut conn = pool.get().await.map_err(internal)?;

    // Boxed queries cannot be cloned, so the filter stack is built twice.
    let filtered = || {
        let mut query = food_items::table
            .filter(food_items::available.eq(true))
            .into_boxed();

        if let Some(category) = &params.category {
            query = query.filter(food_items::category.eq(category.to_lowercase()));
        }

        if let Some(search) = &params.search {
            let pattern = format!("%{search}%");
            query = query.filter(
                food_items::name
                    .ilike(pattern.clone())
                    .or(food_items::description.ilike(pattern)),
            );
        }

        query
    };

    let total: i64 = filtered().count().get_result(&mut conn).await?;

    let foods = filtered()
        .order(food_items::created_at.desc())
        .limit(limit)
        .offset((page - 1) * limit)
        .select(FoodItem::as_select())
        .load(&mut conn)
        .await?;

    Ok(Json(FoodPage {
        foods,
        total_pages: (total + limit - 1) / limit,
        current_page: page,
        total,
    }))
}

pub async fn get_food_by_id(
    State(pool): State<Pool>,
    Path(id): Path<i32>,
) -> Result<Json<FoodItem>, ApiError> {
    use axum_food::schema::food_items;

    let mut conn = pool.get().await.map_err(internal)?;

    let food = food_items::table
        .find(id)
        .filter(food_items::available.eq(true))
        .select(FoodItem::as_select())
        .first(&mut conn)
        .await
        .optional()?
        .ok_or_else(|| ApiError::NotFound("Food item not found".into()))?;

    Ok(Json(food))
}

pub async fn get_categories(State(pool): State<Pool>) -> Result<Json<Vec<String>>, ApiError> {
    use axum_food::schema::food_items;

    let mut conn = pool.get().await.map_err(internal)?;

    let categories = food_items::table
        .filter(food_items::available.eq(true))
        .select(food_items::category)
        .distinct()
        .order(food_items::category.asc())
        .load(&mut conn)
        .await?;

    Ok(Json(categories))
}

pub async fn get_popular(State(pool): State<Pool>) -> Result<Json<Vec<FoodItem>>, ApiError> {
    use axum_food::schema::food_items;

    let mut conn = pool.get().await.map_err(internal)?;

    let foods = food_items::table
        .filter(food_items::available.eq(true))
        .order((food_items::rating.desc(), food_items::reviews.desc()))
        .limit(6)
        .select(FoodItem::as_select())
        .load(&mut conn)
        .await?;

    Ok(Json(foods))
}
