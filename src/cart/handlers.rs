use axum::extract::{Json, Path, State};
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use serde_json::{Value, json};

use super::models::{AddToCartPayload, CartItem, CartLineView, CartView, NewCartItem, UpdateCartPayload};
use crate::auth::token::{AuthUser, MaybeAuthUser};
use crate::food::models::FoodItem;
use crate::utils::{ValidatedJson, error::ApiError, internal, money, types::Pool};

pub async fn get_cart(
    State(pool): State<Pool>,
    MaybeAuthUser(user): MaybeAuthUser,
) -> Result<Json<CartView>, ApiError> {
    use axum_food::schema::{cart_items, food_items};

    let Some(user) = user else {
        return Ok(Json(CartView::empty()));
    };

    let mut conn = pool.get().await.map_err(internal)?;

    let rows: Vec<(CartItem, FoodItem)> = cart_items::table
        .inner_join(food_items::table)
        .filter(cart_items::user_id.eq(user.id))
        .order(cart_items::created_at.desc())
        .select((CartItem::as_select(), FoodItem::as_select()))
        .load(&mut conn)
        .await?;

    let total = money::order_total(rows.iter().map(|(line, food)| (food.price, line.quantity)));
    let count = rows.iter().map(|(line, _)| i64::from(line.quantity)).sum();

    let items = rows
        .into_iter()
        .map(|(line, food)| CartLineView {
            id: line.id,
            food_id: food.id,
            name: food.name,
            price: food.price,
            image: food.image,
            description: food.description,
            quantity: line.quantity,
        })
        .collect();

    Ok(Json(CartView {
        items,
        total: money::format_amount(total),
        count,
    }))
}

pub async fn add_to_cart(
    State(pool): State<Pool>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<AddToCartPayload>,
) -> Result<Json<Value>, ApiError> {
    use axum_food::schema::{cart_items, food_items};

    let mut conn = pool.get().await.map_err(internal)?;

    let available: Option<bool> = food_items::table
        .find(payload.food_id)
        .select(food_items::available)
        .first(&mut conn)
        .await
        .optional()?;

    if available != Some(true) {
        return Err(ApiError::NotFound(
            "Food item not found or unavailable".into(),
        ));
    }

    let line = NewCartItem {
        user_id: user.id,
        food_id: payload.food_id,
        quantity: payload.quantity,
    };

    // The unique index on (user_id, food_id) makes concurrent adds merge
    // instead of racing into duplicate lines.
    let new_quantity: i32 = diesel::insert_into(cart_items::table)
        .values(&line)
        .on_conflict((cart_items::user_id, cart_items::food_id))
        .do_update()
        .set(cart_items::quantity.eq(cart_items::quantity + payload.quantity))
        .returning(cart_items::quantity)
        .get_result(&mut conn)
        .await?;

    let message = if new_quantity == payload.quantity {
        "Item added to cart successfully"
    } else {
        "Cart updated successfully"
    };

    Ok(Json(json!({ "message": message })))
}

pub async fn update_cart_item(
    State(pool): State<Pool>,
    user: AuthUser,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<UpdateCartPayload>,
) -> Result<Json<Value>, ApiError> {
    use axum_food::schema::cart_items;

    let mut conn = pool.get().await.map_err(internal)?;

    let updated = diesel::update(
        cart_items::table
            .filter(cart_items::id.eq(id))
            .filter(cart_items::user_id.eq(user.id)),
    )
    .set(cart_items::quantity.eq(payload.quantity))
    .execute(&mut conn)
    .await?;

    if updated == 0 {
        return Err(ApiError::NotFound("Cart item not found".into()));
    }

    Ok(Json(json!({ "message": "Cart updated successfully" })))
}

pub async fn remove_cart_item(
    State(pool): State<Pool>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<Value>, ApiError> {
    use axum_food::schema::cart_items;

    let mut conn = pool.get().await.map_err(internal)?;

    let deleted = diesel::delete(
        cart_items::table
            .filter(cart_items::id.eq(id))
            .filter(cart_items::user_id.eq(user.id)),
    )
    .execute(&mut conn)
    .await?;

    if deleted == 0 {
        return Err(ApiError::NotFound("Cart item not found".into()));
    }

    Ok(Json(json!({ "message": "Item removed successfully" })))
}

pub async fn clear_cart(
    State(pool): State<Pool>,
    user: AuthUser,
) -> Result<Json<Value>, ApiError> {
    use axum_food::schema::cart_items;

    let mut conn = pool.get().await.map_err(internal)?;

    diesel::delete(cart_items::table.filter(cart_items::user_id.eq(user.id)))
        .execute(&mut conn)
        .await?;

    Ok(Json(json!({ "message": "Cart cleared successfully" })))
}
