use std::collections::HashMap;

use axum::extract::{Json, Path, Query, State};
use chrono::{Duration, Utc};
use diesel::prelude::*;
use diesel_async::scoped_futures::ScopedFutureExt;
use diesel_async::{AsyncConnection, RunQueryDsl};
use serde_json::{Value, json};

use super::models::{
    CreateOrderPayload, DELIVERY_ESTIMATE_MINUTES, NewOrder, NewOrderItem, Order, OrderCreated,
    OrderDetail, OrderItem, OrderStatus, OrderSummary, StatusPayload, summarize_items,
};
use crate::auth::token::AuthUser;
use crate::cart::models::CartItem;
use crate::food::models::FoodItem;
use crate::utils::{ValidatedJson, error::ApiError, internal, money, types::{Pagination, Pool}};

const PAYMENT_METHODS: [&str; 3] = ["cash", "card", "online"];

pub async fn create_order(
    State(pool): State<Pool>,
    user: AuthUser,
    ValidatedJson(payload): ValidatedJson<CreateOrderPayload>,
) -> Result<Json<OrderCreated>, ApiError> {
    use axum_food::schema::{cart_items, food_items, order_items, orders};

    if !PAYMENT_METHODS.contains(&payload.payment_method.as_str()) {
        return Err(ApiError::InvalidArgument("Invalid payment method".into()));
    }

    let mut conn = pool.get().await.map_err(internal)?;
    let user_id = user.id;

    // Snapshot, total, insert and cart-clear commit or roll back together;
    // FOR UPDATE holds off concurrent cart mutations from the same user.
    let order = conn
        .transaction::<Order, ApiError, _>(|conn| {
            async move {
                let lines: Vec<CartItem> = cart_items::table
                    .filter(cart_items::user_id.eq(user_id))
                    .order(cart_items::id.asc())
                    .for_update()
                    .select(CartItem::as_select())
                    .load(conn)
                    .await?;

                if lines.is_empty() {
                    return Err(ApiError::InvalidState("Cart is empty".into()));
                }

                let food_ids: Vec<i32> = lines.iter().map(|line| line.food_id).collect();
                let foods: HashMap<i32, FoodItem> = food_items::table
                    .filter(food_items::id.eq_any(&food_ids))
                    .select(FoodItem::as_select())
                    .load::<FoodItem>(conn)
                    .await?
                    .into_iter()
                    .map(|food| (food.id, food))
                    .collect();

                let mut snapshot = Vec::with_capacity(lines.len());
                for line in &lines {
                    let food = foods.get(&line.food_id).ok_or_else(|| {
                        internal(format!("cart line {} references missing food", line.id))
                    })?;
                    snapshot.push((food, line.quantity));
                }

                let total_amount =
                    money::order_total(snapshot.iter().map(|(food, qty)| (food.price, *qty)));

                let new_order = NewOrder {
                    user_id,
                    total_amount,
                    status: OrderStatus::Pending.as_str().to_string(),
                    delivery_address: payload.delivery_address,
                    phone: payload.phone,
                    notes: payload.notes,
                    payment_method: payload.payment_method,
                    estimated_delivery_time: Utc::now()
                        + Duration::minutes(DELIVERY_ESTIMATE_MINUTES),
                };

                let order: Order = diesel::insert_into(orders::table)
                    .values(&new_order)
                    .returning(Order::as_returning())
                    .get_result(conn)
                    .await?;

                let items: Vec<NewOrderItem> = snapshot
                    .into_iter()
                    .map(|(food, quantity)| NewOrderItem {
                        order_id: order.id,
                        food_id: food.id,
                        name: food.name.clone(),
                        price: food.price,
                        quantity,
                        image: Some(food.image.clone()),
                    })
                    .collect();

                diesel::insert_into(order_items::table)
                    .values(&items)
                    .execute(conn)
                    .await?;

                diesel::delete(cart_items::table.filter(cart_items::user_id.eq(user_id)))
                    .execute(conn)
                    .await?;

                Ok(order)
            }
            .scope_boxed()
        })
        .await?;

    Ok(Json(OrderCreated {
        message: "Order created successfully".into(),
        order_id: order.id,
        total_amount: money::format_amount(order.total_amount),
        estimated_delivery_time: order.estimated_delivery_time,
    }))
}

pub async fn my_orders(
    State(pool): State<Pool>,
    user: AuthUser,
    Query(params): Query<Pagination>,
) -> Result<Json<Vec<OrderSummary>>, ApiError> {
    use axum_food::schema::{order_items, orders};

    let mut conn = pool.get().await.map_err(internal)?;

    let rows: Vec<Order> = orders::table
        .filter(orders::user_id.eq(user.id))
        .order(orders::created_at.desc())
        .limit(params.limit())
        .offset(params.offset())
        .select(Order::as_select())
        .load(&mut conn)
        .await?;

    let order_ids: Vec<i32> = rows.iter().map(|order| order.id).collect();
    let items: Vec<OrderItem> = order_items::table
        .filter(order_items::order_id.eq_any(&order_ids))
        .order(order_items::id.asc())
        .select(OrderItem::as_select())
        .load(&mut conn)
        .await?;

    let mut items_by_order: HashMap<i32, Vec<OrderItem>> = HashMap::new();
    for item in items {
        items_by_order.entry(item.order_id).or_default().push(item);
    }

    let res = rows
        .into_iter()
        .map(|order| OrderSummary {
            items: items_by_order
                .get(&order.id)
                .map(|items| summarize_items(items))
                .unwrap_or_default(),
            id: order.id,
            total_amount: order.total_amount,
            status: order.status,
            delivery_address: order.delivery_address,
            phone: order.phone,
            created_at: order.created_at,
            estimated_delivery_time: order.estimated_delivery_time,
        })
        .collect();

    Ok(Json(res))
}

pub async fn get_order(
    State(pool): State<Pool>,
    user: AuthUser,
    Path(id): Path<i32>,
) -> Result<Json<OrderDetail>, ApiError> {
    use axum_food::schema::{order_items, orders};

    let mut conn = pool.get().await.map_err(internal)?;

    let order = orders::table
        .filter(orders::id.eq(id))
        .filter(orders::user_id.eq(user.id))
        .select(Order::as_select())
        .first(&mut conn)
        .await
        .optional()?
        .ok_or_else(|| ApiError::NotFound("Order not found".into()))?;

    let items = order_items::table
        .filter(order_items::order_id.eq(order.id))
        .order(order_items::id.asc())
        .select(OrderItem::as_select())
        .load(&mut conn)
        .await?;

    Ok(Json(OrderDetail { order, items }))
}

pub async fn update_order_status(
    State(pool): State<Pool>,
    user: AuthUser,
    Path(id): Path<i32>,
    ValidatedJson(payload): ValidatedJson<StatusPayload>,
) -> Result<Json<Value>, ApiError> {
    use axum_food::schema::orders;

    let status = OrderStatus::parse(&payload.status)
        .ok_or_else(|| ApiError::InvalidArgument("Invalid status".into()))?;

    let mut conn = pool.get().await.map_err(internal)?;

    let order: Order = diesel::update(
        orders::table
            .filter(orders::id.eq(id))
            .filter(orders::user_id.eq(user.id)),
    )
    .set(orders::status.eq(status.as_str()))
    .returning(Order::as_returning())
    .get_result(&mut conn)
    .await
    .optional()?
    .ok_or_else(|| ApiError::NotFound("Order not found".into()))?;

    Ok(Json(json!({
        "message": "Order status updated successfully",
        "order": order,
    })))
}
