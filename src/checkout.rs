use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, Set,
    TransactionTrait,
};
use thiserror::Error;

use crate::entities::{cart_item, order, order_item, product};

#[derive(Debug)]
pub struct PlacedOrder {
    pub order_id: i32,
    pub total: Decimal,
}

#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("Cart is empty")]
    EmptyCart,
    #[error("Database error: {0}")]
    Db(#[from] DbErr),
}

// Converts the user's cart into a pending order on a single transaction:
// read lines with current prices, write the order and one line item per
// cart entry, clear the cart. Any failure rolls the whole sequence back.
// The total is computed here from the joined prices, never taken from the
// caller.
pub async fn place_order(
    db: &DatabaseConnection,
    user_id: i32,
) -> Result<PlacedOrder, CheckoutError> {
    let txn = db.begin().await?;

    let lines = cart_item::Entity::find()
        .filter(cart_item::Column::UserId.eq(user_id))
        .find_also_related(product::Entity)
        .all(&txn)
        .await?;

    if lines.is_empty() {
        txn.rollback().await?;
        return Err(CheckoutError::EmptyCart);
    }

    let mut resolved = Vec::with_capacity(lines.len());
    for (line, prod) in lines {
        let prod = prod.ok_or_else(|| {
            DbErr::RecordNotFound(format!(
                "product {} referenced by cart line {}",
                line.product_id, line.id
            ))
        })?;
        resolved.push((line, prod));
    }

    let total: Decimal = resolved
        .iter()
        .map(|(line, prod)| prod.price * Decimal::from(line.quantity))
        .sum();

    let placed = order::ActiveModel {
        user_id: Set(user_id),
        total_amount: Set(total),
        status: Set(order::Status::Pending),
        created_at: Set(Utc::now()),
        ..Default::default()
    }
    .insert(&txn)
    .await?;

    let items: Vec<order_item::ActiveModel> = resolved
        .iter()
        .map(|(line, prod)| order_item::ActiveModel {
            order_id: Set(placed.id),
            product_id: Set(line.product_id),
            quantity: Set(line.quantity),
            price: Set(prod.price),
            ..Default::default()
        })
        .collect();
    order_item::Entity::insert_many(items).exec(&txn).await?;

    cart_item::Entity::delete_many()
        .filter(cart_item::Column::UserId.eq(user_id))
        .exec(&txn)
        .await?;

    txn.commit().await?;

    Ok(PlacedOrder {
        order_id: placed.id,
        total,
    })
}
