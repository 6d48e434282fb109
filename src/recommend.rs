use std::cmp::Reverse;
use std::collections::{HashMap, HashSet};

use rand::seq::SliceRandom;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};

use crate::entities::{favorite, order, order_item, product};

pub const MAX_RECOMMENDATIONS: usize = 6;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecommendationKind {
    Personal,
    PopularFallback,
}

impl RecommendationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            RecommendationKind::Personal => "personal",
            RecommendationKind::PopularFallback => "popular_fallback",
        }
    }
}

// Uniform random sample; the default recommendation when no signal exists.
pub async fn random_products<C: ConnectionTrait>(db: &C) -> Result<Vec<product::Model>, DbErr> {
    let mut products = product::Entity::find().all(db).await?;
    products.shuffle(&mut rand::thread_rng());
    products.truncate(MAX_RECOMMENDATIONS);
    Ok(products)
}

// Ranked by number of order lines; a product never purchased counts as zero.
pub async fn popular_products<C: ConnectionTrait>(db: &C) -> Result<Vec<product::Model>, DbErr> {
    let purchases = order_item::Entity::find().all(db).await?;
    let mut counts: HashMap<i32, usize> = HashMap::new();
    for item in &purchases {
        *counts.entry(item.product_id).or_default() += 1;
    }

    let products = product::Entity::find().all(db).await?;
    Ok(rank_by_count(products, &counts))
}

// Same shape as popular_products, ranked by favorite rows instead.
pub async fn most_favorited_products<C: ConnectionTrait>(
    db: &C,
) -> Result<Vec<product::Model>, DbErr> {
    let favorites = favorite::Entity::find().all(db).await?;
    let mut counts: HashMap<i32, usize> = HashMap::new();
    for entry in &favorites {
        *counts.entry(entry.product_id).or_default() += 1;
    }

    let products = product::Entity::find().all(db).await?;
    Ok(rank_by_count(products, &counts))
}

// Category-affinity recommendations: products from the user's purchased
// categories that they have not bought yet. A user with no purchase history
// gets the popular ranking instead, tagged as a fallback.
pub async fn personal_for_user<C: ConnectionTrait>(
    db: &C,
    user_id: i32,
) -> Result<(Vec<product::Model>, RecommendationKind), DbErr> {
    let order_ids: Vec<i32> = order::Entity::find()
        .filter(order::Column::UserId.eq(user_id))
        .all(db)
        .await?
        .into_iter()
        .map(|placed| placed.id)
        .collect();

    let purchased: HashSet<i32> = if order_ids.is_empty() {
        HashSet::new()
    } else {
        order_item::Entity::find()
            .filter(order_item::Column::OrderId.is_in(order_ids))
            .all(db)
            .await?
            .into_iter()
            .map(|item| item.product_id)
            .collect()
    };

    if purchased.is_empty() {
        let products = popular_products(db).await?;
        return Ok((products, RecommendationKind::PopularFallback));
    }

    let categories: HashSet<String> = product::Entity::find()
        .filter(product::Column::Id.is_in(purchased.iter().copied()))
        .all(db)
        .await?
        .into_iter()
        .map(|prod| prod.category)
        .collect();

    let mut candidates = product::Entity::find()
        .filter(product::Column::Category.is_in(categories))
        .all(db)
        .await?;
    candidates.retain(|prod| !purchased.contains(&prod.id));
    candidates.shuffle(&mut rand::thread_rng());
    candidates.truncate(MAX_RECOMMENDATIONS);

    Ok((candidates, RecommendationKind::Personal))
}

// Shuffle before the stable sort so equal counts stay in random relative
// order; the shuffle is re-rolled per call.
fn rank_by_count(
    mut products: Vec<product::Model>,
    counts: &HashMap<i32, usize>,
) -> Vec<product::Model> {
    products.shuffle(&mut rand::thread_rng());
    products.sort_by_key(|prod| Reverse(counts.get(&prod.id).copied().unwrap_or(0)));
    products.truncate(MAX_RECOMMENDATIONS);
    products
}
