pub mod cart_item;
pub mod favorite;
pub mod order;
pub mod order_item;
pub mod product;
pub mod product_view;
pub mod user;

use rust_decimal::Decimal;
use sea_orm::sea_query::Index;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait, Schema, Set,
};

use crate::entities::{
    cart_item::Entity as CartItem,
    favorite::Entity as Favorite,
    order::Entity as Order,
    order_item::Entity as OrderItem,
    product::Entity as Product,
    product_view::Entity as ProductView,
    user::Entity as User,
};

pub async fn setup_schema(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let mut tables = vec![
        schema.create_table_from_entity(User),
        schema.create_table_from_entity(Product),
        schema.create_table_from_entity(CartItem),
        schema.create_table_from_entity(Favorite),
        schema.create_table_from_entity(Order),
        schema.create_table_from_entity(OrderItem),
        schema.create_table_from_entity(ProductView),
    ];
    for table in tables.iter_mut() {
        table.if_not_exists();
        db.execute(backend.build(&*table)).await?;
    }

    // One cart line / one favorite per (user, product); conflicting upserts
    // serialize on these.
    let cart_unique = Index::create()
        .name("uq_cart_items_user_product")
        .table(CartItem)
        .col(cart_item::Column::UserId)
        .col(cart_item::Column::ProductId)
        .unique()
        .if_not_exists()
        .to_owned();
    db.execute(backend.build(&cart_unique)).await?;

    let favorite_unique = Index::create()
        .name("uq_favorites_user_product")
        .table(Favorite)
        .col(favorite::Column::UserId)
        .col(favorite::Column::ProductId)
        .unique()
        .if_not_exists()
        .to_owned();
    db.execute(backend.build(&favorite_unique)).await?;

    Ok(())
}

// Seeds the catalog on first start; a populated products table is left alone.
pub async fn seed_catalog(db: &DatabaseConnection) -> Result<(), DbErr> {
    if Product::find().count(db).await? > 0 {
        return Ok(());
    }

    let catalog = vec![
        catalog_product(
            "Hydrating Face Cream",
            Decimal::new(1290, 2),
            "face",
            "Daily moisturizer with hyaluronic acid for dry and normal skin.",
            "images/face-cream.jpg",
            &["moisture", "daily", "hyaluronic"],
        ),
        catalog_product(
            "Gentle Cleansing Foam",
            Decimal::new(890, 2),
            "face",
            "Soap-free foam that clears makeup without stripping the skin.",
            "images/cleansing-foam.jpg",
            &["cleansing", "sensitive"],
        ),
        catalog_product(
            "Vitamin C Serum",
            Decimal::new(2190, 2),
            "face",
            "Brightening serum with 10% vitamin C and niacinamide.",
            "images/vitamin-c-serum.jpg",
            &["brightening", "serum", "vitamin-c"],
        ),
        catalog_product(
            "Night Repair Mask",
            Decimal::new(1750, 2),
            "face",
            "Overnight mask that restores the skin barrier while you sleep.",
            "images/night-mask.jpg",
            &["mask", "night", "repair"],
        ),
        catalog_product(
            "Matte Lipstick Rouge",
            Decimal::new(1150, 2),
            "lips",
            "Long-wear matte lipstick in a classic red shade.",
            "images/matte-lipstick.jpg",
            &["matte", "long-wear"],
        ),
        catalog_product(
            "Nourishing Lip Balm",
            Decimal::new(450, 2),
            "lips",
            "Shea butter balm for chapped lips, unscented.",
            "images/lip-balm.jpg",
            &["balm", "shea", "unscented"],
        ),
        catalog_product(
            "Glossy Lip Tint",
            Decimal::new(990, 2),
            "lips",
            "Sheer tint with a wet-gloss finish, buildable color.",
            "images/lip-tint.jpg",
            &["gloss", "tint"],
        ),
        catalog_product(
            "Volume Mascara",
            Decimal::new(1390, 2),
            "eyes",
            "Buildable volume mascara, smudge-proof for up to 12 hours.",
            "images/volume-mascara.jpg",
            &["mascara", "volume", "smudge-proof"],
        ),
        catalog_product(
            "Creamy Eye Pencil",
            Decimal::new(690, 2),
            "eyes",
            "Soft kohl pencil that glides on and blends before it sets.",
            "images/eye-pencil.jpg",
            &["kohl", "blendable"],
        ),
        catalog_product(
            "Soothing Eye Gel",
            Decimal::new(1490, 2),
            "eyes",
            "Cooling gel with caffeine for puffiness and dark circles.",
            "images/eye-gel.jpg",
            &["caffeine", "cooling"],
        ),
    ];

    Product::insert_many(catalog).exec(db).await?;
    tracing::info!("Seeded product catalog");
    Ok(())
}

fn catalog_product(
    name: &str,
    price: Decimal,
    category: &str,
    description: &str,
    image: &str,
    tags: &[&str],
) -> product::ActiveModel {
    product::ActiveModel {
        name: Set(name.to_owned()),
        price: Set(price),
        category: Set(category.to_owned()),
        description: Set(description.to_owned()),
        image: Set(image.to_owned()),
        tags: Set(product::Tags(tags.iter().map(|t| t.to_string()).collect())),
        ..Default::default()
    }
}
