//! Catalog store operations.
//!
//! Every function takes any [`ConnectionTrait`] so handlers can run them on a
//! request-scoped [`sea_orm::DatabaseTransaction`]: committed on success,
//! rolled back when dropped on an error path.

use sea_orm::*;

use crate::entity::{image, product};

/// Insert a product and return the persisted row with its assigned id.
pub async fn create_product<C: ConnectionTrait>(
    db: &C,
    name: &str,
    price: f64,
) -> Result<product::Model, DbErr> {
    product::ActiveModel {
        name: Set(name.to_string()),
        price: Set(price),
        ..Default::default()
    }
    .insert(db)
    .await
}

/// Insert an image row for `product_id`.
///
/// Fails with a foreign-key violation when the product does not exist.
pub async fn create_image<C: ConnectionTrait>(
    db: &C,
    filename: &str,
    product_id: i32,
) -> Result<image::Model, DbErr> {
    image::ActiveModel {
        filename: Set(filename.to_string()),
        product_id: Set(product_id),
        ..Default::default()
    }
    .insert(db)
    .await
}

pub async fn find_product<C: ConnectionTrait>(
    db: &C,
    id: i32,
) -> Result<Option<product::Model>, DbErr> {
    product::Entity::find_by_id(id).one(db).await
}

/// Images of a product in insertion order.
pub async fn list_images<C: ConnectionTrait>(
    db: &C,
    product_id: i32,
) -> Result<Vec<image::Model>, DbErr> {
    image::Entity::find()
        .filter(image::Column::ProductId.eq(product_id))
        .order_by_asc(image::Column::Id)
        .all(db)
        .await
}

/// All image rows recorded under `filename`, across products.
pub async fn find_images_by_filename<C: ConnectionTrait>(
    db: &C,
    filename: &str,
) -> Result<Vec<image::Model>, DbErr> {
    image::Entity::find()
        .filter(image::Column::Filename.eq(filename))
        .order_by_asc(image::Column::Id)
        .all(db)
        .await
}
