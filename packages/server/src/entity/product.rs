use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub name: String,
    pub price: f64,

    #[sea_orm(has_many)]
    pub images: HasMany<super::image::Entity>,
}

impl ActiveModelBehavior for ActiveModel {}
