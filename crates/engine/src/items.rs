//! An `Item` is a single priced line within a purchase.
//!
//! Items are created only through the add-items operation, never standalone,
//! and deleting a purchase removes them.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, MoneyCents, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub id: Uuid,
    pub purchase_id: Uuid,
    pub name: String,
    pub price: MoneyCents,
}

impl Item {
    pub fn new(purchase_id: Uuid, name: String, price: MoneyCents) -> Self {
        Self {
            id: Uuid::new_v4(),
            purchase_id,
            name,
            price,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "items")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub purchase_id: String,
    pub name: String,
    pub price_minor: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::purchases::Entity",
        from = "Column::PurchaseId",
        to = "super::purchases::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Purchases,
    #[sea_orm(has_many = "super::item_shares::Entity")]
    ItemShares,
}

impl Related<super::purchases::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Purchases.def()
    }
}

impl Related<super::item_shares::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ItemShares.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Item> for ActiveModel {
    fn from(value: &Item) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            purchase_id: ActiveValue::Set(value.purchase_id.to_string()),
            name: ActiveValue::Set(value.name.clone()),
            price_minor: ActiveValue::Set(value.price.cents()),
        }
    }
}

impl TryFrom<Model> for Item {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "item")?,
            purchase_id: parse_uuid(&model.purchase_id, "purchase")?,
            name: model.name,
            price: MoneyCents::new(model.price_minor),
        })
    }
}
