//! A `Customer` is a billable participant record owned by the user who
//! created it. It is not a login identity.

use sea_orm::{ActiveValue, entity::prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{EngineError, util::parse_uuid};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
    pub created_by: String,
}

impl Customer {
    pub fn new(name: String, email: Option<String>, created_by: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            email,
            created_by: created_by.to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "customers")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub created_by: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::purchase_customers::Entity")]
    PurchaseCustomers,
    #[sea_orm(has_many = "super::item_shares::Entity")]
    ItemShares,
}

impl Related<super::purchase_customers::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PurchaseCustomers.def()
    }
}

impl Related<super::item_shares::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ItemShares.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl From<&Customer> for ActiveModel {
    fn from(value: &Customer) -> Self {
        Self {
            id: ActiveValue::Set(value.id.to_string()),
            name: ActiveValue::Set(value.name.clone()),
            email: ActiveValue::Set(value.email.clone()),
            created_by: ActiveValue::Set(value.created_by.clone()),
        }
    }
}

impl TryFrom<Model> for Customer {
    type Error = EngineError;

    fn try_from(model: Model) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_uuid(&model.id, "customer")?,
            name: model.name,
            email: model.email,
            created_by: model.created_by,
        })
    }
}
