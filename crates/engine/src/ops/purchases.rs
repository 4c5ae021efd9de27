//! Purchase lifecycle and aggregate queries.

use chrono::Utc;
use sea_orm::{
    ActiveValue, QueryFilter, QueryOrder, Statement, TransactionTrait, prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    MoneyCents, Purchase, ResultEngine, item_shares, items, purchase_customers, purchases,
    util::parse_uuid,
};

use super::{Engine, normalize_required_name, with_tx};

/// One item inside a purchase detail, with the ids of the customers sharing
/// its price.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemDetail {
    pub id: Uuid,
    pub name: String,
    pub price: MoneyCents,
    pub customer_ids: Vec<Uuid>,
}

/// Full aggregate view of a purchase.
///
/// `customer_ids` lists every participant of the purchase; each item lists
/// only the participants sharing that item. The two lists are reported
/// independently even though item participants are always a subset of the
/// purchase participants.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseDetail {
    pub id: Uuid,
    pub name: String,
    pub total_amount: MoneyCents,
    pub customer_ids: Vec<Uuid>,
    pub items: Vec<ItemDetail>,
}

impl Engine {
    /// Creates an empty purchase (total 0) owned by the acting user.
    pub async fn new_purchase(&self, name: &str, user_id: &str) -> ResultEngine<Purchase> {
        let name = normalize_required_name(name, "purchase")?;
        let purchase = Purchase::new(name, user_id, Utc::now());
        let active: purchases::ActiveModel = (&purchase).into();
        with_tx!(self, |db_tx| {
            active.insert(&db_tx).await?;
            Ok(purchase)
        })
    }

    /// Renames a purchase.
    pub async fn rename_purchase(
        &self,
        purchase_id: Uuid,
        name: &str,
        user_id: &str,
    ) -> ResultEngine<Purchase> {
        let name = normalize_required_name(name, "purchase")?;
        with_tx!(self, |db_tx| {
            let model = self
                .require_purchase_owner(&db_tx, purchase_id, user_id)
                .await?;
            let active = purchases::ActiveModel {
                id: ActiveValue::Set(model.id),
                name: ActiveValue::Set(name),
                ..Default::default()
            };
            let updated = active.update(&db_tx).await?;
            Purchase::try_from(updated)
        })
    }

    /// Lists the purchases created by the acting user, newest first.
    pub async fn list_purchases(&self, user_id: &str) -> ResultEngine<Vec<Purchase>> {
        let models = purchases::Entity::find()
            .filter(purchases::Column::CreatedBy.eq(user_id.to_string()))
            .order_by_desc(purchases::Column::CreatedAt)
            .all(&self.database)
            .await?;
        models.into_iter().map(Purchase::try_from).collect()
    }

    /// Deletes a purchase and everything hanging off it.
    ///
    /// The cascade is enumerated explicitly (shares, then items, then
    /// participant rows, then the purchase) so the order is visible and
    /// testable independent of the schema's FK configuration.
    pub async fn delete_purchase(&self, purchase_id: Uuid, user_id: &str) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_purchase_owner(&db_tx, purchase_id, user_id)
                .await?;

            let backend = self.database.get_database_backend();
            let purchase_key = purchase_id.to_string();

            db_tx
                .execute(Statement::from_sql_and_values(
                    backend,
                    "DELETE FROM item_shares WHERE item_id IN \
                     (SELECT id FROM items WHERE purchase_id = ?);",
                    vec![purchase_key.clone().into()],
                ))
                .await?;
            db_tx
                .execute(Statement::from_sql_and_values(
                    backend,
                    "DELETE FROM items WHERE purchase_id = ?;",
                    vec![purchase_key.clone().into()],
                ))
                .await?;
            db_tx
                .execute(Statement::from_sql_and_values(
                    backend,
                    "DELETE FROM purchase_customers WHERE purchase_id = ?;",
                    vec![purchase_key.clone().into()],
                ))
                .await?;
            db_tx
                .execute(Statement::from_sql_and_values(
                    backend,
                    "DELETE FROM purchases WHERE id = ?;",
                    vec![purchase_key.into()],
                ))
                .await?;

            Ok(())
        })
    }

    /// Aggregate view of a purchase: total, participants, and the per-item
    /// share membership.
    pub async fn purchase_detail(
        &self,
        purchase_id: Uuid,
        user_id: &str,
    ) -> ResultEngine<PurchaseDetail> {
        with_tx!(self, |db_tx| {
            let model = self
                .require_purchase_owner(&db_tx, purchase_id, user_id)
                .await?;

            let participant_rows = purchase_customers::Entity::find()
                .filter(purchase_customers::Column::PurchaseId.eq(purchase_id.to_string()))
                .order_by_asc(purchase_customers::Column::CustomerId)
                .all(&db_tx)
                .await?;
            let customer_ids = participant_rows
                .iter()
                .map(|row| parse_uuid(&row.customer_id, "customer"))
                .collect::<ResultEngine<Vec<_>>>()?;

            let item_models = items::Entity::find()
                .filter(items::Column::PurchaseId.eq(purchase_id.to_string()))
                .all(&db_tx)
                .await?;

            let mut details = Vec::with_capacity(item_models.len());
            for item_model in item_models {
                let share_rows = item_shares::Entity::find()
                    .filter(item_shares::Column::ItemId.eq(item_model.id.clone()))
                    .order_by_asc(item_shares::Column::CustomerId)
                    .all(&db_tx)
                    .await?;
                let share_ids = share_rows
                    .iter()
                    .map(|row| parse_uuid(&row.customer_id, "customer"))
                    .collect::<ResultEngine<Vec<_>>>()?;
                details.push(ItemDetail {
                    id: parse_uuid(&item_model.id, "item")?,
                    name: item_model.name,
                    price: MoneyCents::new(item_model.price_minor),
                    customer_ids: share_ids,
                });
            }

            Ok(PurchaseDetail {
                id: parse_uuid(&model.id, "purchase")?,
                name: model.name,
                total_amount: MoneyCents::new(model.total_amount_minor),
                customer_ids,
                items: details,
            })
        })
    }
}
