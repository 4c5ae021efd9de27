//! Item operations: batched creation with share allocation, removal, and
//! single-item lookup.

use std::collections::HashSet;

use sea_orm::{ActiveValue, QueryFilter, TransactionTrait, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    EngineError, Item, MoneyCents, ResultEngine, item_shares, items, purchases,
    split::split_evenly,
};

use super::{Engine, normalize_required_name, with_tx};

/// Input for one item in an add-items batch: the price is split evenly
/// across `customer_ids`, which must all participate in the purchase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewItem {
    pub name: String,
    pub price: MoneyCents,
    pub customer_ids: Vec<Uuid>,
}

/// A created item, echoed back in input order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedItem {
    pub id: Uuid,
    pub purchase_id: Uuid,
    pub name: String,
    pub price: MoneyCents,
}

impl Engine {
    /// Adds a batch of items to a purchase, splitting each price across that
    /// item's participants. The purchase total is bumped once, by the sum of
    /// the whole batch; any failure rolls the batch back entirely.
    pub async fn add_items(
        &self,
        purchase_id: Uuid,
        new_items: &[NewItem],
        user_id: &str,
    ) -> ResultEngine<Vec<CreatedItem>> {
        with_tx!(self, |db_tx| {
            self.require_purchase_owner(&db_tx, purchase_id, user_id)
                .await?;

            let mut created = Vec::with_capacity(new_items.len());
            let mut batch_total = MoneyCents::ZERO;

            for draft in new_items {
                let name = normalize_required_name(&draft.name, "item")?;
                if draft.price.is_negative() {
                    return Err(EngineError::InvalidAmount(format!(
                        "item price must not be negative: {}",
                        draft.price
                    )));
                }
                if draft.customer_ids.is_empty() {
                    return Err(EngineError::InvalidAmount(
                        "item needs at least one participant".to_string(),
                    ));
                }
                let mut seen = HashSet::with_capacity(draft.customer_ids.len());
                for customer_id in &draft.customer_ids {
                    if !seen.insert(*customer_id) {
                        return Err(EngineError::DuplicateRecord(
                            "participant listed twice for one item".to_string(),
                        ));
                    }
                }

                let item = Item::new(purchase_id, name, draft.price);
                let active: items::ActiveModel = (&item).into();
                active.insert(&db_tx).await?;

                let amounts = split_evenly(item.price, draft.customer_ids.len());
                for (&customer_id, amount) in draft.customer_ids.iter().zip(amounts) {
                    self.require_customer_in_purchase(&db_tx, purchase_id, customer_id)
                        .await?;
                    let share = item_shares::ActiveModel {
                        item_id: ActiveValue::Set(item.id.to_string()),
                        customer_id: ActiveValue::Set(customer_id.to_string()),
                        amount_minor: ActiveValue::Set(amount.cents()),
                    };
                    share.insert(&db_tx).await?;
                }

                batch_total = batch_total.checked_add(item.price).ok_or_else(|| {
                    EngineError::InvalidAmount("batch total overflow".to_string())
                })?;
                created.push(CreatedItem {
                    id: item.id,
                    purchase_id,
                    name: item.name,
                    price: item.price,
                });
            }

            if !new_items.is_empty() {
                self.apply_total_delta(&db_tx, purchase_id, batch_total)
                    .await?;
            }
            Ok(created)
        })
    }

    /// Removes an item and its shares, shrinking the purchase total by the
    /// item price.
    pub async fn remove_item(
        &self,
        item_id: Uuid,
        purchase_id: Uuid,
        user_id: &str,
    ) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_purchase_owner(&db_tx, purchase_id, user_id)
                .await?;
            let item = self
                .require_item_in_purchase(&db_tx, purchase_id, item_id)
                .await?;
            let price = MoneyCents::new(item.price_minor);

            item_shares::Entity::delete_many()
                .filter(item_shares::Column::ItemId.eq(item.id.clone()))
                .exec(&db_tx)
                .await?;
            items::Entity::delete_by_id(item.id).exec(&db_tx).await?;
            self.apply_total_delta(&db_tx, purchase_id, -price).await?;
            Ok(())
        })
    }

    /// Fetches a single item; the acting user must own the purchase it
    /// belongs to.
    pub async fn item(&self, item_id: Uuid, user_id: &str) -> ResultEngine<Item> {
        with_tx!(self, |db_tx| {
            let model = items::Entity::find_by_id(item_id.to_string())
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::ItemNotFound("item not exists".to_string()))?;

            let purchase = purchases::Entity::find_by_id(model.purchase_id.clone())
                .one(&db_tx)
                .await?
                .ok_or_else(|| EngineError::PurchaseNotFound("purchase not exists".to_string()))?;
            if purchase.created_by != user_id {
                return Err(EngineError::AccessDenied(
                    "purchase belongs to another user".to_string(),
                ));
            }

            Item::try_from(model)
        })
    }
}
