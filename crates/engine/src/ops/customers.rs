//! Customer operations: standalone records, purchase participation, and the
//! owed-amount queries.

use sea_orm::{
    ActiveValue, DatabaseTransaction, QueryFilter, QueryOrder, Statement, TransactionTrait,
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    Customer, EngineError, MoneyCents, ResultEngine, customers, item_shares, items,
    purchase_customers, split::split_evenly,
};

use super::{Engine, map_unique_violation, normalize_optional_text, normalize_required_name, with_tx};

/// Result of attaching a batch of customers to a purchase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddedCustomers {
    pub purchase_id: Uuid,
    pub customer_ids: Vec<Uuid>,
}

/// Participant names of a purchase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseParticipants {
    pub purchase_name: String,
    pub customer_names: Vec<String>,
}

/// How much one customer owes across all items of a purchase.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerShare {
    pub name: String,
    pub total_owed: MoneyCents,
}

impl Engine {
    /// Creates a customer owned by the acting user.
    pub async fn new_customer(
        &self,
        name: &str,
        email: Option<&str>,
        user_id: &str,
    ) -> ResultEngine<Customer> {
        let name = normalize_required_name(name, "customer")?;
        let email = normalize_optional_text(email);
        let customer = Customer::new(name, email, user_id);
        let active: customers::ActiveModel = (&customer).into();
        with_tx!(self, |db_tx| {
            active.insert(&db_tx).await?;
            Ok(customer)
        })
    }

    /// Deletes a customer together with its participation and share rows.
    ///
    /// The dependent rows are removed explicitly so the cascade is visible
    /// here instead of hiding behind the schema's FK configuration. Shares
    /// of the remaining participants are left as they are; re-splitting is
    /// the detach operation's job.
    pub async fn delete_customer(&self, customer_id: Uuid, user_id: &str) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_customer_owned(&db_tx, customer_id, user_id)
                .await?;

            item_shares::Entity::delete_many()
                .filter(item_shares::Column::CustomerId.eq(customer_id.to_string()))
                .exec(&db_tx)
                .await?;
            purchase_customers::Entity::delete_many()
                .filter(purchase_customers::Column::CustomerId.eq(customer_id.to_string()))
                .exec(&db_tx)
                .await?;
            customers::Entity::delete_by_id(customer_id.to_string())
                .exec(&db_tx)
                .await?;
            Ok(())
        })
    }

    /// Lists the customers created by the acting user.
    pub async fn list_customers(&self, user_id: &str) -> ResultEngine<Vec<Customer>> {
        let models = customers::Entity::find()
            .filter(customers::Column::CreatedBy.eq(user_id.to_string()))
            .order_by_asc(customers::Column::Name)
            .all(&self.database)
            .await?;
        models.into_iter().map(Customer::try_from).collect()
    }

    /// Attaches a batch of customers to a purchase, all-or-nothing.
    ///
    /// Each customer must exist, belong to the acting user, and not already
    /// participate; the first failure aborts the whole batch. An empty
    /// batch is a no-op success.
    pub async fn add_customers_to_purchase(
        &self,
        purchase_id: Uuid,
        customer_ids: &[Uuid],
        user_id: &str,
    ) -> ResultEngine<AddedCustomers> {
        with_tx!(self, |db_tx| {
            self.require_purchase_owner(&db_tx, purchase_id, user_id)
                .await?;

            let mut rows = Vec::with_capacity(customer_ids.len());
            for &customer_id in customer_ids {
                self.require_customer_owned(&db_tx, customer_id, user_id)
                    .await?;
                if self
                    .customer_in_purchase(&db_tx, purchase_id, customer_id)
                    .await?
                {
                    return Err(EngineError::DuplicateRecord(
                        "customer already in purchase".to_string(),
                    ));
                }
                rows.push(purchase_customers::ActiveModel {
                    purchase_id: ActiveValue::Set(purchase_id.to_string()),
                    customer_id: ActiveValue::Set(customer_id.to_string()),
                });
            }

            // A batch naming the same id twice, or a racing attach that
            // committed after the checks above, still trips the composite
            // primary key here.
            for row in rows {
                row.insert(&db_tx)
                    .await
                    .map_err(|err| map_unique_violation(err, "customer already in purchase"))?;
            }

            Ok(AddedCustomers {
                purchase_id,
                customer_ids: customer_ids.to_vec(),
            })
        })
    }

    /// Removes a customer from a purchase, re-splitting every affected item
    /// across the participants that remain on it.
    pub async fn remove_customer_from_purchase(
        &self,
        customer_id: Uuid,
        purchase_id: Uuid,
        user_id: &str,
    ) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            self.require_purchase_owner(&db_tx, purchase_id, user_id)
                .await?;
            self.require_customer_exists(&db_tx, customer_id).await?;
            self.require_customer_in_purchase(&db_tx, purchase_id, customer_id)
                .await?;

            let item_models: Vec<items::Model> = items::Entity::find()
                .filter(items::Column::PurchaseId.eq(purchase_id.to_string()))
                .all(&db_tx)
                .await?;

            for item in &item_models {
                let deleted = item_shares::Entity::delete_by_id((
                    item.id.clone(),
                    customer_id.to_string(),
                ))
                .exec(&db_tx)
                .await?;
                if deleted.rows_affected == 0 {
                    continue;
                }
                self.resplit_item(&db_tx, item).await?;
            }

            purchase_customers::Entity::delete_by_id((
                purchase_id.to_string(),
                customer_id.to_string(),
            ))
            .exec(&db_tx)
            .await?;
            Ok(())
        })
    }

    /// Overwrites the share amounts of an item with an even split across the
    /// participants that still hold a share row. When none remain the item
    /// simply keeps no shares.
    async fn resplit_item(
        &self,
        db: &DatabaseTransaction,
        item: &items::Model,
    ) -> ResultEngine<()> {
        let remaining: Vec<item_shares::Model> = item_shares::Entity::find()
            .filter(item_shares::Column::ItemId.eq(item.id.clone()))
            .order_by_asc(item_shares::Column::CustomerId)
            .all(db)
            .await?;
        if remaining.is_empty() {
            return Ok(());
        }

        let amounts = split_evenly(MoneyCents::new(item.price_minor), remaining.len());
        for (row, amount) in remaining.into_iter().zip(amounts) {
            let active = item_shares::ActiveModel {
                item_id: ActiveValue::Set(row.item_id),
                customer_id: ActiveValue::Set(row.customer_id),
                amount_minor: ActiveValue::Set(amount.cents()),
            };
            active.update(db).await?;
        }
        Ok(())
    }

    /// Participant names of a purchase. A purchase without participants
    /// yields an empty list rather than an error.
    pub async fn customers_of_purchase(
        &self,
        purchase_id: Uuid,
        user_id: &str,
    ) -> ResultEngine<PurchaseParticipants> {
        with_tx!(self, |db_tx| {
            let purchase = self
                .require_purchase_owner(&db_tx, purchase_id, user_id)
                .await?;

            let rows: Vec<(purchase_customers::Model, Option<customers::Model>)> =
                purchase_customers::Entity::find()
                    .filter(purchase_customers::Column::PurchaseId.eq(purchase_id.to_string()))
                    .find_also_related(customers::Entity)
                    .all(&db_tx)
                    .await?;

            let mut customer_names: Vec<String> = rows
                .into_iter()
                .filter_map(|(_, customer)| customer.map(|m| m.name))
                .collect();
            customer_names.sort();

            Ok(PurchaseParticipants {
                purchase_name: purchase.name,
                customer_names,
            })
        })
    }

    /// Sums the shares one customer owes across all items of a purchase.
    ///
    /// A participant with no share rows owes zero; that is distinct from not
    /// participating at all, which fails with `CustomerNotInPurchase`.
    pub async fn customer_share(
        &self,
        purchase_id: Uuid,
        customer_id: Uuid,
        user_id: &str,
    ) -> ResultEngine<CustomerShare> {
        with_tx!(self, |db_tx| {
            self.require_purchase_owner(&db_tx, purchase_id, user_id)
                .await?;
            let customer = self.require_customer_exists(&db_tx, customer_id).await?;
            self.require_customer_in_purchase(&db_tx, purchase_id, customer_id)
                .await?;

            let backend = self.database.get_database_backend();
            let stmt = Statement::from_sql_and_values(
                backend,
                "SELECT COALESCE(SUM(item_shares.amount_minor), 0) AS sum \
                 FROM item_shares \
                 JOIN items ON items.id = item_shares.item_id \
                 WHERE items.purchase_id = ? AND item_shares.customer_id = ?;",
                vec![
                    purchase_id.to_string().into(),
                    customer_id.to_string().into(),
                ],
            );
            let row = db_tx.query_one(stmt).await?;
            let total_minor: i64 = row.and_then(|r| r.try_get("", "sum").ok()).unwrap_or(0);

            Ok(CustomerShare {
                name: customer.name,
                total_owed: MoneyCents::new(total_minor),
            })
        })
    }
}
