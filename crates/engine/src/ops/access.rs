//! Ownership and membership guards.
//!
//! Every guard takes the caller's open transaction so the check and the
//! mutation that follows cannot race against a concurrent change
//! (check-then-act stays inside one store transaction).

use sea_orm::{DatabaseTransaction, QueryFilter, prelude::*};
use uuid::Uuid;

use crate::{EngineError, ResultEngine, customers, items, purchase_customers, purchases};

use super::Engine;

impl Engine {
    /// Loads a purchase and verifies the acting user created it.
    pub(super) async fn require_purchase_owner(
        &self,
        db: &DatabaseTransaction,
        purchase_id: Uuid,
        user_id: &str,
    ) -> ResultEngine<purchases::Model> {
        let model = purchases::Entity::find_by_id(purchase_id.to_string())
            .one(db)
            .await?
            .ok_or_else(|| EngineError::PurchaseNotFound("purchase not exists".to_string()))?;
        if model.created_by != user_id {
            return Err(EngineError::AccessDenied(
                "purchase belongs to another user".to_string(),
            ));
        }
        Ok(model)
    }

    pub(super) async fn require_customer_exists(
        &self,
        db: &DatabaseTransaction,
        customer_id: Uuid,
    ) -> ResultEngine<customers::Model> {
        customers::Entity::find_by_id(customer_id.to_string())
            .one(db)
            .await?
            .ok_or_else(|| EngineError::CustomerNotFound("customer not exists".to_string()))
    }

    /// Loads a customer and verifies the acting user created it.
    ///
    /// Only the creator of a customer record may attach it to purchases.
    pub(super) async fn require_customer_owned(
        &self,
        db: &DatabaseTransaction,
        customer_id: Uuid,
        user_id: &str,
    ) -> ResultEngine<customers::Model> {
        let model = self.require_customer_exists(db, customer_id).await?;
        if model.created_by != user_id {
            return Err(EngineError::AccessDeniedCustomer(
                "customer belongs to another user".to_string(),
            ));
        }
        Ok(model)
    }

    pub(super) async fn customer_in_purchase(
        &self,
        db: &DatabaseTransaction,
        purchase_id: Uuid,
        customer_id: Uuid,
    ) -> ResultEngine<bool> {
        purchase_customers::Entity::find_by_id((purchase_id.to_string(), customer_id.to_string()))
            .one(db)
            .await
            .map(|row| row.is_some())
            .map_err(Into::into)
    }

    pub(super) async fn require_customer_in_purchase(
        &self,
        db: &DatabaseTransaction,
        purchase_id: Uuid,
        customer_id: Uuid,
    ) -> ResultEngine<()> {
        if !self
            .customer_in_purchase(db, purchase_id, customer_id)
            .await?
        {
            return Err(EngineError::CustomerNotInPurchase(
                "customer not in purchase".to_string(),
            ));
        }
        Ok(())
    }

    /// Loads an item and verifies it belongs to the given purchase.
    pub(super) async fn require_item_in_purchase(
        &self,
        db: &DatabaseTransaction,
        purchase_id: Uuid,
        item_id: Uuid,
    ) -> ResultEngine<items::Model> {
        items::Entity::find_by_id(item_id.to_string())
            .filter(items::Column::PurchaseId.eq(purchase_id.to_string()))
            .one(db)
            .await?
            .ok_or_else(|| EngineError::ItemNotFound("item not exists".to_string()))
    }
}
