//! Purchase total maintenance.
//!
//! The stored total is kept in sync with item prices by applying signed
//! deltas inside each mutating operation; `recompute_total` is the repair
//! path that re-derives the value from the items themselves.

use sea_orm::{ActiveValue, DatabaseTransaction, Statement, TransactionTrait, prelude::*};
use uuid::Uuid;

use crate::{EngineError, MoneyCents, ResultEngine, purchases};

use super::{Engine, with_tx};

impl Engine {
    /// Applies a signed delta to a purchase total inside the caller's
    /// transaction: `+price` on item add, `-price` on item delete.
    ///
    /// A delta that would push the total below zero fails with
    /// `ConstraintViolation` before the row is touched; the store-level
    /// check constraint stays as a second line of defense.
    pub(super) async fn apply_total_delta(
        &self,
        db: &DatabaseTransaction,
        purchase_id: Uuid,
        delta: MoneyCents,
    ) -> ResultEngine<MoneyCents> {
        let model = purchases::Entity::find_by_id(purchase_id.to_string())
            .one(db)
            .await?
            .ok_or_else(|| EngineError::PurchaseNotFound("purchase not exists".to_string()))?;

        let updated = MoneyCents::new(model.total_amount_minor)
            .checked_add(delta)
            .ok_or_else(|| EngineError::InvalidAmount("purchase total overflow".to_string()))?;
        if updated.is_negative() {
            return Err(EngineError::ConstraintViolation(format!(
                "purchase total would become {updated}"
            )));
        }

        let active = purchases::ActiveModel {
            id: ActiveValue::Set(model.id),
            total_amount_minor: ActiveValue::Set(updated.cents()),
            ..Default::default()
        };
        active.update(db).await?;
        Ok(updated)
    }

    /// Re-derives a purchase total from its current items and overwrites the
    /// stored value. Guards against drift accumulated by partial failures.
    pub async fn recompute_total(
        &self,
        purchase_id: Uuid,
        user_id: &str,
    ) -> ResultEngine<MoneyCents> {
        with_tx!(self, |db_tx| {
            self.require_purchase_owner(&db_tx, purchase_id, user_id)
                .await?;

            let backend = self.database.get_database_backend();
            let stmt = Statement::from_sql_and_values(
                backend,
                "SELECT COALESCE(SUM(price_minor), 0) AS sum FROM items WHERE purchase_id = ?;",
                vec![purchase_id.to_string().into()],
            );
            let row = db_tx.query_one(stmt).await?;
            let total_minor: i64 = row.and_then(|r| r.try_get("", "sum").ok()).unwrap_or(0);

            let active = purchases::ActiveModel {
                id: ActiveValue::Set(purchase_id.to_string()),
                total_amount_minor: ActiveValue::Set(total_minor),
                ..Default::default()
            };
            active.update(&db_tx).await?;
            Ok(MoneyCents::new(total_minor))
        })
    }
}
