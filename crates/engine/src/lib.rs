//! Expense allocation engine.
//!
//! Users record purchases, attach the customers who take part, add priced
//! items whose cost is split across participants, and query who owes what.
//! All monetary amounts are integer cents ([`MoneyCents`]); every operation
//! runs inside a single database transaction and re-derives its state from
//! the store, so nothing is cached between calls.

pub use customers::Customer;
pub use error::EngineError;
pub use items::Item;
pub use money::MoneyCents;
pub use ops::{
    AddedCustomers, CreatedItem, CustomerShare, Engine, EngineBuilder, ItemDetail, NewItem,
    PurchaseDetail, PurchaseParticipants,
};
pub use purchases::Purchase;

mod customers;
mod error;
mod item_shares;
mod items;
mod money;
mod ops;
mod purchase_customers;
mod purchases;
mod split;
mod util;

type ResultEngine<T> = Result<T, EngineError>;
