//! Wire types shared between the server and its clients.
//!
//! Monetary values travel as integer minor units (`*_minor` fields, cents);
//! ids are UUIDs serialized as strings.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod user {
    use super::*;

    /// Request body for registering a user.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserRegister {
        pub name: String,
        pub email: String,
        pub password: String,
    }

    /// A registered user (the password never travels back).
    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserView {
        pub id: String,
        pub name: String,
        pub email: String,
    }
}

pub mod customer {
    use super::*;

    /// Request body for creating a customer.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CustomerNew {
        pub name: String,
        pub email: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CustomerView {
        pub id: Uuid,
        pub name: String,
        pub email: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CustomersResponse {
        pub customers: Vec<CustomerView>,
    }

    /// Request body for attaching a batch of customers to a purchase.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct CustomersAttach {
        pub customer_ids: Vec<Uuid>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct CustomersAttached {
        pub purchase_id: Uuid,
        pub customer_ids: Vec<Uuid>,
    }

    /// Participant names of a purchase.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ParticipantsResponse {
        pub purchase_name: String,
        pub customer_names: Vec<String>,
    }

    /// How much one customer owes for a purchase.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ShareView {
        pub name: String,
        pub total_owed_minor: i64,
    }
}

pub mod item {
    use super::*;

    /// One item in an add-items request; `price_minor` is split evenly
    /// across `customer_ids`.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ItemNew {
        pub name: String,
        pub price_minor: i64,
        pub customer_ids: Vec<Uuid>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ItemsNew {
        pub items: Vec<ItemNew>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ItemView {
        pub id: Uuid,
        pub purchase_id: Uuid,
        pub name: String,
        pub price_minor: i64,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct ItemsCreated {
        pub items: Vec<ItemView>,
    }
}

pub mod purchase {
    use super::*;

    /// Request body for creating a purchase.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct PurchaseNew {
        pub name: String,
    }

    /// Request body for renaming a purchase.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct PurchaseUpdate {
        pub name: String,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PurchaseView {
        pub id: Uuid,
        pub name: String,
        pub total_amount_minor: i64,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PurchasesResponse {
        pub purchases: Vec<PurchaseView>,
    }

    /// One item inside a purchase detail with the ids of the customers
    /// sharing it.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct ItemDetailView {
        pub id: Uuid,
        pub name: String,
        pub price_minor: i64,
        pub customer_ids: Vec<Uuid>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct PurchaseDetailResponse {
        pub id: Uuid,
        pub name: String,
        pub total_amount_minor: i64,
        pub customer_ids: Vec<Uuid>,
        pub items: Vec<ItemDetailView>,
    }

    /// The purchase total after a recompute.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct PurchaseTotal {
        pub purchase_id: Uuid,
        pub total_amount_minor: i64,
    }
}
