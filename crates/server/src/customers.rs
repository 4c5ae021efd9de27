//! Customer endpoints: standalone records plus purchase participation.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use api_types::customer::{
    CustomerNew, CustomerView, CustomersAttach, CustomersAttached, CustomersResponse,
    ParticipantsResponse, ShareView,
};

use crate::{ServerError, server::ServerState, user};

fn view(customer: engine::Customer) -> CustomerView {
    CustomerView {
        id: customer.id,
        name: customer.name,
        email: customer.email,
    }
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<CustomerNew>,
) -> Result<(StatusCode, Json<CustomerView>), ServerError> {
    let customer = state
        .engine
        .new_customer(&payload.name, payload.email.as_deref(), &user.id)
        .await?;
    Ok((StatusCode::CREATED, Json(view(customer))))
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<CustomersResponse>, ServerError> {
    let customers = state
        .engine
        .list_customers(&user.id)
        .await?
        .into_iter()
        .map(view)
        .collect();
    Ok(Json(CustomersResponse { customers }))
}

pub async fn remove(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(customer_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_customer(customer_id, &user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn attach(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(purchase_id): Path<Uuid>,
    Json(payload): Json<CustomersAttach>,
) -> Result<(StatusCode, Json<CustomersAttached>), ServerError> {
    let added = state
        .engine
        .add_customers_to_purchase(purchase_id, &payload.customer_ids, &user.id)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(CustomersAttached {
            purchase_id: added.purchase_id,
            customer_ids: added.customer_ids,
        }),
    ))
}

pub async fn detach(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path((purchase_id, customer_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .remove_customer_from_purchase(customer_id, purchase_id, &user.id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn participants(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(purchase_id): Path<Uuid>,
) -> Result<Json<ParticipantsResponse>, ServerError> {
    let participants = state
        .engine
        .customers_of_purchase(purchase_id, &user.id)
        .await?;
    Ok(Json(ParticipantsResponse {
        purchase_name: participants.purchase_name,
        customer_names: participants.customer_names,
    }))
}

pub async fn share(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path((purchase_id, customer_id)): Path<(Uuid, Uuid)>,
) -> Result<Json<ShareView>, ServerError> {
    let share = state
        .engine
        .customer_share(purchase_id, customer_id, &user.id)
        .await?;
    Ok(Json(ShareView {
        name: share.name,
        total_owed_minor: share.total_owed.cents(),
    }))
}
