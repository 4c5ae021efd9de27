//! Purchase endpoints.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use api_types::purchase::{
    ItemDetailView, PurchaseDetailResponse, PurchaseNew, PurchaseTotal, PurchaseUpdate,
    PurchaseView, PurchasesResponse,
};

use crate::{ServerError, server::ServerState, user};

fn view(purchase: engine::Purchase) -> PurchaseView {
    PurchaseView {
        id: purchase.id,
        name: purchase.name,
        total_amount_minor: purchase.total_amount.cents(),
        created_at: purchase.created_at,
    }
}

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Json(payload): Json<PurchaseNew>,
) -> Result<(StatusCode, Json<PurchaseView>), ServerError> {
    let purchase = state.engine.new_purchase(&payload.name, &user.id).await?;
    Ok((StatusCode::CREATED, Json(view(purchase))))
}

pub async fn list(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
) -> Result<Json<PurchasesResponse>, ServerError> {
    let purchases = state
        .engine
        .list_purchases(&user.id)
        .await?
        .into_iter()
        .map(view)
        .collect();
    Ok(Json(PurchasesResponse { purchases }))
}

pub async fn detail(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(purchase_id): Path<Uuid>,
) -> Result<Json<PurchaseDetailResponse>, ServerError> {
    let detail = state.engine.purchase_detail(purchase_id, &user.id).await?;
    Ok(Json(PurchaseDetailResponse {
        id: detail.id,
        name: detail.name,
        total_amount_minor: detail.total_amount.cents(),
        customer_ids: detail.customer_ids,
        items: detail
            .items
            .into_iter()
            .map(|item| ItemDetailView {
                id: item.id,
                name: item.name,
                price_minor: item.price.cents(),
                customer_ids: item.customer_ids,
            })
            .collect(),
    }))
}

pub async fn rename(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(purchase_id): Path<Uuid>,
    Json(payload): Json<PurchaseUpdate>,
) -> Result<Json<PurchaseView>, ServerError> {
    let purchase = state
        .engine
        .rename_purchase(purchase_id, &payload.name, &user.id)
        .await?;
    Ok(Json(view(purchase)))
}

pub async fn remove(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(purchase_id): Path<Uuid>,
) -> Result<StatusCode, ServerError> {
    state.engine.delete_purchase(purchase_id, &user.id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn recompute_total(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(purchase_id): Path<Uuid>,
) -> Result<Json<PurchaseTotal>, ServerError> {
    let total = state.engine.recompute_total(purchase_id, &user.id).await?;
    Ok(Json(PurchaseTotal {
        purchase_id,
        total_amount_minor: total.cents(),
    }))
}
