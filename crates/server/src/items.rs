//! Item endpoints.

use axum::{
    Extension, Json,
    extract::{Path, State},
    http::StatusCode,
};
use uuid::Uuid;

use api_types::item::{ItemView, ItemsCreated, ItemsNew};
use engine::{MoneyCents, NewItem};

use crate::{ServerError, server::ServerState, user};

pub async fn create(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(purchase_id): Path<Uuid>,
    Json(payload): Json<ItemsNew>,
) -> Result<(StatusCode, Json<ItemsCreated>), ServerError> {
    let drafts: Vec<NewItem> = payload
        .items
        .into_iter()
        .map(|item| NewItem {
            name: item.name,
            price: MoneyCents::new(item.price_minor),
            customer_ids: item.customer_ids,
        })
        .collect();

    let created = state.engine.add_items(purchase_id, &drafts, &user.id).await?;

    let items = created
        .into_iter()
        .map(|item| ItemView {
            id: item.id,
            purchase_id: item.purchase_id,
            name: item.name,
            price_minor: item.price.cents(),
        })
        .collect();
    Ok((StatusCode::CREATED, Json(ItemsCreated { items })))
}

pub async fn remove(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path((purchase_id, item_id)): Path<(Uuid, Uuid)>,
) -> Result<StatusCode, ServerError> {
    state
        .engine
        .remove_item(item_id, purchase_id, &user.id)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_one(
    Extension(user): Extension<user::Model>,
    State(state): State<ServerState>,
    Path(item_id): Path<Uuid>,
) -> Result<Json<ItemView>, ServerError> {
    let item = state.engine.item(item_id, &user.id).await?;
    Ok(Json(ItemView {
        id: item.id,
        purchase_id: item.purchase_id,
        name: item.name,
        price_minor: item.price.cents(),
    }))
}
