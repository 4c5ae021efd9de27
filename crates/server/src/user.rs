//! Users entity and the registration endpoint.
//!
//! Authentication stays at the HTTP layer; the engine only ever sees the
//! resolved acting user id.

use axum::{Json, extract::State, http::StatusCode};
use sea_orm::{ActiveValue, entity::prelude::*};
use uuid::Uuid;

use api_types::user::{UserRegister, UserView};
use engine::EngineError;

use crate::{ServerError, server::ServerState};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Creates a user account. Emails are unique; a taken one answers 409.
pub async fn register(
    State(state): State<ServerState>,
    Json(payload): Json<UserRegister>,
) -> Result<(StatusCode, Json<UserView>), ServerError> {
    let email = payload.email.trim().to_string();
    if email.is_empty() || payload.password.is_empty() || payload.name.trim().is_empty() {
        return Err(ServerError::Generic(
            "name, email and password required".to_string(),
        ));
    }

    let existing = Entity::find()
        .filter(Column::Email.eq(email.clone()))
        .one(&state.db)
        .await
        .map_err(EngineError::from)
        .map_err(ServerError::from)?;
    if existing.is_some() {
        return Err(ServerError::Engine(EngineError::DuplicateRecord(
            "email already registered".to_string(),
        )));
    }

    let user = ActiveModel {
        id: ActiveValue::Set(Uuid::new_v4().to_string()),
        name: ActiveValue::Set(payload.name.trim().to_string()),
        email: ActiveValue::Set(email),
        password: ActiveValue::Set(payload.password),
    };
    let model = user
        .insert(&state.db)
        .await
        .map_err(EngineError::from)
        .map_err(ServerError::from)?;

    Ok((
        StatusCode::CREATED,
        Json(UserView {
            id: model.id,
            name: model.name,
            email: model.email,
        }),
    ))
}
