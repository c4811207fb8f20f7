use crate::{
    extractor::AuthorizedUser,
    model::auth::{LoginRequest, RegisterRequest, SessionResponse},
};
use axum::{extract::State, http::StatusCode, Json};
use garde::Validate;
use kernel::model::auth::Session;
use registry::AppRegistry;
use shared::error::AppResult;

// 登録に成功したらそのままログイン状態にする
pub async fn register(
    State(registry): State<AppRegistry>,
    Json(req): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<SessionResponse>)> {
    req.validate()?;

    let user = registry.user_repository().create(req.into()).await?;
    let access_token = registry.auth_repository().create_token(user.id).await?;
    tracing::info!(user_id = %user.id, role = %user.role, "user registered");

    Ok((
        StatusCode::CREATED,
        Json(Session { access_token, user }.into()),
    ))
}

pub async fn login(
    State(registry): State<AppRegistry>,
    Json(req): Json<LoginRequest>,
) -> AppResult<Json<SessionResponse>> {
    req.validate()?;

    let user = registry
        .auth_repository()
        .verify_user(&req.email, &req.password, req.role.map(Into::into))
        .await?;
    let access_token = registry.auth_repository().create_token(user.id).await?;

    Ok(Json(Session { access_token, user }.into()))
}

pub async fn logout(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .auth_repository()
        .delete_token(user.access_token)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
