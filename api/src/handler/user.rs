use crate::{
    extractor::AuthorizedUser,
    model::{
        event::{EventResponse, UserEventsResponse},
        user::{UpdateProfileRequest, UpdateProfileRequestWithUserId, UserResponse},
    },
};
use axum::{extract::State, Json};
use chrono::Local;
use garde::Validate;
use kernel::directory::{dashboard_stats, split_by_date, user_events};
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn get_current_user(user: AuthorizedUser) -> Json<UserResponse> {
    Json(UserResponse::from(user.user))
}

pub async fn update_current_user(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateProfileRequest>,
) -> AppResult<Json<UserResponse>> {
    req.validate()?;

    let update = UpdateProfileRequestWithUserId::new(user.id(), req);
    registry
        .user_repository()
        .update_profile(update.into())
        .await
        .map(UserResponse::from)
        .map(Json)
}

pub async fn get_current_user_events(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
) -> Json<UserEventsResponse> {
    let events = registry.booking_ledger().events().await;
    let mine = user_events(&events, &user.user);
    let stats = dashboard_stats(&mine);
    let (upcoming, past) = split_by_date(mine, Local::now().date_naive());

    Json(UserEventsResponse::new(
        upcoming.into_iter().map(EventResponse::from).collect(),
        past.into_iter().map(EventResponse::from).collect(),
        stats.into(),
    ))
}
