use crate::{extractor::AuthorizedUser, model::event::EventResponse};
use axum::{
    extract::{Path, State},
    Json,
};
use kernel::model::id::EventId;
use registry::AppRegistry;
use shared::error::AppResult;

pub async fn book_event(
    user: AuthorizedUser,
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EventResponse>> {
    registry
        .booking_ledger()
        .book_event(event_id, Some(&user.user))
        .await
        .map(EventResponse::from)
        .map(Json)
}

pub async fn cancel_booking(
    user: AuthorizedUser,
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EventResponse>> {
    registry
        .booking_ledger()
        .cancel_booking(event_id, Some(&user.user))
        .await
        .map(EventResponse::from)
        .map(Json)
}
