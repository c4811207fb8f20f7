use crate::{
    extractor::AuthorizedUser,
    model::event::{
        AttendeeResponse, AttendeesResponse, CreateEventRequest, EventListQuery, EventResponse,
        EventsResponse, UpdateEventRequest,
    },
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use garde::Validate;
use kernel::directory::{apply_filter, discover};
use kernel::model::{event::filter::EventFilter, id::EventId};
use registry::AppRegistry;
use shared::error::{AppError, AppResult};

// 一覧と詳細はログインなしでも閲覧できる
pub async fn show_event_list(
    Query(query): Query<EventListQuery>,
    State(registry): State<AppRegistry>,
) -> Json<EventsResponse> {
    let filter = EventFilter::default().patch(query.into());
    let events = registry.booking_ledger().events().await;
    Json(apply_filter(&events, &filter).into())
}

// トークンが無効・期限切れの場合は未ログインとして扱う
pub async fn show_discover_list(
    user: Result<AuthorizedUser, AppError>,
    Query(query): Query<EventListQuery>,
    State(registry): State<AppRegistry>,
) -> Json<EventsResponse> {
    let user = user
        .inspect_err(|e| tracing::debug!(error = %e, "discover as anonymous"))
        .ok();
    let filter = EventFilter::default().patch(query.into());
    let events = registry.booking_ledger().events().await;
    let candidates = discover(&events, user.as_ref().map(|u| &u.user));
    Json(apply_filter(&candidates, &filter).into())
}

pub async fn register_event(
    user: AuthorizedUser,
    State(registry): State<AppRegistry>,
    Json(req): Json<CreateEventRequest>,
) -> AppResult<(StatusCode, Json<EventResponse>)> {
    req.validate()?;

    registry
        .booking_ledger()
        .create_event(req.into(), Some(&user.user))
        .await
        .map(|event| (StatusCode::CREATED, Json(event.into())))
}

pub async fn show_event(
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<EventResponse>> {
    registry
        .booking_ledger()
        .get_event(event_id)
        .await
        .map(EventResponse::from)
        .map(Json)
}

pub async fn update_event(
    user: AuthorizedUser,
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
    Json(req): Json<UpdateEventRequest>,
) -> AppResult<Json<EventResponse>> {
    req.validate()?;

    registry
        .booking_ledger()
        .update_event(event_id, req.into(), Some(&user.user))
        .await
        .map(EventResponse::from)
        .map(Json)
}

pub async fn delete_event(
    user: AuthorizedUser,
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<StatusCode> {
    registry
        .booking_ledger()
        .delete_event(event_id, Some(&user.user))
        .await
        .map(|_| StatusCode::NO_CONTENT)
}

pub async fn show_attendees(
    user: AuthorizedUser,
    Path(event_id): Path<EventId>,
    State(registry): State<AppRegistry>,
) -> AppResult<Json<AttendeesResponse>> {
    let attendee_ids = registry
        .booking_ledger()
        .roster(event_id, Some(&user.user))
        .await?;
    let items = registry
        .user_repository()
        .find_by_ids(&attendee_ids)
        .await?
        .into_iter()
        .map(AttendeeResponse::from)
        .collect();
    Ok(Json(AttendeesResponse { items }))
}
