use chrono::NaiveDate;
use kernel::model::{
    event::{Event, EventCategory},
    id::{EventId, UserId},
};
use shared::error::AppError;
use sqlx::FromRow;
use std::str::FromStr;
use uuid::Uuid;

// イベント一覧・詳細の取得に使う型
// attendees は参加登録順に集約した attendee_id の配列
#[derive(FromRow)]
pub struct EventRow {
    pub event_id: EventId,
    pub title: String,
    pub description: String,
    pub event_date: NaiveDate,
    pub event_time: String,
    pub location: String,
    pub price: f64,
    pub category: String,
    pub image_url: String,
    pub capacity: i32,
    pub organizer_id: UserId,
    pub organizer_name: String,
    pub attendees: Vec<Uuid>,
}

impl TryFrom<EventRow> for Event {
    type Error = AppError;

    fn try_from(value: EventRow) -> Result<Self, Self::Error> {
        let EventRow {
            event_id,
            title,
            description,
            event_date,
            event_time,
            location,
            price,
            category,
            image_url,
            capacity,
            organizer_id,
            organizer_name,
            attendees,
        } = value;
        let category = EventCategory::from_str(&category).map_err(|_| {
            AppError::ConversionEntityError(format!("unknown event category: {category}"))
        })?;
        Ok(Event {
            id: event_id,
            title,
            description,
            date: event_date,
            time: event_time,
            location,
            price,
            category,
            image_url,
            capacity,
            organizer_id,
            organizer_name,
            attendees: attendees.into_iter().map(UserId::from).collect(),
        })
    }
}

// 参加登録時の定員チェックに使う型
#[derive(FromRow)]
pub struct EventCapacityRow {
    pub capacity: i32,
    pub attendee_count: i64,
    pub already_booked: bool,
}
