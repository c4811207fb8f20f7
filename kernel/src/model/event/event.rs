use crate::model::{
    event::{Event, EventCategory},
    id::{EventId, UserId},
};
use chrono::NaiveDate;
use derive_new::new;

// 主催者が入力するイベント情報。ID・主催者・参加者は台帳側で埋める
#[derive(Debug, Clone, new)]
pub struct CreateEvent {
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: String,
    pub location: String,
    pub price: f64,
    pub category: EventCategory,
    pub image_url: String,
    pub capacity: i32,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateEvent {
    pub title: Option<String>,
    pub description: Option<String>,
    pub date: Option<NaiveDate>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub price: Option<f64>,
    pub category: Option<EventCategory>,
    pub image_url: Option<String>,
    pub capacity: Option<i32>,
}

impl UpdateEvent {
    /// Returns a copy of `event` with every present field overwritten.
    pub fn merge_into(self, event: &Event) -> Event {
        let UpdateEvent {
            title,
            description,
            date,
            time,
            location,
            price,
            category,
            image_url,
            capacity,
        } = self;
        let current = event.clone();
        Event {
            title: title.unwrap_or(current.title),
            description: description.unwrap_or(current.description),
            date: date.unwrap_or(current.date),
            time: time.unwrap_or(current.time),
            location: location.unwrap_or(current.location),
            price: price.unwrap_or(current.price),
            category: category.unwrap_or(current.category),
            image_url: image_url.unwrap_or(current.image_url),
            capacity: capacity.unwrap_or(current.capacity),
            ..current
        }
    }
}

#[derive(Debug, Clone, Copy, new)]
pub struct BookEvent {
    pub event_id: EventId,
    pub attendee_id: UserId,
}

#[derive(Debug, Clone, Copy, new)]
pub struct CancelBooking {
    pub event_id: EventId,
    pub attendee_id: UserId,
}
