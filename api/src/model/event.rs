use chrono::NaiveDate;
use derive_new::new;
use garde::Validate;
use kernel::directory::DashboardStats;
use kernel::model::{
    event::{
        event::{CreateEvent, UpdateEvent},
        filter::{CategoryFilter, DateOrder, EventFilterPatch},
        Event, EventCategory,
    },
    id::{EventId, UserId},
    user::User,
};
use serde::{Deserialize, Serialize};

// 不正な category / date は「絞り込みなし」として扱う
#[derive(Debug, Default, Deserialize)]
pub struct EventListQuery {
    pub search: Option<String>,
    pub category: Option<String>,
    pub date: Option<String>,
}

impl From<EventListQuery> for EventFilterPatch {
    fn from(value: EventListQuery) -> Self {
        let EventListQuery {
            search,
            category,
            date,
        } = value;
        EventFilterPatch {
            search,
            category: category.as_deref().map(CategoryFilter::parse_lenient),
            date: date.as_deref().map(DateOrder::parse_lenient),
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[garde(length(min = 3))]
    pub title: String,
    #[garde(length(min = 10))]
    pub description: String,
    #[garde(skip)]
    pub date: NaiveDate,
    #[garde(length(min = 1))]
    pub time: String,
    #[garde(length(min = 3))]
    pub location: String,
    #[garde(range(min = 0.0))]
    pub price: f64,
    #[garde(skip)]
    pub category: EventCategory,
    #[garde(skip)]
    #[serde(default)]
    pub image_url: String,
    #[garde(range(min = 1))]
    pub capacity: i32,
}

impl From<CreateEventRequest> for CreateEvent {
    fn from(value: CreateEventRequest) -> Self {
        let CreateEventRequest {
            title,
            description,
            date,
            time,
            location,
            price,
            category,
            image_url,
            capacity,
        } = value;
        CreateEvent {
            title,
            description,
            date,
            time,
            location,
            price,
            category,
            image_url,
            capacity,
        }
    }
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventRequest {
    #[garde(length(min = 3))]
    pub title: Option<String>,
    #[garde(length(min = 10))]
    pub description: Option<String>,
    #[garde(skip)]
    pub date: Option<NaiveDate>,
    #[garde(length(min = 1))]
    pub time: Option<String>,
    #[garde(length(min = 3))]
    pub location: Option<String>,
    #[garde(range(min = 0.0))]
    pub price: Option<f64>,
    #[garde(skip)]
    pub category: Option<EventCategory>,
    #[garde(skip)]
    pub image_url: Option<String>,
    #[garde(range(min = 1))]
    pub capacity: Option<i32>,
}

impl From<UpdateEventRequest> for UpdateEvent {
    fn from(value: UpdateEventRequest) -> Self {
        let UpdateEventRequest {
            title,
            description,
            date,
            time,
            location,
            price,
            category,
            image_url,
            capacity,
        } = value;
        UpdateEvent {
            title,
            description,
            date,
            time,
            location,
            price,
            category,
            image_url,
            capacity,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventResponse {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: String,
    pub location: String,
    pub price: f64,
    pub category: EventCategory,
    pub image_url: String,
    pub capacity: i32,
    pub organizer_id: UserId,
    pub organizer_name: String,
    pub attendees: Vec<UserId>,
    pub spots_remaining: i64,
    pub is_full: bool,
}

impl From<Event> for EventResponse {
    fn from(value: Event) -> Self {
        let spots_remaining = value.spots_remaining();
        let is_full = value.is_full();
        let Event {
            id,
            title,
            description,
            date,
            time,
            location,
            price,
            category,
            image_url,
            capacity,
            organizer_id,
            organizer_name,
            attendees,
        } = value;
        Self {
            id,
            title,
            description,
            date,
            time,
            location,
            price,
            category,
            image_url,
            capacity,
            organizer_id,
            organizer_name,
            attendees,
            spots_remaining,
            is_full,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsResponse {
    pub items: Vec<EventResponse>,
}

impl From<Vec<Event>> for EventsResponse {
    fn from(value: Vec<Event>) -> Self {
        Self {
            items: value.into_iter().map(EventResponse::from).collect(),
        }
    }
}

// マイページ用。開催前と開催済みに分けて返す
#[derive(Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct UserEventsResponse {
    pub upcoming: Vec<EventResponse>,
    pub past: Vec<EventResponse>,
    pub stats: DashboardStatsResponse,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsResponse {
    pub event_count: usize,
    pub attendee_count: usize,
    pub spots_remaining: i64,
}

impl From<DashboardStats> for DashboardStatsResponse {
    fn from(value: DashboardStats) -> Self {
        let DashboardStats {
            event_count,
            attendee_count,
            spots_remaining,
        } = value;
        Self {
            event_count,
            attendee_count,
            spots_remaining,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendeesResponse {
    pub items: Vec<AttendeeResponse>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendeeResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub profile_image: Option<String>,
}

impl From<User> for AttendeeResponse {
    fn from(value: User) -> Self {
        let User {
            id,
            name,
            email,
            profile,
            ..
        } = value;
        Self {
            id,
            name,
            email,
            profile_image: profile.profile_image,
        }
    }
}
