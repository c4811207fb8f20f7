use crate::model::{
    id::{EventId, UserId},
    user::User,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString, VariantNames};

pub mod event;
pub mod filter;

#[derive(Debug, Clone, PartialEq)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    // 開催地のローカル時刻（"19:30" など）をそのまま保持する
    pub time: String,
    pub location: String,
    pub price: f64,
    pub category: EventCategory,
    pub image_url: String,
    pub capacity: i32,
    pub organizer_id: UserId,
    pub organizer_name: String,
    // 参加登録順。同じ ID は二度入らない
    pub attendees: Vec<UserId>,
}

impl Event {
    pub fn attendee_count(&self) -> usize {
        self.attendees.len()
    }

    pub fn is_full(&self) -> bool {
        self.attendee_count() as i64 >= i64::from(self.capacity)
    }

    pub fn spots_remaining(&self) -> i64 {
        let remaining = i64::from(self.capacity) - self.attendee_count() as i64;
        debug_assert!(
            remaining >= 0,
            "event {} has more attendees than capacity",
            self.id
        );
        remaining.max(0)
    }

    pub fn is_attending(&self, user_id: UserId) -> bool {
        self.attendees.contains(&user_id)
    }

    pub fn is_organized_by(&self, user_id: UserId) -> bool {
        self.organizer_id == user_id
    }

    /// Whether `user` may edit, delete or inspect the roster of this event.
    ///
    /// Any organizer passes, not only the owner.
    pub fn is_manageable_by(&self, user: &User) -> bool {
        self.is_organized_by(user.id) || user.is_organizer()
    }

    pub fn days_remaining(&self, today: NaiveDate) -> i64 {
        (self.date - today).num_days()
    }
}

/// Stored event categories. `All` only exists on the filter side.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    AsRefStr,
    Display,
    EnumString,
    VariantNames,
)]
pub enum EventCategory {
    Music,
    Travel,
    Tech,
    Workshops,
}
