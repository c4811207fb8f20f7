//! Authorization gate and local cache for event mutations.
//!
//! Every operation checks the acting user against the cached snapshot,
//! calls the store, and only then swaps the affected record in the cache.
//! A failed store call leaves the cache untouched.
//!
//! Mutations run one at a time. The writer lock is held from the cache
//! check until the returned record is swapped in, so a slow store reply can
//! never overwrite a newer record.

use crate::model::{
    event::{
        event::{BookEvent, CancelBooking, CreateEvent, UpdateEvent},
        Event,
    },
    id::{EventId, UserId},
    user::User,
};
use crate::repository::event::EventRepository;
use shared::error::{AppError, AppResult};
use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

pub struct BookingLedger {
    store: Arc<dyn EventRepository>,
    cache: RwLock<Vec<Event>>,
    writer: Mutex<()>,
}

impl BookingLedger {
    pub fn new(store: Arc<dyn EventRepository>) -> Self {
        Self {
            store,
            cache: RwLock::new(Vec::new()),
            writer: Mutex::new(()),
        }
    }

    /// Replaces the whole cache with what the store currently holds.
    pub async fn refresh(&self) -> AppResult<usize> {
        let _writer = self.writer.lock().await;
        let events = self.store.find_all().await?;
        let count = events.len();
        *self.cache.write().await = events;
        tracing::debug!(count, "event cache refreshed");
        Ok(count)
    }

    pub async fn events(&self) -> Vec<Event> {
        self.cache.read().await.clone()
    }

    pub async fn get_event(&self, event_id: EventId) -> AppResult<Event> {
        self.cached(event_id).await
    }

    #[tracing::instrument(skip_all, fields(actor = ?actor.map(|u| u.id)))]
    pub async fn create_event(&self, data: CreateEvent, actor: Option<&User>) -> AppResult<Event> {
        let organizer = match actor {
            Some(user) if user.is_organizer() => user,
            _ => return Err(reject("Only organizers can create events")),
        };

        let CreateEvent {
            title,
            description,
            date,
            time,
            location,
            price,
            category,
            image_url,
            capacity,
        } = data;
        let event = Event {
            id: EventId::new(),
            title,
            description,
            date,
            time,
            location,
            price,
            category,
            image_url,
            capacity,
            organizer_id: organizer.id,
            organizer_name: organizer.name.clone(),
            attendees: Vec::new(),
        };

        let _writer = self.writer.lock().await;
        let created = self.store.create(event).await?;
        self.cache.write().await.push(created.clone());
        tracing::info!(event_id = %created.id, "event created");
        Ok(created)
    }

    #[tracing::instrument(skip(self, patch, actor), fields(actor = ?actor.map(|u| u.id)))]
    pub async fn update_event(
        &self,
        event_id: EventId,
        patch: UpdateEvent,
        actor: Option<&User>,
    ) -> AppResult<Event> {
        let _writer = self.writer.lock().await;
        let current = self.cached(event_id).await?;
        if !actor.is_some_and(|user| current.is_manageable_by(user)) {
            return Err(reject("You don't have permission to update this event"));
        }

        let merged = patch.merge_into(&current);
        if merged.attendee_count() as i64 > i64::from(merged.capacity) {
            return Err(AppError::UnprocessableEntity(format!(
                "capacity {} is below the {} attendees already booked",
                merged.capacity,
                merged.attendee_count()
            )));
        }

        let updated = self.store.update(merged).await?;
        self.replace(updated.clone()).await;
        Ok(updated)
    }

    #[tracing::instrument(skip(self, actor), fields(actor = ?actor.map(|u| u.id)))]
    pub async fn delete_event(&self, event_id: EventId, actor: Option<&User>) -> AppResult<()> {
        let _writer = self.writer.lock().await;
        let current = self.cached(event_id).await?;
        if !actor.is_some_and(|user| current.is_manageable_by(user)) {
            return Err(reject("You don't have permission to delete this event"));
        }

        self.store.delete(event_id).await?;
        self.cache.write().await.retain(|event| event.id != event_id);
        tracing::info!("event deleted");
        Ok(())
    }

    #[tracing::instrument(skip(self, actor), fields(actor = ?actor.map(|u| u.id)))]
    pub async fn book_event(&self, event_id: EventId, actor: Option<&User>) -> AppResult<Event> {
        let attendee = match actor {
            Some(user) if user.is_attendee() => user,
            _ => return Err(reject("Only attendees can book events")),
        };

        // 存在 → 定員 → 重複 の順で判定する
        let _writer = self.writer.lock().await;
        let current = self.cached(event_id).await?;
        if current.is_full() {
            return Err(AppError::CapacityExceeded);
        }
        if current.is_attending(attendee.id) {
            return Err(AppError::AlreadyBooked);
        }

        let updated = self
            .store
            .add_attendee(BookEvent::new(event_id, attendee.id))
            .await?;
        self.replace(updated.clone()).await;
        Ok(updated)
    }

    #[tracing::instrument(skip(self, actor), fields(actor = ?actor.map(|u| u.id)))]
    pub async fn cancel_booking(&self, event_id: EventId, actor: Option<&User>) -> AppResult<Event> {
        let user = actor.ok_or(AppError::Unauthenticated)?;

        let _writer = self.writer.lock().await;
        let current = self.cached(event_id).await?;
        if !current.is_attending(user.id) {
            return Err(AppError::NotBooked);
        }

        let updated = self
            .store
            .remove_attendee(CancelBooking::new(event_id, user.id))
            .await?;
        self.replace(updated.clone()).await;
        Ok(updated)
    }

    /// Attendee ids of an event, for whoever may manage it.
    pub async fn roster(&self, event_id: EventId, actor: Option<&User>) -> AppResult<Vec<UserId>> {
        let user = actor.ok_or(AppError::Unauthenticated)?;
        let current = self.cached(event_id).await?;
        if !current.is_manageable_by(user) {
            return Err(reject("You don't have permission to view this roster"));
        }
        Ok(current.attendees)
    }

    async fn cached(&self, event_id: EventId) -> AppResult<Event> {
        self.cache
            .read()
            .await
            .iter()
            .find(|event| event.id == event_id)
            .cloned()
            .ok_or_else(|| AppError::EntityNotFound("Event not found".into()))
    }

    // レコード単位で丸ごと差し替える
    async fn replace(&self, event: Event) {
        let mut cache = self.cache.write().await;
        if let Some(slot) = cache.iter_mut().find(|cached| cached.id == event.id) {
            *slot = event;
        }
    }
}

fn reject(message: &str) -> AppError {
    tracing::warn!(reason = message, "rejected by authorization gate");
    AppError::Unauthorized(message.into())
}
