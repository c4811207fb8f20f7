use crate::model::{
    event::{
        event::{BookEvent, CancelBooking},
        Event,
    },
    id::EventId,
};
use async_trait::async_trait;
use shared::error::AppResult;

// 永続ストア。台帳はここで返ってきたレコードでキャッシュを置き換える
#[async_trait]
pub trait EventRepository: Send + Sync {
    async fn find_all(&self) -> AppResult<Vec<Event>>;
    async fn find_by_id(&self, event_id: EventId) -> AppResult<Option<Event>>;
    async fn create(&self, event: Event) -> AppResult<Event>;
    // 参加者一覧には触れない
    async fn update(&self, event: Event) -> AppResult<Event>;
    async fn delete(&self, event_id: EventId) -> AppResult<()>;
    // 参加登録の行を追加し、更新後のイベントを返す
    async fn add_attendee(&self, event: BookEvent) -> AppResult<Event>;
    async fn remove_attendee(&self, event: CancelBooking) -> AppResult<Event>;
}
