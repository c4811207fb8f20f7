use crate::model::{
    id::UserId,
    user::{
        event::{CreateUser, UpdateProfile},
        User,
    },
};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    // メールアドレスが登録済みなら EmailInUse
    async fn create(&self, event: CreateUser) -> AppResult<User>;
    async fn find_current_user(&self, current_user_id: UserId) -> AppResult<Option<User>>;
    // 見つからない ID は結果に含めない。並び順は引数の順
    async fn find_by_ids(&self, user_ids: &[UserId]) -> AppResult<Vec<User>>;
    async fn update_profile(&self, event: UpdateProfile) -> AppResult<User>;
}
