use crate::model::{auth::AccessToken, id::UserId, role::Role, user::User};
use async_trait::async_trait;
use shared::error::AppResult;

#[async_trait]
pub trait AuthRepository: Send + Sync {
    async fn fetch_user_id_from_token(&self, access_token: &AccessToken)
        -> AppResult<Option<UserId>>;
    // expected_role を指定した場合、登録ロールと一致しなければ RoleMismatch
    async fn verify_user(
        &self,
        email: &str,
        password: &str,
        expected_role: Option<Role>,
    ) -> AppResult<User>;
    async fn create_token(&self, user_id: UserId) -> AppResult<AccessToken>;
    async fn delete_token(&self, access_token: AccessToken) -> AppResult<()>;
}
