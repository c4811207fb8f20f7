use crate::database::{
    model::{
        auth::{from, AuthorizedUserId},
        user::UserCredentialRow,
    },
    ConnectionPool,
};
use crate::redis::RedisClient;
use crate::repository::user::verify_password;
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{auth::AccessToken, id::UserId, role::Role, user::User};
use kernel::repository::auth::AuthRepository;
use shared::error::{AppError, AppResult};
use std::sync::Arc;

#[derive(new)]
pub struct AuthRepositoryImpl {
    db: ConnectionPool,
    kv: Arc<RedisClient>,
    ttl: u64,
}

#[async_trait]
impl AuthRepository for AuthRepositoryImpl {
    async fn fetch_user_id_from_token(
        &self,
        access_token: &AccessToken,
    ) -> AppResult<Option<UserId>> {
        let key = from(access_token);
        self.kv
            .get(&key)
            .await
            .map(|x| x.map(AuthorizedUserId::into_inner))
    }

    async fn verify_user(
        &self,
        email: &str,
        password: &str,
        expected_role: Option<Role>,
    ) -> AppResult<User> {
        let row: UserCredentialRow = sqlx::query_as(
            r#"
                SELECT
                    password_hash,
                    user_id, name, email, role, profile_image, gender,
                    city, interests, age, budget, verified
                FROM users
                WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?
        .ok_or(AppError::InvalidCredentials)?;

        verify_password(password, &row.password_hash)?;
        let user = User::try_from(row.user)?;

        // ロール指定でログインした場合、登録ロールと違えばセッションを作らない
        match expected_role {
            Some(role) if role != user.role => {
                tracing::warn!(user_id = %user.id, expected = %role, "login role mismatch");
                Err(AppError::RoleMismatch(role.to_string()))
            }
            _ => Ok(user),
        }
    }

    async fn create_token(&self, user_id: UserId) -> AppResult<AccessToken> {
        let access_token = AccessToken(uuid::Uuid::new_v4().simple().to_string());
        let key = from(&access_token);
        self.kv
            .set_ex(&key, &AuthorizedUserId::new(user_id), self.ttl)
            .await?;
        Ok(access_token)
    }

    async fn delete_token(&self, access_token: AccessToken) -> AppResult<()> {
        let key = from(&access_token);
        self.kv.delete(&key).await
    }
}
