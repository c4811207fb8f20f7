use crate::database::{model::user::UserRow, ConnectionPool};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use async_trait::async_trait;
use derive_new::new;
use kernel::model::{
    id::UserId,
    user::{
        event::{CreateUser, UpdateProfile},
        User,
    },
};
use kernel::repository::user::UserRepository;
use shared::error::{AppError, AppResult};

const SELECT_USERS: &str = r#"
    SELECT
        user_id,
        name,
        email,
        role,
        profile_image,
        gender,
        city,
        interests,
        age,
        budget,
        verified
    FROM users
"#;

#[derive(new)]
pub struct UserRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl UserRepository for UserRepositoryImpl {
    async fn create(&self, event: CreateUser) -> AppResult<User> {
        let CreateUser {
            name,
            email,
            password,
            role,
            profile,
        } = event;
        let password_hash = hash_password(&password)?;

        // 新規ユーザーは未確認（verified = false）で作成する
        let row: UserRow = sqlx::query_as(
            r#"
                INSERT INTO users
                (name, email, password_hash, role,
                profile_image, gender, city, interests, age, budget)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
                RETURNING
                    user_id, name, email, role, profile_image, gender,
                    city, interests, age, budget, verified
            "#,
        )
        .bind(name)
        .bind(email)
        .bind(password_hash)
        .bind(role.as_ref())
        .bind(profile.profile_image)
        .bind(profile.gender)
        .bind(profile.city)
        .bind(profile.interests)
        .bind(profile.age)
        .bind(profile.budget)
        .fetch_one(self.db.inner_ref())
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => AppError::EmailInUse,
            e => AppError::SpecificOperationError(e),
        })?;

        User::try_from(row)
    }

    async fn find_current_user(&self, current_user_id: UserId) -> AppResult<Option<User>> {
        let sql = format!("{SELECT_USERS} WHERE user_id = $1");
        sqlx::query_as::<_, UserRow>(&sql)
            .bind(current_user_id)
            .fetch_optional(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .map(User::try_from)
            .transpose()
    }

    async fn find_by_ids(&self, user_ids: &[UserId]) -> AppResult<Vec<User>> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }
        let ids: Vec<uuid::Uuid> = user_ids.iter().map(|id| id.raw()).collect();
        let sql = format!("{SELECT_USERS} WHERE user_id = ANY($1)");
        let mut users = sqlx::query_as::<_, UserRow>(&sql)
            .bind(ids)
            .fetch_all(self.db.inner_ref())
            .await
            .map_err(AppError::SpecificOperationError)?
            .into_iter()
            .map(User::try_from)
            .collect::<AppResult<Vec<User>>>()?;

        // 引数の並び（= 参加登録順）に揃える
        users.sort_by_key(|user| user_ids.iter().position(|id| *id == user.id));
        Ok(users)
    }

    async fn update_profile(&self, event: UpdateProfile) -> AppResult<User> {
        let UpdateProfile {
            user_id,
            name,
            profile_image,
            gender,
            city,
            interests,
            age,
            budget,
        } = event;

        let row: Option<UserRow> = sqlx::query_as(
            r#"
                UPDATE users
                SET
                    name = COALESCE($2, name),
                    profile_image = COALESCE($3, profile_image),
                    gender = COALESCE($4, gender),
                    city = COALESCE($5, city),
                    interests = COALESCE($6, interests),
                    age = COALESCE($7, age),
                    budget = COALESCE($8, budget),
                    updated_at = CURRENT_TIMESTAMP(3)
                WHERE user_id = $1
                RETURNING
                    user_id, name, email, role, profile_image, gender,
                    city, interests, age, budget, verified
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(profile_image)
        .bind(gender)
        .bind(city)
        .bind(interests)
        .bind(age)
        .bind(budget)
        .fetch_optional(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        row.ok_or_else(|| AppError::EntityNotFound("specified user not found".into()))
            .and_then(User::try_from)
    }
}

pub(crate) fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

pub(crate) fn verify_password(password: &str, hash: &str) -> AppResult<()> {
    let parsed_hash = PasswordHash::new(hash)?;
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AppError::InvalidCredentials)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::model::{role::Role, user::UserProfile};

    #[test]
    fn password_hash_round_trip() -> AppResult<()> {
        let hash = hash_password("correct horse")?;
        assert_ne!(hash, "correct horse");
        verify_password("correct horse", &hash)?;
        assert!(matches!(
            verify_password("battery staple", &hash),
            Err(AppError::InvalidCredentials)
        ));
        Ok(())
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "requires DATABASE_URL"]
    async fn test_register_and_update_profile(pool: sqlx::PgPool) -> anyhow::Result<()> {
        let repo = UserRepositoryImpl::new(ConnectionPool::new(pool));
        let create = || {
            CreateUser::new(
                "Sam".into(),
                "sam@example.com".into(),
                "secret-password".into(),
                Role::Attendee,
                UserProfile {
                    city: Some("Seattle".into()),
                    ..Default::default()
                },
            )
        };

        let user = repo.create(create()).await?;
        assert_eq!(user.role, Role::Attendee);
        assert!(!user.verified);

        let res = repo.create(create()).await;
        assert!(matches!(res, Err(AppError::EmailInUse)));

        let updated = repo
            .update_profile(UpdateProfile {
                user_id: user.id,
                name: None,
                profile_image: None,
                gender: None,
                city: None,
                interests: Some(vec!["jazz".into(), "hiking".into()]),
                age: Some(31),
                budget: None,
            })
            .await?;
        assert_eq!(updated.name, "Sam");
        assert_eq!(updated.profile.city.as_deref(), Some("Seattle"));
        assert_eq!(updated.profile.interests, vec!["jazz", "hiking"]);
        assert_eq!(updated.profile.age, Some(31));

        let found = repo.find_by_ids(&[UserId::new(), user.id]).await?;
        assert_eq!(found.len(), 1);
        Ok(())
    }
}
