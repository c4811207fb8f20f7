use kernel::model::{
    id::UserId,
    role::Role,
    user::{User, UserProfile},
};
use shared::error::AppError;
use sqlx::FromRow;
use std::str::FromStr;

#[derive(FromRow)]
pub struct UserRow {
    pub user_id: UserId,
    pub name: String,
    pub email: String,
    pub role: String,
    pub profile_image: Option<String>,
    pub gender: Option<String>,
    pub city: Option<String>,
    pub interests: Vec<String>,
    pub age: Option<i32>,
    pub budget: Option<f64>,
    pub verified: bool,
}

impl TryFrom<UserRow> for User {
    type Error = AppError;

    fn try_from(value: UserRow) -> Result<Self, Self::Error> {
        let UserRow {
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
            verified,
        } = value;
        let role = Role::from_str(&role)
            .map_err(|_| AppError::ConversionEntityError(format!("unknown role: {role}")))?;
        Ok(User {
            id: user_id,
            name,
            email,
            role,
            profile: UserProfile {
                profile_image,
                gender,
                city,
                interests,
                age,
                budget,
            },
            verified,
        })
    }
}

// ログイン時のパスワード照合に使う型
#[derive(FromRow)]
pub struct UserCredentialRow {
    pub password_hash: String,
    #[sqlx(flatten)]
    pub user: UserRow,
}
