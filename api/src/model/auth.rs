use super::user::{RoleName, UserResponse};
use garde::Validate;
use kernel::model::{
    auth::Session,
    user::{event::CreateUser, UserProfile},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[garde(length(min = 2))]
    pub name: String,
    #[garde(email)]
    pub email: String,
    #[garde(length(min = 6))]
    pub password: String,
    #[garde(matches(password))]
    pub confirm_password: String,
    #[garde(skip)]
    #[serde(default)]
    pub role: RoleName,
    #[garde(skip)]
    pub profile_image: Option<String>,
    #[garde(skip)]
    pub gender: Option<String>,
    #[garde(skip)]
    pub city: Option<String>,
    #[garde(skip)]
    #[serde(default)]
    pub interests: Vec<String>,
    #[garde(range(min = 18, max = 100))]
    pub age: Option<i32>,
    #[garde(range(min = 0.0, max = 10000.0))]
    pub budget: Option<f64>,
}

impl From<RegisterRequest> for CreateUser {
    fn from(value: RegisterRequest) -> Self {
        let RegisterRequest {
            name,
            email,
            password,
            role,
            profile_image,
            gender,
            city,
            interests,
            age,
            budget,
            ..
        } = value;
        CreateUser {
            name,
            email,
            password,
            role: role.into(),
            profile: UserProfile {
                profile_image,
                gender,
                city,
                interests,
                age,
                budget,
            },
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[garde(email)]
    pub email: String,
    #[garde(length(min = 1))]
    pub password: String,
    // 指定された場合は登録ロールと一致している必要がある
    #[garde(skip)]
    pub role: Option<RoleName>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub access_token: String,
    pub user: UserResponse,
}

impl From<Session> for SessionResponse {
    fn from(value: Session) -> Self {
        let Session { access_token, user } = value;
        Self {
            access_token: access_token.0,
            user: user.into(),
        }
    }
}
