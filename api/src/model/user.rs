use derive_new::new;
use garde::Validate;
use kernel::model::{
    id::UserId,
    role::Role,
    user::{event::UpdateProfile, User},
};
use serde::{Deserialize, Serialize};
use strum::VariantNames;

const QR_CODE_ENDPOINT: &str = "https://api.qrserver.com/v1/create-qr-code/";
const QR_CODE_SIZE: u32 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, VariantNames)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum RoleName {
    Attendee,
    Organizer,
}

impl Default for RoleName {
    fn default() -> Self {
        Self::Attendee
    }
}

impl From<Role> for RoleName {
    fn from(value: Role) -> Self {
        match value {
            Role::Attendee => Self::Attendee,
            Role::Organizer => Self::Organizer,
        }
    }
}

impl From<RoleName> for Role {
    fn from(value: RoleName) -> Self {
        match value {
            RoleName::Attendee => Self::Attendee,
            RoleName::Organizer => Self::Organizer,
        }
    }
}

pub fn qr_code_url(content: &str, size: u32) -> String {
    format!(
        "{QR_CODE_ENDPOINT}?size={size}x{size}&data={}",
        urlencoding::encode(content)
    )
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: RoleName,
    pub profile_image: Option<String>,
    pub gender: Option<String>,
    pub city: Option<String>,
    pub interests: Vec<String>,
    pub age: Option<i32>,
    pub budget: Option<f64>,
    pub verified: bool,
    pub qr_code_url: String,
}

impl From<User> for UserResponse {
    fn from(value: User) -> Self {
        let User {
            id,
            name,
            email,
            role,
            profile,
            verified,
        } = value;
        Self {
            id,
            name,
            email,
            role: RoleName::from(role),
            profile_image: profile.profile_image,
            gender: profile.gender,
            city: profile.city,
            interests: profile.interests,
            age: profile.age,
            budget: profile.budget,
            verified,
            qr_code_url: qr_code_url(&format!("eventhub://users/{id}"), QR_CODE_SIZE),
        }
    }
}

// ロールは変更できないので受け付けない
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    #[garde(length(min = 2))]
    pub name: Option<String>,
    #[garde(skip)]
    pub profile_image: Option<String>,
    #[garde(skip)]
    pub gender: Option<String>,
    #[garde(skip)]
    pub city: Option<String>,
    #[garde(skip)]
    pub interests: Option<Vec<String>>,
    #[garde(range(min = 18, max = 100))]
    pub age: Option<i32>,
    #[garde(range(min = 0.0, max = 10000.0))]
    pub budget: Option<f64>,
}

#[derive(new)]
pub struct UpdateProfileRequestWithUserId(UserId, UpdateProfileRequest);
impl From<UpdateProfileRequestWithUserId> for UpdateProfile {
    fn from(value: UpdateProfileRequestWithUserId) -> Self {
        let UpdateProfileRequestWithUserId(
            user_id,
            UpdateProfileRequest {
                name,
                profile_image,
                gender,
                city,
                interests,
                age,
                budget,
            },
        ) = value;
        UpdateProfile {
            user_id,
            name,
            profile_image,
            gender,
            city,
            interests,
            age,
            budget,
        }
    }
}
