use crate::model::{id::UserId, role::Role, user::UserProfile};
use derive_new::new;

#[derive(new)]
pub struct CreateUser {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub profile: UserProfile,
}

// None の項目は現在の値を維持する。ロールは含めない
#[derive(Debug)]
pub struct UpdateProfile {
    pub user_id: UserId,
    pub name: Option<String>,
    pub profile_image: Option<String>,
    pub gender: Option<String>,
    pub city: Option<String>,
    pub interests: Option<Vec<String>>,
    pub age: Option<i32>,
    pub budget: Option<f64>,
}
