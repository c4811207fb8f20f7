use crate::model::{id::UserId, role::Role};
pub mod event;

#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub profile: UserProfile,
    pub verified: bool,
}

impl User {
    pub fn is_organizer(&self) -> bool {
        self.role == Role::Organizer
    }

    pub fn is_attendee(&self) -> bool {
        self.role == Role::Attendee
    }
}

// 任意入力のプロフィール項目
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserProfile {
    pub profile_image: Option<String>,
    pub gender: Option<String>,
    pub city: Option<String>,
    pub interests: Vec<String>,
    pub age: Option<i32>,
    pub budget: Option<f64>,
}
