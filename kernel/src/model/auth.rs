use crate::model::user::User;

pub struct AccessToken(pub String);

// ログイン・登録成功時に発行されるセッション
pub struct Session {
    pub access_token: AccessToken,
    pub user: User,
}
