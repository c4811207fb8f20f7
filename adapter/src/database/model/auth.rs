use crate::redis::model::{RedisKey, RedisValue};
use kernel::model::{auth::AccessToken, id::UserId};
use shared::error::AppError;
use std::str::FromStr;

// Redis 上のキーは "auth:<token>"、値はユーザー ID
pub struct AuthorizationKey(String);
pub struct AuthorizedUserId(UserId);

pub fn from(access_token: &AccessToken) -> AuthorizationKey {
    AuthorizationKey(access_token.0.clone())
}

impl RedisKey for AuthorizationKey {
    type Value = AuthorizedUserId;

    fn inner(&self) -> String {
        format!("auth:{}", self.0)
    }
}

impl RedisValue for AuthorizedUserId {
    fn inner(&self) -> String {
        self.0.to_string()
    }
}

impl TryFrom<String> for AuthorizedUserId {
    type Error = AppError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Ok(Self(UserId::from_str(&s).map_err(|e| {
            AppError::ConversionEntityError(e.to_string())
        })?))
    }
}

impl AuthorizedUserId {
    pub fn new(user_id: UserId) -> Self {
        Self(user_id)
    }

    pub fn into_inner(self) -> UserId {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_is_namespaced() {
        let key = from(&AccessToken("abc".into()));
        assert_eq!(key.inner(), "auth:abc");
    }

    #[test]
    fn value_round_trips_through_string() {
        let user_id = UserId::new();
        let value = AuthorizedUserId::try_from(AuthorizedUserId::new(user_id).inner()).unwrap();
        assert_eq!(value.into_inner(), user_id);
        assert!(AuthorizedUserId::try_from("not-a-uuid".to_string()).is_err());
    }
}
