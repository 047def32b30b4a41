use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;
use voyra_shared::Masked;

use crate::repository::UserRepository;
use crate::{CoreError, CoreResult};

text_enum! {
    pub enum Role ("role") {
        User => "user",
        Admin => "admin",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: Masked<String>,
    pub phone: Option<Masked<String>>,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

/// Admin view over traveller accounts.
pub struct UserDirectory {
    users: Arc<dyn UserRepository>,
}

impl UserDirectory {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn account(&self, id: Uuid) -> CoreResult<Option<User>> {
        Ok(self.users.get_user(id).await?)
    }

    pub async fn travellers(&self) -> CoreResult<Vec<User>> {
        Ok(self.users.list_users(Some(Role::User)).await?)
    }

    pub async fn set_active(&self, id: Uuid, is_active: bool) -> CoreResult<User> {
        let user = self
            .users
            .set_user_active(id, is_active)
            .await?
            .ok_or_else(|| CoreError::NotFound("User not found".into()))?;
        info!(user_id = %id, is_active, "user activation changed");
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_details_stay_out_of_debug() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Ravi".into(),
            email: Masked::new("ravi@example.com".into()),
            phone: Some(Masked::new("+91 98400 00000".into())),
            role: Role::User,
            is_active: true,
            created_at: Utc::now(),
        };

        let debug = format!("{:?}", user);
        assert!(!debug.contains("ravi@example.com"));
        assert!(!debug.contains("98400"));

        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(value["email"], "ravi@example.com");
        assert_eq!(value["role"], "user");
    }
}
