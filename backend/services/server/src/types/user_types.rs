use chrono::{DateTime, Utc};
use engine::types::user_types::{Role, User, UserUpdate};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// A user as the API shows it: never carries the password hash.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserView {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserView {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserSummary {
    pub id: u64,
    pub name: String,
    pub email: String,
}

impl From<&User> for UserSummary {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

#[derive(Deserialize, Validate, Debug)]
pub struct UpdateUserInput {
    #[validate(length(min = 2, message = "Name must be at least 2 characters"))]
    pub name: Option<String>,

    #[validate(email(message = "Invalid email format"))]
    pub email: Option<String>,

    pub role: Option<Role>,
}

impl UpdateUserInput {
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.map(|n| n.trim().to_string()),
            email: self.email.map(|e| e.trim().to_string()),
            role: self.role,
        }
    }
}

impl From<UpdateUserInput> for UserUpdate {
    fn from(input: UpdateUserInput) -> Self {
        Self {
            name: input.name,
            email: input.email,
            role: input.role,
        }
    }
}
