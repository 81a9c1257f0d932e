use serde::{Deserialize, Serialize};

use super::{Resource, ResourceId};

/// Registered user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: ResourceId,
    pub name: String,
    pub email: String,
}

/// Payload for creating a user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub name: String,
    pub email: String,
}

impl Resource for User {
    type Draft = CreateUserRequest;

    const KIND: &'static str = "User";

    fn id(&self) -> ResourceId {
        self.id
    }

    fn from_draft(id: ResourceId, draft: CreateUserRequest) -> Self {
        Self {
            id,
            name: draft.name,
            email: draft.email,
        }
    }
}

impl User {
    /// Case-insensitive email comparison used by the uniqueness check
    pub fn has_email(&self, email: &str) -> bool {
        self.email.trim().eq_ignore_ascii_case(email.trim())
    }
}

/// Users every fresh user store starts with
pub fn user_fixtures() -> Vec<User> {
    vec![
        User {
            id: 1,
            name: "John Doe".to_string(),
            email: "john@example.com".to_string(),
        },
        User {
            id: 2,
            name: "Jane Smith".to_string(),
            email: "jane@example.com".to_string(),
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_has_email_ignores_case_and_whitespace() {
        let user = user_fixtures().remove(0);
        assert!(user.has_email("JOHN@example.com "));
        assert!(!user.has_email("jane@example.com"));
    }
}
