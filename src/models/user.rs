// src/models/user.rs

use serde::{Deserialize, Serialize};

/// Portal role. Only students take quizzes; faculty and admins manage them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    #[serde(alias = "user")]
    Student,
    Faculty,
    Admin,
}

impl Role {
    pub fn can_take_quizzes(self) -> bool {
        matches!(self, Role::Student)
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "student" | "user" => Ok(Role::Student),
            "faculty" | "teacher" => Ok(Role::Faculty),
            "admin" => Ok(Role::Admin),
            other => Err(other.to_string()),
        }
    }
}

/// Identity of the signed-in user, injected into the attempt controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
    pub username: Option<String>,
    pub role: Role,
}

impl CurrentUser {
    pub fn student(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            username: None,
            role: Role::Student,
        }
    }
}
