use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::ValidateEmail;

use crate::error::{UserError, UserResult};

/// User entity. Field names are camelCase on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Store-assigned identifier
    pub id: i64,
    /// Unique login name, immutable after creation
    pub username: String,
    /// Unique email address
    pub email: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request body for creating or updating a user.
///
/// Loosely typed so validation can report every violation at once in
/// the `errors` list instead of failing on the first bad field.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

/// A validated user payload, normalized by the service layer.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

impl UserInput {
    /// Check the payload and collect every violation.
    pub fn validate(&self) -> UserResult<()> {
        let mut errors = Vec::new();

        match self.username.as_deref() {
            Some(username) if !username.trim().is_empty() => {
                if username.len() > 50 {
                    errors.push("Username must be less than 50 characters".to_string());
                }
            }
            _ => errors.push("Username is required and must be a non-empty string".to_string()),
        }

        match self.email.as_deref() {
            Some(email) if !email.trim().is_empty() => {
                if !email.validate_email() {
                    errors.push("Email must be a valid email address".to_string());
                }
                if email.len() > 100 {
                    errors.push("Email must be less than 100 characters".to_string());
                }
            }
            _ => errors.push("Email is required and must be a non-empty string".to_string()),
        }

        if let Some(first_name) = self.first_name.as_deref() {
            if first_name.len() > 50 {
                errors.push("FirstName must be less than 50 characters".to_string());
            }
        }

        if let Some(last_name) = self.last_name.as_deref() {
            if last_name.len() > 50 {
                errors.push("LastName must be less than 50 characters".to_string());
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(UserError::Validation(errors))
        }
    }

    /// Validate and normalize into a [`NewUser`].
    pub fn into_new_user(self) -> UserResult<NewUser> {
        self.validate()?;

        match (self.username, self.email) {
            (Some(username), Some(email)) => Ok(NewUser {
                username,
                email,
                first_name: self.first_name.unwrap_or_default(),
                last_name: self.last_name.unwrap_or_default(),
            }),
            // validate() rejects missing username/email above
            _ => Err(UserError::Validation(vec![
                "Username is required and must be a non-empty string".to_string(),
            ])),
        }
    }
}

impl User {
    /// Overwrite fields present in the payload. The identifier and the
    /// username never change after creation.
    pub fn apply_update(&mut self, input: UserInput) {
        if let Some(email) = input.email {
            self.email = email;
        }
        if let Some(first_name) = input.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = input.last_name {
            self.last_name = last_name;
        }
        self.updated_at = Utc::now();
    }
}
