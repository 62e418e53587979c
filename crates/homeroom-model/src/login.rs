use crate::user::Role;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SigninResponse {
    pub access_token: String,
    pub role: Role,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct SigninRequest {
    #[schema(example = "student@school.edu")]
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, ToSchema, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, message = "Please enter your first name."))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Please enter your last name."))]
    pub last_name: String,
    #[validate(email(message = "Enter a valid email address."))]
    #[schema(example = "student@school.edu")]
    pub email: String,
    #[validate(length(min = 1, message = "Please enter a password."))]
    pub password: String,
    #[validate(must_match(other = "password", message = "Passwords do not match."))]
    pub confirm_password: String,
    #[validate(length(min = 1, message = "Please select your year level."))]
    #[schema(example = "1st Year")]
    pub year: String,
    #[validate(length(min = 1, message = "Please select your section."))]
    #[schema(example = "A")]
    pub section: String,
    #[validate(length(min = 1, message = "Please select your group."))]
    #[schema(example = "1")]
    pub group: String,
}

impl SignupRequest {
    /// Trims every text field and lowercases the email.
    #[must_use]
    pub fn normalized(self) -> Self {
        Self {
            first_name: self.first_name.trim().to_owned(),
            last_name: self.last_name.trim().to_owned(),
            email: self.email.trim().to_lowercase(),
            password: self.password,
            confirm_password: self.confirm_password,
            year: self.year.trim().to_owned(),
            section: self.section.trim().to_owned(),
            group: self.group.trim().to_owned(),
        }
    }

    #[must_use]
    pub fn year_section(&self) -> String {
        format!("{} - Section {} - Group {}", self.year, self.section, self.group)
    }
}
