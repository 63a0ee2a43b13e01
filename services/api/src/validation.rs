//! Input validation utilities

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::models::{
    CreateCommentRequest, CreatePhotoRequest, CreateSocialMediaRequest, LoginRequest,
    RegisterRequest, UpdateCommentRequest,
};

/// Field name to error message
pub type FieldErrors = BTreeMap<String, String>;

/// A request payload that can check its own fields
pub trait Validate {
    /// Collect every field error, not just the first
    fn validate(&self) -> Result<(), FieldErrors>;
}

/// Accumulates per-field errors
#[derive(Default)]
struct Checker {
    errors: FieldErrors,
}

impl Checker {
    fn check(&mut self, field: &str, result: Result<(), String>) -> &mut Self {
        if let Err(msg) = result {
            self.errors.entry(field.to_string()).or_insert(msg);
        }
        self
    }

    fn finish(&mut self) -> Result<(), FieldErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(std::mem::take(&mut self.errors))
        }
    }
}

fn required(value: &str, label: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} is required", label));
    }
    Ok(())
}

/// Validate username
pub fn validate_username(username: &str) -> Result<(), String> {
    required(username, "Username")?;

    if username.len() > 32 {
        return Err("Username must be at most 32 characters long".to_string());
    }

    Ok(())
}

/// Validate email
pub fn validate_email(email: &str) -> Result<(), String> {
    required(email, "Email")?;

    if email.len() > 254 {
        return Err("Email must be at most 254 characters long".to_string());
    }

    static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
    let regex = EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("Failed to compile email regex")
    });

    if !regex.is_match(email) {
        return Err("Invalid email format".to_string());
    }

    Ok(())
}

/// Validate age
pub fn validate_age(age: Option<i32>) -> Result<(), String> {
    match age {
        None => Err("Age is required".to_string()),
        Some(age) if age <= 8 => Err("Age must be greater than 8".to_string()),
        Some(_) => Ok(()),
    }
}

/// Validate password
pub fn validate_password(password: &str) -> Result<(), String> {
    required(password, "Password")?;

    if password.chars().count() < 6 {
        return Err("Password must be at least 6 characters long".to_string());
    }

    if password.len() > 128 {
        return Err("Password must be at most 128 characters long".to_string());
    }

    Ok(())
}

impl Validate for RegisterRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        Checker::default()
            .check("email", validate_email(&self.email))
            .check("username", validate_username(&self.username))
            .check("age", validate_age(self.age))
            .check("password", validate_password(&self.password))
            .finish()
    }
}

impl Validate for LoginRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        Checker::default()
            .check("email", required(&self.email, "Email"))
            .check("password", required(&self.password, "Password"))
            .finish()
    }
}

impl Validate for CreatePhotoRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        Checker::default()
            .check("title", required(&self.title, "Title"))
            .check("photo_url", required(&self.photo_url, "Photo URL"))
            .finish()
    }
}

impl Validate for CreateCommentRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        let photo_id = match self.photo_id {
            Some(_) => Ok(()),
            None => Err("Photo ID is required".to_string()),
        };

        Checker::default()
            .check("message", required(&self.message, "Message"))
            .check("photo_id", photo_id)
            .finish()
    }
}

impl Validate for UpdateCommentRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        Checker::default()
            .check("message", required(&self.message, "Message"))
            .finish()
    }
}

impl Validate for CreateSocialMediaRequest {
    fn validate(&self) -> Result<(), FieldErrors> {
        Checker::default()
            .check("name", required(&self.name, "Name"))
            .check(
                "social_media_url",
                required(&self.social_media_url, "Social media URL"),
            )
            .finish()
    }
}
