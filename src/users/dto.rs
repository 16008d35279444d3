use serde::Deserialize;

use crate::validation::{FieldErrors, RepoError};

/// Signup payload. Every field is optional on the wire so that missing
/// fields surface as validation messages instead of a JSON rejection.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email_address: Option<String>,
    pub password: Option<String>,
}

/// Borrowed view of a [`NewUser`] that passed validation.
pub struct ValidNewUser<'a> {
    pub first_name: &'a str,
    pub last_name: &'a str,
    pub email_address: &'a str,
    pub password: &'a str,
}

impl NewUser {
    pub fn validate(&self) -> Result<ValidNewUser<'_>, RepoError> {
        let mut errors = FieldErrors::new();
        errors.require(
            self.first_name.as_deref(),
            "Please provide a first name",
            "Please provide a first name",
        );
        errors.require(
            self.last_name.as_deref(),
            "Please provide a last name",
            "Please provide a last name",
        );
        errors.require(
            self.email_address.as_deref(),
            "Please provide an email address",
            "Please provide a valid email address",
        );
        errors.require(
            self.password.as_deref(),
            "Please provide a password",
            "Please provide a password",
        );
        errors.into_result()?;

        Ok(ValidNewUser {
            first_name: self.first_name.as_deref().unwrap_or_default(),
            last_name: self.last_name.as_deref().unwrap_or_default(),
            email_address: self.email_address.as_deref().unwrap_or_default(),
            password: self.password.as_deref().unwrap_or_default(),
        })
    }
}
