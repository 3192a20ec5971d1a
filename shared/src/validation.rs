//! Validation for business submissions
//!
//! Field rules live on [`SubmitFormValues`] as `validator` attributes; the
//! functions here cover the optional-but-well-formed cases the stock
//! validators reject outright (empty strings) and flatten the resulting
//! errors into one message per wire field.

use std::borrow::Cow;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::{SubmitFormValues, UrlField};

pub const REQUIRED_MESSAGE: &str = "Required";
pub const INVALID_EMAIL_MESSAGE: &str = "Invalid email address";
pub const INVALID_URL_MESSAGE: &str =
    "Invalid URL. Please include the http or https bit and the domain.";

/// URL schemes accepted for link fields
const ALLOWED_URL_SCHEMES: &[&str] = &["http", "https", "ftp"];

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

/// Non-empty text
pub fn required_text(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Err(error("required", REQUIRED_MESSAGE));
    }
    Ok(())
}

/// Empty, or a syntactically valid email address
pub fn optional_email(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || validator::validate_email(value) {
        Ok(())
    } else {
        Err(error("email", INVALID_EMAIL_MESSAGE))
    }
}

/// Empty, or an absolute URL with a supported scheme and a host
pub fn optional_url(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || is_absolute_url(value) {
        Ok(())
    } else {
        Err(error("url", INVALID_URL_MESSAGE))
    }
}

fn is_absolute_url(value: &str) -> bool {
    // The parser repairs `http:host` and percent-encodes spaces; neither is accepted here
    if value.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((scheme, _)) = value.split_once("://") else {
        return false;
    };

    match Url::parse(value) {
        Ok(url) => {
            scheme.eq_ignore_ascii_case(url.scheme())
                && ALLOWED_URL_SCHEMES.contains(&url.scheme())
                && url.host_str().map_or(false, |host| !host.is_empty())
        }
        Err(_) => false,
    }
}

/// Per-field validation messages keyed by wire field name
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, String>);

impl FieldErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    /// Message shown next to a field
    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn insert(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_insert_with(|| message.into());
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut fields = FieldErrors::default();
        for (field, errs) in errors.field_errors() {
            let message = errs
                .iter()
                .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
                .unwrap_or_else(|| REQUIRED_MESSAGE.to_string());
            fields.insert(wire_name(field), message);
        }
        fields
    }
}

impl std::fmt::Display for FieldErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let fields: Vec<&str> = self.fields().collect();
        write!(f, "invalid fields: {}", fields.join(", "))
    }
}

/// Map a struct field name to its wire name; names already in wire form pass
/// through unchanged.
fn wire_name(field: &str) -> String {
    if let Some(url_field) = UrlField::ALL.iter().find(|f| f.field_name() == field) {
        return url_field.wire_name().to_string();
    }
    match field {
        "submitter_email" => "submitterEmail".to_string(),
        other => other.to_string(),
    }
}

/// Check every field rule, collecting all violations
pub fn validate_submission(values: &SubmitFormValues) -> Result<(), FieldErrors> {
    values.validate().map_err(FieldErrors::from)
}
