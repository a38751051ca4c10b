//! Controlled forms.
//!
//! A form is plain editable values plus a `validate` step that either
//! yields the typed input for an operation or a list of field errors.
//! [`FormState`] adds the submit lifecycle: validate, run the operation,
//! reset on success, keep the values on failure.

pub mod auth;
pub mod completion;
pub mod profile;

use std::future::Future;

use chrono::NaiveDate;

pub use auth::{InviteForm, InviteInput, LoginForm, LoginInput, RegisterForm, RegisterInput};
pub use completion::CompletionForm;
pub use profile::{ProfileForm, ProfileUpdate};

/// Minimum password length accepted at registration.
pub const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    #[error("{field} is required")]
    Required { field: &'static str },

    #[error("{field} is not a valid email address")]
    InvalidEmail { field: &'static str },

    #[error("{field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

impl FormError {
    pub fn field(&self) -> &'static str {
        match self {
            Self::Required { field } | Self::InvalidEmail { field } | Self::Invalid { field, .. } => {
                field
            }
        }
    }
}

pub trait Form: Default + Clone {
    /// Validated input handed to the submit operation.
    type Output;

    fn validate(&self) -> Result<Self::Output, Vec<FormError>>;
}

/// Outcome of [`FormState::submit`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission<T> {
    /// Validation failed; nothing was sent.
    Invalid,
    /// A previous submit is still running.
    Busy,
    Sent(Result<T, String>),
}

impl<T> Submission<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Sent(Ok(_)))
    }
}

#[derive(Debug, Clone, Default)]
pub struct FormState<F: Form> {
    values: F,
    errors: Vec<FormError>,
    submitting: bool,
    server_error: Option<String>,
}

impl<F: Form> FormState<F> {
    pub fn new(values: F) -> Self {
        Self {
            values,
            errors: Vec::new(),
            submitting: false,
            server_error: None,
        }
    }

    pub fn values(&self) -> &F {
        &self.values
    }

    /// Edit values in place. Errors for the form are cleared.
    pub fn edit(&mut self, change: impl FnOnce(&mut F)) {
        change(&mut self.values);
        self.errors.clear();
        self.server_error = None;
    }

    pub fn errors(&self) -> &[FormError] {
        &self.errors
    }

    pub fn error_for(&self, field: &str) -> Option<&FormError> {
        self.errors.iter().find(|e| e.field() == field)
    }

    pub fn server_error(&self) -> Option<&str> {
        self.server_error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Validate, then run `operation` with the validated input.
    ///
    /// The form resets after a successful operation; on failure the values
    /// stay and the message is kept in `server_error`.
    pub async fn submit<T, Fut, Op>(&mut self, operation: Op) -> Submission<T>
    where
        Op: FnOnce(F::Output) -> Fut,
        Fut: Future<Output = Result<T, String>>,
    {
        if self.submitting {
            return Submission::Busy;
        }
        let input = match self.values.validate() {
            Ok(input) => input,
            Err(errors) => {
                tracing::debug!(count = errors.len(), "Form rejected by validation");
                self.errors = errors;
                return Submission::Invalid;
            }
        };

        self.errors.clear();
        self.server_error = None;
        self.submitting = true;
        let result = operation(input).await;
        self.submitting = false;

        match &result {
            Ok(_) => self.reset(),
            Err(message) => self.server_error = Some(message.clone()),
        }
        Submission::Sent(result)
    }
}

// ═══════════════════════════════════════════
// Field checks
// ═══════════════════════════════════════════

/// Trimmed value, or a `Required` error.
pub(crate) fn required(
    field: &'static str,
    value: &str,
    errors: &mut Vec<FormError>,
) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.push(FormError::Required { field });
    }
    trimmed.to_string()
}

/// Trimmed value when non-blank.
pub(crate) fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Shape check only: `local@domain.tld`.
pub(crate) fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !email.contains(char::is_whitespace)
        && domain
            .split_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.contains('@'))
}

pub(crate) fn email(field: &'static str, value: &str, errors: &mut Vec<FormError>) -> String {
    let before = errors.len();
    let value = required(field, value, errors);
    if errors.len() == before && !is_valid_email(&value) {
        errors.push(FormError::InvalidEmail { field });
    }
    value.to_lowercase()
}

/// `YYYY-MM-DD` date.
pub(crate) fn date(field: &'static str, value: &str, errors: &mut Vec<FormError>) -> Option<NaiveDate> {
    match NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d") {
        Ok(d) => Some(d),
        Err(_) => {
            errors.push(FormError::Invalid {
                field,
                reason: "expected a date as YYYY-MM-DD".into(),
            });
            None
        }
    }
}
