//! Login, registration and staff invite forms.

use super::{email, required, Form, FormError, MIN_PASSWORD_LEN};
use crate::models::Role;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl Form for LoginForm {
    type Output = LoginInput;

    fn validate(&self) -> Result<LoginInput, Vec<FormError>> {
        let mut errors = Vec::new();
        let email = email("email", &self.email, &mut errors);
        // Passwords are sent as typed.
        if self.password.is_empty() {
            errors.push(FormError::Required { field: "password" });
        }
        if errors.is_empty() {
            Ok(LoginInput {
                email,
                password: self.password.clone(),
            })
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegisterInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RegisterForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

impl Form for RegisterForm {
    type Output = RegisterInput;

    fn validate(&self) -> Result<RegisterInput, Vec<FormError>> {
        let mut errors = Vec::new();
        let name = required("name", &self.name, &mut errors);
        let email = email("email", &self.email, &mut errors);

        if self.password.is_empty() {
            errors.push(FormError::Required { field: "password" });
        } else if self.password.chars().count() < MIN_PASSWORD_LEN {
            errors.push(FormError::Invalid {
                field: "password",
                reason: format!("must be at least {MIN_PASSWORD_LEN} characters"),
            });
        }
        if self.confirm_password != self.password {
            errors.push(FormError::Invalid {
                field: "confirm_password",
                reason: "passwords do not match".into(),
            });
        }

        if errors.is_empty() {
            Ok(RegisterInput {
                name,
                email,
                password: self.password.clone(),
            })
        } else {
            Err(errors)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InviteInput {
    pub name: String,
    pub email: String,
    pub role: Role,
}

/// Staff-only invite of a new account. All three fields are required.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InviteForm {
    pub name: String,
    pub email: String,
    pub role: Option<Role>,
}

impl Form for InviteForm {
    type Output = InviteInput;

    fn validate(&self) -> Result<InviteInput, Vec<FormError>> {
        let mut errors = Vec::new();
        let name = required("name", &self.name, &mut errors);
        let email = email("email", &self.email, &mut errors);
        if self.role.is_none() {
            errors.push(FormError::Required { field: "role" });
        }

        match (errors.is_empty(), self.role) {
            (true, Some(role)) => Ok(InviteInput { name, email, role }),
            _ => Err(errors),
        }
    }
}
