//! Profile completion form, sent as multipart with an optional photo.

use super::{date, optional, required, Form, FormError};
use crate::api::{FilePart, MultipartBody};
use crate::models::UserProfile;

pub const GENDERS: &[&str] = &["male", "female", "other"];

/// Largest accepted profile photo.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdate {
    pub name: String,
    pub phone: String,
    pub gender: String,
    pub dob: String,
    pub address: String,
    pub image: Option<FilePart>,
}

impl ProfileUpdate {
    pub fn into_multipart(self) -> MultipartBody {
        MultipartBody {
            fields: vec![
                ("name".into(), self.name),
                ("phone".into(), self.phone),
                ("gender".into(), self.gender),
                ("dob".into(), self.dob),
                ("address".into(), self.address),
            ],
            file: self.image,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileForm {
    pub name: String,
    pub phone: String,
    pub gender: String,
    pub dob: String,
    pub address: String,
    pub image: Option<FilePart>,
}

impl ProfileForm {
    /// Prefill from the session user.
    pub fn from_user(user: &UserProfile) -> Self {
        Self {
            name: user.display_name().to_string(),
            phone: user.phone.clone().unwrap_or_default(),
            gender: user.gender.clone().unwrap_or_default(),
            dob: user.dob.clone().unwrap_or_default(),
            address: user.address.clone().unwrap_or_default(),
            image: None,
        }
    }

    pub fn attach_image(&mut self, file_name: &str, mime: &str, bytes: Vec<u8>) {
        self.image = Some(FilePart {
            field: "image".into(),
            file_name: file_name.into(),
            mime: mime.into(),
            bytes,
        });
    }
}

impl Form for ProfileForm {
    type Output = ProfileUpdate;

    fn validate(&self) -> Result<ProfileUpdate, Vec<FormError>> {
        let mut errors = Vec::new();
        let name = required("name", &self.name, &mut errors);
        let phone = required("phone", &self.phone, &mut errors);
        let address = required("address", &self.address, &mut errors);

        let gender = self.gender.trim().to_lowercase();
        if gender.is_empty() {
            errors.push(FormError::Required { field: "gender" });
        } else if !GENDERS.contains(&gender.as_str()) {
            errors.push(FormError::Invalid {
                field: "gender",
                reason: format!("expected one of {}", GENDERS.join(", ")),
            });
        }

        let dob = match optional(&self.dob) {
            None => {
                errors.push(FormError::Required { field: "dob" });
                String::new()
            }
            Some(raw) => match date("dob", &raw, &mut errors) {
                Some(d) if d > chrono::Local::now().date_naive() => {
                    errors.push(FormError::Invalid {
                        field: "dob",
                        reason: "cannot be in the future".into(),
                    });
                    raw
                }
                _ => raw,
            },
        };

        if let Some(image) = &self.image {
            if !image.mime.starts_with("image/") {
                errors.push(FormError::Invalid {
                    field: "image",
                    reason: format!("unsupported file type {}", image.mime),
                });
            } else if image.bytes.len() > MAX_IMAGE_BYTES {
                errors.push(FormError::Invalid {
                    field: "image",
                    reason: "file is larger than 5 MB".into(),
                });
            }
        }

        if errors.is_empty() {
            Ok(ProfileUpdate {
                name,
                phone,
                gender,
                dob,
                address,
                image: self.image.clone(),
            })
        } else {
            Err(errors)
        }
    }
}
