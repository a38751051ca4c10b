//! Doctor's completion form: closes a visit and writes its case history.

use super::{date, optional, required, Form, FormError};
use crate::models::{CompletionDetails, StatusUpdate};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompletionForm {
    pub diagnosis: String,
    pub prescription: String,
    pub notes: String,
    pub follow_up_date: String,
}

impl Form for CompletionForm {
    type Output = StatusUpdate;

    fn validate(&self) -> Result<StatusUpdate, Vec<FormError>> {
        let mut errors = Vec::new();
        let diagnosis = required("diagnosis", &self.diagnosis, &mut errors);
        let follow_up_date = optional(&self.follow_up_date);
        if let Some(raw) = &follow_up_date {
            date("follow_up_date", raw, &mut errors);
        }

        if !errors.is_empty() {
            return Err(errors);
        }
        Ok(StatusUpdate::Completed(CompletionDetails {
            diagnosis,
            prescription: optional(&self.prescription),
            notes: optional(&self.notes),
            follow_up_date,
        }))
    }
}
