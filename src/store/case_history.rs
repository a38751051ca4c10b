use super::action::{apply_phase, impl_async_slice, AsyncAction, AsyncSlice};
use super::request::RequestId;
use crate::models::CaseHistoryRecord;

#[derive(Debug, Clone, PartialEq)]
pub enum CaseHistoryAction {
    ListMine(AsyncAction<Vec<CaseHistoryRecord>>),
    ClearMessages,
}

impl CaseHistoryAction {
    pub fn settles(&self) -> Option<RequestId> {
        match self {
            Self::ListMine(a) => a.settles(),
            Self::ClearMessages => None,
        }
    }
}

/// Case histories of the logged-in patient (read-only).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CaseHistoryState {
    pub records: Vec<CaseHistoryRecord>,
    pub loading: bool,
    pub error: Option<String>,
    pub success: Option<String>,
}

impl_async_slice!(CaseHistoryState);

impl CaseHistoryState {
    pub fn reduce(&mut self, action: CaseHistoryAction) {
        match action {
            CaseHistoryAction::ListMine(a) => {
                apply_phase(self, a.phase, |s, records| s.records = records)
            }
            CaseHistoryAction::ClearMessages => self.clear_messages(),
        }
    }

    /// Record written for a completed appointment (1:1).
    pub fn for_appointment(&self, appointment_id: &str) -> Option<&CaseHistoryRecord> {
        self.records
            .iter()
            .find(|r| r.appointment_id() == Some(appointment_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PartyRef;
    use crate::store::request::{OperationKind, RequestTracker};

    #[test]
    fn lookup_by_appointment() {
        let mut state = CaseHistoryState::default();
        state.reduce(CaseHistoryAction::ListMine(AsyncAction::fulfilled(
            RequestTracker::new().issue(OperationKind::ListMyCaseHistories),
            vec![CaseHistoryRecord {
                id: "C1".into(),
                appointment: Some(PartyRef::Id("A1".into())),
                diagnosis: "Typhoid".into(),
                ..Default::default()
            }],
        )));
        assert_eq!(state.for_appointment("A1").map(|r| r.diagnosis.as_str()), Some("Typhoid"));
        assert!(state.for_appointment("A2").is_none());
    }
}
