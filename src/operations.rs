//! Async operations: one API call each, reported into the store as
//! pending → fulfilled / rejected.
//!
//! Every operation returns `Result<payload, String>` to the caller as well,
//! so UI code can react (close a modal, navigate) without re-reading state.
//! The `Err` string is the same normalized message stored in the slice.

use std::sync::Arc;

use serde_json::Value;

use crate::api::{self, endpoints, normalize_error, ApiError, ApiRequest, ApiTransport};
use crate::forms::{InviteInput, LoginInput, ProfileUpdate, RegisterInput};
use crate::models::{
    AppointmentRecord, AppointmentStatus, BookingRequest, CaseHistoryRecord, DoctorProfile,
    offers_slot, PartyRef, PatientProfile, SlotOffer, SlotRange, StatusUpdate, Transition,
    UserProfile,
};
use crate::store::{
    Action, AppointmentAction, AsyncAction, AuthAction, CaseHistoryAction, DashboardAction,
    LoginPayload, OperationKind, SlotsPayload, StatusChange, Store,
};

pub type OpResult<T> = Result<T, String>;

pub struct Operations<A> {
    api: Arc<A>,
    store: Arc<Store>,
}

impl<A> Clone for Operations<A> {
    fn clone(&self) -> Self {
        Self {
            api: Arc::clone(&self.api),
            store: Arc::clone(&self.store),
        }
    }
}

impl<A: ApiTransport> Operations<A> {
    pub fn new(api: Arc<A>, store: Arc<Store>) -> Self {
        Self { api, store }
    }

    pub fn store(&self) -> &Arc<Store> {
        &self.store
    }

    pub fn api(&self) -> &Arc<A> {
        &self.api
    }

    /// Shared body of every operation.
    async fn run<T, W, D>(
        &self,
        kind: OperationKind,
        request: ApiRequest,
        wrap: W,
        decode: D,
    ) -> OpResult<T>
    where
        T: Clone,
        W: Fn(AsyncAction<T>) -> Action,
        D: FnOnce(Value) -> Result<T, ApiError>,
    {
        let id = self.store.begin(kind);
        self.store.dispatch(wrap(AsyncAction::pending(id)));

        match self.api.send(request).await.and_then(decode) {
            Ok(payload) => {
                self.store
                    .dispatch(wrap(AsyncAction::fulfilled(id, payload.clone())));
                Ok(payload)
            }
            Err(e) => {
                let message = normalize_error(&e, kind.fallback_message());
                tracing::warn!(operation = %kind, error = %e, "Operation rejected");
                self.store
                    .dispatch(wrap(AsyncAction::rejected(id, message.clone())));
                Err(message)
            }
        }
    }

    /// Reject an operation without sending it: the appointment has no id
    /// to address.
    fn reject_unsent<T, W>(&self, kind: OperationKind, wrap: W) -> String
    where
        W: Fn(AsyncAction<T>) -> Action,
    {
        let id = self.store.begin(kind);
        let message = normalize_error(
            &ApiError::Client("appointment has no id".into()),
            kind.fallback_message(),
        );
        tracing::warn!(operation = %kind, "Operation needs an appointment id");
        self.store
            .dispatch(wrap(AsyncAction::rejected(id, message.clone())));
        message
    }

    // ── Auth ────────────────────────────────────────────────

    pub async fn check_session(&self) -> OpResult<UserProfile> {
        self.run(
            OperationKind::CheckSession,
            endpoints::check_session(),
            |a| Action::Auth(AuthAction::CheckSession(a)),
            |body| {
                decode_user(body)?
                    .ok_or_else(|| ApiError::Decode("user: no user in session response".into()))
            },
        )
        .await
    }

    pub async fn login(&self, input: &LoginInput) -> OpResult<LoginPayload> {
        let result = self
            .run(
                OperationKind::Login,
                endpoints::login(&input.email, &input.password),
                |a| Action::Auth(AuthAction::Login(a)),
                decode_login,
            )
            .await;
        if result.is_ok() {
            tracing::info!("Login accepted");
        }
        result
    }

    pub async fn register(&self, input: &RegisterInput) -> OpResult<String> {
        self.run(
            OperationKind::Register,
            endpoints::register(&input.name, &input.email, &input.password),
            |a| Action::Auth(AuthAction::Register(a)),
            |body| {
                Ok(api::response_message(&body)
                    .unwrap_or_else(|| "Registration successful".to_string()))
            },
        )
        .await
    }

    pub async fn logout(&self) -> OpResult<()> {
        let result = self
            .run(
                OperationKind::Logout,
                endpoints::logout(),
                |a| Action::Auth(AuthAction::Logout(a)),
                |_| Ok(()),
            )
            .await;
        if result.is_ok() {
            tracing::info!("Logged out");
        }
        result
    }

    /// `Ok(None)` when the backend accepts the update without echoing the
    /// user; the session user is then left as it was.
    pub async fn update_profile(&self, update: ProfileUpdate) -> OpResult<Option<UserProfile>> {
        self.run(
            OperationKind::UpdateProfile,
            endpoints::update_profile(update.into_multipart()),
            |a| Action::Auth(AuthAction::UpdateProfile(a)),
            decode_user,
        )
        .await
    }

    pub async fn send_invite(&self, input: &InviteInput) -> OpResult<String> {
        self.run(
            OperationKind::SendInvite,
            endpoints::send_invite(&input.name, &input.email, input.role.as_str()),
            |a| Action::Auth(AuthAction::SendInvite(a)),
            |body| {
                Ok(api::response_message(&body)
                    .unwrap_or_else(|| "Invitation sent".to_string()))
            },
        )
        .await
    }

    // ── Directory ───────────────────────────────────────────

    pub async fn list_doctors(&self) -> OpResult<Vec<DoctorProfile>> {
        self.run(
            OperationKind::ListDoctors,
            endpoints::list_doctors(),
            |a| Action::Dashboard(DashboardAction::ListDoctors(a)),
            |body| api::unwrap_envelope(body, "doctors"),
        )
        .await
    }

    pub async fn list_patients(&self) -> OpResult<Vec<PatientProfile>> {
        self.run(
            OperationKind::ListPatients,
            endpoints::list_patients(),
            |a| Action::Dashboard(DashboardAction::ListPatients(a)),
            |body| api::unwrap_envelope(body, "patients"),
        )
        .await
    }

    // ── Appointments ────────────────────────────────────────

    pub async fn list_my_appointments(&self) -> OpResult<Vec<AppointmentRecord>> {
        self.run(
            OperationKind::ListMyAppointments,
            endpoints::list_my_appointments(),
            |a| Action::Appointment(AppointmentAction::ListMine(a)),
            |body| api::unwrap_envelope(body, "appointments"),
        )
        .await
    }

    pub async fn list_doctor_appointments(&self) -> OpResult<Vec<AppointmentRecord>> {
        self.run(
            OperationKind::ListDoctorAppointments,
            endpoints::list_doctor_appointments(),
            |a| Action::Appointment(AppointmentAction::ListForDoctor(a)),
            |body| api::unwrap_envelope(body, "appointments"),
        )
        .await
    }

    pub async fn fetch_available_slots(
        &self,
        doctor_id: &str,
        range: SlotRange,
    ) -> OpResult<SlotsPayload> {
        self.run(
            OperationKind::FetchAvailableSlots,
            endpoints::available_slots(doctor_id, range),
            |a| Action::Appointment(AppointmentAction::FetchSlots(a)),
            |body| {
                let offers: Vec<SlotOffer> = api::unwrap_envelope(body, "slots")?;
                Ok(SlotsPayload {
                    doctor_id: doctor_id.to_string(),
                    range,
                    offers,
                })
            },
        )
        .await
    }

    /// Book a slot. When the backend only acknowledges the booking, the
    /// locally built record has no id; the patient's list is then refetched
    /// so later status changes target real records.
    pub async fn book_appointment(&self, booking: &BookingRequest) -> OpResult<AppointmentRecord> {
        let offered = self.store.select(|s| {
            match &s.appointment.slots_query {
                Some((doctor_id, _)) if doctor_id == &booking.doctor_id => {
                    Some(offers_slot(&s.appointment.slots, &booking.date, &booking.time))
                }
                _ => None,
            }
        });
        if offered == Some(false) {
            tracing::warn!(
                doctor_id = %booking.doctor_id,
                date = %booking.date,
                time = %booking.time,
                "Booking a slot the loaded offer does not list"
            );
        }

        let record = self
            .run(
                OperationKind::BookAppointment,
                endpoints::book_appointment(booking),
                |a| Action::Appointment(AppointmentAction::Book(a)),
                |body| decode_booking(body, booking),
            )
            .await?;

        if record.id.is_empty() {
            tracing::info!("Booking acknowledged without an id, refreshing appointments");
            if let Err(e) = self.list_my_appointments().await {
                tracing::warn!(error = %e, "Appointment refresh after booking failed");
            }
        }
        Ok(record)
    }

    /// Send a status change. Backward moves are allowed (staff corrections)
    /// and logged.
    pub async fn update_appointment_status(
        &self,
        appointment_id: &str,
        update: &StatusUpdate,
    ) -> OpResult<StatusChange> {
        let target = update.tag().target_status();
        if appointment_id.trim().is_empty() {
            return Err(self.reject_unsent(
                OperationKind::UpdateAppointmentStatus,
                |a| Action::Appointment(AppointmentAction::UpdateStatus(a)),
            ));
        }
        let current = self.store.select(|s| {
            s.appointment
                .appointment(appointment_id)
                .map(|a| a.status)
        });
        if let Some(current) = current {
            match current.transition(target) {
                Transition::Forward => {}
                Transition::Unchanged => tracing::debug!(
                    appointment_id,
                    status = %target,
                    "Status update repeats the current status"
                ),
                Transition::Correction | Transition::FromCancelled => tracing::warn!(
                    appointment_id,
                    from = %current,
                    to = %target,
                    "Status update moves appointment backwards"
                ),
            }
        }

        self.run(
            OperationKind::UpdateAppointmentStatus,
            endpoints::update_appointment_status(appointment_id, update),
            |a| Action::Appointment(AppointmentAction::UpdateStatus(a)),
            |body| Ok(decode_status_change(&body, appointment_id, target)),
        )
        .await
    }

    pub async fn cancel_appointment(&self, appointment_id: &str) -> OpResult<StatusChange> {
        if appointment_id.trim().is_empty() {
            return Err(self.reject_unsent(OperationKind::CancelAppointment, |a| {
                Action::Appointment(AppointmentAction::Cancel(a))
            }));
        }
        self.run(
            OperationKind::CancelAppointment,
            endpoints::cancel_appointment(appointment_id),
            |a| Action::Appointment(AppointmentAction::Cancel(a)),
            |body| {
                Ok(decode_status_change(
                    &body,
                    appointment_id,
                    AppointmentStatus::Cancelled,
                ))
            },
        )
        .await
    }

    // ── Case history ────────────────────────────────────────

    pub async fn list_my_case_histories(&self) -> OpResult<Vec<CaseHistoryRecord>> {
        self.run(
            OperationKind::ListMyCaseHistories,
            endpoints::list_my_case_histories(),
            |a| Action::CaseHistory(CaseHistoryAction::ListMine(a)),
            |body| api::unwrap_envelope(body, "caseHistories"),
        )
        .await
    }
}

fn decode_login(body: Value) -> Result<LoginPayload, ApiError> {
    let message = api::response_message(&body);
    let user = decode_user(body)?;
    Ok(LoginPayload { user, message })
}

/// The user in a session or profile response: `{"user": {...}}` or a bare
/// user object. Only an object with a non-empty `_id` (or `id`) counts as a
/// user; anything else is `None`.
fn decode_user(body: Value) -> Result<Option<UserProfile>, ApiError> {
    let candidate = match body {
        Value::Object(mut map) if map.contains_key("user") => {
            map.remove("user").unwrap_or(Value::Null)
        }
        other => other,
    };
    let has_id = ["_id", "id"].iter().any(|key| {
        candidate
            .get(key)
            .and_then(Value::as_str)
            .is_some_and(|id| !id.trim().is_empty())
    });
    if !has_id {
        return Ok(None);
    }
    serde_json::from_value(candidate)
        .map(Some)
        .map_err(|e| ApiError::Decode(format!("user: {e}")))
}

/// The created appointment: wrapped, bare, or (when the backend only
/// acknowledges) rebuilt from the booking request with default status.
fn decode_booking(body: Value, booking: &BookingRequest) -> Result<AppointmentRecord, ApiError> {
    if body.get("appointment").is_some() {
        return api::unwrap_envelope(body, "appointment");
    }
    if body.get("_id").is_some() {
        return serde_json::from_value(body).map_err(|e| ApiError::Decode(e.to_string()));
    }

    let (start, end) = booking
        .time_bounds()
        .unwrap_or((booking.time.as_str(), ""));
    Ok(AppointmentRecord {
        date: booking.date.clone(),
        start_time: start.to_string(),
        end_time: end.to_string(),
        day: Some(booking.day.clone()),
        doctor: Some(PartyRef::Id(booking.doctor_id.clone())),
        ..Default::default()
    })
}

/// Status reported back by the backend, else the requested one.
fn decode_status_change(
    body: &Value,
    appointment_id: &str,
    requested: AppointmentStatus,
) -> StatusChange {
    let reported = body
        .get("appointment")
        .and_then(|a| a.get("status"))
        .and_then(Value::as_str)
        .and_then(|s| s.parse().ok());
    StatusChange {
        appointment_id: appointment_id.to_string(),
        status: reported.unwrap_or(requested),
    }
}
