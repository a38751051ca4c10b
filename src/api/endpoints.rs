//! Request builders for every backend endpoint the client consumes.

use reqwest::Method;
use serde_json::json;

use super::request::{ApiRequest, MultipartBody};
use crate::models::{BookingRequest, SlotRange, StatusUpdate};

pub const CHECK_SESSION: &str = "/api/auth/check-auth";
pub const LOGIN: &str = "/api/auth/login";
pub const REGISTER: &str = "/api/auth/register";
pub const LOGOUT: &str = "/api/auth/logout";
pub const UPDATE_PROFILE: &str = "/api/auth/update-profile";
pub const SEND_INVITE: &str = "/api/auth/send-invite";
pub const DOCTORS: &str = "/api/doctors";
pub const PATIENTS: &str = "/api/patients";
pub const BOOK_APPOINTMENT: &str = "/api/appointments/book";
pub const MY_APPOINTMENTS: &str = "/api/appointments/my";
pub const DOCTOR_APPOINTMENTS: &str = "/api/appointments/doctor";
pub const MY_CASE_HISTORIES: &str = "/api/case-history/my";

pub fn check_session() -> ApiRequest {
    ApiRequest::get(CHECK_SESSION)
}

pub fn login(email: &str, password: &str) -> ApiRequest {
    ApiRequest::post(LOGIN, json!({ "email": email, "password": password }))
}

pub fn register(name: &str, email: &str, password: &str) -> ApiRequest {
    ApiRequest::post(
        REGISTER,
        json!({ "name": name, "email": email, "password": password }),
    )
}

pub fn logout() -> ApiRequest {
    ApiRequest::new(Method::POST, LOGOUT)
}

pub fn update_profile(form: MultipartBody) -> ApiRequest {
    ApiRequest::new(Method::PUT, UPDATE_PROFILE).multipart(form)
}

pub fn send_invite(name: &str, email: &str, role: &str) -> ApiRequest {
    ApiRequest::post(
        SEND_INVITE,
        json!({ "name": name, "email": email, "role": role }),
    )
}

pub fn list_doctors() -> ApiRequest {
    ApiRequest::get(DOCTORS)
}

pub fn list_patients() -> ApiRequest {
    ApiRequest::get(PATIENTS)
}

pub fn list_my_appointments() -> ApiRequest {
    ApiRequest::get(MY_APPOINTMENTS)
}

pub fn list_doctor_appointments() -> ApiRequest {
    ApiRequest::get(DOCTOR_APPOINTMENTS)
}

pub fn available_slots(doctor_id: &str, range: SlotRange) -> ApiRequest {
    ApiRequest::get(format!("/api/appointments/slots/{doctor_id}")).query("range", range.as_str())
}

pub fn book_appointment(booking: &BookingRequest) -> ApiRequest {
    ApiRequest::post(
        BOOK_APPOINTMENT,
        json!({
            "doctorId": booking.doctor_id,
            "date": booking.date,
            "time": booking.time,
            "day": booking.day,
        }),
    )
}

pub fn update_appointment_status(appointment_id: &str, update: &StatusUpdate) -> ApiRequest {
    ApiRequest::patch(
        format!("/api/appointments/{appointment_id}/status"),
        update.to_body(),
    )
}

pub fn cancel_appointment(appointment_id: &str) -> ApiRequest {
    ApiRequest::new(Method::PATCH, format!("/api/appointments/{appointment_id}/cancel"))
}

pub fn list_my_case_histories() -> ApiRequest {
    ApiRequest::get(MY_CASE_HISTORIES)
}
