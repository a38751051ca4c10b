//! Client-side derivations over already-fetched appointment lists:
//! filtering for the dashboards and summary counts.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::{AppointmentRecord, AppointmentStatus};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppointmentFilter {
    pub status: Option<AppointmentStatus>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub doctor_id: Option<String>,
    /// Case-insensitive match on doctor name, patient name, day or date.
    pub search: Option<String>,
}

impl AppointmentFilter {
    pub fn matches(&self, record: &AppointmentRecord) -> bool {
        if self.status.is_some_and(|s| s != record.status) {
            return false;
        }
        if let Some(doctor_id) = &self.doctor_id {
            if record.doctor_id() != Some(doctor_id.as_str()) {
                return false;
            }
        }
        // Records with an unreadable date fall out of any date-bounded view.
        if self.date_from.is_some() || self.date_to.is_some() {
            let Some(date) = record.date_value() else {
                return false;
            };
            if self.date_from.is_some_and(|from| date < from)
                || self.date_to.is_some_and(|to| date > to)
            {
                return false;
            }
        }
        match self.search.as_deref().map(str::trim) {
            Some(needle) if !needle.is_empty() => search_matches(record, &needle.to_lowercase()),
            _ => true,
        }
    }
}

fn search_matches(record: &AppointmentRecord, needle: &str) -> bool {
    let names = [
        record.doctor.as_ref().and_then(|d| d.name()),
        record.patient.as_ref().and_then(|p| p.name()),
        record.day.as_deref(),
        Some(record.date.as_str()),
    ];
    names
        .into_iter()
        .flatten()
        .any(|field| field.to_lowercase().contains(needle))
}

/// Records matching `filter`, in their original order.
pub fn filter_appointments<'a>(
    records: &'a [AppointmentRecord],
    filter: &AppointmentFilter,
) -> Vec<&'a AppointmentRecord> {
    records.iter().filter(|r| filter.matches(r)).collect()
}

/// Open visits from `today` on, soonest first.
pub fn upcoming(records: &[AppointmentRecord], today: NaiveDate) -> Vec<&AppointmentRecord> {
    let mut list: Vec<&AppointmentRecord> = records
        .iter()
        .filter(|r| !r.status.is_terminal())
        .filter(|r| r.date_value().is_some_and(|d| d >= today))
        .collect();
    // Unreadable start times sort last within their day.
    list.sort_by_key(|r| {
        let start = r.start_value();
        (r.date_value(), start.is_none(), start)
    });
    list
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct AppointmentStats {
    pub total: usize,
    pub booked: usize,
    pub checked_in: usize,
    pub completed: usize,
    pub cancelled: usize,
    /// Any status, dated today.
    pub today: usize,
    pub upcoming: usize,
}

pub fn compute_stats(records: &[AppointmentRecord], today: NaiveDate) -> AppointmentStats {
    let mut stats = AppointmentStats {
        total: records.len(),
        upcoming: upcoming(records, today).len(),
        ..Default::default()
    };
    for record in records {
        match record.status {
            AppointmentStatus::Booked => stats.booked += 1,
            AppointmentStatus::CheckedIn => stats.checked_in += 1,
            AppointmentStatus::Completed => stats.completed += 1,
            AppointmentStatus::Cancelled => stats.cancelled += 1,
        }
        if record.date_value() == Some(today) {
            stats.today += 1;
        }
    }
    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{PartyRef, PartySummary};

    fn day(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn record(id: &str, date: &str, start: &str, status: AppointmentStatus) -> AppointmentRecord {
        AppointmentRecord {
            id: id.into(),
            status,
            date: date.into(),
            start_time: start.into(),
            ..Default::default()
        }
    }

    fn sample() -> Vec<AppointmentRecord> {
        let mut a1 = record("A1", "2024-06-01", "10:00", AppointmentStatus::Booked);
        a1.doctor = Some(PartyRef::Populated(PartySummary {
            id: "D1".into(),
            name: Some("Dr. Bello".into()),
            ..Default::default()
        }));
        a1.patient = Some(PartyRef::Populated(PartySummary {
            id: "P1".into(),
            name: Some("Tola Ade".into()),
            ..Default::default()
        }));
        let mut a2 = record("A2", "2024-06-01T00:00:00.000Z", "09:00", AppointmentStatus::CheckedIn);
        a2.doctor = Some(PartyRef::Id("D2".into()));
        vec![
            a1,
            a2,
            record("A3", "2024-05-20", "11:00", AppointmentStatus::Completed),
            record("A4", "2024-06-03", "08:00", AppointmentStatus::Cancelled),
            record("A5", "2024-06-02", "08:30", AppointmentStatus::Booked),
            record("A6", "not a date", "08:30", AppointmentStatus::Booked),
        ]
    }

    fn ids(list: Vec<&AppointmentRecord>) -> Vec<&str> {
        list.into_iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn empty_filter_keeps_everything() {
        let list = sample();
        assert_eq!(filter_appointments(&list, &AppointmentFilter::default()).len(), 6);
    }

    #[test]
    fn filter_by_status_and_doctor() {
        let list = sample();
        let filter = AppointmentFilter {
            status: Some(AppointmentStatus::Booked),
            doctor_id: Some("D1".into()),
            ..Default::default()
        };
        assert_eq!(ids(filter_appointments(&list, &filter)), vec!["A1"]);
    }

    #[test]
    fn date_range_is_inclusive_and_drops_bad_dates() {
        let list = sample();
        let filter = AppointmentFilter {
            date_from: Some(day("2024-06-01")),
            date_to: Some(day("2024-06-02")),
            ..Default::default()
        };
        assert_eq!(ids(filter_appointments(&list, &filter)), vec!["A1", "A2", "A5"]);
    }

    #[test]
    fn search_is_case_insensitive() {
        let list = sample();
        let filter = AppointmentFilter {
            search: Some("  bello ".into()),
            ..Default::default()
        };
        assert_eq!(ids(filter_appointments(&list, &filter)), vec!["A1"]);

        let filter = AppointmentFilter {
            search: Some("tola".into()),
            ..Default::default()
        };
        assert_eq!(ids(filter_appointments(&list, &filter)), vec!["A1"]);
    }

    #[test]
    fn upcoming_sorted_by_date_then_time() {
        let list = sample();
        assert_eq!(ids(upcoming(&list, day("2024-06-01"))), vec!["A2", "A1", "A5"]);
    }

    #[test]
    fn upcoming_orders_times_by_clock_not_text() {
        let list = vec![
            record("late", "2024-06-01", "10:00", AppointmentStatus::Booked),
            record("early", "2024-06-01", "9:00", AppointmentStatus::Booked),
            record("unknown", "2024-06-01", "", AppointmentStatus::Booked),
            record("evening", "2024-06-01", "4:15 PM", AppointmentStatus::Booked),
        ];
        assert_eq!(
            ids(upcoming(&list, day("2024-06-01"))),
            vec!["early", "late", "evening", "unknown"]
        );
    }

    #[test]
    fn stats_count_each_status() {
        let stats = compute_stats(&sample(), day("2024-06-01"));
        assert_eq!(
            stats,
            AppointmentStats {
                total: 6,
                booked: 3,
                checked_in: 1,
                completed: 1,
                cancelled: 1,
                today: 2,
                upcoming: 3,
            }
        );
        assert_eq!(compute_stats(&[], day("2024-06-01")), AppointmentStats::default());
    }
}
