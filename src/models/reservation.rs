use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub service_id: i64,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub user_name: String,
    pub user_phone: String,
    pub status: ReservationStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Reservation {
    /// Read-time projection for the staff list: a confirmed reservation whose
    /// window contains `now` displays as "in_progress". Never persisted.
    pub fn display_status(&self, now: &NaiveDateTime) -> &'static str {
        if self.status == ReservationStatus::Confirmed
            && now.date() == self.date
            && now.time() >= self.start_time
            && now.time() < self.end_time
        {
            return "in_progress";
        }
        self.status.as_str()
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ReservationStatus {
    Pending,
    Confirmed,
    Cancelled,
    Completed,
}

impl ReservationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReservationStatus::Pending => "pending",
            ReservationStatus::Confirmed => "confirmed",
            ReservationStatus::Cancelled => "cancelled",
            ReservationStatus::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "confirmed" => ReservationStatus::Confirmed,
            "cancelled" => ReservationStatus::Cancelled,
            "completed" => ReservationStatus::Completed,
            _ => ReservationStatus::Pending,
        }
    }

    /// Statuses a staff member may move a reservation to. Pending exists in
    /// the schema but is never produced or set through the API.
    pub fn parse_transition_target(s: &str) -> Option<Self> {
        match s {
            "confirmed" => Some(ReservationStatus::Confirmed),
            "cancelled" => Some(ReservationStatus::Cancelled),
            "completed" => Some(ReservationStatus::Completed),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(status: ReservationStatus) -> Reservation {
        Reservation {
            id: 1,
            service_id: 1,
            date: NaiveDate::from_ymd_opt(2025, 6, 16).unwrap(),
            start_time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(14, 30, 0).unwrap(),
            user_name: "Alice".to_string(),
            user_phone: "+15551110000".to_string(),
            status,
            created_at: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap().and_hms_opt(9, 0, 0).unwrap(),
            updated_at: NaiveDate::from_ymd_opt(2025, 6, 1).unwrap().and_hms_opt(9, 0, 0).unwrap(),
        }
    }

    fn at(s: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
    }

    #[test]
    fn test_display_status_inside_window() {
        let r = sample(ReservationStatus::Confirmed);
        assert_eq!(r.display_status(&at("2025-06-16 14:10")), "in_progress");
        assert_eq!(r.display_status(&at("2025-06-16 14:00")), "in_progress");
    }

    #[test]
    fn test_display_status_outside_window() {
        let r = sample(ReservationStatus::Confirmed);
        assert_eq!(r.display_status(&at("2025-06-16 13:59")), "confirmed");
        assert_eq!(r.display_status(&at("2025-06-16 14:30")), "confirmed");
        assert_eq!(r.display_status(&at("2025-06-17 14:10")), "confirmed");
    }

    #[test]
    fn test_display_status_only_for_confirmed() {
        let r = sample(ReservationStatus::Completed);
        assert_eq!(r.display_status(&at("2025-06-16 14:10")), "completed");
        let r = sample(ReservationStatus::Cancelled);
        assert_eq!(r.display_status(&at("2025-06-16 14:10")), "cancelled");
    }

    #[test]
    fn test_transition_target_rejects_unknown() {
        assert!(ReservationStatus::parse_transition_target("pending").is_none());
        assert!(ReservationStatus::parse_transition_target("done").is_none());
        assert_eq!(
            ReservationStatus::parse_transition_target("completed"),
            Some(ReservationStatus::Completed)
        );
    }
}
