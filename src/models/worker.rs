use super::status::WorkerStatus;
use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Local, Utc};
use serde::Serialize;

pub type WorkerId = i64;

/// A janitor tracked by the system.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Worker {
    pub id: WorkerId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub shift: String,
    pub area: Option<String>,
    pub notes: Option<String>,
    pub status: WorkerStatus,
    pub last_active: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl Worker {
    /// `last_active` is display-only: rendered in local time.
    pub fn last_active_display(&self) -> String {
        self.last_active
            .map(|t| {
                t.with_timezone(&Local)
                    .format("%Y-%m-%d %H:%M:%S")
                    .to_string()
            })
            .unwrap_or_else(|| "--".to_string())
    }

    /// Case-insensitive substring match over name, email, phone and id.
    pub fn matches_term(&self, term: &str) -> bool {
        let term = term.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }

        self.name.to_lowercase().contains(&term)
            || self.email.to_lowercase().contains(&term)
            || self
                .phone
                .as_deref()
                .is_some_and(|p| p.to_lowercase().contains(&term))
            || self.id.to_string().contains(&term)
    }
}

/// Creation payload for a new worker.
#[derive(Debug, Clone, Default)]
pub struct NewWorker {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub shift: String,
    pub area: Option<String>,
    pub notes: Option<String>,
    pub status: WorkerStatus,
}

impl NewWorker {
    /// Required fields: name, email, shift.
    pub fn validate(&self) -> AppResult<()> {
        if self.name.trim().is_empty() {
            return Err(AppError::InvalidField {
                field: "name",
                reason: "must not be empty".into(),
            });
        }
        if !self.email.contains('@') {
            return Err(AppError::InvalidField {
                field: "email",
                reason: format!("'{}' is not an e-mail address", self.email),
            });
        }
        if self.shift.trim().is_empty() {
            return Err(AppError::InvalidField {
                field: "shift",
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }
}

/// Edit payload: every field is optional, status is never edited here.
#[derive(Debug, Clone, Default)]
pub struct WorkerUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub shift: Option<String>,
    pub area: Option<String>,
    pub notes: Option<String>,
}

impl WorkerUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.phone.is_none()
            && self.shift.is_none()
            && self.area.is_none()
            && self.notes.is_none()
    }

    /// Apply the update onto a snapshot, validating the resulting record.
    pub fn apply_to(&self, worker: &mut Worker) -> AppResult<()> {
        if let Some(name) = &self.name {
            worker.name = name.clone();
        }
        if let Some(email) = &self.email {
            worker.email = email.clone();
        }
        if let Some(phone) = &self.phone {
            worker.phone = Some(phone.clone());
        }
        if let Some(shift) = &self.shift {
            worker.shift = shift.clone();
        }
        if let Some(area) = &self.area {
            worker.area = Some(area.clone());
        }
        if let Some(notes) = &self.notes {
            worker.notes = Some(notes.clone());
        }

        NewWorker {
            name: worker.name.clone(),
            email: worker.email.clone(),
            shift: worker.shift.clone(),
            ..Default::default()
        }
        .validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Worker {
        Worker {
            id: 42,
            name: "Maria Santos".into(),
            email: "maria@campus.edu".into(),
            phone: Some("555-0142".into()),
            shift: "morning".into(),
            area: Some("Building A".into()),
            notes: None,
            status: WorkerStatus::OffDuty,
            last_active: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn search_term_matches_any_contact_field() {
        let w = sample();
        assert!(w.matches_term("MARIA"));
        assert!(w.matches_term("campus.edu"));
        assert!(w.matches_term("0142"));
        assert!(w.matches_term("42"));
        assert!(w.matches_term("  "));
        assert!(!w.matches_term("john"));
    }

    #[test]
    fn new_worker_requires_name_email_and_shift() {
        let mut nw = NewWorker {
            name: "Ana".into(),
            email: "ana@x.org".into(),
            shift: "night".into(),
            ..Default::default()
        };
        assert!(nw.validate().is_ok());

        nw.email = "not-an-email".into();
        assert!(matches!(
            nw.validate(),
            Err(AppError::InvalidField { field: "email", .. })
        ));

        nw.email = "ana@x.org".into();
        nw.shift = " ".into();
        assert!(matches!(
            nw.validate(),
            Err(AppError::InvalidField { field: "shift", .. })
        ));
    }

    #[test]
    fn update_keeps_status_untouched() {
        let mut w = sample();
        w.status = WorkerStatus::OnBreak;
        let upd = WorkerUpdate {
            area: Some("Gym".into()),
            ..Default::default()
        };
        upd.apply_to(&mut w).unwrap();
        assert_eq!(w.area.as_deref(), Some("Gym"));
        assert_eq!(w.status, WorkerStatus::OnBreak);
    }
}
