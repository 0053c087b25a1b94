use serde::{Deserialize, Serialize};
use std::fmt;

/// Duty status of a worker.
///
/// Wire/DB strings: `off-duty`, `active`, `on-break`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WorkerStatus {
    #[default]
    OffDuty,
    Active,
    OnBreak,
}

impl WorkerStatus {
    pub const ALL: [WorkerStatus; 3] = [
        WorkerStatus::OffDuty,
        WorkerStatus::Active,
        WorkerStatus::OnBreak,
    ];

    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            WorkerStatus::OffDuty => "off-duty",
            WorkerStatus::Active => "active",
            WorkerStatus::OnBreak => "on-break",
        }
    }

    /// Strict parse (DB string or CLI input, case-insensitive).
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "off-duty" => Some(WorkerStatus::OffDuty),
            "active" => Some(WorkerStatus::Active),
            "on-break" => Some(WorkerStatus::OnBreak),
            _ => None,
        }
    }

    /// Boundary normalization: absent or unknown values are off-duty.
    pub fn normalize(raw: Option<&str>) -> Self {
        raw.and_then(Self::from_db_str).unwrap_or_default()
    }

    pub fn label(&self) -> &'static str {
        match self {
            WorkerStatus::OffDuty => "Off Duty",
            WorkerStatus::Active => "Active",
            WorkerStatus::OnBreak => "On Break",
        }
    }

    pub fn is_on_duty(&self) -> bool {
        !matches!(self, WorkerStatus::OffDuty)
    }
}

impl fmt::Display for WorkerStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}
