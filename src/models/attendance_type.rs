use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttendanceType {
    ClockIn,
    ClockOut,
    BreakStart,
    BreakEnd,
}

impl AttendanceType {
    /// Convert enum → DB string
    pub fn to_db_str(&self) -> &'static str {
        match self {
            AttendanceType::ClockIn => "clock-in",
            AttendanceType::ClockOut => "clock-out",
            AttendanceType::BreakStart => "break-start",
            AttendanceType::BreakEnd => "break-end",
        }
    }

    /// Convert DB string → enum
    pub fn from_db_str(s: &str) -> Option<Self> {
        match s {
            "clock-in" => Some(AttendanceType::ClockIn),
            "clock-out" => Some(AttendanceType::ClockOut),
            "break-start" => Some(AttendanceType::BreakStart),
            "break-end" => Some(AttendanceType::BreakEnd),
            _ => None,
        }
    }

    /// Past-tense label used in attendance listings.
    pub fn label(&self) -> &'static str {
        match self {
            AttendanceType::ClockIn => "Clocked In",
            AttendanceType::ClockOut => "Clocked Out",
            AttendanceType::BreakStart => "Started Break",
            AttendanceType::BreakEnd => "Ended Break",
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            AttendanceType::ClockIn => "▶",
            AttendanceType::ClockOut => "■",
            AttendanceType::BreakStart => "⏸",
            AttendanceType::BreakEnd => "⏵",
        }
    }

    /// Clock-in and break-end put the worker (back) on the clock.
    pub fn resumes_work(&self) -> bool {
        matches!(self, AttendanceType::ClockIn | AttendanceType::BreakEnd)
    }
}

impl fmt::Display for AttendanceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_db_str())
    }
}
