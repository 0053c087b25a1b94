//! Formatting utilities used for CLI and export outputs.

use crate::models::status::WorkerStatus;
use crate::utils::colors::{GREEN, GREY, RESET, YELLOW};

pub fn bold(s: &str) -> String {
    format!("\x1b[1m{}\x1b[0m", s)
}

/// Coloured status label (text badge).
pub fn describe_status(status: WorkerStatus) -> String {
    let color = match status {
        WorkerStatus::Active => GREEN,
        WorkerStatus::OnBreak => YELLOW,
        WorkerStatus::OffDuty => GREY,
    };
    format!("{}{}{}", color, status.label(), RESET)
}

/// Show `--` for empty optional fields.
pub fn or_dash(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v.to_string(),
        _ => "--".to_string(),
    }
}

pub fn print_separator(ch: &str, width: usize) {
    println!("{}", ch.repeat(width));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dash_for_missing_values() {
        assert_eq!(or_dash(None), "--");
        assert_eq!(or_dash(Some("  ")), "--");
        assert_eq!(or_dash(Some("Wing B")), "Wing B");
    }

    #[test]
    fn status_badge_contains_label() {
        assert!(describe_status(WorkerStatus::OnBreak).contains("On Break"));
    }
}
