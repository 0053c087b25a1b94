/// ANSI color helper utilities for terminal output.
pub const RESET: &str = "\x1b[0m";

pub const GREY: &str = "\x1b[90m";

pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";

pub const YELLOW: &str = "\x1b[33m";
pub const CYAN: &str = "\x1b[36m";

/// Clock-in / break-end in green, clock-out / break-start in red.
pub fn colorize_in_out(value: &str, is_start: bool) -> String {
    if value.trim().is_empty() || value.trim() == "--" {
        return format!("{GREY}{value}{RESET}");
    }

    if is_start {
        format!("{GREEN}{value}{RESET}")
    } else {
        format!("{RED}{value}{RESET}")
    }
}
