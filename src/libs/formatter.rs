//! Formatting of minute counts and shift shares for display.
//!
//! Durations are shown as `HH:MM`, shares of the shift with one decimal.
//!
//! ```rust
//! use mest::libs::formatter::{format_minutes, format_percent};
//!
//! assert_eq!(format_minutes(90), "01:30");
//! assert_eq!(format_percent(13.5416), "13.5%");
//! ```

pub fn format_minutes(minutes: u32) -> String {
    format!("{:02}:{:02}", minutes / 60, minutes % 60)
}

pub fn format_percent(percent: f64) -> String {
    format!("{:.1}%", percent)
}
