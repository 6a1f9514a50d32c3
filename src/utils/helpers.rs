//! Helper functions
//!
//! Formatting used in run summaries.
//!
//! # Example
//!
//! ```rust
//! use docloader::utils::Helpers;
//! use std::time::Duration;
//!
//! assert_eq!(Helpers::format_duration(Duration::from_millis(250)), "250ms");
//! assert_eq!(Helpers::rows_per_second(500, Duration::from_secs(2)), 250.0);
//! ```

use std::time::Duration;

/// Helper functions
pub struct Helpers;

impl Helpers {
    /// Format a duration as seconds, milliseconds or microseconds
    pub fn format_duration(duration: Duration) -> String {
        let seconds = duration.as_secs();
        let millis = duration.as_millis();

        if seconds >= 1 {
            format!("{:.2}s", duration.as_secs_f64())
        } else if millis >= 1 {
            format!("{}ms", millis)
        } else {
            format!("{}us", duration.as_micros())
        }
    }

    /// Throughput over `elapsed`; zero for an instantaneous run
    pub fn rows_per_second(rows: u64, elapsed: Duration) -> f64 {
        let secs = elapsed.as_secs_f64();
        if secs == 0.0 {
            0.0
        } else {
            rows as f64 / secs
        }
    }

    /// Format a count with thousands separators
    ///
    /// # Example
    /// ```
    /// use docloader::utils::Helpers;
    ///
    /// assert_eq!(Helpers::format_count(1234567), "1,234,567");
    /// ```
    pub fn format_count(n: u64) -> String {
        let digits = n.to_string();
        let mut out = String::with_capacity(digits.len() + digits.len() / 3);
        for (i, c) in digits.chars().enumerate() {
            if i > 0 && (digits.len() - i) % 3 == 0 {
                out.push(',');
            }
            out.push(c);
        }
        out
    }
}
