//! Human-readable text for simulated time.

const YEAR: u64 = 31_560_000;
const DAY: u64 = 86_400;
const HOUR: u64 = 3_600;
const MINUTE: u64 = 60;

/// Spells out a duration in years, days, hours, minutes and seconds.
///
/// The duration is rounded to whole seconds first. Zero units are left out
/// and a unit of exactly one is singular. Negative and non-finite inputs
/// count as zero.
///
/// ```
/// use simulations::format_duration;
///
/// assert_eq!(format_duration(90061.4), "1 day 1 hour 1 minute 1 second");
/// assert_eq!(format_duration(7200.0), "2 hours");
/// assert_eq!(format_duration(0.0), "0 seconds");
/// ```
pub fn format_duration(seconds: f64) -> String {
    let mut remaining = if seconds.is_finite() && seconds > 0.0 {
        seconds.round() as u64
    } else {
        0
    };
    if remaining == 0 {
        return "0 seconds".to_string();
    }

    let mut parts = Vec::new();
    for (size, unit) in [
        (YEAR, "year"),
        (DAY, "day"),
        (HOUR, "hour"),
        (MINUTE, "minute"),
        (1, "second"),
    ] {
        let count = remaining / size;
        remaining -= count * size;
        match count {
            0 => {}
            1 => parts.push(format!("1 {unit}")),
            n => parts.push(format!("{n} {unit}s")),
        }
    }
    parts.join(" ")
}
