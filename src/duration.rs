use std::fmt;
use thiserror::Error;

pub const SENTINEL: &str = "Please enter a valid number of seconds.";

const SECS_PER_DAY: u64 = 86400;
const SECS_PER_HOUR: u64 = 3600;
const SECS_PER_MIN: u64 = 60;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("Please enter a valid number of seconds.")]
pub struct InvalidDurationInput;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DurationBreakdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl DurationBreakdown {
    pub fn from_secs(total: u64) -> Self {
        let days = total / SECS_PER_DAY;
        let rem = total % SECS_PER_DAY;
        let hours = rem / SECS_PER_HOUR;
        let rem = rem % SECS_PER_HOUR;

        Self {
            days,
            hours,
            minutes: rem / SECS_PER_MIN,
            seconds: rem % SECS_PER_MIN,
        }
    }

    pub fn total_secs(&self) -> u64 {
        self.days * SECS_PER_DAY
            + self.hours * SECS_PER_HOUR
            + self.minutes * SECS_PER_MIN
            + self.seconds
    }
}

/// `day` and `hour` pluralize; `min` and `sec` are abbreviations and stay fixed,
/// so 59 seconds reads "59 sec" rather than "59 secs".
impl fmt::Display for DurationBreakdown {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = |v: u64| if v == 1 { "" } else { "s" };

        let mut parts = Vec::new();
        if self.days > 0 {
            parts.push(format!("{} day{}", self.days, plural(self.days)));
        }
        if self.hours > 0 {
            parts.push(format!("{} hour{}", self.hours, plural(self.hours)));
        }
        if self.minutes > 0 {
            parts.push(format!("{} min", self.minutes));
        }
        if self.seconds > 0 || parts.is_empty() {
            parts.push(format!("{} sec", self.seconds));
        }

        write!(f, "{}", parts.join(" "))
    }
}

/// Reads a leading base-10 integer the lenient way: leading whitespace and an
/// optional sign are accepted, and everything after the digit run is ignored,
/// so `"10.9"` reads as 10.
pub fn parse_seconds(input: &str) -> Result<u64, InvalidDurationInput> {
    let s = input.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let digits = &rest[..digits_end];
    if digits.is_empty() {
        return Err(InvalidDurationInput);
    }

    let n: u64 = digits.parse().map_err(|_| InvalidDurationInput)?;
    if negative && n != 0 {
        return Err(InvalidDurationInput);
    }
    Ok(n)
}

/// Formats any textual or numeric input as "X days Y hours Z min W sec".
/// Invalid input never fails; it yields [`SENTINEL`].
pub fn format_duration<T: fmt::Display>(input: T) -> String {
    match parse_seconds(&input.to_string()) {
        Ok(n) => {
            let breakdown = DurationBreakdown::from_secs(n);
            debug_assert_eq!(breakdown.total_secs(), n);
            breakdown.to_string()
        }
        Err(e) => e.to_string(),
    }
}

pub fn is_sentinel(text: &str) -> bool {
    text == SENTINEL
}
