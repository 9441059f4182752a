//! Small text parsers and formatters used by command handlers.

use std::time::Duration;

/// Mute length when no valid duration is given.
pub const DEFAULT_MUTE: Duration = Duration::from_secs(10 * 60);

/// Restrictions longer than this are permanent on Telegram.
pub const PERMANENT_MUTE: Duration = Duration::from_secs(366 * 86400);

/// Escape HTML special characters.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Parse a duration string (e.g. "30m", "2h", "1d").
///
/// Supported units:
/// - m: minutes
/// - h: hours
/// - d: days
pub fn parse_duration(input: &str) -> Option<Duration> {
    let input = input.trim();
    let unit = input.chars().last()?;
    let digits = &input[..input.len() - unit.len_utf8()];
    let amount: u64 = digits.parse().ok()?;

    let seconds = match unit.to_ascii_lowercase() {
        'm' => amount.checked_mul(60)?,
        'h' => amount.checked_mul(3600)?,
        'd' => amount.checked_mul(86400)?,
        _ => return None,
    };

    Some(Duration::from_secs(seconds))
}

/// Mute duration from an optional argument, falling back to
/// [`DEFAULT_MUTE`] when absent, unparseable or zero.
pub fn parse_mute_duration(input: Option<&str>) -> Duration {
    input
        .and_then(parse_duration)
        .filter(|d| !d.is_zero())
        .unwrap_or(DEFAULT_MUTE)
}

/// Format a duration in Indonesian.
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs < 60 {
        format!("{} detik", secs)
    } else if secs < 3600 {
        format!("{} menit", secs / 60)
    } else if secs < 86400 {
        let hours = secs / 3600;
        let mins = (secs % 3600) / 60;
        if mins > 0 {
            format!("{} jam {} menit", hours, mins)
        } else {
            format!("{} jam", hours)
        }
    } else {
        let days = secs / 86400;
        let hours = (secs % 86400) / 3600;
        if hours > 0 {
            format!("{} hari {} jam", days, hours)
        } else {
            format!("{} hari", days)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        assert_eq!(parse_duration("30m"), Some(Duration::from_secs(1800)));
        assert_eq!(parse_duration("2h"), Some(Duration::from_secs(7200)));
        assert_eq!(parse_duration("1d"), Some(Duration::from_secs(86400)));
        assert_eq!(parse_duration("1w"), None);
        assert_eq!(parse_duration("m"), None);
        assert_eq!(parse_duration("invalid"), None);
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("5é"), None);
    }

    #[test]
    fn test_mute_duration_defaults_to_ten_minutes() {
        assert_eq!(parse_mute_duration(None), DEFAULT_MUTE);
        assert_eq!(parse_mute_duration(Some("soon")), DEFAULT_MUTE);
        assert_eq!(parse_mute_duration(Some("0m")), DEFAULT_MUTE);
        assert_eq!(parse_mute_duration(Some("45m")), Duration::from_secs(2700));
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_secs(600)), "10 menit");
        assert_eq!(format_duration(Duration::from_secs(5400)), "1 jam 30 menit");
        assert_eq!(format_duration(Duration::from_secs(86400)), "1 hari");
    }

    #[test]
    fn test_html_escape() {
        assert_eq!(html_escape("<b>&</b>"), "&lt;b&gt;&amp;&lt;/b&gt;");
    }
}
