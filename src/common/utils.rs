//! Utility functions for cluster-group

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};
use uuid::Uuid;

/// Percent-encoding set for group ids placed in a URL path segment
const GROUP_ID_ENCODE_SET: &AsciiSet = &CONTROLS
    .add(b'/')
    .add(b'%')
    .add(b' ')
    .add(b'?')
    .add(b'#')
    .add(b'&');

/// Encode a group id for use as a single path segment
///
/// The ids `.` and `..` are left as they are and get resolved as dot
/// segments when the item URL is parsed, so verify never reaches them.
pub fn encode_group_id(group_id: &str) -> String {
    utf8_percent_encode(group_id, GROUP_ID_ENCODE_SET).to_string()
}

/// Parse duration string (e.g., "500ms", "30s", "5m", "1h")
pub fn parse_duration(s: &str) -> crate::Result<std::time::Duration> {
    let s = s.trim();
    if s.is_empty() {
        return Err(crate::Error::InvalidConfig("empty duration".into()));
    }

    let (num_str, unit) = if let Some(num) = s.strip_suffix("ms") {
        (num, "ms")
    } else {
        let split = s.len() - s.chars().last().map_or(0, char::len_utf8);
        (&s[..split], &s[split..])
    };

    let num: u64 = num_str
        .parse()
        .map_err(|_| crate::Error::InvalidConfig(format!("invalid duration: {}", s)))?;

    let duration = match unit {
        "ms" => std::time::Duration::from_millis(num),
        "s" => std::time::Duration::from_secs(num),
        "m" => std::time::Duration::from_secs(scale(num, 60, s)?),
        "h" => std::time::Duration::from_secs(scale(num, 3600, s)?),
        _ => {
            return Err(crate::Error::InvalidConfig(format!(
                "unknown duration unit: {}",
                unit
            )))
        }
    };

    Ok(duration)
}

fn scale(num: u64, factor: u64, input: &str) -> crate::Result<u64> {
    num.checked_mul(factor)
        .ok_or_else(|| crate::Error::InvalidConfig(format!("duration out of range: {}", input)))
}

/// Correlation id for one createGroup/deleteGroup invocation
pub fn generate_operation_id() -> String {
    Uuid::new_v4().to_string()
}
