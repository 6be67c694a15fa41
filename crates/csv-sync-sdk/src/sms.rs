use serde::{Deserialize, Serialize};

/// Characters in a single SMS segment
pub const SMS_SEGMENT_LIMIT: usize = 160;

/// Longest text still considered comfortably inside one segment
pub const SMS_RECOMMENDED_LIMIT: usize = 130;

/// Advisory length band for an SMS text; never blocks an export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SmsLength {
    Ok,
    NearLimit,
    OverLimit,
}

/// Classify `text` by character count: up to 130 ok, 131-159 near, 160+ over
pub fn sms_length_status(text: &str) -> SmsLength {
    match text.chars().count() {
        n if n <= SMS_RECOMMENDED_LIMIT => SmsLength::Ok,
        n if n < SMS_SEGMENT_LIMIT => SmsLength::NearLimit,
        _ => SmsLength::OverLimit,
    }
}
