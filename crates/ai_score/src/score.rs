use std::fmt;

use common::lazy_regex;
use serde::ser::Error as _;
use serde::{Serialize, Serializer};
use serde_json::value::RawValue;

/// Why no percentage could be produced. Serialised with the strings the
/// frontend already displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AiScoreFailure {
    #[serde(rename = "API Key Missing")]
    MissingApiKey,
    #[serde(rename = "Error")]
    UpstreamError,
    #[serde(rename = "Could not parse AI score")]
    UnparsableResponse,
}

impl AiScoreFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            AiScoreFailure::MissingApiKey => "missing_api_key",
            AiScoreFailure::UpstreamError => "upstream_error",
            AiScoreFailure::UnparsableResponse => "unparsable_response",
        }
    }
}

/// Non-negative integer of any size, kept as canonical ASCII decimal digits
/// and written to JSON as a bare number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Percentage(String);

impl Percentage {
    fn from_digits(digits: String) -> Self {
        let trimmed = digits.trim_start_matches('0');
        if trimmed.is_empty() {
            Self("0".to_string())
        } else if trimmed.len() == digits.len() {
            Self(digits)
        } else {
            Self(trimmed.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `None` when the value does not fit in a `u64`.
    pub fn as_u64(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl From<u64> for Percentage {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Percentage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        RawValue::from_string(self.0.clone())
            .map_err(S::Error::custom)?
            .serialize(serializer)
    }
}

/// Either a percentage or a sentinel; both serialise as a bare JSON value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum AiScore {
    Percentage(Percentage),
    Unavailable(AiScoreFailure),
}

impl AiScore {
    pub fn percentage(value: u64) -> Self {
        AiScore::Percentage(value.into())
    }

    pub fn outcome(&self) -> &'static str {
        match self {
            AiScore::Percentage(_) => "ok",
            AiScore::Unavailable(failure) => failure.as_str(),
        }
    }
}

/// First run of decimal digits in `content`, in any script. Not clamped and
/// not bounded: every run yields a number.
pub fn extract_percentage(content: &str) -> Option<Percentage> {
    lazy_regex!(DIGITS_RE = r"\d+");
    let run = DIGITS_RE.find(content)?.as_str();
    let digits = run
        .chars()
        .map(|c| char::from(b'0' + decimal_value(c)))
        .collect();
    Some(Percentage::from_digits(digits))
}

// Unicode encodes each decimal digit set as ten consecutive code points
// starting at zero, and adjacent sets are whole sets.
fn decimal_value(c: char) -> u8 {
    if let Some(value) = c.to_digit(10) {
        return value as u8;
    }
    let mut offset = 0u32;
    let mut code = c as u32;
    while let Some(prev) = code.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        offset += 1;
        code -= 1;
    }
    (offset % 10) as u8
}

fn is_decimal_digit(c: char) -> bool {
    lazy_regex!(DIGIT_RE = r"^\d$");
    let mut buf = [0u8; 4];
    DIGIT_RE.is_match(c.encode_utf8(&mut buf))
}
