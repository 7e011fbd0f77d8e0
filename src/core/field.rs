//! Field value types, the comparison policy, and format validation

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::sync::OnceLock;
use uuid::Uuid;

/// A polymorphic field value that can hold different types
///
/// Every typed record exposes its fields as `FieldValue`s so the table
/// engine can search, compare and export them without knowing the record
/// shape.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Boolean(bool),
    Uuid(Uuid),
    DateTime(DateTime<Utc>),
    Date(NaiveDate),
    Null,
}

impl FieldValue {
    /// Get the value as a string if possible
    pub fn as_string(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Get the value as an integer if possible
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// Get the value as a number (integer or float)
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            FieldValue::Integer(i) => Some(*i as f64),
            FieldValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Get the value as a UUID if possible
    pub fn as_uuid(&self) -> Option<Uuid> {
        match self {
            FieldValue::Uuid(u) => Some(*u),
            _ => None,
        }
    }

    /// Interpret the value as an instant.
    ///
    /// Dates resolve to midnight UTC. Strings are accepted when they parse
    /// as RFC 3339, `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DD`.
    pub fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::DateTime(dt) => Some(*dt),
            FieldValue::Date(d) => d.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc()),
            FieldValue::String(s) => parse_date_like(s),
            _ => None,
        }
    }

    /// Check if the value is null
    pub fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Lowercased text used by free-text search, `None` for null
    pub fn search_text(&self) -> Option<String> {
        if self.is_null() {
            None
        } else {
            Some(self.to_string().to_lowercase())
        }
    }

    /// Compare two non-null values.
    ///
    /// Numbers compare numerically, date-like values chronologically and
    /// everything else as text using [`locale_compare`]. Null handling is
    /// left to the caller because nulls sort last in both directions.
    pub fn compare(&self, other: &FieldValue) -> Ordering {
        if let (Some(a), Some(b)) = (self.as_f64(), other.as_f64()) {
            return a.partial_cmp(&b).unwrap_or(Ordering::Equal);
        }

        if let (FieldValue::Boolean(a), FieldValue::Boolean(b)) = (self, other) {
            return a.cmp(b);
        }

        if let (Some(a), Some(b)) = (self.as_datetime(), other.as_datetime()) {
            return a.cmp(&b);
        }

        locale_compare(&self.to_string(), &other.to_string())
    }
}

impl fmt::Display for FieldValue {
    /// Default string form, as used by search and CSV export
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::String(s) => write!(f, "{}", s),
            FieldValue::Integer(i) => write!(f, "{}", i),
            FieldValue::Float(v) => write!(f, "{}", v),
            FieldValue::Boolean(b) => write!(f, "{}", b),
            FieldValue::Uuid(u) => write!(f, "{}", u),
            FieldValue::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            FieldValue::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
            FieldValue::Null => Ok(()),
        }
    }
}

/// Parse a date-like string into an instant
pub fn parse_date_like(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Lexicographic text ordering that ignores case and accents first.
///
/// Accented Latin letters sort with their base letter (`"école"` sits
/// between `"ecole"` and `"f"`); accents then case break ties, unaccented
/// and lowercase first: `"apple" < "banana" < "Banana"`. Letters outside
/// Latin-1 and Latin Extended-A compare by code point.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    let (lower_a, lower_b) = (a.to_lowercase(), b.to_lowercase());
    lower_a
        .chars()
        .flat_map(fold_diacritic)
        .cmp(lower_b.chars().flat_map(fold_diacritic))
        .then_with(|| lower_a.cmp(&lower_b))
        .then_with(|| b.cmp(a))
}

/// Base letters of a lowercase Latin letter with diacritics
fn fold_diacritic(c: char) -> impl Iterator<Item = char> {
    let folded: &'static [char] = match c {
        'à'..='å' | 'ā' | 'ă' | 'ą' => &['a'],
        'æ' => &['a', 'e'],
        'ç' | 'ć' | 'ĉ' | 'ċ' | 'č' => &['c'],
        'ď' | 'đ' => &['d'],
        'è'..='ë' | 'ē' | 'ĕ' | 'ė' | 'ę' | 'ě' => &['e'],
        'ĝ' | 'ğ' | 'ġ' | 'ģ' => &['g'],
        'ĥ' | 'ħ' => &['h'],
        'ì'..='ï' | 'ĩ' | 'ī' | 'ĭ' | 'į' | 'ı' => &['i'],
        'ĵ' => &['j'],
        'ķ' => &['k'],
        'ĺ' | 'ļ' | 'ľ' | 'ŀ' | 'ł' => &['l'],
        'ñ' | 'ń' | 'ņ' | 'ň' => &['n'],
        'ò'..='ö' | 'ø' | 'ō' | 'ŏ' | 'ő' => &['o'],
        'œ' => &['o', 'e'],
        'ŕ' | 'ŗ' | 'ř' => &['r'],
        'ś' | 'ŝ' | 'ş' | 'š' => &['s'],
        'ß' => &['s', 's'],
        'ţ' | 'ť' | 'ŧ' => &['t'],
        'ù'..='ü' | 'ũ' | 'ū' | 'ŭ' | 'ů' | 'ű' | 'ų' => &['u'],
        'ŵ' => &['w'],
        'ý' | 'ÿ' | 'ŷ' => &['y'],
        'ź' | 'ż' | 'ž' => &['z'],
        _ => return Folded::One(Some(c)),
    };
    Folded::Many(folded.iter().copied())
}

enum Folded {
    One(Option<char>),
    Many(std::iter::Copied<std::slice::Iter<'static, char>>),
}

impl Iterator for Folded {
    type Item = char;

    fn next(&mut self) -> Option<char> {
        match self {
            Folded::One(c) => c.take(),
            Folded::Many(chars) => chars.next(),
        }
    }
}

/// Conversion of a record member into a [`FieldValue`]
///
/// Implemented for the member types used by entity structs; the
/// `impl_record!` macro relies on it to build `Record::field_value`.
pub trait ToFieldValue {
    fn to_field_value(&self) -> FieldValue;
}

impl ToFieldValue for String {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::String(self.clone())
    }
}

impl ToFieldValue for &str {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::String((*self).to_string())
    }
}

impl ToFieldValue for i64 {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Integer(*self)
    }
}

impl ToFieldValue for i32 {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Integer(i64::from(*self))
    }
}

impl ToFieldValue for u32 {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Integer(i64::from(*self))
    }
}

impl ToFieldValue for f64 {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Float(*self)
    }
}

impl ToFieldValue for bool {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Boolean(*self)
    }
}

impl ToFieldValue for Uuid {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Uuid(*self)
    }
}

impl ToFieldValue for DateTime<Utc> {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::DateTime(*self)
    }
}

impl ToFieldValue for NaiveDate {
    fn to_field_value(&self) -> FieldValue {
        FieldValue::Date(*self)
    }
}

impl<T: ToFieldValue> ToFieldValue for Option<T> {
    fn to_field_value(&self) -> FieldValue {
        match self {
            Some(value) => value.to_field_value(),
            None => FieldValue::Null,
        }
    }
}

/// Field format validators used by client-side form validation
#[derive(Debug, Clone)]
pub enum FieldFormat {
    Email,
    Uuid,
    Phone,
    /// 17-character vehicle identification number (no I, O or Q)
    Vin,
    Custom(Regex),
}

impl FieldFormat {
    /// Validate a field value against this format
    pub fn validate(&self, value: &FieldValue) -> bool {
        let string_value = match value.as_string() {
            Some(s) => s,
            None => return false,
        };

        self.matches(string_value)
    }

    /// Validate a raw string against this format
    pub fn matches(&self, value: &str) -> bool {
        match self {
            FieldFormat::Email => Self::is_valid_email(value),
            FieldFormat::Uuid => Uuid::parse_str(value).is_ok(),
            FieldFormat::Phone => Self::is_valid_phone(value),
            FieldFormat::Vin => Self::is_valid_vin(value),
            FieldFormat::Custom(regex) => regex.is_match(value),
        }
    }

    /// Short human-readable name used in validation messages
    pub fn label(&self) -> &'static str {
        match self {
            FieldFormat::Email => "an email address",
            FieldFormat::Uuid => "a UUID",
            FieldFormat::Phone => "a phone number",
            FieldFormat::Vin => "a 17-character VIN",
            FieldFormat::Custom(_) => "the expected format",
        }
    }

    fn is_valid_email(email: &str) -> bool {
        static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = EMAIL_REGEX.get_or_init(|| {
            Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").unwrap()
        });
        regex.is_match(email)
    }

    fn is_valid_phone(phone: &str) -> bool {
        static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = PHONE_REGEX.get_or_init(|| {
            // 10 to 15 digits, optional leading +, common separators allowed
            Regex::new(r"^\+?[0-9(][0-9 ().-]{8,18}[0-9]$").unwrap()
        });
        let digits = phone.chars().filter(|c| c.is_ascii_digit()).count();
        regex.is_match(phone) && (10..=15).contains(&digits)
    }

    fn is_valid_vin(vin: &str) -> bool {
        static VIN_REGEX: OnceLock<Regex> = OnceLock::new();
        let regex = VIN_REGEX.get_or_init(|| Regex::new(r"^[A-HJ-NPR-Z0-9]{17}$").unwrap());
        regex.is_match(vin)
    }
}
