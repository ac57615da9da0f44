//! Custom serde helpers for the PATS API's quirky serialization formats.
//!
//! PATS wants dates as `YYYY-MM-DD` strings, counts and booleans stringified
//! inside line items, and controlled-list values wrapped in braces
//! (`"{PRINT}"`). These modules provide reusable serde helpers.

use std::fmt::Display;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serializer, de};
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

use crate::error::ValidationError;

/// The `YYYY-MM-DD` format used for every date on the PATS wire surface.
pub(crate) const ISO_DATE: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Parse a `YYYY-MM-DD` string, naming the offending wire field on failure.
///
/// Rejects strings that do not name a real calendar date:
///
/// ```rust
/// use pats_api_client::types::serde_helpers::parse_iso_date;
///
/// assert!(parse_iso_date("coverDate", "2015-02-10").is_ok());
/// assert!(parse_iso_date("coverDate", "2015-02-30").is_err());
/// ```
pub fn parse_iso_date(field: &str, value: &str) -> Result<Date, ValidationError> {
    Date::parse(value, ISO_DATE).map_err(|_| ValidationError::InvalidDate {
        field: field.to_string(),
        value: value.to_string(),
    })
}

/// Serialize/deserialize a `time::Date` as a `YYYY-MM-DD` string.
///
/// # Example
///
/// ```rust
/// use serde::{Serialize, Deserialize};
/// use time::macros::date;
/// use pats_api_client::types::serde_helpers::iso_date;
///
/// #[derive(Serialize, Deserialize, Debug, PartialEq)]
/// struct Flight {
///     #[serde(with = "iso_date")]
///     start_date: time::Date,
/// }
///
/// let flight = Flight { start_date: date!(2015 - 02 - 01) };
/// let json = serde_json::to_string(&flight).unwrap();
/// assert_eq!(json, r#"{"start_date":"2015-02-01"}"#);
/// ```
pub mod iso_date {
    use super::*;

    /// Serialize a date as a `YYYY-MM-DD` string.
    pub fn serialize<S>(date: &Date, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let s = date.format(ISO_DATE).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&s)
    }

    /// Deserialize a `YYYY-MM-DD` string into a date.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Date, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Date::parse(&s, ISO_DATE).map_err(de::Error::custom)
    }

    /// `Option<Date>` variant of [`iso_date`](self).
    pub mod option {
        use super::*;

        /// Serialize an optional date, or nothing when `None`.
        pub fn serialize<S>(date: &Option<Date>, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            match date {
                Some(date) => super::serialize(date, serializer),
                None => serializer.serialize_none(),
            }
        }

        /// Deserialize an optional `YYYY-MM-DD` string.
        pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Date>, D::Error>
        where
            D: Deserializer<'de>,
        {
            let opt: Option<String> = Option::deserialize(deserializer)?;
            match opt {
                Some(s) => Date::parse(&s, ISO_DATE).map(Some).map_err(de::Error::custom),
                None => Ok(None),
            }
        }
    }
}

/// Serialize/deserialize a controlled-list value as a brace-wrapped token.
///
/// The catalogue API wants controlled values like media type and category
/// wrapped in braces: `"{DIGITAL}"`, `"{NEWS}"`.
///
/// # Example
///
/// ```rust
/// use serde::Serialize;
/// use pats_api_client::types::MediaType;
/// use pats_api_client::types::serde_helpers::controlled_token;
///
/// #[derive(Serialize)]
/// struct Attributes {
///     #[serde(rename = "mediaType", serialize_with = "controlled_token::serialize")]
///     media_type: MediaType,
/// }
///
/// let attributes = Attributes { media_type: MediaType::Digital };
/// let json = serde_json::to_string(&attributes).unwrap();
/// assert_eq!(json, r#"{"mediaType":"{DIGITAL}"}"#);
/// ```
pub mod controlled_token {
    use super::*;

    /// Serialize using the Display trait, wrapped in braces.
    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        serializer.serialize_str(&format!("{{{value}}}"))
    }

    /// Deserialize a brace-wrapped token using the FromStr trait.
    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let token = s
            .strip_prefix('{')
            .and_then(|rest| rest.strip_suffix('}'))
            .ok_or_else(|| de::Error::custom(format!("expected a brace-wrapped token, got `{s}`")))?;
        token.parse().map_err(de::Error::custom)
    }
}

/// Serialize/deserialize a type using its Display/FromStr implementations.
///
/// This is useful for values PATS wants as strings inside line items, such
/// as unit counts (`"2000000"`) and booleans (`"false"`).
///
/// # Example
///
/// ```rust
/// use serde::{Serialize, Deserialize};
/// use pats_api_client::types::serde_helpers::display_fromstr;
///
/// #[derive(Serialize, Deserialize, Debug)]
/// struct LineItem {
///     #[serde(with = "display_fromstr")]
///     unit_amount: i64, // Serializes as "2000000"
/// }
///
/// let item = LineItem { unit_amount: 2_000_000 };
/// let json = serde_json::to_string(&item).unwrap();
/// assert_eq!(json, r#"{"unit_amount":"2000000"}"#);
/// ```
pub mod display_fromstr {
    use super::*;

    /// Serialize using Display trait.
    pub fn serialize<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: Display,
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    /// Deserialize using FromStr trait.
    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<T, D::Error>
    where
        T: FromStr,
        T::Err: Display,
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}

/// Helper for empty strings that should be deserialized as None.
///
/// Some PATS fields return `""` instead of null.
///
/// # Example
///
/// ```rust
/// use serde::Deserialize;
/// use pats_api_client::types::serde_helpers::empty_string_as_none;
///
/// #[derive(Deserialize, Debug)]
/// struct Response {
///     #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
///     product_description: Option<String>,
/// }
///
/// let json = r#"{"product_description":""}"#;
/// let response: Response = serde_json::from_str(json).unwrap();
/// assert!(response.product_description.is_none());
/// ```
pub mod empty_string_as_none {
    use super::*;

    /// Deserialize a string, returning None if empty.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = Option::<String>::deserialize(deserializer)?;
        Ok(s.filter(|s| !s.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use serde::{Deserialize, Serialize};
    use time::macros::date;

    use super::*;
    use crate::types::MediaType;

    #[test]
    fn test_iso_date_roundtrip() {
        #[derive(Serialize, Deserialize, Debug, PartialEq)]
        struct Test {
            #[serde(with = "iso_date")]
            date: Date,
        }

        let test = Test {
            date: date!(2015 - 02 - 01),
        };
        let json = serde_json::to_string(&test).unwrap();
        assert_eq!(json, r#"{"date":"2015-02-01"}"#);
        let back: Test = serde_json::from_str(&json).unwrap();
        assert_eq!(back, test);
    }

    #[test]
    fn test_iso_date_rejects_non_calendar_date() {
        #[derive(Deserialize, Debug)]
        struct Test {
            #[serde(with = "iso_date")]
            #[allow(dead_code)]
            date: Date,
        }

        assert!(serde_json::from_str::<Test>(r#"{"date":"2015-02-30"}"#).is_err());
        assert!(serde_json::from_str::<Test>(r#"{"date":"01/02/2015"}"#).is_err());
    }

    #[test]
    fn test_iso_date_option() {
        #[derive(Serialize, Deserialize, Debug, PartialEq)]
        struct Test {
            #[serde(with = "iso_date::option")]
            date: Option<Date>,
        }

        let json = r#"{"date":"2015-02-28"}"#;
        let test: Test = serde_json::from_str(json).unwrap();
        assert_eq!(test.date, Some(date!(2015 - 02 - 28)));

        let json = r#"{"date":null}"#;
        let test: Test = serde_json::from_str(json).unwrap();
        assert!(test.date.is_none());
    }

    #[test]
    fn test_parse_iso_date_names_field() {
        let error = parse_iso_date("coverDate", "2015-02-30").unwrap_err();
        assert!(error.to_string().contains("coverDate"));

        let date = parse_iso_date("coverDate", "2015-02-10").unwrap();
        assert_eq!(date, date!(2015 - 02 - 10));
    }

    #[test]
    fn test_controlled_token_roundtrip() {
        #[derive(Serialize, Deserialize, Debug, PartialEq)]
        struct Test {
            #[serde(with = "controlled_token")]
            media_type: MediaType,
        }

        let test = Test {
            media_type: MediaType::Print,
        };
        let json = serde_json::to_string(&test).unwrap();
        assert_eq!(json, r#"{"media_type":"{PRINT}"}"#);
        let back: Test = serde_json::from_str(&json).unwrap();
        assert_eq!(back, test);
    }

    #[test]
    fn test_controlled_token_rejects_bare_value() {
        #[derive(Deserialize, Debug)]
        struct Test {
            #[serde(with = "controlled_token")]
            #[allow(dead_code)]
            media_type: MediaType,
        }

        assert!(serde_json::from_str::<Test>(r#"{"media_type":"PRINT"}"#).is_err());
    }

    #[test]
    fn test_display_fromstr_stringifies_counts() {
        #[derive(Serialize, Deserialize, Debug)]
        struct Test {
            #[serde(with = "display_fromstr")]
            unit_amount: i64,
            #[serde(with = "display_fromstr")]
            guaranteed: bool,
        }

        let test = Test {
            unit_amount: 2_000_000,
            guaranteed: false,
        };
        let json = serde_json::to_string(&test).unwrap();
        assert_eq!(json, r#"{"unit_amount":"2000000","guaranteed":"false"}"#);

        let back: Test = serde_json::from_str(&json).unwrap();
        assert_eq!(back.unit_amount, 2_000_000);
        assert!(!back.guaranteed);
    }

    #[test]
    fn test_empty_string_as_none() {
        #[derive(Deserialize, Debug)]
        struct Test {
            #[serde(deserialize_with = "empty_string_as_none::deserialize", default)]
            value: Option<String>,
        }

        let json = r#"{"value":""}"#;
        let test: Test = serde_json::from_str(json).unwrap();
        assert!(test.value.is_none());

        let json = r#"{"value":"Sport"}"#;
        let test: Test = serde_json::from_str(json).unwrap();
        assert_eq!(test.value.unwrap(), "Sport");
    }
}
