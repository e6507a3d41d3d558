//! Content extractor (C3): decodes a leaf-content text slice into a
//! typed, facet-checked [`Value`], per the schema-declared [`ContentKind`].

use crate::error::{ParseError, Result};
use crate::lexer::{trim_ascii_whitespace, Cursor};
use crate::value::{Value, XsDate, XsDateTime, XsDuration, XsTime};

/// Leaf-content decoding rule for one element or attribute.
///
/// An [`crate::schema::ElementSchema`] with children carries no
/// `ContentKind` at all (`content: None` there) — this type only shows
/// up for elements/attributes that hold text.
#[derive(Debug, Clone)]
pub enum ContentKind {
    /// Borrows a slice of the input buffer; no copy.
    StringView { min_len: u32, max_len: u32 },
    /// Meant to be copied by the caller's `write` closure into fixed
    /// storage; the extractor only validates and hands back a borrow.
    StringInlineCopy { min_len: u32, max_len: u32 },
    /// Meant to be turned into an independent allocation by the
    /// caller's `write` closure (typically `str::to_owned`).
    StringOwned { min_len: u32, max_len: u32 },
    U8 { min: u8, max: u8 },
    U16 { min: u16, max: u16 },
    U32 { min: u32, max: u32 },
    U64 { min: u64, max: u64 },
    I8 { min: i8, max: i8 },
    I16 { min: i16, max: i16 },
    I32 { min: i32, max: i32 },
    I64 { min: i64, max: i64 },
    Decimal { min: f32, max: f32 },
    Double { min: f64, max: f64 },
    Boolean,
    /// Ordered set of allowed spellings; the decoded value is the
    /// 0-based index of the match.
    EnumString { options: Vec<String> },
    /// Ordered set of allowed integer values; the decoded value is the
    /// integer itself.
    EnumUnsigned { options: Vec<u64> },
    Date,
    Time,
    DateTime,
    Duration,
}

macro_rules! parse_int_facet {
    ($raw:expr, $name:expr, $offset:expr, $ty:ty, $min:expr, $max:expr, $variant:ident) => {{
        let text = trim_ascii_whitespace($raw);
        let parsed: $ty = text
            .parse()
            .map_err(|_| ParseError::ContentError { name: $name.to_string(), offset: $offset })?;
        if parsed < $min {
            return Err(ParseError::MinValueError { name: $name.to_string(), offset: $offset });
        }
        if parsed > $max {
            return Err(ParseError::MaxValueError { name: $name.to_string(), offset: $offset });
        }
        Value::$variant(parsed)
    }};
}

/// Decodes `raw` according to `kind`, returning the typed value or the
/// first facet/syntax violation encountered. `name` is only used to
/// attach context to errors; `offset` is the byte position the engine
/// had reached when this leaf's text was read, carried into any error
/// so callers can locate the failure in the source document.
pub(crate) fn extract<'input>(
    kind: &ContentKind,
    name: &str,
    raw: &'input str,
    offset: usize,
) -> Result<Value<'input>> {
    #[cfg(feature = "tracing")]
    tracing::trace!(element = name, kind = ?kind, "extracting leaf content");

    match kind {
        ContentKind::StringView { min_len, max_len } => {
            check_string_len(name, raw, *min_len, *max_len, offset)?;
            Ok(Value::StrView(raw))
        }
        ContentKind::StringInlineCopy { min_len, max_len } => {
            check_string_len(name, raw, *min_len, *max_len, offset)?;
            Ok(Value::StrInline(raw))
        }
        ContentKind::StringOwned { min_len, max_len } => {
            check_string_len(name, raw, *min_len, *max_len, offset)?;
            Ok(Value::StrOwned(raw.to_owned()))
        }
        ContentKind::U8 { min, max } => Ok(parse_int_facet!(raw, name, offset, u8, *min, *max, U8)),
        ContentKind::U16 { min, max } => Ok(parse_int_facet!(raw, name, offset, u16, *min, *max, U16)),
        ContentKind::U32 { min, max } => Ok(parse_int_facet!(raw, name, offset, u32, *min, *max, U32)),
        ContentKind::U64 { min, max } => Ok(parse_int_facet!(raw, name, offset, u64, *min, *max, U64)),
        ContentKind::I8 { min, max } => Ok(parse_int_facet!(raw, name, offset, i8, *min, *max, I8)),
        ContentKind::I16 { min, max } => Ok(parse_int_facet!(raw, name, offset, i16, *min, *max, I16)),
        ContentKind::I32 { min, max } => Ok(parse_int_facet!(raw, name, offset, i32, *min, *max, I32)),
        ContentKind::I64 { min, max } => Ok(parse_int_facet!(raw, name, offset, i64, *min, *max, I64)),
        ContentKind::Decimal { min, max } => {
            let text = trim_ascii_whitespace(raw);
            let parsed: f32 = text
                .parse()
                .map_err(|_| ParseError::ContentError { name: name.to_string(), offset })?;
            if parsed < *min {
                return Err(ParseError::MinValueError { name: name.to_string(), offset });
            }
            if parsed > *max {
                return Err(ParseError::MaxValueError { name: name.to_string(), offset });
            }
            Ok(Value::Decimal(parsed))
        }
        ContentKind::Double { min, max } => {
            let text = trim_ascii_whitespace(raw);
            let parsed: f64 = text
                .parse()
                .map_err(|_| ParseError::ContentError { name: name.to_string(), offset })?;
            if parsed < *min {
                return Err(ParseError::MinValueError { name: name.to_string(), offset });
            }
            if parsed > *max {
                return Err(ParseError::MaxValueError { name: name.to_string(), offset });
            }
            Ok(Value::Double(parsed))
        }
        ContentKind::Boolean => match trim_ascii_whitespace(raw) {
            "true" | "1" => Ok(Value::Bool(true)),
            "false" | "0" => Ok(Value::Bool(false)),
            _ => Err(ParseError::ContentError { name: name.to_string(), offset }),
        },
        ContentKind::EnumString { options } => {
            let text = trim_ascii_whitespace(raw);
            match options.iter().position(|opt| opt == text) {
                Some(idx) => Ok(Value::EnumIndex(idx)),
                None => Err(ParseError::EnumNotFound { name: name.to_string(), offset }),
            }
        }
        ContentKind::EnumUnsigned { options } => {
            let text = trim_ascii_whitespace(raw);
            let parsed: u64 = text
                .parse()
                .map_err(|_| ParseError::ContentError { name: name.to_string(), offset })?;
            if options.contains(&parsed) {
                Ok(Value::EnumUint(parsed))
            } else {
                Err(ParseError::EnumNotFound { name: name.to_string(), offset })
            }
        }
        ContentKind::Date => parse_date(raw)
            .map(Value::Date)
            .ok_or_else(|| ParseError::DateTimeSyntaxError { name: name.to_string(), offset }),
        ContentKind::Time => parse_time(raw)
            .map(Value::Time)
            .ok_or_else(|| ParseError::DateTimeSyntaxError { name: name.to_string(), offset }),
        ContentKind::DateTime => parse_date_time(raw)
            .map(Value::DateTime)
            .ok_or_else(|| ParseError::DateTimeSyntaxError { name: name.to_string(), offset }),
        ContentKind::Duration => parse_duration(raw)
            .map(Value::Duration)
            .ok_or_else(|| ParseError::DurationSyntaxError { name: name.to_string(), offset }),
    }
}

fn check_string_len(name: &str, raw: &str, min_len: u32, max_len: u32, offset: usize) -> Result<()> {
    let len = raw.len();
    if (len as u64) < min_len as u64 {
        return Err(ParseError::MinLengthError {
            name: name.to_string(),
            len,
            min: min_len,
            offset,
        });
    }
    if (len as u64) > max_len as u64 {
        return Err(ParseError::MaxLengthError {
            name: name.to_string(),
            len,
            max: max_len,
            offset,
        });
    }
    Ok(())
}

fn parse_date(raw: &str) -> Option<XsDate> {
    let mut cur = Cursor::new(trim_ascii_whitespace(raw));
    let year = cur.scan_u32()?;
    if !cur.eat(b'-') {
        return None;
    }
    let month = cur.scan_u32()?;
    if !cur.eat(b'-') {
        return None;
    }
    let day = cur.scan_u32()?;
    if !cur.is_empty() {
        return None;
    }
    Some(XsDate { year, month, day })
}

fn parse_time(raw: &str) -> Option<XsTime> {
    let mut cur = Cursor::new(trim_ascii_whitespace(raw));
    let hour = cur.scan_u32()?;
    if !cur.eat(b':') {
        return None;
    }
    let minute = cur.scan_u32()?;
    if !cur.eat(b':') {
        return None;
    }
    let second = cur.scan_u32()?;
    if !cur.is_empty() {
        return None;
    }
    Some(XsTime { hour, minute, second })
}

fn parse_date_time(raw: &str) -> Option<XsDateTime> {
    let trimmed = trim_ascii_whitespace(raw);
    let t_pos = trimmed.find('T')?;
    let date = parse_date(&trimmed[..t_pos])?;
    let time = parse_time(&trimmed[t_pos + 1..])?;
    Some(XsDateTime { date, time })
}

fn parse_duration(raw: &str) -> Option<XsDuration> {
    let mut cur = Cursor::new(trim_ascii_whitespace(raw));
    let negative = cur.eat(b'-');
    if !cur.eat(b'P') {
        return None;
    }

    let years = cur.scan_duration_component(b'Y').unwrap_or(0);
    let months = cur.scan_duration_component(b'M').unwrap_or(0);
    let days = cur.scan_duration_component(b'D').unwrap_or(0);

    let (hours, minutes, seconds) = if cur.eat(b'T') {
        let h = cur.scan_duration_component(b'H').unwrap_or(0);
        let m = cur.scan_duration_component(b'M').unwrap_or(0);
        let s = cur.scan_duration_component(b'S').unwrap_or(0);
        (h, m, s)
    } else {
        (0, 0, 0)
    };

    if !cur.is_empty() {
        return None;
    }

    Some(XsDuration {
        negative,
        years,
        months,
        days,
        hours,
        minutes,
        seconds,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_string_view_within_facet() {
        let kind = ContentKind::StringView { min_len: 1, max_len: 10 };
        let v = extract(&kind, "name", "hello", 0).unwrap();
        assert_eq!(v, Value::StrView("hello"));
    }

    #[test]
    fn decodes_string_inline_copy_within_facet() {
        let kind = ContentKind::StringInlineCopy { min_len: 1, max_len: 10 };
        let v = extract(&kind, "code", "ab12", 0).unwrap();
        assert_eq!(v, Value::StrInline("ab12"));
    }

    #[test]
    fn rejects_string_inline_copy_above_max_length() {
        let kind = ContentKind::StringInlineCopy { min_len: 0, max_len: 3 };
        let err = extract(&kind, "code", "abcd", 0).unwrap_err();
        assert!(matches!(err, ParseError::MaxLengthError { .. }));
    }

    #[test]
    fn rejects_string_below_min_length() {
        let kind = ContentKind::StringView { min_len: 3, max_len: 10 };
        let err = extract(&kind, "name", "ab", 0).unwrap_err();
        assert!(matches!(err, ParseError::MinLengthError { .. }));
    }

    #[test]
    fn rejects_string_above_max_length() {
        let kind = ContentKind::StringView { min_len: 0, max_len: 2 };
        let err = extract(&kind, "name", "abc", 0).unwrap_err();
        assert!(matches!(err, ParseError::MaxLengthError { .. }));
    }

    #[test]
    fn decodes_unsigned_within_facet() {
        let kind = ContentKind::U32 { min: 0, max: u32::MAX };
        let v = extract(&kind, "calories", "650", 0).unwrap();
        assert_eq!(v, Value::U32(650));
    }

    #[test]
    fn rejects_unsigned_above_facet_max() {
        let kind = ContentKind::U32 { min: 0, max: 100 };
        let err = extract(&kind, "calories", "101", 0).unwrap_err();
        assert!(matches!(err, ParseError::MaxValueError { .. }));
    }

    #[test]
    fn decodes_decimal() {
        let kind = ContentKind::Decimal { min: -3.4e38, max: 3.4e38 };
        let v = extract(&kind, "price", "5.95", 0).unwrap();
        assert_eq!(v, Value::Decimal(5.95));
    }

    #[test]
    fn decodes_boolean_canonical_spellings() {
        let kind = ContentKind::Boolean;
        assert_eq!(extract(&kind, "b", "true", 0).unwrap(), Value::Bool(true));
        assert_eq!(extract(&kind, "b", "0", 0).unwrap(), Value::Bool(false));
        assert!(extract(&kind, "b", "yes", 0).is_err());
    }

    #[test]
    fn decodes_enum_string_to_index() {
        let kind = ContentKind::EnumString {
            options: vec!["red".into(), "green".into(), "blue".into()],
        };
        assert_eq!(extract(&kind, "color", "green", 0).unwrap(), Value::EnumIndex(1));
        assert!(extract(&kind, "color", "purple", 0).is_err());
    }

    #[test]
    fn decodes_date() {
        let v = extract(&ContentKind::Date, "d", "2024-02-30", 0).unwrap();
        assert_eq!(v, Value::Date(XsDate { year: 2024, month: 2, day: 30 }));
    }

    #[test]
    fn decodes_duration() {
        let v = extract(&ContentKind::Duration, "dur", "-P1Y2M10DT2H30M", 0).unwrap();
        assert_eq!(
            v,
            Value::Duration(XsDuration {
                negative: true,
                years: 1,
                months: 2,
                days: 10,
                hours: 2,
                minutes: 30,
                seconds: 0,
            })
        );
    }

    #[test]
    fn rejects_duration_missing_p() {
        assert!(extract(&ContentKind::Duration, "dur", "1Y2M", 0).is_err());
    }

    #[test]
    fn rejects_malformed_date() {
        assert!(extract(&ContentKind::Date, "d", "2024/02/30", 0).is_err());
    }
}
