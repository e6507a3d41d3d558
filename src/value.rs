//! Decoded leaf content, handed to a schema node's `write` closure once
//! the content extractor (see [`crate::content`]) has validated it
//! against the node's facet.

/// One decoded, facet-checked piece of leaf content.
///
/// `StrView` borrows directly from the input buffer passed to
/// [`crate::parse`]; it must not be made to outlive that call. `StrInline`
/// also borrows from the input, but is meant to be copied by the
/// receiving closure into caller-owned fixed storage rather than kept by
/// reference. `StrOwned` is already an independent allocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'input> {
    StrView(&'input str),
    StrInline(&'input str),
    StrOwned(String),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Decimal(f32),
    Double(f64),
    Bool(bool),
    /// 0-based index of the matched option in `EnumString { options }`.
    EnumIndex(usize),
    /// The integer value itself, for `EnumUnsigned { options }`.
    EnumUint(u64),
    Date(XsDate),
    Time(XsTime),
    DateTime(XsDateTime),
    Duration(XsDuration),
}

/// `xs:date`-shaped value, `YYYY-MM-DD`. No calendar validation is
/// performed — February 30 parses without complaint, matching the
/// source parser's behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct XsDate {
    pub year: u32,
    pub month: u32,
    pub day: u32,
}

/// `xs:time`-shaped value, `HH:MM:SS`. No clock validation is performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct XsTime {
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
}

/// `xs:dateTime`-shaped value, `YYYY-MM-DDTHH:MM:SS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct XsDateTime {
    pub date: XsDate,
    pub time: XsTime,
}

/// `xs:duration`-shaped value, `[-]P[nY][nM][nD][T[nH][nM][nS]]`.
///
/// Designators absent from the source text are stored as zero; there is
/// no way to distinguish "0 years" from "no `Y` designator at all",
/// mirroring the source's `xs_duration_t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct XsDuration {
    /// `true` for a negative duration (leading `-`).
    pub negative: bool,
    pub years: u32,
    pub months: u32,
    pub days: u32,
    pub hours: u32,
    pub minutes: u32,
    pub seconds: u32,
}
