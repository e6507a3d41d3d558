//! The tokenizer wrapper shared by C4-C7. `quick-xml` handles tag-level
//! lexing (finding `<`, tag names, attribute spans); this module adds the
//! bits the engine needs on top: a zero-copy read loop and raw (no
//! entity-decoding) text extraction.

use std::borrow::Cow;

use quick_xml::events::Event;
use quick_xml::name::QName;
use quick_xml::Reader;

use crate::error::{ParseError, Result};

/// Wraps a `quick-xml` reader over the caller's input buffer.
///
/// `Reader<&[u8]>` (constructed via [`Reader::from_str`]) supports
/// borrowing `Event`s directly from the input with no internal copy
/// buffer, which is what lets [`crate::value::Value::StrView`] alias the
/// caller's buffer instead of an intermediate one.
pub(crate) struct Engine<'input> {
    reader: Reader<&'input [u8]>,
}

impl<'input> Engine<'input> {
    pub(crate) fn new(input: &'input str) -> Self {
        Engine { reader: Reader::from_str(input) }
    }

    pub(crate) fn next_event(&mut self) -> Result<Event<'input>> {
        self.reader.read_event().map_err(ParseError::from)
    }

    pub(crate) fn offset(&self) -> usize {
        self.reader.buffer_position() as usize
    }
}

/// Extracts `name`'s raw bytes as `&'input str`, with no entity decoding.
pub(crate) fn qname_str<'input>(name: QName<'input>) -> Result<&'input str> {
    std::str::from_utf8(name.as_ref()).map_err(ParseError::from)
}

/// Unwraps a `Cow` produced by `quick-xml`'s raw (non-unescaping)
/// accessors back to a borrow of the original input. `quick-xml` only
/// ever allocates here if the source needed decoding, which the raw
/// accessors never trigger — an `Owned` arm would mean our assumption
/// about `quick-xml`'s zero-copy behavior broke, so we surface it as a
/// syntax error rather than silently degrading `StringView`'s no-copy
/// guarantee.
pub(crate) fn cow_as_input_str<'input>(cow: Cow<'input, [u8]>) -> Result<&'input str> {
    match cow {
        Cow::Borrowed(bytes) => std::str::from_utf8(bytes).map_err(ParseError::from),
        Cow::Owned(_) => Err(ParseError::SyntaxError {
            offset: 0,
            reason: "text or attribute value could not be borrowed from the input buffer".into(),
        }),
    }
}
