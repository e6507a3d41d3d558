//! Error types for schema-driven XML parsing.

use thiserror::Error;

/// Result type for parsing operations.
pub type Result<T> = std::result::Result<T, ParseError>;

/// Errors that can occur while parsing an XML document against a schema.
///
/// Every fallible step in the engine returns one of these; the parser
/// stops at the first error without attempting recovery, matching the
/// "flat tagged union of outcomes" the source parser returns. Every
/// variant below carries the byte offset into the input buffer where
/// the engine was positioned when it gave up, alongside whatever
/// name/count context is specific to that failure.
#[derive(Error, Debug)]
pub enum ParseError {
    /// Null terminator / end of buffer reached mid-construct.
    #[error("unexpected end of input while parsing '{context}'")]
    IncompleteSource { context: String },

    /// A byte sequence violates the accepted-syntax rules.
    #[error("XML syntax error near byte {offset}: {reason}")]
    SyntaxError { offset: usize, reason: String },

    /// Expected `<` to begin a construct, found something else.
    #[error("expected '<' to begin a construct near byte {offset}")]
    InvalidStartToken { offset: usize },

    /// A start tag's name matches no permitted child of its parent.
    #[error("element '{name}' is not permitted inside '{parent}' (near byte {offset})")]
    ElementNotFound { parent: String, name: String, offset: usize },

    /// A child appeared more times than its schema allows.
    #[error("element '{name}' occurred more than {max} time(s) inside '{parent}' (near byte {offset})")]
    ElementMaxOccurrenceError {
        parent: String,
        name: String,
        max: u32,
        offset: usize,
    },

    /// A required child was missing when its slot closed.
    #[error("element '{name}' occurred fewer than {min} required time(s) inside '{parent}' (near byte {offset})")]
    ElementMinOccurrenceError {
        parent: String,
        name: String,
        min: u32,
        offset: usize,
    },

    /// A `choice` parent received more than one distinct child kind.
    #[error("'{parent}' is a choice parent but received more than one distinct child element (near byte {offset})")]
    ChoiceElementError { parent: String, offset: usize },

    /// Same attribute name appeared twice on one element.
    #[error("duplicate attribute '{name}' on element '{element}' (near byte {offset})")]
    DuplicateAttribute { element: String, name: String, offset: usize },

    /// Unknown attribute, missing required attribute, or a prohibited
    /// attribute that appeared anyway.
    #[error("attribute error on element '{element}' (near byte {offset}): {reason}")]
    AttributeNotFound { element: String, reason: String, offset: usize },

    /// Leaf content does not match its declared kind.
    #[error("content of element '{name}' does not match its declared content kind (near byte {offset})")]
    ContentError { name: String, offset: usize },

    /// End-tag name mismatches start-tag name.
    #[error("end tag '{found}' does not match start tag '{expected}' (near byte {offset})")]
    EndTagNotFound { expected: String, found: String, offset: usize },

    /// String facet: length below `min_len`.
    #[error("length {len} is below the minimum of {min} for '{name}' (near byte {offset})")]
    MinLengthError { name: String, len: usize, min: u32, offset: usize },

    /// String facet: length above `max_len`.
    #[error("length {len} exceeds the maximum of {max} for '{name}' (near byte {offset})")]
    MaxLengthError { name: String, len: usize, max: u32, offset: usize },

    /// Numeric facet: value below the facet minimum.
    #[error("value is below the minimum allowed for '{name}' (near byte {offset})")]
    MinValueError { name: String, offset: usize },

    /// Numeric facet: value above the facet maximum.
    #[error("value exceeds the maximum allowed for '{name}' (near byte {offset})")]
    MaxValueError { name: String, offset: usize },

    /// Value is not a member of the declared enumeration.
    #[error("value does not match any enumeration option for '{name}' (near byte {offset})")]
    EnumNotFound { name: String, offset: usize },

    /// Malformed `xs:duration` content.
    #[error("malformed duration content for '{name}' (near byte {offset})")]
    DurationSyntaxError { name: String, offset: usize },

    /// Malformed `xs:date`/`xs:time`/`xs:dateTime` content.
    #[error("malformed date/time content for '{name}' (near byte {offset})")]
    DateTimeSyntaxError { name: String, offset: usize },

    /// Schema specifies a content kind this parser does not handle.
    #[error("content kind of '{name}' is not supported by this parser")]
    ContentUnsupported { name: String },

    /// Owned-string allocation declined by the caller's `write` closure,
    /// or a `Dynamic` destination declined without `discard_ok`.
    #[error("failed to allocate storage for '{name}' (near byte {offset})")]
    AllocationFailure { name: String, offset: usize },

    /// The underlying tokenizer rejected the document as malformed XML.
    #[error("XML tokenizer error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// A UTF-8 boundary error while decoding tag or attribute text.
    #[error("invalid UTF-8 in XML content: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}
