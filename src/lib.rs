//! Schema-driven, single-pass XML parsing.
//!
//! Given a caller-built [`schema::ElementSchema`] tree describing the
//! expected document shape — element and attribute names, occurrence
//! bounds, ordering, leaf content kinds and facets — [`parse`] walks an
//! XML document once, validating structure as it goes and handing off
//! typed, facet-checked leaf values to caller-supplied closures. There is
//! no intermediate DOM: every element is visited exactly once, in
//! document order, and nothing about the input is retained past the
//! call other than whatever the caller's own closures chose to copy out.
//!
//! Tag-level tokenizing (finding `<...>` spans, attribute lists, well-formed
//! nesting of *tokens*) is delegated to [`quick_xml`]; structural validation
//! against the schema — which children are permitted, how many times, in
//! what order, whether a start tag's end tag actually matches — is this
//! crate's job and is not something `quick-xml` itself checks.

mod attributes;
mod container;
mod content;
mod destination;
mod element;
mod error;
mod lexer;
mod parser;
mod schema;
mod value;

pub use content::ContentKind;
pub use error::{ParseError, Result};
pub use schema::{AttributeSchema, AttributeUse, ChildOrder, ContentSpec, Destination, ElementSchema};
pub use value::{Value, XsDate, XsDateTime, XsDuration, XsTime};

use quick_xml::events::Event;

use parser::Engine;

/// Parses `input` against `root`, driving side effects on `ctx` through
/// the schema's destinations and content writers.
///
/// This is C7: find the root start tag, resolve its destination, parse
/// it (attributes, then children or leaf content, then its own end tag)
/// via C5/C6, then confirm nothing but insignificant trailing content —
/// whitespace, comments, processing instructions — follows it.
pub fn parse<Ctx: ?Sized>(root: &ElementSchema<Ctx>, input: &str, ctx: &mut Ctx) -> Result<()> {
    let result = parse_inner(root, input, ctx);
    if let Err(_err) = &result {
        #[cfg(feature = "tracing")]
        tracing::warn!(root = %root.name, error = %_err, "parse failed");
    }
    result
}

fn parse_inner<Ctx: ?Sized>(root: &ElementSchema<Ctx>, input: &str, ctx: &mut Ctx) -> Result<()> {
    let mut engine = Engine::new(input);

    let (tag, self_closed) = loop {
        match engine.next_event()? {
            Event::Eof => {
                return Err(ParseError::IncompleteSource { context: root.name.clone() })
            }
            Event::Decl(_) | Event::PI(_) | Event::Comment(_) | Event::DocType(_) => continue,
            Event::Text(text) => {
                let raw = parser::cow_as_input_str(text.into_inner())?;
                if raw.trim().is_empty() {
                    continue;
                }
                return Err(ParseError::InvalidStartToken { offset: engine.offset() });
            }
            Event::Start(t) => break (t, false),
            Event::Empty(t) => break (t, true),
            _ => return Err(ParseError::InvalidStartToken { offset: engine.offset() }),
        }
    };

    let name = parser::qname_str(tag.name())?;
    if name != root.name {
        return Err(ParseError::ElementNotFound {
            parent: String::new(),
            name: name.to_string(),
            offset: engine.offset(),
        });
    }

    let stored = destination::resolve(ctx, &root.destination, 0, &root.name, engine.offset())?;
    element::parse_element(&mut engine, ctx, root, &tag, self_closed, stored)?;

    if stored {
        if let Some(cb) = &root.on_parsed {
            cb(1, ctx);
        }
    }

    loop {
        match engine.next_event()? {
            Event::Eof => return Ok(()),
            Event::Decl(_) | Event::PI(_) | Event::Comment(_) | Event::DocType(_) => continue,
            Event::Text(text) => {
                let raw = parser::cow_as_input_str(text.into_inner())?;
                if raw.trim().is_empty() {
                    continue;
                }
                return Err(ParseError::SyntaxError {
                    offset: engine.offset(),
                    reason: "non-whitespace content after the root element".into(),
                });
            }
            _ => {
                return Err(ParseError::SyntaxError {
                    offset: engine.offset(),
                    reason: "additional markup after the root element".into(),
                })
            }
        }
    }
}
