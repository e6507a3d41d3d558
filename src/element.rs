//! Element parser (C5): attributes, then either leaf content or children,
//! then the matching end tag.

use quick_xml::events::{BytesStart, Event};

use crate::attributes::parse_attributes;
use crate::container::parse_children;
use crate::content;
use crate::error::{ParseError, Result};
use crate::parser::{cow_as_input_str, qname_str, Engine};
use crate::schema::ElementSchema;

/// Parses one occurrence of `schema`, given its already-read start tag.
/// `commit` controls whether the decoded leaf value (if any) is actually
/// written — children always resolve their own destinations regardless,
/// per [`crate::destination::resolve`].
pub(crate) fn parse_element<'input, Ctx: ?Sized>(
    engine: &mut Engine<'input>,
    ctx: &mut Ctx,
    schema: &ElementSchema<Ctx>,
    tag: &BytesStart<'input>,
    self_closed: bool,
    commit: bool,
) -> Result<()> {
    let start_offset = engine.offset();
    parse_attributes(ctx, &schema.name, &schema.attributes, tag, commit, start_offset)?;

    if self_closed {
        if schema.content.is_some() {
            return Err(ParseError::ContentError { name: schema.name.clone(), offset: start_offset });
        }
        if let Some(child) = schema.children.iter().find(|c| c.min_occur > 0) {
            return Err(ParseError::ElementMinOccurrenceError {
                parent: schema.name.clone(),
                name: child.name.clone(),
                min: child.min_occur,
                offset: start_offset,
            });
        }
        return Ok(());
    }

    if let Some(content_spec) = &schema.content {
        let raw = read_leaf_text(engine, &schema.name)?;
        let offset = engine.offset();
        let value = content::extract(&content_spec.kind, &schema.name, raw, offset)?;
        if commit {
            (content_spec.write)(ctx, value);
        }
        Ok(())
    } else {
        parse_children(engine, ctx, &schema.name, schema.child_order, &schema.children)
    }
}

/// Reads the text between a start tag and its matching end tag. Per the
/// spec's simple model, a leaf element holds exactly one contiguous
/// span of text (or none) — anything else (a nested start tag, a
/// mismatched end tag) is a content error.
fn read_leaf_text<'input>(engine: &mut Engine<'input>, name: &str) -> Result<&'input str> {
    match engine.next_event()? {
        Event::End(e) => {
            expect_end_name(engine, &e, name)?;
            Ok("")
        }
        Event::Text(text) => {
            let raw = cow_as_input_str(text.into_inner())?;
            expect_end(engine, name)?;
            Ok(raw)
        }
        Event::CData(_) => Err(ParseError::SyntaxError {
            offset: engine.offset(),
            reason: format!("CDATA sections are not accepted syntax (element '{name}')"),
        }),
        Event::Start(_) | Event::Empty(_) => {
            Err(ParseError::ContentError { name: name.to_string(), offset: engine.offset() })
        }
        Event::Eof => Err(ParseError::IncompleteSource { context: name.to_string() }),
        _ => Err(ParseError::ContentError { name: name.to_string(), offset: engine.offset() }),
    }
}

fn expect_end<'input>(engine: &mut Engine<'input>, name: &str) -> Result<()> {
    match engine.next_event()? {
        Event::End(e) => expect_end_name(engine, &e, name),
        Event::Eof => Err(ParseError::IncompleteSource { context: name.to_string() }),
        _ => Err(ParseError::ContentError { name: name.to_string(), offset: engine.offset() }),
    }
}

fn expect_end_name(
    engine: &Engine<'_>,
    e: &quick_xml::events::BytesEnd<'_>,
    name: &str,
) -> Result<()> {
    let found = qname_str(e.name())?;
    if found != name {
        return Err(ParseError::EndTagNotFound {
            expected: name.to_string(),
            found: found.to_string(),
            offset: engine.offset(),
        });
    }
    Ok(())
}
