//! Container parser (C6): the children of one element — occurrence
//! counting, sequence/choice/all ordering, and the parent's own end tag.

use quick_xml::events::Event;

use crate::destination;
use crate::element::parse_element;
use crate::error::{ParseError, Result};
use crate::parser::{cow_as_input_str, qname_str, Engine};
use crate::schema::{ChildOrder, ElementSchema};

/// Consumes events until `parent_name`'s matching end tag, dispatching
/// each recognized child start tag to [`parse_element`] and enforcing
/// `order`'s sequencing rule plus every child's occurrence bounds.
pub(crate) fn parse_children<'input, Ctx: ?Sized>(
    engine: &mut Engine<'input>,
    ctx: &mut Ctx,
    parent_name: &str,
    order: ChildOrder,
    children: &[ElementSchema<Ctx>],
) -> Result<()> {
    let mut occurrence = vec![0u32; children.len()];
    let mut cursor = 0usize;

    loop {
        let event = engine.next_event()?;
        let offset = engine.offset();
        let (tag, self_closed) = match event {
            Event::Eof => return Err(ParseError::IncompleteSource { context: parent_name.to_string() }),
            Event::Decl(_) | Event::PI(_) | Event::Comment(_) | Event::DocType(_) => continue,
            Event::Text(text) => {
                let raw = cow_as_input_str(text.into_inner())?;
                if raw.trim().is_empty() {
                    continue;
                }
                return Err(ParseError::ContentError { name: parent_name.to_string(), offset });
            }
            Event::CData(_) => {
                return Err(ParseError::SyntaxError {
                    offset,
                    reason: format!("CDATA sections are not accepted syntax (inside '{parent_name}')"),
                })
            }
            Event::End(e) => {
                let found = qname_str(e.name())?;
                if found != parent_name {
                    return Err(ParseError::EndTagNotFound {
                        expected: parent_name.to_string(),
                        found: found.to_string(),
                        offset,
                    });
                }
                return finish(parent_name, children, &occurrence, offset);
            }
            Event::Start(t) => (t, false),
            Event::Empty(t) => (t, true),
            _ => return Err(ParseError::ContentError { name: parent_name.to_string(), offset }),
        };

        let name = qname_str(tag.name())?;
        let child_idx = match order {
            ChildOrder::Sequence => {
                find_sequence_child(parent_name, children, &occurrence, &mut cursor, name, offset)?
            }
            ChildOrder::Choice | ChildOrder::All => children
                .iter()
                .position(|c| c.name == name)
                .ok_or_else(|| ParseError::ElementNotFound {
                    parent: parent_name.to_string(),
                    name: name.to_string(),
                    offset,
                })?,
        };

        let child = &children[child_idx];
        let occ = occurrence[child_idx];

        let stored = destination::resolve(ctx, &child.destination, occ, &child.name, offset)?;

        occurrence[child_idx] += 1;
        if occurrence[child_idx] > child.max_occur {
            return Err(ParseError::ElementMaxOccurrenceError {
                parent: parent_name.to_string(),
                name: child.name.clone(),
                max: child.max_occur,
                offset,
            });
        }

        if order == ChildOrder::Choice && occurrence.iter().filter(|&&c| c > 0).count() > 1 {
            return Err(ParseError::ChoiceElementError { parent: parent_name.to_string(), offset });
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(parent = parent_name, child = name, occurrence = occ, stored, "descending into child");

        parse_element(engine, ctx, child, &tag, self_closed, stored)?;

        if stored {
            if let Some(cb) = &child.on_parsed {
                cb(occ + 1, ctx);
            }
        }
    }
}

/// Sequence matching: search forward from `cursor`, requiring every
/// skipped-over slot to already have met its `min_occur`.
fn find_sequence_child<Ctx: ?Sized>(
    parent_name: &str,
    children: &[ElementSchema<Ctx>],
    occurrence: &[u32],
    cursor: &mut usize,
    name: &str,
    offset: usize,
) -> Result<usize> {
    let mut idx = *cursor;
    loop {
        if idx >= children.len() {
            return Err(ParseError::ElementNotFound {
                parent: parent_name.to_string(),
                name: name.to_string(),
                offset,
            });
        }
        if children[idx].name == name {
            *cursor = idx;
            return Ok(idx);
        }
        if occurrence[idx] < children[idx].min_occur {
            return Err(ParseError::ElementMinOccurrenceError {
                parent: parent_name.to_string(),
                name: children[idx].name.clone(),
                min: children[idx].min_occur,
                offset,
            });
        }
        idx += 1;
    }
}

fn finish<Ctx: ?Sized>(
    parent_name: &str,
    children: &[ElementSchema<Ctx>],
    occurrence: &[u32],
    offset: usize,
) -> Result<()> {
    for (idx, child) in children.iter().enumerate() {
        if occurrence[idx] < child.min_occur {
            return Err(ParseError::ElementMinOccurrenceError {
                parent: parent_name.to_string(),
                name: child.name.clone(),
                min: child.min_occur,
                offset,
            });
        }
    }
    Ok(())
}
