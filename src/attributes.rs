//! Attribute parser (C4): name="value" pairs on a start/empty tag,
//! matched against a schema's declared attributes.

use quick_xml::events::BytesStart;

use crate::content;
use crate::destination;
use crate::error::{ParseError, Result};
use crate::parser::{cow_as_input_str, qname_str};
use crate::schema::{AttributeSchema, AttributeUse};

/// Parses and validates every attribute on `tag` against `schema_attrs`,
/// then confirms every `Required` attribute was seen. `commit` gates
/// whether decoded values are actually written — it's `false` only when
/// the enclosing element's occurrence was discarded by a `Dynamic`
/// destination with `discard_ok: true`.
pub(crate) fn parse_attributes<Ctx: ?Sized>(
    ctx: &mut Ctx,
    element_name: &str,
    schema_attrs: &[AttributeSchema<Ctx>],
    tag: &BytesStart<'_>,
    commit: bool,
    offset: usize,
) -> Result<()> {
    let mut seen = vec![false; schema_attrs.len()];

    for attr in tag.attributes().with_checks(false) {
        let attr = attr.map_err(|e| ParseError::SyntaxError {
            offset,
            reason: format!("malformed attribute on '{element_name}': {e}"),
        })?;
        let key = qname_str(attr.key)?;

        let idx = schema_attrs.iter().position(|a| a.name == key).ok_or_else(|| {
            ParseError::AttributeNotFound {
                element: element_name.to_string(),
                reason: format!("unknown attribute '{key}'"),
                offset,
            }
        })?;
        let schema_attr = &schema_attrs[idx];

        if schema_attr.use_ == AttributeUse::Prohibited {
            return Err(ParseError::AttributeNotFound {
                element: element_name.to_string(),
                reason: format!("attribute '{key}' is prohibited"),
                offset,
            });
        }
        if seen[idx] {
            return Err(ParseError::DuplicateAttribute {
                element: element_name.to_string(),
                name: key.to_string(),
                offset,
            });
        }
        seen[idx] = true;

        let raw = cow_as_input_str(attr.value)?;
        let value = content::extract(&schema_attr.content.kind, key, raw, offset)?;

        let stored = destination::resolve(ctx, &schema_attr.destination, 0, key, offset)?;
        if commit && stored {
            (schema_attr.content.write)(ctx, value);
        }

        #[cfg(feature = "tracing")]
        tracing::trace!(element = element_name, attribute = key, "parsed attribute");
    }

    for (idx, schema_attr) in schema_attrs.iter().enumerate() {
        if schema_attr.use_ == AttributeUse::Required && !seen[idx] {
            return Err(ParseError::AttributeNotFound {
                element: element_name.to_string(),
                reason: format!("required attribute '{}' is missing", schema_attr.name),
                offset,
            });
        }
    }

    Ok(())
}
