//! Destination resolver (C2): establishes the write target for one
//! occurrence of an element or attribute.

use crate::error::{ParseError, Result};
use crate::schema::Destination;

/// Resolves `dest` for one `occurrence`, returning whether a target was
/// actually established. `false` only ever comes from a `Dynamic`
/// destination that declined with `discard_ok: true`; any other decline
/// surfaces as `AllocationFailure`.
pub(crate) fn resolve<Ctx: ?Sized>(
    ctx: &mut Ctx,
    dest: &Destination<Ctx>,
    occurrence: u32,
    name: &str,
    offset: usize,
) -> Result<bool> {
    match dest {
        Destination::Static(f) | Destination::Relative(f) => {
            f(ctx, occurrence);
            Ok(true)
        }
        Destination::Dynamic { allocate, discard_ok } => {
            if allocate(ctx, occurrence) {
                Ok(true)
            } else if *discard_ok {
                #[cfg(feature = "tracing")]
                tracing::debug!(element = name, occurrence, "dynamic destination declined storage, discarding");
                Ok(false)
            } else {
                Err(ParseError::AllocationFailure { name: name.to_string(), offset })
            }
        }
    }
}
