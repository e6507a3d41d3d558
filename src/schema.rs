//! The schema tree: the caller-built, immutable description of expected
//! XML structure, typed decoding and destinations (§3 of the spec).

use std::sync::Arc;

use crate::content::ContentKind;
use crate::value::Value;

/// How children of a parent element are allowed to appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildOrder {
    /// Children must occur in declaration order (repeats allowed per
    /// each child's own `min_occur`/`max_occur`).
    Sequence,
    /// At most one distinct child kind may occur, any number of times.
    Choice,
    /// Children may occur in any order; each obeys its own
    /// `min_occur`/`max_occur` with no additional uniqueness constraint.
    All,
}

/// Whether an attribute must, may, or must not appear.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeUse {
    Required,
    Optional,
    Prohibited,
}

/// Resolves the storage location for one occurrence of an element or
/// attribute.
///
/// This is the engine's half of C2: it establishes "here is where this
/// occurrence's value goes" by calling into caller-owned `Ctx`. What
/// "establishing" means is entirely up to the closure — push a frame
/// onto a stack held in `Ctx`, set a cursor field, whatever the
/// caller's builder needs. Leaf elements and attributes additionally
/// carry a `write` closure (see [`ContentSpec`]) that commits the
/// decoded value once content extraction (C3) has validated it.
pub enum Destination<Ctx: ?Sized> {
    /// A fixed, caller-declared storage site (e.g. a field in a
    /// pre-allocated struct, or an index into a fixed-size array).
    Static(Arc<dyn Fn(&mut Ctx, u32) + Send + Sync>),
    /// A location addressed relative to whatever the immediately
    /// enclosing element's `Destination` last established — the
    /// closure is expected to read that state back out of `Ctx`.
    Relative(Arc<dyn Fn(&mut Ctx, u32) + Send + Sync>),
    /// Ask the caller to obtain (allocate, push onto a list, ...) a
    /// target for this occurrence. Returning `false` means the caller
    /// declined; whether that's an error depends on `discard_ok`.
    Dynamic {
        allocate: Arc<dyn Fn(&mut Ctx, u32) -> bool + Send + Sync>,
        /// If `true`, a declined allocation silently skips this
        /// occurrence's content/children instead of raising
        /// `AllocationFailure`. The schema is expected to rely on this
        /// only rarely (§9).
        discard_ok: bool,
    },
}

impl<Ctx: ?Sized> Clone for Destination<Ctx> {
    fn clone(&self) -> Self {
        match self {
            Destination::Static(f) => Destination::Static(Arc::clone(f)),
            Destination::Relative(f) => Destination::Relative(Arc::clone(f)),
            Destination::Dynamic { allocate, discard_ok } => Destination::Dynamic {
                allocate: Arc::clone(allocate),
                discard_ok: *discard_ok,
            },
        }
    }
}

/// Leaf-content decoding plus the closure that commits a decoded value.
pub struct ContentSpec<Ctx: ?Sized> {
    pub kind: ContentKind,
    /// Commits a decoded, facet-checked value into whatever target this
    /// element/attribute's `Destination` established.
    pub write: Arc<dyn Fn(&mut Ctx, Value<'_>) + Send + Sync>,
}

impl<Ctx: ?Sized> Clone for ContentSpec<Ctx> {
    fn clone(&self) -> Self {
        ContentSpec {
            kind: self.kind.clone(),
            write: Arc::clone(&self.write),
        }
    }
}

/// Describes one expected attribute of an element.
pub struct AttributeSchema<Ctx: ?Sized> {
    pub name: String,
    pub destination: Destination<Ctx>,
    pub content: ContentSpec<Ctx>,
    pub use_: AttributeUse,
}

/// Describes one expected XML element: name, occurrence bounds,
/// destination, leaf content or children, and an optional post-parse
/// callback.
pub struct ElementSchema<Ctx: ?Sized> {
    pub name: String,
    pub min_occur: u32,
    pub max_occur: u32,
    pub destination: Destination<Ctx>,
    /// `None` means this element has children, not text — mutually
    /// exclusive with a non-empty `children` (§3's invariant; violating
    /// it is a schema-construction bug, not something the parser
    /// detects at parse time).
    pub content: Option<ContentSpec<Ctx>>,
    pub attributes: Vec<AttributeSchema<Ctx>>,
    pub child_order: ChildOrder,
    pub children: Vec<ElementSchema<Ctx>>,
    /// Invoked after this occurrence's subtree is fully parsed, with
    /// the 1-based occurrence count.
    pub on_parsed: Option<Arc<dyn Fn(u32, &mut Ctx) + Send + Sync>>,
}

impl<Ctx: ?Sized> ElementSchema<Ctx> {
    /// A schema node for an element that holds only children (no leaf
    /// text), with the given occurrence bounds and destination.
    pub fn container(
        name: impl Into<String>,
        min_occur: u32,
        max_occur: u32,
        destination: Destination<Ctx>,
        child_order: ChildOrder,
        children: Vec<ElementSchema<Ctx>>,
    ) -> Self {
        ElementSchema {
            name: name.into(),
            min_occur,
            max_occur,
            destination,
            content: None,
            attributes: Vec::new(),
            child_order,
            children,
            on_parsed: None,
        }
    }

    /// A schema node for an element that holds leaf text and no
    /// children.
    pub fn leaf(
        name: impl Into<String>,
        min_occur: u32,
        max_occur: u32,
        destination: Destination<Ctx>,
        content: ContentSpec<Ctx>,
    ) -> Self {
        ElementSchema {
            name: name.into(),
            min_occur,
            max_occur,
            destination,
            content: Some(content),
            attributes: Vec::new(),
            child_order: ChildOrder::Sequence,
            children: Vec::new(),
            on_parsed: None,
        }
    }

    pub fn with_attributes(mut self, attributes: Vec<AttributeSchema<Ctx>>) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_on_parsed(mut self, callback: Arc<dyn Fn(u32, &mut Ctx) + Send + Sync>) -> Self {
        self.on_parsed = Some(callback);
        self
    }
}
