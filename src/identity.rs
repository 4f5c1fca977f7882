//! Stable identities for diagnostics.

use std::cell::Cell;
use std::fmt;
use std::num::NonZeroU32;

use crate::component::short_type_name;

/// Numeric component identity. Zero is reserved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AtomId(NonZeroU32);

impl AtomId {
    pub fn new(raw: u32) -> Option<Self> {
        NonZeroU32::new(raw).map(Self)
    }

    pub fn get(self) -> u32 {
        self.0.get()
    }
}

impl fmt::Display for AtomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Id plus human-readable name, meant to be embedded in a component and
/// returned from [`Component::id`](crate::Component::id) and
/// [`Component::name`](crate::Component::name).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    id: AtomId,
    name: String,
}

impl Identity {
    /// Build an identity from an explicit id.
    ///
    /// # Panics
    ///
    /// Panics if `id` is zero.
    pub fn with_id(id: u32, name: impl Into<String>) -> Self {
        let Some(id) = AtomId::new(id) else {
            panic!("atom id 0 is reserved");
        };
        Self {
            id,
            name: name.into(),
        }
    }

    pub fn id(&self) -> AtomId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

/// Hands out identities for one application.
///
/// Create one at the top of the program and pass it to the constructors
/// that need ids; there is no process-wide counter.
#[derive(Debug)]
pub struct IdRegistry {
    next: Cell<u32>,
}

impl Default for IdRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl IdRegistry {
    pub fn new() -> Self {
        Self { next: Cell::new(1) }
    }

    /// The id the next call to [`next_id`](Self::next_id) will return.
    pub fn peek(&self) -> u32 {
        self.next.get()
    }

    pub fn next_id(&self) -> AtomId {
        let raw = self.next.get();
        // Wraps back to one, never zero.
        self.next.set(raw.checked_add(1).unwrap_or(1));
        AtomId(NonZeroU32::new(raw).unwrap_or(NonZeroU32::MIN))
    }

    /// `"prefix#n"` with a fresh `n`.
    pub fn unique_name(&self, prefix: &str) -> String {
        format!("{}#{}", prefix, self.next_id())
    }

    /// A unique name derived from the short type name of `T`.
    pub fn unique_type_name<T: ?Sized>(&self) -> String {
        self.unique_name(short_type_name(std::any::type_name::<T>()))
    }

    pub fn identity(&self, name: impl Into<String>) -> Identity {
        Identity {
            id: self.next_id(),
            name: name.into(),
        }
    }
}
