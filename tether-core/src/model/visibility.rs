//! Member visibility rules.
//!
//! A member's name carries its own classification. The `__` prefix marks a
//! private member, the literal name `endpoint` is remote configuration, and
//! everything else is public state. This is the single source of truth for
//! what gets persisted, what goes into a remote payload, and what a binding
//! path may resolve.

/// Prefix marking a member as private.
pub const PRIVATE_PREFIX: &str = "__";

/// Field name reserved for remote endpoint configuration.
pub const ENDPOINT_FIELD: &str = "endpoint";

/// Classification of a model member name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    /// Persisted, payload-eligible, bindable.
    Public,

    /// Internal bookkeeping; excluded from persistence, payloads, and bindings.
    Private,

    /// Remote endpoint configuration; excluded the same way a private member is.
    Config,
}

/// Classify a member name.
pub fn of(name: &str) -> Visibility {
    if name.starts_with(PRIVATE_PREFIX) {
        Visibility::Private
    } else if name == ENDPOINT_FIELD {
        Visibility::Config
    } else {
        Visibility::Public
    }
}

/// Whether a member participates in persistence, payloads, and bindings.
pub fn is_public(name: &str) -> bool {
    of(name) == Visibility::Public
}
