//! Centralized limits and thresholds for the resolver.
//!
//! Scripts are small, so these only exist to turn pathological input (or a
//! cyclic definition supplied by the host) into a bounded failure instead of a
//! stack overflow.

/// Maximum nesting of on-demand resolution (forward references that pull in
/// other declarations before their turn).
pub const MAX_RESOLUTION_DEPTH: u32 = 256;

/// Maximum number of `base` links followed when walking a `Regular` type's
/// inheritance chain. Guards against a host registering a cyclic hierarchy.
pub const MAX_BASE_CHAIN_DEPTH: u32 = 64;

/// Maximum recursion depth of a single assignability query.
///
/// Bound generic types can mention themselves through members (a list's
/// `map` returns another list), so relation checks that descend into
/// type arguments stop here and answer `false`.
pub const MAX_TYPE_RELATION_DEPTH: u32 = 64;
