//! Hard limits applied while decoding untrusted input.

/// Default maximum length of a single entity document (32 MiB).
///
/// The largest items served by the Wikidata API are a few MiB; anything far
/// beyond that is not an entity document.
pub const MAX_ENTITY_BYTES: usize = 32 * 1024 * 1024;

/// Maximum length of a standalone snak, reference or claim fragment (1 MiB).
pub const MAX_FRAGMENT_BYTES: usize = 1024 * 1024;

