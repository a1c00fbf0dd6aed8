//! Helpers for SQLite queries.

/// Storage format of calendar dates. ISO order keeps text comparison
/// consistent with date order.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Maximum number of bound ids per `IN (...)` query.
///
/// SQLite caps the number of parameters of a statement (999 on older builds),
/// so id lists are split into chunks of this size.
pub const SQLITE_MAX_PARAMS_CHUNK: usize = 500;

/// Splits `items` into slices small enough for one `IN (...)` query.
pub fn chunk_for_sqlite<T>(items: &[T]) -> impl Iterator<Item = &[T]> {
    items.chunks(SQLITE_MAX_PARAMS_CHUNK)
}
