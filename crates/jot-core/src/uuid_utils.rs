//! UUID v7 utilities for time-ordered identifiers.
//!
//! Record ids are UUIDv7: the embedded millisecond timestamp gives natural
//! creation-order sorting, which the task list ("newest first") and the
//! materializer's reverse-creation trick both rely on.

use uuid::Uuid;

/// Generate a new UUIDv7 identifier.
#[inline]
pub fn new_v7() -> Uuid {
    Uuid::now_v7()
}

/// Check whether a UUID is version 7.
pub fn is_v7(id: &Uuid) -> bool {
    id.get_version_num() == 7
}
