// Helper for generating UUIDv7 (timestamp-sortable UUIDs)
//
// PostgreSQL does not natively support UUIDv7 for auto-generation.
// Tasks are listed in storage order, so their IDs are generated
// app-side as UUIDv7 to keep insertion order stable. Tables where
// time-ordering is irrelevant (users, departmental objectives)
// use PG's gen_random_uuid() (v4).

use uuid::Uuid;

/// Generate a new UUIDv7 (timestamp-sortable).
pub fn uuidv7() -> Uuid {
    Uuid::now_v7()
}
