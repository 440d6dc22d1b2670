use uuid::Uuid;

/// Generate a new opaque release/document identifier.
pub fn generate_id() -> Uuid {
    Uuid::new_v4()
}
