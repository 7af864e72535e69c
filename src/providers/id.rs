use uuid::Uuid;

/// Injectable unique-id generator for new submissions
pub trait IdProvider: Send + Sync {
    fn next_id(&self) -> String;
}

/// Random v4 uuids
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidProvider;

impl IdProvider for UuidProvider {
    fn next_id(&self) -> String {
        Uuid::new_v4().to_string()
    }
}
