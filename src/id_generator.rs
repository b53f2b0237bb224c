use uuid::Uuid;

use crate::element::ItemId;

/// Fresh opaque identifier for a new item
pub fn generate_id() -> ItemId {
    ItemId::from_uuid(Uuid::new_v4())
}

/// Seed material for the non-deterministic parts of ingestion
pub fn random_seed() -> u64 {
    let bits = Uuid::new_v4().as_u128();
    (bits as u64) ^ ((bits >> 64) as u64)
}
