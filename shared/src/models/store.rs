//! Store Model
//!
//! Stores are owned by an external collaborator; the engine only needs to
//! know that a store exists and who owns it.

use serde::{Deserialize, Serialize};

/// Minimal view of a store
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreRef {
    pub id: i64,
    pub owner_id: i64,
    pub name: String,
}

impl StoreRef {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.owner_id == user_id
    }
}
