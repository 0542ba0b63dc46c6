//! Write acknowledgements returned to API callers after a store mutation.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertAck {
    pub acknowledged: bool,
    pub inserted_id: Option<Uuid>,
}

impl InsertAck {
    pub fn inserted(id: Uuid) -> Self {
        Self { acknowledged: true, inserted_id: Some(id) }
    }

    /// Write accepted but no new row was created (ignored duplicate).
    pub fn ignored() -> Self {
        Self { acknowledged: true, inserted_id: None }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAck {
    pub acknowledged: bool,
    pub matched_count: u64,
    pub modified_count: u64,
    pub upserted_id: Option<Uuid>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteAck {
    pub acknowledged: bool,
    pub deleted_count: u64,
}

impl DeleteAck {
    pub fn deleted(count: usize) -> Self {
        Self { acknowledged: true, deleted_count: count as u64 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_insert_ack_wire_shape() {
        let id = Uuid::new_v4();
        let body = serde_json::to_value(InsertAck::inserted(id)).unwrap();
        assert_eq!(body, json!({ "acknowledged": true, "insertedId": id }));

        let body = serde_json::to_value(InsertAck::ignored()).unwrap();
        assert_eq!(body, json!({ "acknowledged": true, "insertedId": null }));
    }

    #[test]
    fn test_delete_ack_wire_shape() {
        let body = serde_json::to_value(DeleteAck::deleted(1)).unwrap();
        assert_eq!(body, json!({ "acknowledged": true, "deletedCount": 1 }));
    }
}
