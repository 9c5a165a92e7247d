// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde_json::json;

use crate::{BulkApproveRequest, BulkRejectResponse, FailedItem};

#[test]
fn test_bulk_response_uses_verb_field_names() {
    let response: BulkRejectResponse = BulkRejectResponse {
        total_requested: 2,
        total_rejected: 1,
        rejected: vec![String::from("usr-1")],
        failed: vec![FailedItem {
            user_id: String::from("usr-2"),
            error: String::from("already blocked"),
        }],
    };

    assert_eq!(
        serde_json::to_value(&response).unwrap(),
        json!({
            "total_requested": 2,
            "total_rejected": 1,
            "rejected": ["usr-1"],
            "failed": [{"user_id": "usr-2", "error": "already blocked"}],
        })
    );
}

#[test]
fn test_approve_request_optional_fields() {
    let request: BulkApproveRequest =
        serde_json::from_value(json!({"user_ids": ["usr-1", "usr-2"]})).unwrap();

    assert_eq!(request.user_ids.len(), 2);
    assert_eq!(request.role, None);
    assert_eq!(request.department_id, None);
}
