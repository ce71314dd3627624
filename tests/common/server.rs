//! Mock console API

use bulk_import::config::EndpointConfig;
use serde_json::{Value, json};
use std::collections::HashSet;
use wiremock::{MockServer, Request, Respond, ResponseTemplate};

pub const BULK_CREATE_PATH: &str = "/api/admin/users/bulk-import";
pub const VALIDATE_PATH: &str = "/api/admin/users/bulk-validate";

/// Endpoint configuration pointing at a mock server
pub fn endpoint_for(server: &MockServer) -> EndpointConfig {
    EndpointConfig::new(server.uri())
}

/// Answers bulk requests the way the console does: one outcome per user,
/// rejecting usernames listed in `existing`.
#[derive(Debug, Clone, Default)]
pub struct ConsoleResponder {
    existing: HashSet<String>,
}

impl ConsoleResponder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_existing(mut self, username: &str) -> Self {
        self.existing.insert(username.to_string());
        self
    }
}

impl Respond for ConsoleResponder {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let body: Value = match serde_json::from_slice(&request.body) {
            Ok(body) => body,
            Err(_) => {
                return ResponseTemplate::new(400)
                    .set_body_json(json!({ "success": false, "message": "invalid JSON" }));
            }
        };

        let users = body["users"].as_array().cloned().unwrap_or_default();
        let mut success_count = 0;
        let details: Vec<Value> = users
            .iter()
            .enumerate()
            .map(|(i, user)| {
                let username = user["username"].as_str().unwrap_or_default().to_string();
                if self.existing.contains(&username) {
                    json!({ "identifier": username, "success": false, "error": "Username already exists" })
                } else {
                    success_count += 1;
                    json!({ "identifier": username, "success": true, "data": { "id": format!("id-{}", i) } })
                }
            })
            .collect();

        ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {
                "successCount": success_count,
                "failedCount": users.len() - success_count,
                "totalCount": users.len(),
                "details": details,
            }
        }))
    }
}
