// Copyright (c) 2021-2025 RBB S.r.l
// opensource@mintlayer.org
// SPDX-License-Identifier: MIT
// Licensed under the MIT License;
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
// https://github.com/mintlayer/mintlayer-core/blob/master/LICENSE
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
    Router,
};
use rstest::rstest;
use serde_json::{json, Value};
use tower::ServiceExt;

use script::Explainer;

use super::web_server;
use crate::{tracker::UsageTracker, WebServerState};

struct TestServer {
    _dir: tempfile::TempDir,
    app: Router,
}

impl TestServer {
    fn new() -> Self {
        let dir = tempfile::TempDir::new().unwrap();
        let tracker = UsageTracker::new(dir.path().join("visits.json"));
        let app = web_server(WebServerState::new(Explainer::default(), tracker));
        Self { _dir: dir, app }
    }

    async fn request(&self, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => request
                .header("content-type", "application/json")
                .body(Body::from(body.to_string())),
            None => request.body(Body::empty()),
        }
        .unwrap();

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.request(Method::GET, uri, None).await
    }

    async fn post(&self, uri: &str, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(body)).await
    }
}

#[tokio::test]
async fn health() {
    let server = TestServer::new();
    let (status, body) = server.get("/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "healthy", "service": "btc-script-explainer" }));
}

#[tokio::test]
async fn explain_p2pkh() {
    let server = TestServer::new();
    let script = "OP_DUP OP_HASH160 ab6807 OP_EQUALVERIFY OP_CHECKSIG";
    let (status, body) = server.post("/explain", json!({ "script": script })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["script"], script);
    assert_eq!(body["script_type"], "P2PKH (Pay-to-Public-Key-Hash)");
    assert_eq!(body["success"], true);
    assert_eq!(body["steps"].as_array().unwrap().len(), 5);
    assert_eq!(body["initial_stack"], json!(["<signature>", "<public_key>"]));
}

#[tokio::test]
async fn explain_failed_execution_is_not_a_client_error() {
    let server = TestServer::new();
    let (status, body) = server.post("/explain", json!({ "script": "0 OP_VERIFY" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
}

#[rstest]
#[case("", "Script cannot be empty")]
#[case("   ", "Script cannot be empty")]
#[case("OP_DUP ???", "invalid token: '???' - must be opcode (OP_*) or hex data")]
#[tokio::test]
async fn explain_rejects_bad_scripts(#[case] script: &str, #[case] error: &str) {
    let server = TestServer::new();
    let (status, body) = server.post("/explain", json!({ "script": script })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": error }));
}

#[tokio::test]
async fn opcode_info() {
    let server = TestServer::new();

    let (status, body) = server.get("/opcode/op_dup").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "opcode": "OP_DUP",
            "known": true,
            "description": "Duplicates the top stack item",
        })
    );

    let (_, body) = server.get("/opcode/OP_CAT").await;
    assert_eq!(body["known"], false);
    assert_eq!(body["description"], "Unknown opcode");
}

#[tokio::test]
async fn opcode_list() {
    let server = TestServer::new();
    let (status, body) = server.get("/opcodes").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["supported_opcodes"]["OP_DUP"], "Duplicates the top stack item");
    assert!(body["note"].is_string());
}

#[tokio::test]
async fn tracking_flow() {
    let server = TestServer::new();

    let visit = json!({ "session_id": "s1", "event_type": "page_visit" });
    let (status, body) = server.post("/track", visit).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "success": true }));

    let explained = json!({ "session_id": "s2", "event_type": "script_explained" });
    assert_eq!(server.post("/track", explained).await.1["success"], true);

    let bogus = json!({ "session_id": "s1", "event_type": "clicked" });
    assert_eq!(server.post("/track", bogus).await.1["success"], false);

    let (status, body) = server.get("/stats").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "lifetime_views": 1,
            "total_scripts_explained": 1,
            "current_active_users": 2,
        })
    );

    let (status, body) = server.get("/activity").await;
    assert_eq!(status, StatusCode::OK);
    let events = body["recent_events"].as_array().unwrap();
    assert_eq!(events.len(), 2);
    assert!(events.iter().all(|e| e.get("session_id").is_none()));
}

#[tokio::test]
async fn unknown_route() {
    let server = TestServer::new();
    let (status, body) = server.get("/no/such/route").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "error": "Bad request" }));
}
