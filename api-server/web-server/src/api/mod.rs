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

mod explain;
mod tracking;

use axum::{
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tower_http_axum::cors::CorsLayer;

use crate::{
    error::{WebServerClientError, WebServerError},
    WebServerState,
};

pub const SERVICE_NAME: &str = "btc-script-explainer";

#[allow(clippy::unused_async)]
async fn bad_request() -> Result<(), WebServerError> {
    Err(WebServerClientError::BadRequest)?
}

#[allow(clippy::unused_async)]
async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": SERVICE_NAME,
    }))
}

pub fn routes() -> Router<WebServerState> {
    let router = Router::new().route("/health", get(health));

    let router = router
        .route("/explain", post(explain::explain))
        .route("/opcode/:opcode", get(explain::opcode))
        .route("/opcodes", get(explain::opcodes));

    router
        .route("/track", post(tracking::track))
        .route("/stats", get(tracking::stats))
        .route("/activity", get(tracking::activity))
}

pub fn web_server(state: WebServerState) -> Router {
    routes()
        .fallback(bad_request)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests;
