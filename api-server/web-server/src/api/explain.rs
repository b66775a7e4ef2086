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
    extract::{Path, State},
    response::IntoResponse,
    Json,
};
use logging::log;
use serde::Deserialize;
use serde_json::json;

use script::{describe_opcode, list_opcodes, Classification};

use crate::{
    error::{WebServerClientError, WebServerError},
    WebServerState,
};

#[derive(Debug, Deserialize)]
pub struct ExplainRequest {
    pub script: String,
}

#[allow(clippy::unused_async)]
pub async fn explain(
    State(state): State<WebServerState>,
    Json(request): Json<ExplainRequest>,
) -> Result<impl IntoResponse, WebServerError> {
    if request.script.trim().is_empty() {
        return Err(WebServerClientError::EmptyScript.into());
    }

    let explanation = state.explainer.explain(&request.script);

    if explanation.script_type == Classification::Error {
        let message = explanation.error.unwrap_or_else(|| "Invalid script".to_owned());
        log::debug!("Rejected script: {message}");
        return Err(WebServerClientError::InvalidScript(message).into());
    }

    Ok(Json(explanation))
}

#[allow(clippy::unused_async)]
pub async fn opcode(Path(opcode): Path<String>) -> impl IntoResponse {
    Json(describe_opcode(&opcode))
}

#[allow(clippy::unused_async)]
pub async fn opcodes() -> impl IntoResponse {
    Json(json!({
        "supported_opcodes": list_opcodes(),
        "note": "This tool supports a subset of Bitcoin Script opcodes for educational purposes.",
    }))
}
