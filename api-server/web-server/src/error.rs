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
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WebServerError {
    #[error("Client error: {0}")]
    ClientError(#[from] WebServerClientError),
    #[error("Server error: {0}")]
    ServerError(#[from] WebServerServerError),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WebServerClientError {
    #[error("Bad request")]
    BadRequest,
    #[error("Script cannot be empty")]
    EmptyScript,
    #[error("{0}")]
    InvalidScript(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum WebServerServerError {
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for WebServerError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            WebServerError::ClientError(error) => (StatusCode::BAD_REQUEST, error.to_string()),
            WebServerError::ServerError(error) => {
                (StatusCode::INTERNAL_SERVER_ERROR, error.to_string())
            }
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
