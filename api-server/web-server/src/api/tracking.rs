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

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use serde::Deserialize;
use serde_json::json;

use crate::{
    error::{WebServerError, WebServerServerError},
    tracker::{UsageTracker, DEFAULT_ACTIVITY_LIMIT},
    WebServerState,
};

#[derive(Debug, Deserialize)]
pub struct TrackRequest {
    pub session_id: String,
    pub event_type: String,
}

/// Run blocking tracker file access off the async executor.
async fn with_tracker<T, F>(tracker: Arc<UsageTracker>, f: F) -> Result<T, WebServerError>
where
    T: Send + 'static,
    F: FnOnce(&UsageTracker) -> T + Send + 'static,
{
    tokio::task::spawn_blocking(move || f(&tracker))
        .await
        .map_err(|e| WebServerServerError::Internal(e.to_string()).into())
}

pub async fn track(
    State(state): State<WebServerState>,
    Json(request): Json<TrackRequest>,
) -> Result<impl IntoResponse, WebServerError> {
    let success = with_tracker(state.tracker, move |tracker| {
        tracker.add_event(&request.session_id, &request.event_type)
    })
    .await?;

    Ok(Json(json!({ "success": success })))
}

pub async fn stats(
    State(state): State<WebServerState>,
) -> Result<impl IntoResponse, WebServerError> {
    let stats = with_tracker(state.tracker, UsageTracker::stats).await?;
    Ok(Json(stats))
}

pub async fn activity(
    State(state): State<WebServerState>,
) -> Result<impl IntoResponse, WebServerError> {
    let activity = with_tracker(state.tracker, |tracker| {
        tracker.recent_activity(DEFAULT_ACTIVITY_LIMIT)
    })
    .await?;
    Ok(Json(activity))
}
