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

pub mod api;
pub mod config;
pub mod error;
pub mod tracker;

use std::sync::Arc;

pub use error::WebServerError;

use script::Explainer;
use tracker::UsageTracker;

#[derive(Debug, Clone)]
pub struct WebServerState {
    pub explainer: Arc<Explainer>,
    pub tracker: Arc<UsageTracker>,
}

impl WebServerState {
    pub fn new(explainer: Explainer, tracker: UsageTracker) -> Self {
        Self {
            explainer: Arc::new(explainer),
            tracker: Arc::new(tracker),
        }
    }
}
