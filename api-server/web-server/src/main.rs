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

use clap::Parser;
use logging::log;
use script::Explainer;
use web_server::{config::WebServerConfig, tracker::UsageTracker, WebServerState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info");
    }

    logging::init_logging();

    let args = WebServerConfig::parse();
    log::info!("Command line options: {args:?}");

    let tracker = if args.disable_tracking {
        UsageTracker::disabled()
    } else {
        UsageTracker::new(&args.usage_log)
    };
    let state = WebServerState::new(Explainer::default(), tracker);

    let listener = tokio::net::TcpListener::bind(*args.address).await?;
    log::info!("Listening on {}", listener.local_addr()?);

    axum::serve(listener, web_server::api::web_server(state)).await?;

    Ok(())
}
