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

use std::{net::SocketAddr, ops::Deref, path::PathBuf, str::FromStr};

use clap::Parser;

use utils::clap_utils;

const USAGE_LOG_FILE: &str = "visits.json";

#[derive(Debug, Parser)]
#[clap(mut_args(clap_utils::env_adder("SCRIPT_EXPLAINER_WEB")))]
#[clap(about = "HTTP API explaining Bitcoin scripts step by step")]
pub struct WebServerConfig {
    /// The network address and port to listen on
    ///
    /// Format: `<ip>:<port>`
    #[clap(long, default_value_t)]
    pub address: ListenAddress,

    /// File where anonymous usage events are stored as a JSON array
    #[clap(long, default_value = USAGE_LOG_FILE)]
    pub usage_log: PathBuf,

    /// Do not record usage events
    #[clap(long)]
    pub disable_tracking: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ListenAddress {
    socket: SocketAddr,
}

impl Default for ListenAddress {
    fn default() -> Self {
        Self {
            socket: SocketAddr::from(([127, 0, 0, 1], 8000)),
        }
    }
}

impl Deref for ListenAddress {
    type Target = SocketAddr;

    fn deref(&self) -> &Self::Target {
        &self.socket
    }
}

impl FromStr for ListenAddress {
    type Err = std::net::AddrParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self { socket: s.parse()? })
    }
}

impl std::fmt::Display for ListenAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.socket, f)
    }
}
