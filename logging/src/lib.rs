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

mod log_style;
mod utils;

use std::{io::IsTerminal, sync::Once};

use tracing_subscriber::{fmt, EnvFilter};

pub use log;

pub use log_style::{get_log_style_from_env, LogStyle, LogStyleParseError, TextColoring};
pub use utils::{get_from_env, GetFromEnvError};

/// Env var selecting the log output style: `text`, `text-colored`, `text-uncolored` or `json`.
pub const LOG_STYLE_ENV_VAR_NAME: &str = "EXPLAINER_LOG_STYLE";

static INITIALIZE_LOGGER_ONCE_FLAG: Once = Once::new();

/// Install the global logger writing to stderr, filtered by `RUST_LOG`.
///
/// Records emitted through the [log] facade are forwarded to the `tracing` subscriber. Only the
/// first call has an effect.
pub fn init_logging() {
    INITIALIZE_LOGGER_ONCE_FLAG.call_once(|| {
        let (style, style_error) = match get_log_style_from_env(LOG_STYLE_ENV_VAR_NAME) {
            Ok(style) => (style.unwrap_or_default(), None),
            Err(err) => (LogStyle::default(), Some(err)),
        };

        init_with_style(style);

        if let Some(err) = style_error {
            log::warn!("Ignoring {LOG_STYLE_ENV_VAR_NAME}: {err}");
        }
    });
}

fn init_with_style(style: LogStyle) {
    let builder = fmt().with_env_filter(EnvFilter::from_default_env()).with_writer(std::io::stderr);

    // Fails if a global logger is already set, which is fine.
    let _ = match style {
        LogStyle::Json => builder.json().try_init(),
        LogStyle::Text(coloring) => builder
            .with_ansi(coloring.use_ansi(std::io::stderr().is_terminal()))
            .try_init(),
    };
}
