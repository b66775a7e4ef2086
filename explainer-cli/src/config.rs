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

use std::path::PathBuf;

use clap::Parser;
use utils::clap_utils;

use script::ExplainerConfig;

#[derive(Parser, Debug)]
#[clap(mut_args(clap_utils::env_adder("SCRIPT_EXPLAINER")))]
#[clap(version, about = "Educational step-by-step explainer for Bitcoin script (ASM format)")]
#[clap(after_help = "Examples:
  explainer-cli \"OP_DUP OP_HASH160 ab6807 OP_EQUALVERIFY OP_CHECKSIG\"
  explainer-cli --file myscript.txt
  explainer-cli --interactive

This is an educational tool. It uses symbolic execution and does not perform real cryptographic
operations.")]
pub struct ExplainerCliArgs {
    /// Bitcoin script in ASM format
    pub script: Option<String>,

    /// Read the script from a file
    #[clap(short, long, conflicts_with = "script")]
    pub file: Option<PathBuf>,

    /// Prompt for scripts until quit
    #[clap(short, long)]
    pub interactive: bool,

    /// Do not print the banner
    #[clap(short, long)]
    pub quiet: bool,

    /// Print the explanation as JSON
    #[clap(long)]
    pub json: bool,

    /// Do not assume missing stack inputs for scripts of unknown type
    #[clap(long)]
    pub strict: bool,

    /// Start execution from an empty stack
    #[clap(long)]
    pub no_preload: bool,

    /// Disable colored output
    #[clap(long)]
    pub no_color: bool,
}

impl ExplainerCliArgs {
    pub fn explainer_config(&self) -> ExplainerConfig {
        ExplainerConfig {
            forgiving: !self.strict,
            preload: !self.no_preload,
        }
    }
}
