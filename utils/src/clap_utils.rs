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

use clap::Arg;
use heck::ToShoutySnakeCase;

/// Make every argument of a command also settable through an environment variable.
///
/// The variable name is the prefix followed by the argument id in shouty snake case, so
/// `--usage-log` with prefix `MY_APP` becomes `MY_APP_USAGE_LOG`. Use it as
/// `#[clap(mut_args(clap_utils::env_adder("MY_APP")))]`.
pub fn env_adder(prefix: &str) -> impl FnMut(Arg) -> Arg + '_ {
    move |arg| {
        let env_name = env_var_name(prefix, arg.get_id().as_str());
        arg.env(env_name)
    }
}

fn env_var_name(prefix: &str, arg_id: &str) -> String {
    format!("{prefix}_{}", arg_id.to_shouty_snake_case())
}
