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

use crate::opcodes::Opcode;

/// Script text could not be turned into a token sequence.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("empty script")]
    EmptyScript,

    #[error("invalid token: '{0}' - must be opcode (OP_*) or hex data")]
    InvalidToken(String),
}

/// Expected failure of a single opcode handler.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ExecError {
    #[error(
        "Stack underflow: {opcode} requires at least {required} item(s), found {available}"
    )]
    StackUnderflow {
        opcode: Opcode,
        required: usize,
        available: usize,
    },

    #[error("Verification failed: {opcode} found '{value}', which is false")]
    VerifyFailed { opcode: Opcode, value: String },
}

/// Unexpected condition hit while handling a token. Execution halts at the faulting step.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    #[error("numeric overflow in {0}")]
    NumericOverflow(Opcode),
}
