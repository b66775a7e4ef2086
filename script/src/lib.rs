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

//! This library explains Bitcoin script programs written in the textual ASM form. It tokenizes
//! the text, recognizes standard output templates and then simulates the program on a symbolic
//! stack, producing a trace of every instruction together with a human readable rationale.
//!
//! No cryptography is performed. Hashes are represented as wrapper strings such as
//! `HASH160(x)`, signature checks are always assumed to succeed and numeric opcodes compute a
//! concrete value only when all of their operands are integers.
//!
//! ## Example
//!
//! ```
//! use script::{explain, ScriptType};
//!
//! let explanation = explain("OP_DUP OP_HASH160 ab6807 OP_EQUALVERIFY OP_CHECKSIG");
//!
//! assert!(explanation.success);
//! assert_eq!(explanation.script_type.script_type(), Some(&ScriptType::P2PKH));
//! assert_eq!(explanation.steps.len(), 5);
//! assert_eq!(
//!     explanation.steps.last().unwrap().stack_after,
//!     vec!["TRUE (symbolic signature verification)".to_string()],
//! );
//! ```

mod detector;
mod engine;
mod error;
mod explain;
mod interpreter;
pub mod opcodes;
mod preload;
mod stack;
mod token;
#[cfg(test)]
mod test;

pub use detector::{detect_script_type, Detection, MultisigParams, ScriptType, ScriptTypeInfo};
pub use engine::{ExecutionContext, ExecutionOutcome, Recovery, StepTrace};
pub use error::{ExecError, Fault, ParseError};
pub use explain::{explain, Classification, Explainer, ExplainerConfig, Explanation};
pub use interpreter::{execute_opcode, execute_token, push_data, OpcodeEffect};
pub use opcodes::{describe_opcode, list_opcodes, Opcode, OpcodeInfo};
pub use preload::{initial_stack, Preload};
pub use stack::{Item, Stack};
pub use token::{parse_script, tokenize_script, ParsedScript, ScriptComponents, Token, TokenKind};
