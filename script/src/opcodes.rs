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

//! Opcode registry
//!
//! The set of opcodes understood by the explainer is closed. Every variant of [Opcode] has a
//! handler in the interpreter (enforced by an exhaustive match) and a description here.

use std::collections::BTreeMap;

use serde::Serialize;
use strum::IntoEnumIterator;

/// Prefix reserved for opcode mnemonics.
pub const OPCODE_PREFIX: &str = "OP_";

/// Opcodes with a symbolic handler.
#[allow(non_camel_case_types)]
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
    strum::IntoStaticStr,
)]
pub enum Opcode {
    // Constants
    OP_0,
    OP_FALSE,
    OP_1NEGATE,
    OP_1,
    OP_TRUE,
    OP_2,
    OP_3,
    OP_4,
    OP_5,
    OP_6,
    OP_7,
    OP_8,
    OP_9,
    OP_10,
    OP_11,
    OP_12,
    OP_13,
    OP_14,
    OP_15,
    OP_16,

    // Flow control
    OP_NOP,
    OP_IF,
    OP_NOTIF,
    OP_ELSE,
    OP_ENDIF,
    OP_VERIFY,
    OP_RETURN,

    // Stack
    OP_2DROP,
    OP_2DUP,
    OP_3DUP,
    OP_DEPTH,
    OP_DROP,
    OP_DUP,
    OP_NIP,
    OP_OVER,
    OP_ROT,
    OP_SWAP,
    OP_TUCK,
    OP_SIZE,

    // Equality
    OP_EQUAL,
    OP_EQUALVERIFY,

    // Arithmetic
    OP_1ADD,
    OP_1SUB,
    OP_NEGATE,
    OP_ABS,
    OP_NOT,
    OP_0NOTEQUAL,
    OP_ADD,
    OP_SUB,
    OP_BOOLAND,
    OP_BOOLOR,
    OP_NUMEQUAL,
    OP_NUMEQUALVERIFY,
    OP_NUMNOTEQUAL,
    OP_LESSTHAN,
    OP_GREATERTHAN,
    OP_LESSTHANOREQUAL,
    OP_GREATERTHANOREQUAL,
    OP_MIN,
    OP_MAX,
    OP_WITHIN,

    // Crypto
    OP_RIPEMD160,
    OP_SHA256,
    OP_HASH160,
    OP_HASH256,
    OP_CHECKSIG,
    OP_CHECKSIGVERIFY,
    OP_CHECKMULTISIG,
    OP_CHECKMULTISIGVERIFY,
}

impl Opcode {
    /// Look up an opcode by its mnemonic, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        name.to_ascii_uppercase().parse().ok()
    }

    /// The mnemonic, e.g. `OP_DUP`.
    pub fn name(self) -> &'static str {
        self.into()
    }

    /// The mnemonic without the `OP_` prefix. Used to name symbolic composite values.
    pub fn symbol(self) -> &'static str {
        let name = self.name();
        name.strip_prefix(OPCODE_PREFIX).unwrap_or(name)
    }

    /// Value pushed by a constant opcode.
    pub fn constant(self) -> Option<i64> {
        match self {
            Opcode::OP_FALSE => Some(0),
            Opcode::OP_TRUE => Some(1),
            Opcode::OP_1NEGATE => Some(-1),
            other => other.small_number(),
        }
    }

    /// Value of the `OP_0` .. `OP_16` opcodes. Aliases such as `OP_TRUE` are not included.
    pub fn small_number(self) -> Option<i64> {
        let n = match self {
            Opcode::OP_0 => 0,
            Opcode::OP_1 => 1,
            Opcode::OP_2 => 2,
            Opcode::OP_3 => 3,
            Opcode::OP_4 => 4,
            Opcode::OP_5 => 5,
            Opcode::OP_6 => 6,
            Opcode::OP_7 => 7,
            Opcode::OP_8 => 8,
            Opcode::OP_9 => 9,
            Opcode::OP_10 => 10,
            Opcode::OP_11 => 11,
            Opcode::OP_12 => 12,
            Opcode::OP_13 => 13,
            Opcode::OP_14 => 14,
            Opcode::OP_15 => 15,
            Opcode::OP_16 => 16,
            _ => return None,
        };
        Some(n)
    }

    /// Number of stack items the handler needs before it can run.
    pub fn min_depth(self) -> usize {
        use Opcode::*;
        match self {
            OP_0 | OP_FALSE | OP_1NEGATE | OP_1 | OP_TRUE | OP_2 | OP_3 | OP_4 | OP_5 | OP_6
            | OP_7 | OP_8 | OP_9 | OP_10 | OP_11 | OP_12 | OP_13 | OP_14 | OP_15 | OP_16 => 0,
            OP_NOP | OP_ELSE | OP_ENDIF | OP_RETURN | OP_DEPTH => 0,
            OP_IF | OP_NOTIF | OP_VERIFY => 1,
            OP_DROP | OP_DUP | OP_SIZE => 1,
            OP_1ADD | OP_1SUB | OP_NEGATE | OP_ABS | OP_NOT | OP_0NOTEQUAL => 1,
            OP_RIPEMD160 | OP_SHA256 | OP_HASH160 | OP_HASH256 => 1,
            OP_2DROP | OP_2DUP | OP_NIP | OP_OVER | OP_SWAP | OP_TUCK => 2,
            OP_EQUAL | OP_EQUALVERIFY => 2,
            OP_ADD | OP_SUB | OP_BOOLAND | OP_BOOLOR | OP_NUMEQUAL | OP_NUMEQUALVERIFY
            | OP_NUMNOTEQUAL | OP_LESSTHAN | OP_GREATERTHAN | OP_LESSTHANOREQUAL
            | OP_GREATERTHANOREQUAL | OP_MIN | OP_MAX => 2,
            OP_CHECKSIG | OP_CHECKSIGVERIFY => 2,
            OP_3DUP | OP_ROT | OP_WITHIN => 3,
            // Simplified: the M/N structure is not inspected.
            OP_CHECKMULTISIG | OP_CHECKMULTISIGVERIFY => 4,
        }
    }

    /// Whether the opcode leaves the stack shallower than it found it.
    pub fn consumes_items(self) -> bool {
        use Opcode::*;
        matches!(
            self,
            OP_IF
                | OP_NOTIF
                | OP_VERIFY
                | OP_2DROP
                | OP_DROP
                | OP_NIP
                | OP_EQUAL
                | OP_EQUALVERIFY
                | OP_ADD
                | OP_SUB
                | OP_BOOLAND
                | OP_BOOLOR
                | OP_NUMEQUAL
                | OP_NUMEQUALVERIFY
                | OP_NUMNOTEQUAL
                | OP_LESSTHAN
                | OP_GREATERTHAN
                | OP_LESSTHANOREQUAL
                | OP_GREATERTHANOREQUAL
                | OP_MIN
                | OP_MAX
                | OP_WITHIN
                | OP_CHECKSIG
                | OP_CHECKSIGVERIFY
                | OP_CHECKMULTISIG
                | OP_CHECKMULTISIGVERIFY
        )
    }

    /// Human readable description of what the opcode does.
    pub fn description(self) -> &'static str {
        use Opcode::*;
        match self {
            OP_0 | OP_FALSE => "Pushes 0 (an empty array, which is false) onto the stack",
            OP_1NEGATE => "Pushes the number -1 onto the stack",
            OP_1 | OP_TRUE => "Pushes the number 1 (true) onto the stack",
            OP_2 => "Pushes the number 2 onto the stack",
            OP_3 => "Pushes the number 3 onto the stack",
            OP_4 => "Pushes the number 4 onto the stack",
            OP_5 => "Pushes the number 5 onto the stack",
            OP_6 => "Pushes the number 6 onto the stack",
            OP_7 => "Pushes the number 7 onto the stack",
            OP_8 => "Pushes the number 8 onto the stack",
            OP_9 => "Pushes the number 9 onto the stack",
            OP_10 => "Pushes the number 10 onto the stack",
            OP_11 => "Pushes the number 11 onto the stack",
            OP_12 => "Pushes the number 12 onto the stack",
            OP_13 => "Pushes the number 13 onto the stack",
            OP_14 => "Pushes the number 14 onto the stack",
            OP_15 => "Pushes the number 15 onto the stack",
            OP_16 => "Pushes the number 16 onto the stack",

            OP_NOP => "Does nothing",
            OP_IF => "Executes the following statements if the top stack item is true (removes it)",
            OP_NOTIF => {
                "Executes the following statements if the top stack item is false (removes it)"
            }
            OP_ELSE => "Executes the following statements if the preceding IF branch was not taken",
            OP_ENDIF => "Ends an IF/ELSE block",
            OP_VERIFY => "Removes top stack item and fails if it's FALSE or zero",
            OP_RETURN => "Marks transaction output as invalid (used for data embedding)",

            OP_2DROP => "Removes the top two stack items",
            OP_2DUP => "Duplicates the top two stack items",
            OP_3DUP => "Duplicates the top three stack items",
            OP_DEPTH => "Pushes the number of stack items onto the stack",
            OP_DROP => "Removes the top stack item",
            OP_DUP => "Duplicates the top stack item",
            OP_NIP => "Removes the second-to-top stack item",
            OP_OVER => "Copies the second-to-top stack item to the top",
            OP_ROT => "Moves the third item from the top to the top of the stack",
            OP_SWAP => "Swaps the top two stack items",
            OP_TUCK => "Copies the top stack item below the second-to-top item",
            OP_SIZE => "Pushes the byte length of the top stack item without removing it",

            OP_EQUAL => "Compares top two stack items, pushes TRUE if equal, FALSE otherwise",
            OP_EQUALVERIFY => "Same as OP_EQUAL, but removes result and fails if FALSE",

            OP_1ADD => "Adds 1 to the top stack item",
            OP_1SUB => "Subtracts 1 from the top stack item",
            OP_NEGATE => "Flips the sign of the top stack item",
            OP_ABS => "Replaces the top stack item with its absolute value",
            OP_NOT => "Replaces 0 with 1 and any other value with 0",
            OP_0NOTEQUAL => "Replaces 0 with 0 and any other value with 1",
            OP_ADD => "Pops two items and pushes their sum",
            OP_SUB => "Pops two items and pushes the second minus the top",
            OP_BOOLAND => "Pushes 1 if both of the top two items are true, 0 otherwise",
            OP_BOOLOR => "Pushes 1 if either of the top two items is true, 0 otherwise",
            OP_NUMEQUAL => "Pushes 1 if the top two numbers are equal, 0 otherwise",
            OP_NUMEQUALVERIFY => "Same as OP_NUMEQUAL, but removes result and fails if FALSE",
            OP_NUMNOTEQUAL => "Pushes 1 if the top two numbers are not equal, 0 otherwise",
            OP_LESSTHAN => "Pushes 1 if the second number is less than the top one",
            OP_GREATERTHAN => "Pushes 1 if the second number is greater than the top one",
            OP_LESSTHANOREQUAL => {
                "Pushes 1 if the second number is less than or equal to the top one"
            }
            OP_GREATERTHANOREQUAL => {
                "Pushes 1 if the second number is greater than or equal to the top one"
            }
            OP_MIN => "Pushes the smaller of the top two numbers",
            OP_MAX => "Pushes the larger of the top two numbers",
            OP_WITHIN => "Pushes 1 if x is within the range [min, max), 0 otherwise",

            OP_RIPEMD160 => "Performs RIPEMD160(x) on the top stack item",
            OP_SHA256 => "Performs SHA256(x) on the top stack item",
            OP_HASH160 => "Performs RIPEMD160(SHA256(x)) on the top stack item",
            OP_HASH256 => "Performs SHA256(SHA256(x)) on the top stack item",
            OP_CHECKSIG => "Verifies a signature against a public key",
            OP_CHECKSIGVERIFY => "Same as OP_CHECKSIG, but removes result and fails if FALSE",
            OP_CHECKMULTISIG => "Verifies multiple signatures against multiple public keys",
            OP_CHECKMULTISIGVERIFY => {
                "Same as OP_CHECKMULTISIG, but removes result and fails if FALSE"
            }
        }
    }
}

/// Whether a token has the shape of an opcode mnemonic, registered or not.
pub fn looks_like_opcode(token: &str) -> bool {
    token
        .get(..OPCODE_PREFIX.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(OPCODE_PREFIX))
}

/// Documentation record for one opcode.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct OpcodeInfo {
    #[serde(rename = "opcode")]
    pub name: String,
    pub known: bool,
    pub description: String,
}

/// Describe an opcode by name. Unregistered names are reported as unknown.
pub fn describe_opcode(name: &str) -> OpcodeInfo {
    let normalized = name.to_ascii_uppercase();
    match Opcode::from_name(&normalized) {
        Some(opcode) => OpcodeInfo {
            name: normalized,
            known: true,
            description: opcode.description().to_owned(),
        },
        None => OpcodeInfo {
            name: normalized,
            known: false,
            description: "Unknown opcode".to_owned(),
        },
    }
}

/// All registered opcodes with their descriptions.
pub fn list_opcodes() -> BTreeMap<&'static str, &'static str> {
    Opcode::iter().map(|opcode| (opcode.name(), opcode.description())).collect()
}
