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

//! Recognition of standard output script templates

use std::fmt;

use serde::Serialize;

use crate::{opcodes::Opcode, token::Token};

/// Parameters of an M-of-N multisig script.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct MultisigParams {
    pub required: u8,
    pub total: u8,
}

impl fmt::Display for MultisigParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-of-{}", self.required, self.total)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ScriptType {
    P2PKH,
    P2SH,
    P2PK,
    /// Multisig, with parameters if the script follows the standard layout.
    Multisig(Option<MultisigParams>),
    NullData,
    P2WPKH,
    P2WSH,
    P2TR,
    Unknown,
}

/// Reference information about a script type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScriptTypeInfo {
    pub name: &'static str,
    pub abbreviation: &'static str,
    pub usage: &'static str,
    pub security: &'static str,
    pub example_address_prefix: &'static str,
}

impl ScriptType {
    pub fn label(&self) -> &'static str {
        match self {
            Self::P2PKH => "P2PKH (Pay-to-Public-Key-Hash)",
            Self::P2SH => "P2SH (Pay-to-Script-Hash)",
            Self::P2PK => "P2PK (Pay-to-Public-Key)",
            Self::Multisig(_) => "Multisig (Multi-signature)",
            Self::NullData => "Null Data (OP_RETURN)",
            Self::P2WPKH => "P2WPKH (Pay-to-Witness-Public-Key-Hash)",
            Self::P2WSH => "P2WSH (Pay-to-Witness-Script-Hash)",
            Self::P2TR => "P2TR (Pay-to-Taproot)",
            Self::Unknown => "Unknown / Custom Script",
        }
    }

    pub fn is_unknown(&self) -> bool {
        *self == Self::Unknown
    }

    pub fn info(&self) -> ScriptTypeInfo {
        let (name, abbreviation, usage, security, example_address_prefix) = match self {
            Self::P2PKH => (
                "Pay-to-Public-Key-Hash",
                "P2PKH",
                "Most common type for regular Bitcoin addresses (starting with 1)",
                "Requires knowledge of private key to spend",
                "1",
            ),
            Self::P2SH => (
                "Pay-to-Script-Hash",
                "P2SH",
                "Used for multisig, SegWit wrapped, and complex scripts",
                "Script conditions must be satisfied to spend",
                "3",
            ),
            Self::P2PK => (
                "Pay-to-Public-Key",
                "P2PK",
                "Early Bitcoin transactions, now rarely used",
                "Less private than P2PKH as pubkey is exposed",
                "N/A (no address format)",
            ),
            Self::Multisig(_) => (
                "Multi-signature",
                "Multisig",
                "Requires M-of-N signatures to spend",
                "Enhanced security through key distribution",
                "Usually wrapped in P2SH",
            ),
            Self::NullData => (
                "Null Data / OP_RETURN",
                "OP_RETURN",
                "Embedding arbitrary data in the blockchain",
                "Provably unspendable output",
                "N/A (not spendable)",
            ),
            Self::P2WPKH => (
                "Pay-to-Witness-Public-Key-Hash",
                "P2WPKH",
                "Native SegWit single-key addresses",
                "Signature and public key are provided in the witness",
                "bc1q",
            ),
            Self::P2WSH => (
                "Pay-to-Witness-Script-Hash",
                "P2WSH",
                "Native SegWit scripts such as multisig",
                "Witness script conditions must be satisfied to spend",
                "bc1q",
            ),
            Self::P2TR => (
                "Pay-to-Taproot",
                "P2TR",
                "Taproot outputs spendable by key path or script path",
                "Schnorr signatures; unused script paths stay private",
                "bc1p",
            ),
            Self::Unknown => (
                "Unknown / Custom",
                "Custom",
                "Non-standard script patterns",
                "Depends on script logic",
                "N/A",
            ),
        };
        ScriptTypeInfo {
            name,
            abbreviation,
            usage,
            security,
            example_address_prefix,
        }
    }
}

impl fmt::Display for ScriptType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Detected script type along with a sentence describing it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Detection {
    pub script_type: ScriptType,
    pub description: String,
}

impl Detection {
    fn new(script_type: ScriptType, description: impl Into<String>) -> Self {
        Self {
            script_type,
            description: description.into(),
        }
    }
}

/// Token shape used to match templates.
#[derive(Clone, Copy)]
enum Pat {
    Op(Opcode),
    Data,
    HexLen(usize),
}

impl Pat {
    fn matches(self, token: &Token) -> bool {
        match self {
            Pat::Op(opcode) => token.opcode() == Some(opcode),
            Pat::Data => token.is_data(),
            Pat::HexLen(len) => token.hex_digits().is_some_and(|d| d.len() == len),
        }
    }
}

fn matches_exactly(tokens: &[Token], pattern: &[Pat]) -> bool {
    tokens.len() == pattern.len() && tokens.iter().zip(pattern).all(|(t, p)| p.matches(t))
}

pub(crate) fn is_p2pkh(tokens: &[Token]) -> bool {
    use Opcode::*;
    matches_exactly(
        tokens,
        &[
            Pat::Op(OP_DUP),
            Pat::Op(OP_HASH160),
            Pat::Data,
            Pat::Op(OP_EQUALVERIFY),
            Pat::Op(OP_CHECKSIG),
        ],
    )
}

pub(crate) fn is_p2sh(tokens: &[Token]) -> bool {
    matches_exactly(
        tokens,
        &[Pat::Op(Opcode::OP_HASH160), Pat::Data, Pat::Op(Opcode::OP_EQUAL)],
    )
}

pub(crate) fn is_p2pk(tokens: &[Token]) -> bool {
    matches_exactly(tokens, &[Pat::Data, Pat::Op(Opcode::OP_CHECKSIG)])
}

/// Bare multisig: `M <keys...> N OP_CHECKMULTISIG`. The key count is not checked against N.
fn multisig_params(tokens: &[Token]) -> Option<MultisigParams> {
    let [first, .., n_token, last] = tokens else {
        return None;
    };
    if tokens.len() < 4 || last.opcode() != Some(Opcode::OP_CHECKMULTISIG) {
        return None;
    }
    let required = u8::try_from(first.small_number()?).ok()?;
    let total = u8::try_from(n_token.small_number()?).ok()?;
    (0 < required && required <= total).then_some(MultisigParams { required, total })
}

fn contains(tokens: &[Token], opcode: Opcode) -> bool {
    tokens.iter().any(|t| t.opcode() == Some(opcode))
}

/// Classify a token sequence against the known output templates. First match wins.
pub fn detect_script_type(tokens: &[Token]) -> Detection {
    use ScriptType as St;

    let Some(first) = tokens.first() else {
        return Detection::new(St::Unknown, "Empty script");
    };

    if first.opcode() == Some(Opcode::OP_RETURN) {
        return Detection::new(
            St::NullData,
            "This is a null data output used for embedding data in the blockchain. \
             It is provably unspendable.",
        );
    }

    if is_p2pkh(tokens) {
        return Detection::new(
            St::P2PKH,
            "This is a Pay-to-Public-Key-Hash script. It requires a signature and public key \
             that hashes to the embedded hash.",
        );
    }

    if is_p2sh(tokens) {
        return Detection::new(
            St::P2SH,
            "This is a Pay-to-Script-Hash script. The spender must provide a script that hashes \
             to the embedded hash.",
        );
    }

    if matches_exactly(tokens, &[Pat::Op(Opcode::OP_0), Pat::HexLen(40)]) {
        return Detection::new(
            St::P2WPKH,
            "This is a native SegWit Pay-to-Witness-Public-Key-Hash output. The signature and \
             public key are supplied in the witness, outside of this script.",
        );
    }

    if matches_exactly(tokens, &[Pat::Op(Opcode::OP_0), Pat::HexLen(64)]) {
        return Detection::new(
            St::P2WSH,
            "This is a native SegWit Pay-to-Witness-Script-Hash output. The spender provides a \
             witness script that hashes to the embedded SHA256 hash.",
        );
    }

    if matches_exactly(tokens, &[Pat::Op(Opcode::OP_1), Pat::HexLen(64)]) {
        return Detection::new(
            St::P2TR,
            "This is a Pay-to-Taproot output committing to a 32-byte tweaked public key. It can \
             be spent with a key path signature or by revealing a script path.",
        );
    }

    if is_p2pk(tokens) {
        return Detection::new(
            St::P2PK,
            "This is a Pay-to-Public-Key script. It requires only a valid signature from the \
             specified public key.",
        );
    }

    if let Some(params) = multisig_params(tokens) {
        return Detection::new(
            St::Multisig(Some(params)),
            format!("This is a multi-signature script requiring {params} signatures to spend."),
        );
    }

    if contains(tokens, Opcode::OP_CHECKMULTISIG) {
        return Detection::new(
            St::Multisig(None),
            "This appears to be a multisig-related script, but the pattern is non-standard.",
        );
    }

    if contains(tokens, Opcode::OP_CHECKSIG) {
        return Detection::new(
            St::Unknown,
            "This script uses signature verification but doesn't match standard patterns.",
        );
    }

    Detection::new(
        St::Unknown,
        "This is a custom or non-standard script that doesn't match known patterns.",
    )
}
