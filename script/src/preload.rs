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

//! Initial stack assumed to be supplied by the unlocking script

use crate::{
    detector::ScriptType,
    opcodes::Opcode,
    stack::{Item, Stack},
    token::Token,
};

/// Initial stack together with a sentence explaining where it comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Preload {
    pub stack: Stack,
    pub rationale: String,
}

impl Preload {
    fn new(items: &[&str], rationale: impl Into<String>) -> Self {
        Self {
            stack: items.iter().copied().map(Item::symbolic).collect(),
            rationale: rationale.into(),
        }
    }

    fn empty(rationale: impl Into<String>) -> Self {
        Self::new(&[], rationale)
    }

    /// Preload turned off by configuration.
    pub fn disabled() -> Self {
        Self::empty("Initial stack preload is disabled, execution starts from an empty stack.")
    }

    fn p2pkh() -> Self {
        Self::new(
            &["<signature>", "<public_key>"],
            "The unlocking script is assumed to have provided a signature and a public key.",
        )
    }

    fn p2sh() -> Self {
        Self::new(
            &["<redeem_script>"],
            "The unlocking script is assumed to have provided the serialized redeem script.",
        )
    }

    fn p2pk() -> Self {
        Self::new(
            &["<signature>"],
            "The unlocking script is assumed to have provided a signature.",
        )
    }
}

fn first_ops(tokens: &[Token], expected: &[Opcode]) -> bool {
    tokens.len() >= expected.len()
        && tokens.iter().zip(expected).all(|(t, op)| t.opcode() == Some(*op))
}

fn last_ops(tokens: &[Token], expected: &[Opcode]) -> bool {
    tokens.len() >= expected.len()
        && tokens.iter().rev().zip(expected.iter().rev()).all(|(t, op)| t.opcode() == Some(*op))
}

/// Second pass over scripts not matching any template, looking for near-template shapes.
fn structural_preload(tokens: &[Token]) -> Preload {
    use Opcode::*;

    if first_ops(tokens, &[OP_DUP, OP_HASH160]) && last_ops(tokens, &[OP_EQUALVERIFY, OP_CHECKSIG])
    {
        return Preload::p2pkh();
    }

    if first_ops(tokens, &[OP_HASH160]) && last_ops(tokens, &[OP_EQUAL]) {
        return Preload::p2sh();
    }

    if let [.., data, last] = tokens {
        if data.is_data() && last.opcode() == Some(OP_CHECKSIG) {
            return Preload::p2pk();
        }
    }

    if tokens.iter().filter_map(Token::opcode).any(Opcode::consumes_items) {
        return Preload::new(
            &["<input_data>"],
            "The script consumes stack items, so a generic input is assumed to be present.",
        );
    }

    Preload::empty("The script does not consume stack items, so execution starts empty.")
}

/// Choose the initial stack for a script of the given type.
pub fn initial_stack(script_type: &ScriptType, tokens: &[Token]) -> Preload {
    match script_type {
        ScriptType::P2PKH => Preload::p2pkh(),
        ScriptType::P2SH => Preload::p2sh(),
        ScriptType::P2PK => Preload::p2pk(),
        ScriptType::Multisig(params) => {
            let required = params.map_or(1, |p| p.required);
            let signatures = (1..=required).map(|i| Item::symbolic(format!("<signature_{i}>")));
            Preload {
                stack: std::iter::once(Item::symbolic("<dummy>")).chain(signatures).collect(),
                rationale: format!(
                    "The unlocking script is assumed to have provided a dummy value (required by \
                     OP_CHECKMULTISIG) and {required} signature(s)."
                ),
            }
        }
        ScriptType::P2WPKH | ScriptType::P2WSH | ScriptType::P2TR => Preload::empty(
            "Witness data is provided separately from the script, so execution starts empty.",
        ),
        ScriptType::NullData => {
            Preload::empty("Null data outputs are never spent, so execution starts empty.")
        }
        ScriptType::Unknown => structural_preload(tokens),
    }
}
