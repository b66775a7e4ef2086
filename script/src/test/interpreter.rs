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

use rstest::rstest;
use strum::IntoEnumIterator;

use crate::*;

fn stack_of(items: &[&str]) -> Stack {
    items.iter().map(|s| Item::from_text(s)).collect()
}

fn run_op(opcode: Opcode, items: &[&str]) -> OpcodeEffect {
    execute_opcode(opcode, &stack_of(items)).unwrap()
}

#[rstest]
// Constants
#[case(Opcode::OP_0, &[], &["0"])]
#[case(Opcode::OP_FALSE, &[], &["0"])]
#[case(Opcode::OP_TRUE, &["a"], &["a", "1"])]
#[case(Opcode::OP_1NEGATE, &[], &["-1"])]
#[case(Opcode::OP_16, &[], &["16"])]
// Stack shuffles
#[case(Opcode::OP_DUP, &["a"], &["a", "a"])]
#[case(Opcode::OP_DROP, &["a", "b"], &["a"])]
#[case(Opcode::OP_SWAP, &["a", "b"], &["b", "a"])]
#[case(Opcode::OP_ROT, &["a", "b", "c"], &["b", "c", "a"])]
#[case(Opcode::OP_OVER, &["a", "b"], &["a", "b", "a"])]
#[case(Opcode::OP_NIP, &["a", "b"], &["b"])]
#[case(Opcode::OP_TUCK, &["a", "b"], &["b", "a", "b"])]
#[case(Opcode::OP_2DUP, &["a", "b"], &["a", "b", "a", "b"])]
#[case(Opcode::OP_3DUP, &["a", "b", "c"], &["a", "b", "c", "a", "b", "c"])]
#[case(Opcode::OP_2DROP, &["a", "b", "c"], &["a"])]
#[case(Opcode::OP_DEPTH, &["a", "b"], &["a", "b", "2"])]
#[case(Opcode::OP_SIZE, &["ab6807"], &["ab6807", "3"])]
#[case(Opcode::OP_SIZE, &["255"], &["255", "2"])]
#[case(Opcode::OP_SIZE, &["0"], &["0", "0"])]
#[case(Opcode::OP_SIZE, &["abc"], &["abc", "SIZE(abc)"])]
#[case(Opcode::OP_SIZE, &["<x>"], &["<x>", "SIZE(<x>)"])]
// Hashes
#[case(Opcode::OP_HASH160, &["x"], &["HASH160(x)"])]
#[case(Opcode::OP_SHA256, &["x"], &["SHA256(x)"])]
#[case(Opcode::OP_HASH256, &["x"], &["HASH256(x)"])]
#[case(Opcode::OP_RIPEMD160, &["x"], &["RIPEMD160(x)"])]
// Equality
#[case(Opcode::OP_EQUAL, &["3", "3"], &["1"])]
#[case(Opcode::OP_EQUAL, &["3", "4"], &["0"])]
#[case(Opcode::OP_EQUAL, &["007", "7"], &["1"])]
#[case(Opcode::OP_EQUAL, &["a", "a"], &["1"])]
#[case(Opcode::OP_EQUAL, &["a", "b"], &["EQUAL(a,b)"])]
#[case(Opcode::OP_EQUALVERIFY, &["z", "a", "b"], &["z"])]
#[case(Opcode::OP_EQUALVERIFY, &["3", "3"], &[])]
// Numeric
#[case(Opcode::OP_ADD, &["3", "4"], &["7"])]
#[case(Opcode::OP_ADD, &["a", "4"], &["ADD(a,4)"])]
#[case(Opcode::OP_SUB, &["3", "4"], &["-1"])]
#[case(Opcode::OP_1ADD, &["5"], &["6"])]
#[case(Opcode::OP_1SUB, &["x"], &["1SUB(x)"])]
#[case(Opcode::OP_NEGATE, &["5"], &["-5"])]
#[case(Opcode::OP_ABS, &["-5"], &["5"])]
#[case(Opcode::OP_MIN, &["3", "4"], &["3"])]
#[case(Opcode::OP_MAX, &["3", "4"], &["4"])]
#[case(Opcode::OP_LESSTHAN, &["3", "4"], &["1"])]
#[case(Opcode::OP_GREATERTHAN, &["3", "4"], &["0"])]
#[case(Opcode::OP_LESSTHANOREQUAL, &["4", "4"], &["1"])]
#[case(Opcode::OP_GREATERTHANOREQUAL, &["3", "4"], &["0"])]
#[case(Opcode::OP_NUMEQUAL, &["4", "4"], &["1"])]
#[case(Opcode::OP_NUMNOTEQUAL, &["3", "4"], &["1"])]
#[case(Opcode::OP_NUMEQUALVERIFY, &["4", "4"], &[])]
#[case(Opcode::OP_NUMEQUALVERIFY, &["x", "4"], &[])]
#[case(Opcode::OP_WITHIN, &["3", "2", "5"], &["1"])]
#[case(Opcode::OP_WITHIN, &["5", "2", "5"], &["0"])]
#[case(Opcode::OP_WITHIN, &["x", "2", "5"], &["WITHIN(x,2,5)"])]
// Boolean logic
#[case(Opcode::OP_NOT, &["0"], &["1"])]
#[case(Opcode::OP_NOT, &["a"], &["0"])]
#[case(Opcode::OP_0NOTEQUAL, &["5"], &["1"])]
#[case(Opcode::OP_BOOLAND, &["1", "0"], &["0"])]
#[case(Opcode::OP_BOOLOR, &["0", "FALSE"], &["0"])]
#[case(Opcode::OP_BOOLOR, &["0", "x"], &["1"])]
// Signatures
#[case(Opcode::OP_CHECKSIG, &["s", "p"], &["TRUE (symbolic signature verification)"])]
#[case(Opcode::OP_CHECKSIGVERIFY, &["z", "s", "p"], &[])]
#[case(Opcode::OP_CHECKSIGVERIFY, &["s", "p"], &[])]
#[case(
    Opcode::OP_CHECKMULTISIG,
    &["d", "s", "1", "k", "1"],
    &["TRUE (symbolic multisig verification)"]
)]
#[case(Opcode::OP_CHECKMULTISIGVERIFY, &["d", "s", "1", "k", "1"], &[])]
// Flow control
#[case(Opcode::OP_IF, &["a", "1"], &["a"])]
#[case(Opcode::OP_NOTIF, &["0"], &[])]
#[case(Opcode::OP_ELSE, &["a"], &["a"])]
#[case(Opcode::OP_ENDIF, &[], &[])]
#[case(Opcode::OP_NOP, &["a"], &["a"])]
#[case(Opcode::OP_VERIFY, &["a", "1"], &["a"])]
#[case(Opcode::OP_RETURN, &[], &[])]
fn opcode_effects(#[case] opcode: Opcode, #[case] before: &[&str], #[case] after: &[&str]) {
    let effect = run_op(opcode, before);
    assert!(effect.success, "{opcode}: {:?}", effect.error);
    assert_eq!(effect.error, None);
    assert_eq!(effect.stack.render(), after);
    assert!(effect.explanation.starts_with(&format!("{opcode}: ")));
}

#[rstest]
#[case(Opcode::OP_VERIFY, &["0"], "0")]
#[case(Opcode::OP_VERIFY, &["FALSE"], "FALSE")]
#[case(Opcode::OP_EQUALVERIFY, &["3", "4"], "0")]
#[case(Opcode::OP_NUMEQUALVERIFY, &["x", "3", "4"], "0")]
fn verification_failures(#[case] opcode: Opcode, #[case] before: &[&str], #[case] value: &str) {
    let effect = run_op(opcode, before);
    assert!(!effect.success);
    assert_eq!(
        effect.error,
        Some(ExecError::VerifyFailed {
            opcode,
            value: value.to_owned()
        })
    );
    assert!(effect.stack.len() < before.len());
}

#[rstest]
#[case(Opcode::OP_DUP, &[])]
#[case(Opcode::OP_SWAP, &["a"])]
#[case(Opcode::OP_ROT, &["a", "b"])]
#[case(Opcode::OP_CHECKMULTISIG, &["a", "b", "c"])]
fn underflow(#[case] opcode: Opcode, #[case] before: &[&str]) {
    let effect = run_op(opcode, before);
    assert!(!effect.success);
    assert_eq!(effect.stack.render(), before);
    assert_eq!(
        effect.error,
        Some(ExecError::StackUnderflow {
            opcode,
            required: opcode.min_depth(),
            available: before.len(),
        })
    );
}

#[rstest]
#[case(Opcode::OP_ADD, &["9223372036854775807", "1"])]
#[case(Opcode::OP_SUB, &["-9223372036854775808", "1"])]
#[case(Opcode::OP_NEGATE, &["-9223372036854775808"])]
#[case(Opcode::OP_ABS, &["-9223372036854775808"])]
#[case(Opcode::OP_1ADD, &["9223372036854775807"])]
fn numeric_overflow(#[case] opcode: Opcode, #[case] before: &[&str]) {
    assert_eq!(
        execute_opcode(opcode, &stack_of(before)),
        Err(Fault::NumericOverflow(opcode))
    );
}

#[rstest]
#[case("89abcdefabbaabbaabbaabbaabbaabbaabbaabba", "hash (possibly pubkey hash or script hash)")]
#[case(
    "1863143c14c5166804bd19203356da136c985678cd4d27a1b8c6329604903262",
    "hash (possibly SHA256)"
)]
#[case(
    "0x03aabbccddeeff00112233445566778899aabbccddeeff00112233445566778899",
    "possible public key"
)]
#[case("<pubkey>", "data")]
#[case("42", "data")]
fn data_push_kind(#[case] data: &str, #[case] kind: &str) {
    let token = Token::parse(data).unwrap();
    let effect = push_data(&token, &Stack::new());
    assert!(effect.success);
    assert_eq!(effect.stack.render(), [token.text()]);
    assert_eq!(
        effect.explanation,
        format!("PUSH: Added '{}' to stack ({kind})", token.text())
    );
}

#[test]
fn data_push_signature() {
    let sig = "30".repeat(71);
    let token = Token::parse(&sig).unwrap();
    let effect = push_data(&token, &Stack::new());
    assert!(effect.explanation.ends_with("(possible signature)"));
}

#[test]
fn token_dispatch() {
    let stack = stack_of(&["a"]);

    let unknown = Token::parse("OP_NOSUCH").unwrap();
    let effect = execute_token(&unknown, &stack).unwrap();
    assert!(effect.success);
    assert_eq!(effect.stack, stack);
    assert_eq!(
        effect.explanation,
        "OP_NOSUCH: Unknown opcode (treated as no-op for demonstration)"
    );

    let dup = Token::parse("op_dup").unwrap();
    let effect = execute_token(&dup, &stack).unwrap();
    assert_eq!(effect.stack.render(), ["a", "a"]);
    assert_eq!(effect.explanation, "OP_DUP: Duplicated 'a' on top of the stack");

    let data = Token::parse("7").unwrap();
    let effect = execute_token(&data, &stack).unwrap();
    assert_eq!(effect.stack.items(), [Item::symbolic("a"), Item::Concrete(7)]);
}

#[test]
fn hash_explanation() {
    let effect = run_op(Opcode::OP_HASH160, &["<pk>"]);
    assert_eq!(
        effect.explanation,
        "OP_HASH160: Replaced '<pk>' with its HASH160 (symbolic)"
    );
}

#[test]
fn input_stack_is_not_modified() {
    let stack = stack_of(&["a", "b"]);
    let effect = execute_opcode(Opcode::OP_2DROP, &stack).unwrap();
    assert!(effect.stack.is_empty());
    assert_eq!(stack.render(), ["a", "b"]);
}

#[test]
fn constants_push_their_value() {
    for opcode in Opcode::iter() {
        let Some(value) = opcode.constant() else {
            continue;
        };
        let effect = run_op(opcode, &["a"]);
        assert!(effect.success, "{opcode}");
        assert_eq!(effect.stack.items(), [Item::symbolic("a"), Item::Concrete(value)]);
        assert_eq!(
            effect.explanation,
            format!("{opcode}: Pushed {value} onto the stack")
        );
    }
}

#[test]
fn checksigverify_clears_stack() {
    let effect = run_op(Opcode::OP_CHECKSIGVERIFY, &["z", "<sig>", "<pk>"]);
    assert!(effect.success);
    assert!(effect.stack.is_empty());
    assert_eq!(
        effect.explanation,
        "OP_CHECKSIGVERIFY: Symbolically verified signature '<sig>' against public key '<pk>' - \
         assumed valid, result consumed and stack cleared"
    );
}
