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

mod interpreter;

use expect_test::expect;
use rstest::rstest;

use crate::*;

const P2PKH_SCRIPT: &str = "OP_DUP OP_HASH160 ab6807 OP_EQUALVERIFY OP_CHECKSIG";

fn strict() -> Explainer {
    Explainer::new(ExplainerConfig {
        forgiving: false,
        preload: true,
    })
}

fn no_preload() -> Explainer {
    Explainer::new(ExplainerConfig {
        forgiving: true,
        preload: false,
    })
}

#[test]
fn p2pkh() {
    let e = explain(P2PKH_SCRIPT);
    assert!(e.success);
    assert_eq!(e.error, None);
    assert_eq!(e.script_type, Classification::Detected(ScriptType::P2PKH));
    assert_eq!(e.initial_stack, ["<signature>", "<public_key>"]);
    assert_eq!(e.steps.len(), 5);
    assert_eq!(e.steps[0].stack_before, e.initial_stack);
    assert_eq!(
        e.steps[4].stack_after,
        ["TRUE (symbolic signature verification)"]
    );
    assert!(e.warnings.is_empty());
}

#[test]
fn p2pkh_summary() {
    let e = explain(P2PKH_SCRIPT);
    expect![[r#"
        Script Type: P2PKH (Pay-to-Public-Key-Hash)

        This is a Pay-to-Public-Key-Hash script. It requires a signature and public key that hashes to the embedded hash.

        Initial stack: <signature>, <public_key>
        The unlocking script is assumed to have provided a signature and a public key.

        Execution: Completed successfully with 5 steps.
        Final stack contains 1 item(s): TRUE (symbolic signature verification)


        ⚠️ DISCLAIMER: This is a symbolic simulation for educational purposes. It does not perform real cryptographic operations and should not be used for validating actual Bitcoin transactions.
    "#]]
    .assert_eq(&format!("{}\n", e.summary));
}

#[test]
fn p2sh() {
    let e = explain("OP_HASH160 ab6807 OP_EQUAL");
    assert!(e.success);
    assert_eq!(e.script_type, Classification::Detected(ScriptType::P2SH));
    assert_eq!(e.initial_stack, ["<redeem_script>"]);
    assert_eq!(
        e.steps.last().unwrap().stack_after,
        ["EQUAL(HASH160(<redeem_script>),ab6807)"]
    );
}

#[test]
fn lone_op_return() {
    let e = explain("OP_RETURN");
    assert!(e.success);
    assert_eq!(e.script_type, Classification::Detected(ScriptType::NullData));
    assert_eq!(
        e.warnings,
        ["Script contains only OP_RETURN with no data payload"]
    );
    assert!(e.initial_stack.is_empty());
    assert_eq!(e.steps.len(), 1);
    assert!(e.summary.contains("\nWarning: Script contains only OP_RETURN with no data payload"));
}

#[test]
fn multisig_2_of_3() {
    let e = explain("2 03aa 03bb 03cc 3 OP_CHECKMULTISIG");
    assert!(e.success);
    assert_eq!(
        e.script_type,
        Classification::Detected(ScriptType::Multisig(Some(MultisigParams {
            required: 2,
            total: 3
        })))
    );
    assert_eq!(e.initial_stack.len(), 3);
    assert_eq!(
        e.steps.last().unwrap().stack_after,
        ["TRUE (symbolic multisig verification)"]
    );
}

#[test]
fn forgiving_lone_dup() {
    let e = explain("OP_DUP");
    assert!(e.success);
    assert_eq!(e.script_type, Classification::Detected(ScriptType::Unknown));
    assert!(e.initial_stack.is_empty());
    assert_eq!(e.warnings.len(), 1);
    assert_eq!(e.steps[0].stack_after, ["<symbolic_input>", "<symbolic_input>"]);
    assert!(e.summary.contains("Forgiving mode assumptions:\n- Forgiving mode: OP_DUP"));

    let e = strict().explain("OP_DUP");
    assert!(!e.success);
    assert!(e.warnings.is_empty());
    assert_eq!(
        e.error.as_deref(),
        Some("Stack underflow: OP_DUP requires at least 1 item(s), found 0")
    );
}

#[test]
fn forgiving_only_for_unknown_scripts() {
    // Detected as P2PK, so the missing signature is not patched in
    let e = no_preload().explain("03aabb OP_CHECKSIG");
    assert_eq!(e.script_type, Classification::Detected(ScriptType::P2PK));
    assert!(!e.success);
    assert!(e.warnings.is_empty());
}

#[test]
fn checksigverify_leaves_empty_stack() {
    let e = explain("<a> <b> <c> OP_CHECKSIGVERIFY");
    assert!(e.success, "{:?}", e.error);
    assert_eq!(e.steps.len(), 4);
    assert!(e.steps[3].stack_after.is_empty());
    assert!(e.summary.contains("\nFinal stack is empty."));
}

#[rstest]
#[case(Explainer::default())]
#[case(strict())]
#[case(no_preload())]
fn verify_zero_always_fails(#[case] explainer: Explainer) {
    let e = explainer.explain("0 OP_VERIFY");
    assert!(!e.success);
    assert_eq!(
        e.error.as_deref(),
        Some("Verification failed: OP_VERIFY found '0', which is false")
    );
    assert_eq!(e.steps.len(), 2);
}

#[test]
fn arithmetic() {
    let e = explain("3 4 OP_ADD");
    assert!(e.success);
    assert_eq!(e.initial_stack, ["<input_data>"]);
    assert_eq!(e.steps[2].stack_after, ["<input_data>", "7"]);

    let e = no_preload().explain("3 4 OP_ADD");
    assert_eq!(e.steps[2].stack_after, ["7"]);

    let e = no_preload().explain("<x> 4 OP_ADD");
    assert_eq!(e.steps[2].stack_after, ["ADD(<x>,4)"]);
}

#[test]
fn failure_summary() {
    let e = explain("OP_1 OP_0 OP_EQUALVERIFY OP_NOP");
    assert!(!e.success);
    assert_eq!(e.steps.len(), 3);
    assert!(e.summary.contains(
        "\nExecution: Failed during step 3: Verification failed: OP_EQUALVERIFY found '0', \
         which is false"
    ));
}

#[test]
fn unknown_opcode_is_noop() {
    let e = explain("OP_FOO OP_NOP");
    assert!(e.success);
    assert_eq!(
        e.warnings,
        ["Unknown opcode 'OP_FOO' - will be processed as no-op"]
    );
    assert_eq!(
        e.steps[0].explanation,
        "OP_FOO: Unknown opcode (treated as no-op for demonstration)"
    );
}

#[rstest]
#[case("", "empty script")]
#[case(" \n\t", "empty script")]
#[case("OP_DUP xyz!", "invalid token: 'xyz!' - must be opcode (OP_*) or hex data")]
fn parse_failure(#[case] script: &str, #[case] error: &str) {
    let e = explain(script);
    assert!(!e.success);
    assert_eq!(e.script_type, Classification::Error);
    assert_eq!(e.script_type.to_string(), "Error");
    assert_eq!(e.error.as_deref(), Some(error));
    assert_eq!(e.summary, format!("Failed to parse script: {error}"));
    assert!(e.steps.is_empty());
}

#[test]
fn no_state_leaks_between_calls() {
    let explainer = Explainer::default();
    let first = explainer.explain(P2PKH_SCRIPT);
    let _ = explainer.explain("OP_DUP OP_DUP OP_DUP");
    assert_eq!(explainer.explain(P2PKH_SCRIPT), first);
}

#[test]
fn json_shape() {
    let json = serde_json::to_value(explain(P2PKH_SCRIPT)).unwrap();
    assert_eq!(json["script"], P2PKH_SCRIPT);
    assert_eq!(json["script_type"], "P2PKH (Pay-to-Public-Key-Hash)");
    assert_eq!(json["success"], true);
    assert_eq!(json["error"], serde_json::Value::Null);
    assert_eq!(json["steps"][0]["step"], 0);
    assert_eq!(json["steps"][0]["opcode"], "OP_DUP");
    assert_eq!(
        json["steps"][1]["stack_after"],
        serde_json::json!(["<signature>", "<public_key>", "HASH160(<public_key>)"])
    );

    let json = serde_json::to_value(explain("???")).unwrap();
    assert_eq!(json["script_type"], "Error");
}
