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

//! Symbolic opcode handlers

use std::cmp;

use utils::ensure;

use crate::{
    error::{ExecError, Fault},
    opcodes::Opcode,
    stack::{Item, Stack},
    token::{Token, TokenKind},
};

pub const SYMBOLIC_SIG_TRUE: &str = "TRUE (symbolic signature verification)";
pub const SYMBOLIC_MULTISIG_TRUE: &str = "TRUE (symbolic multisig verification)";

/// Outcome of applying one token to a stack.
///
/// The stack is always a fresh value. On stack underflow it equals the input stack.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpcodeEffect {
    pub success: bool,
    pub stack: Stack,
    pub explanation: String,
    pub error: Option<ExecError>,
}

impl OpcodeEffect {
    fn ok(stack: Stack, explanation: String) -> Self {
        Self {
            success: true,
            stack,
            explanation,
            error: None,
        }
    }

    fn failed(stack: Stack, explanation: String, error: ExecError) -> Self {
        Self {
            success: false,
            stack,
            explanation,
            error: Some(error),
        }
    }
}

/// Reason a handler stopped early.
enum Interrupt {
    Exec(ExecError),
    Fault(Fault),
}

impl From<ExecError> for Interrupt {
    fn from(err: ExecError) -> Self {
        Self::Exec(err)
    }
}

impl From<Fault> for Interrupt {
    fn from(fault: Fault) -> Self {
        Self::Fault(fault)
    }
}

type HandlerResult = Result<String, Interrupt>;

/// Execute a single token: a registered opcode, an unknown opcode (no-op) or a data push.
pub fn execute_token(token: &Token, stack: &Stack) -> Result<OpcodeEffect, Fault> {
    match token.kind() {
        TokenKind::Opcode => match token.opcode() {
            Some(opcode) => execute_opcode(opcode, stack),
            None => Ok(OpcodeEffect::ok(
                stack.clone(),
                format!("{token}: Unknown opcode (treated as no-op for demonstration)"),
            )),
        },
        TokenKind::Number | TokenKind::Hex | TokenKind::Placeholder => {
            Ok(push_data(token, stack))
        }
    }
}

/// Push a data token and describe what kind of value it probably is.
pub fn push_data(token: &Token, stack: &Stack) -> OpcodeEffect {
    let mut new_stack = stack.clone();
    new_stack.push(Item::from_text(token.text()));

    let data_type = match token.hex_digits().map(str::len) {
        Some(40) => "hash (possibly pubkey hash or script hash)",
        Some(64) => "hash (possibly SHA256)",
        Some(66 | 130) => "possible public key",
        Some(len) if len >= 140 => "possible signature",
        _ => "data",
    };

    OpcodeEffect::ok(
        new_stack,
        format!("PUSH: Added '{token}' to stack ({data_type})"),
    )
}

/// Apply an opcode to a copy of the given stack.
///
/// Expected failures (underflow, failed verification) are reported through the returned effect.
/// An `Err` means the handler hit an internal fault and execution cannot continue.
pub fn execute_opcode(opcode: Opcode, stack: &Stack) -> Result<OpcodeEffect, Fault> {
    let mut new_stack = stack.clone();
    match apply(opcode, &mut new_stack) {
        Ok(explanation) => Ok(OpcodeEffect::ok(new_stack, format!("{opcode}: {explanation}"))),
        Err(Interrupt::Exec(err @ ExecError::StackUnderflow { .. })) => {
            let explanation = format!(
                "{opcode} failed: stack has {} item(s), {} needed",
                stack.len(),
                opcode.min_depth()
            );
            Ok(OpcodeEffect::failed(stack.clone(), explanation, err))
        }
        Err(Interrupt::Exec(err @ ExecError::VerifyFailed { .. })) => {
            let explanation = format!("{opcode}: Failed because the checked value is false/zero");
            Ok(OpcodeEffect::failed(new_stack, explanation, err))
        }
        Err(Interrupt::Fault(fault)) => Err(fault),
    }
}

fn underflow(opcode: Opcode, stack: &Stack) -> ExecError {
    ExecError::StackUnderflow {
        opcode,
        required: opcode.min_depth(),
        available: stack.len(),
    }
}

fn pop(opcode: Opcode, stack: &mut Stack) -> Result<Item, Interrupt> {
    let available = stack.len();
    stack.pop().ok_or(Interrupt::Exec(ExecError::StackUnderflow {
        opcode,
        required: opcode.min_depth(),
        available,
    }))
}

fn top(opcode: Opcode, stack: &Stack, idx: usize) -> Result<Item, Interrupt> {
    stack.top(idx).cloned().ok_or_else(|| underflow(opcode, stack).into())
}

fn push_constant(stack: &mut Stack, value: i64) -> HandlerResult {
    stack.push(Item::Concrete(value));
    Ok(format!("Pushed {value} onto the stack"))
}

fn verify(opcode: Opcode, value: &Item) -> Result<(), Interrupt> {
    ensure!(
        value.is_truthy(),
        Interrupt::Exec(ExecError::VerifyFailed {
            opcode,
            value: value.to_string(),
        })
    );
    Ok(())
}

fn apply(opcode: Opcode, stack: &mut Stack) -> HandlerResult {
    use Opcode as Opc;

    ensure!(
        stack.len() >= opcode.min_depth(),
        underflow(opcode, stack)
    );

    match opcode {
        // Constants
        Opc::OP_0 | Opc::OP_FALSE => push_constant(stack, 0),
        Opc::OP_1NEGATE => push_constant(stack, -1),
        Opc::OP_1 | Opc::OP_TRUE => push_constant(stack, 1),
        Opc::OP_2 => push_constant(stack, 2),
        Opc::OP_3 => push_constant(stack, 3),
        Opc::OP_4 => push_constant(stack, 4),
        Opc::OP_5 => push_constant(stack, 5),
        Opc::OP_6 => push_constant(stack, 6),
        Opc::OP_7 => push_constant(stack, 7),
        Opc::OP_8 => push_constant(stack, 8),
        Opc::OP_9 => push_constant(stack, 9),
        Opc::OP_10 => push_constant(stack, 10),
        Opc::OP_11 => push_constant(stack, 11),
        Opc::OP_12 => push_constant(stack, 12),
        Opc::OP_13 => push_constant(stack, 13),
        Opc::OP_14 => push_constant(stack, 14),
        Opc::OP_15 => push_constant(stack, 15),
        Opc::OP_16 => push_constant(stack, 16),

        // Flow control, modelled as annotations on a linear execution.
        Opc::OP_NOP => Ok("No operation".to_owned()),
        Opc::OP_IF | Opc::OP_NOTIF => {
            let cond = pop(opcode, stack)?;
            let taken = cond.is_truthy() ^ (opcode == Opc::OP_NOTIF);
            let branch = if taken { "would be taken" } else { "would be skipped" };
            Ok(format!(
                "Removed condition '{cond}'; the following branch {branch} (branches are \
                 annotated only, execution continues linearly)"
            ))
        }
        Opc::OP_ELSE => Ok("Start of the alternative branch (annotation only)".to_owned()),
        Opc::OP_ENDIF => Ok("End of the conditional block (annotation only)".to_owned()),
        Opc::OP_VERIFY => {
            let value = pop(opcode, stack)?;
            verify(opcode, &value)?;
            Ok(format!("Verified '{value}' is truthy - verification passed"))
        }
        Opc::OP_RETURN => Ok("Script is provably unspendable (null data output). \
                              Any following data is embedded payload."
            .to_owned()),

        // Stack shuffles
        Opc::OP_DUP => {
            let x = top(opcode, stack, 0)?;
            stack.push(x.clone());
            Ok(format!("Duplicated '{x}' on top of the stack"))
        }
        Opc::OP_2DUP => {
            let (a, b) = (top(opcode, stack, 1)?, top(opcode, stack, 0)?);
            stack.dup(0..2).ok_or_else(|| underflow(opcode, stack))?;
            Ok(format!("Duplicated the top two items '{a}' and '{b}'"))
        }
        Opc::OP_3DUP => {
            let (a, b, c) = (
                top(opcode, stack, 2)?,
                top(opcode, stack, 1)?,
                top(opcode, stack, 0)?,
            );
            stack.dup(0..3).ok_or_else(|| underflow(opcode, stack))?;
            Ok(format!("Duplicated the top three items '{a}', '{b}' and '{c}'"))
        }
        Opc::OP_DROP => {
            let x = pop(opcode, stack)?;
            Ok(format!("Removed '{x}' from the top of the stack"))
        }
        Opc::OP_2DROP => {
            let b = pop(opcode, stack)?;
            let a = pop(opcode, stack)?;
            Ok(format!("Removed the top two items '{a}' and '{b}'"))
        }
        Opc::OP_SWAP => {
            let b = pop(opcode, stack)?;
            let a = pop(opcode, stack)?;
            stack.push(b.clone());
            stack.push(a.clone());
            Ok(format!("Swapped '{a}' and '{b}'"))
        }
        Opc::OP_ROT => {
            let x = stack.remove(2).ok_or_else(|| underflow(opcode, stack))?;
            stack.push(x.clone());
            Ok(format!("Moved '{x}' from third position to the top"))
        }
        Opc::OP_OVER => {
            let x = top(opcode, stack, 1)?;
            stack.push(x.clone());
            Ok(format!("Copied '{x}' from second position to the top"))
        }
        Opc::OP_NIP => {
            let x = stack.remove(1).ok_or_else(|| underflow(opcode, stack))?;
            Ok(format!("Removed '{x}' from second position"))
        }
        Opc::OP_TUCK => {
            let x = top(opcode, stack, 0)?;
            stack.insert(2, x.clone()).ok_or_else(|| underflow(opcode, stack))?;
            Ok(format!("Copied top item '{x}' below the second item"))
        }
        Opc::OP_DEPTH => {
            let depth = i64::try_from(stack.len()).map_err(|_| Fault::NumericOverflow(opcode))?;
            stack.push(Item::Concrete(depth));
            Ok(format!("Pushed the current stack depth {depth}"))
        }
        Opc::OP_SIZE => {
            let x = top(opcode, stack, 0)?;
            let size = match byte_length(&x) {
                Some(len) => Item::Concrete(len),
                None => Item::symbolic(format!("{}({x})", opcode.symbol())),
            };
            let msg = format!("Pushed the byte length of '{x}' ({size})");
            stack.push(size);
            Ok(msg)
        }

        // Equality
        Opc::OP_EQUAL | Opc::OP_EQUALVERIFY => {
            let b = pop(opcode, stack)?;
            let a = pop(opcode, stack)?;
            let result = match (a.as_int(), b.as_int()) {
                (Some(x), Some(y)) => Item::from_bool(x == y),
                _ if a.to_string() == b.to_string() => Item::from_bool(true),
                _ => Item::symbolic(format!("{}({a},{b})", Opc::OP_EQUAL.symbol())),
            };
            if opcode == Opc::OP_EQUALVERIFY {
                verify(opcode, &result)?;
                return Ok(if result.is_concrete() {
                    format!("Verified '{a}' equals '{b}' - verification passed")
                } else {
                    format!("Symbolically verified '{a}' equals '{b}' (assumed valid)")
                });
            }
            let msg = match &result {
                Item::Concrete(1) => {
                    format!("Compared '{a}' and '{b}' - they are equal, pushed {result}")
                }
                Item::Concrete(_) => {
                    format!("Compared '{a}' and '{b}' - they differ, pushed {result}")
                }
                Item::Symbolic(_) => {
                    format!("Compared '{a}' and '{b}' - symbolic result '{result}' pushed")
                }
            };
            stack.push(result);
            Ok(msg)
        }

        // Numeric, best effort concrete
        Opc::OP_1ADD => num1(opcode, stack, |x| x.checked_add(1)),
        Opc::OP_1SUB => num1(opcode, stack, |x| x.checked_sub(1)),
        Opc::OP_NEGATE => num1(opcode, stack, i64::checked_neg),
        Opc::OP_ABS => num1(opcode, stack, i64::checked_abs),
        Opc::OP_ADD => num2(opcode, stack, i64::checked_add),
        Opc::OP_SUB => num2(opcode, stack, i64::checked_sub),
        Opc::OP_NUMEQUAL | Opc::OP_NUMEQUALVERIFY => {
            num2(opcode, stack, |x, y| Some((x == y) as i64))
        }
        Opc::OP_NUMNOTEQUAL => num2(opcode, stack, |x, y| Some((x != y) as i64)),
        Opc::OP_LESSTHAN => num2(opcode, stack, |x, y| Some((x < y) as i64)),
        Opc::OP_GREATERTHAN => num2(opcode, stack, |x, y| Some((x > y) as i64)),
        Opc::OP_LESSTHANOREQUAL => num2(opcode, stack, |x, y| Some((x <= y) as i64)),
        Opc::OP_GREATERTHANOREQUAL => num2(opcode, stack, |x, y| Some((x >= y) as i64)),
        Opc::OP_MIN => num2(opcode, stack, |x, y| Some(cmp::min(x, y))),
        Opc::OP_MAX => num2(opcode, stack, |x, y| Some(cmp::max(x, y))),
        Opc::OP_WITHIN => {
            let hi = pop(opcode, stack)?;
            let lo = pop(opcode, stack)?;
            let x = pop(opcode, stack)?;
            let result = match (x.as_int(), lo.as_int(), hi.as_int()) {
                (Some(x), Some(lo), Some(hi)) => Item::from_bool((lo..hi).contains(&x)),
                _ => Item::symbolic(format!("{}({x},{lo},{hi})", opcode.symbol())),
            };
            let msg = format!("Checked whether '{x}' is within ['{lo}', '{hi}'), pushed {result}");
            stack.push(result);
            Ok(msg)
        }

        // Boolean logic, always concrete
        Opc::OP_NOT => bool1(opcode, stack, |x| !x),
        Opc::OP_0NOTEQUAL => bool1(opcode, stack, |x| x),
        Opc::OP_BOOLAND => bool2(opcode, stack, |x, y| x && y),
        Opc::OP_BOOLOR => bool2(opcode, stack, |x, y| x || y),

        // Hashes, symbolic only
        Opc::OP_RIPEMD160 | Opc::OP_SHA256 | Opc::OP_HASH160 | Opc::OP_HASH256 => {
            let x = pop(opcode, stack)?;
            stack.push(Item::symbolic(format!("{}({x})", opcode.symbol())));
            Ok(format!(
                "Replaced '{x}' with its {} (symbolic)",
                opcode.symbol()
            ))
        }

        // Signatures, always assumed valid
        Opc::OP_CHECKSIG | Opc::OP_CHECKSIGVERIFY => {
            let pubkey = pop(opcode, stack)?;
            let sig = pop(opcode, stack)?;
            let checked = format!(
                "Symbolically verified signature '{sig}' against public key '{pubkey}' - \
                 assumed valid"
            );
            if opcode == Opc::OP_CHECKSIG {
                stack.push(Item::symbolic(SYMBOLIC_SIG_TRUE));
                Ok(checked)
            } else {
                stack.clear();
                Ok(format!("{checked}, result consumed and stack cleared"))
            }
        }
        Opc::OP_CHECKMULTISIG | Opc::OP_CHECKMULTISIGVERIFY => {
            let consumed = stack.len();
            stack.clear();
            let checked = format!(
                "Symbolically verified multisig over {consumed} stack item(s) - assumed valid \
                 (actual implementation requires proper M-of-N structure)"
            );
            if opcode == Opc::OP_CHECKMULTISIG {
                stack.push(Item::symbolic(SYMBOLIC_MULTISIG_TRUE));
                Ok(checked)
            } else {
                Ok(format!("{checked}, result consumed"))
            }
        }
    }
}

/// Byte length of an item, where it can be known without real encoding.
fn byte_length(item: &Item) -> Option<i64> {
    match item {
        Item::Concrete(n) => {
            // Minimal script number encoding: magnitude bytes plus a sign bit.
            let mut magnitude = n.unsigned_abs();
            let mut len = 0;
            let mut last = 0;
            while magnitude > 0 {
                last = magnitude & 0xff;
                magnitude >>= 8;
                len += 1;
            }
            Some(if last & 0x80 != 0 { len + 1 } else { len })
        }
        Item::Symbolic(s) => {
            let digits = s.strip_prefix("0x").unwrap_or(s);
            hex::decode(digits).ok().and_then(|bytes| i64::try_from(bytes.len()).ok())
        }
    }
}

/// Unary numeric operation: concrete if the operand is an integer, symbolic otherwise.
fn num1(opcode: Opcode, stack: &mut Stack, f: impl FnOnce(i64) -> Option<i64>) -> HandlerResult {
    let x = pop(opcode, stack)?;
    let result = match x.as_int() {
        Some(n) => Item::Concrete(f(n).ok_or(Fault::NumericOverflow(opcode))?),
        None => Item::symbolic(format!("{}({x})", opcode.symbol())),
    };
    let msg = describe_numeric(opcode, &result, &format!("'{x}'"));
    stack.push(result);
    Ok(msg)
}

/// Binary numeric operation: concrete if both operands are integers, symbolic otherwise.
/// The `*VERIFY` variants consume the result instead of pushing it.
fn num2(
    opcode: Opcode,
    stack: &mut Stack,
    f: impl FnOnce(i64, i64) -> Option<i64>,
) -> HandlerResult {
    let b = pop(opcode, stack)?;
    let a = pop(opcode, stack)?;
    let result = match (a.as_int(), b.as_int()) {
        (Some(x), Some(y)) => Item::Concrete(f(x, y).ok_or(Fault::NumericOverflow(opcode))?),
        _ => Item::symbolic(format!("{}({a},{b})", opcode.symbol())),
    };
    if opcode == Opcode::OP_NUMEQUALVERIFY {
        verify(opcode, &result)?;
        return Ok(if result.is_concrete() {
            format!("Verified '{a}' numerically equals '{b}' - verification passed")
        } else {
            format!("Symbolically verified '{a}' numerically equals '{b}' (assumed valid)")
        });
    }
    let msg = describe_numeric(opcode, &result, &format!("'{a}' and '{b}'"));
    stack.push(result);
    Ok(msg)
}

fn describe_numeric(opcode: Opcode, result: &Item, operands: &str) -> String {
    if result.is_concrete() {
        format!("Evaluated {} on {operands}, pushed {result}", opcode.symbol())
    } else {
        format!("Operands {operands} are not numeric, pushed symbolic '{result}'")
    }
}

fn bool1(opcode: Opcode, stack: &mut Stack, f: impl FnOnce(bool) -> bool) -> HandlerResult {
    let x = pop(opcode, stack)?;
    let result = Item::from_bool(f(x.is_truthy()));
    let msg = format!("Evaluated {} on '{x}', pushed {result}", opcode.symbol());
    stack.push(result);
    Ok(msg)
}

fn bool2(opcode: Opcode, stack: &mut Stack, f: impl FnOnce(bool, bool) -> bool) -> HandlerResult {
    let b = pop(opcode, stack)?;
    let a = pop(opcode, stack)?;
    let result = Item::from_bool(f(a.is_truthy(), b.is_truthy()));
    let msg = format!("Evaluated {} on '{a}' and '{b}', pushed {result}", opcode.symbol());
    stack.push(result);
    Ok(msg)
}
