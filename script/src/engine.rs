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

//! Step by step execution of a token sequence

use logging::log;
use serde::{Deserialize, Serialize};

use crate::{
    error::ExecError,
    interpreter::{execute_opcode, execute_token, OpcodeEffect},
    opcodes::Opcode,
    stack::{Item, Stack},
    token::Token,
};

/// Record of a single executed token.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepTrace {
    /// Zero-based position of the token in the script.
    pub step: usize,
    pub opcode: String,
    pub stack_before: Vec<String>,
    pub stack_after: Vec<String>,
    pub explanation: String,
}

/// How stack underflows are treated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Recovery {
    /// Underflow of a few common opcodes is repaired by assuming the missing inputs.
    Forgiving,
    /// Every failure halts execution.
    Strict,
}

/// Result of running a token sequence.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExecutionOutcome {
    pub steps: Vec<StepTrace>,
    pub final_stack: Stack,
    pub warnings: Vec<String>,
    pub error: Option<String>,
}

impl ExecutionOutcome {
    pub fn success(&self) -> bool {
        self.error.is_none()
    }
}

/// Opcodes whose underflow is repaired in forgiving mode.
fn is_recoverable(opcode: Opcode) -> bool {
    use Opcode::*;
    matches!(
        opcode,
        OP_DUP | OP_VERIFY | OP_EQUALVERIFY | OP_CHECKSIG | OP_HASH160 | OP_EQUAL
    )
}

/// Placeholders standing in for `missing` items the opcode expected to find.
fn assumed_inputs(opcode: Opcode, missing: usize) -> Vec<Item> {
    match opcode {
        Opcode::OP_CHECKSIG => ["<assumed_signature>", "<assumed_public_key>"]
            .into_iter()
            .take(missing)
            .map(Item::symbolic)
            .collect(),
        _ => std::iter::repeat_with(|| Item::symbolic("<symbolic_input>")).take(missing).collect(),
    }
}

/// State of a single run. Built fresh for every script.
pub struct ExecutionContext {
    stack: Stack,
    recovery: Recovery,
    steps: Vec<StepTrace>,
    warnings: Vec<String>,
}

impl ExecutionContext {
    pub fn new(initial_stack: Stack, recovery: Recovery) -> Self {
        Self {
            stack: initial_stack,
            recovery,
            steps: Vec::new(),
            warnings: Vec::new(),
        }
    }

    /// Execute tokens in order, stopping at the first failure.
    pub fn run(mut self, tokens: &[Token]) -> ExecutionOutcome {
        let mut error = None;

        for (i, token) in tokens.iter().enumerate() {
            let stack_before = self.stack.render();

            let effect = match execute_token(token, &self.stack) {
                Ok(effect) => self.recover(token, effect),
                Err(fault) => {
                    log::debug!("Step {i} ({token}) faulted: {fault}");
                    self.steps.push(StepTrace {
                        step: i,
                        opcode: token.to_string(),
                        stack_after: stack_before.clone(),
                        stack_before,
                        explanation: format!("Error: {fault}"),
                    });
                    error = Some(format!("Execution error at step {i} ({token}): {fault}"));
                    break;
                }
            };

            log::debug!("Step {i} ({token}): {}", effect.explanation);

            self.steps.push(StepTrace {
                step: i,
                opcode: token.to_string(),
                stack_before,
                stack_after: effect.stack.render(),
                explanation: effect.explanation,
            });
            self.stack = effect.stack;

            if !effect.success {
                error = Some(effect.error.map_or_else(
                    || format!("Execution failed at step {i} ({token})"),
                    |e| e.to_string(),
                ));
                break;
            }
        }

        ExecutionOutcome {
            steps: self.steps,
            final_stack: self.stack,
            warnings: self.warnings,
            error,
        }
    }

    /// Retry an underflowing opcode with assumed inputs, if the recovery mode allows it.
    fn recover(&mut self, token: &Token, effect: OpcodeEffect) -> OpcodeEffect {
        let underflow = match (&effect.error, token.opcode()) {
            (
                Some(ExecError::StackUnderflow {
                    required,
                    available,
                    ..
                }),
                Some(opcode),
            ) if self.recovery == Recovery::Forgiving && is_recoverable(opcode) => {
                Some((opcode, required.saturating_sub(*available)))
            }
            _ => None,
        };
        let Some((opcode, missing)) = underflow else {
            return effect;
        };

        let assumed = assumed_inputs(opcode, missing);
        let assumed_text = assumed.iter().map(ToString::to_string).collect::<Vec<_>>().join(", ");

        let mut patched = self.stack.clone();
        patched.extend_bottom(assumed);

        let retried = match execute_opcode(opcode, &patched) {
            Ok(retried) => retried,
            Err(_) => return effect,
        };

        let warning = format!(
            "Forgiving mode: {opcode} needed {missing} more stack item(s); assumed {assumed_text} \
             at the bottom of the stack"
        );
        log::warn!("{warning}");
        self.warnings.push(warning);

        OpcodeEffect {
            explanation: format!("{} (assumed missing input: {assumed_text})", retried.explanation),
            ..retried
        }
    }
}
