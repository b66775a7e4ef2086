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

use std::fmt;

use logging::log;
use serde::{Serialize, Serializer};

use crate::{
    detector::{detect_script_type, Detection, ScriptType},
    engine::{ExecutionContext, ExecutionOutcome, Recovery, StepTrace},
    preload::{initial_stack, Preload},
    token::parse_script,
};

const DISCLAIMER: &str = "⚠️ DISCLAIMER: This is a symbolic simulation for educational purposes. \
    It does not perform real cryptographic operations and should not be used for validating \
    actual Bitcoin transactions.";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExplainerConfig {
    /// Repair stack underflows of common opcodes in scripts of unknown type.
    pub forgiving: bool,
    /// Start execution from the stack the unlocking script would have provided.
    pub preload: bool,
}

impl Default for ExplainerConfig {
    fn default() -> Self {
        Self {
            forgiving: true,
            preload: true,
        }
    }
}

/// Script classification as reported in an explanation. Serialized as the type label.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Classification {
    Detected(ScriptType),
    /// The script could not be parsed.
    Error,
}

impl Classification {
    pub fn script_type(&self) -> Option<&ScriptType> {
        match self {
            Self::Detected(script_type) => Some(script_type),
            Self::Error => None,
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Detected(script_type) => fmt::Display::fmt(script_type, f),
            Self::Error => f.write_str("Error"),
        }
    }
}

impl Serialize for Classification {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Full explanation of a script.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Explanation {
    pub script: String,
    pub script_type: Classification,
    pub description: String,
    pub initial_stack: Vec<String>,
    pub steps: Vec<StepTrace>,
    pub warnings: Vec<String>,
    pub summary: String,
    pub success: bool,
    pub error: Option<String>,
}

#[derive(Clone, Debug, Default)]
pub struct Explainer {
    config: ExplainerConfig,
}

impl Explainer {
    pub fn new(config: ExplainerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExplainerConfig {
        &self.config
    }

    /// Explain a script. Never fails, problems are reported inside the explanation.
    pub fn explain(&self, script: &str) -> Explanation {
        let parsed = match parse_script(script) {
            Ok(parsed) => parsed,
            Err(err) => {
                log::debug!("Failed to parse script: {err}");
                return Explanation {
                    script: script.to_owned(),
                    script_type: Classification::Error,
                    description: String::new(),
                    initial_stack: Vec::new(),
                    steps: Vec::new(),
                    warnings: Vec::new(),
                    summary: format!("Failed to parse script: {err}"),
                    success: false,
                    error: Some(err.to_string()),
                };
            }
        };
        let (tokens, parse_warnings) = parsed.into_parts();

        let detection = detect_script_type(&tokens);
        log::debug!("Detected script type: {}", detection.script_type);

        let preload = if self.config.preload {
            initial_stack(&detection.script_type, &tokens)
        } else {
            Preload::disabled()
        };

        let recovery = if self.config.forgiving && detection.script_type.is_unknown() {
            Recovery::Forgiving
        } else {
            Recovery::Strict
        };

        let outcome = ExecutionContext::new(preload.stack.clone(), recovery).run(&tokens);
        let summary = summarize(&detection, &preload, &outcome, &parse_warnings);

        let success = outcome.success();
        let mut warnings = parse_warnings;
        warnings.extend(outcome.warnings);

        Explanation {
            script: script.to_owned(),
            script_type: Classification::Detected(detection.script_type),
            description: detection.description,
            initial_stack: preload.stack.render(),
            steps: outcome.steps,
            warnings,
            summary,
            success,
            error: outcome.error,
        }
    }
}

/// Explain a script using the default configuration.
pub fn explain(script: &str) -> Explanation {
    Explainer::default().explain(script)
}

fn list_or_empty(items: &[String]) -> String {
    if items.is_empty() {
        "(empty)".to_owned()
    } else {
        items.join(", ")
    }
}

fn summarize(
    detection: &Detection,
    preload: &Preload,
    outcome: &ExecutionOutcome,
    parse_warnings: &[String],
) -> String {
    let mut parts = vec![
        format!("Script Type: {}", detection.script_type),
        format!("\n{}", detection.description),
        format!(
            "\nInitial stack: {}\n{}",
            list_or_empty(&preload.stack.render()),
            preload.rationale
        ),
    ];

    match &outcome.error {
        None => {
            parts.push(format!(
                "\nExecution: Completed successfully with {} steps.",
                outcome.steps.len()
            ));
            let final_stack = outcome.final_stack.render();
            if final_stack.is_empty() {
                parts.push("Final stack is empty.".to_owned());
            } else {
                parts.push(format!(
                    "Final stack contains {} item(s): {}",
                    final_stack.len(),
                    final_stack.join(", ")
                ));
            }
        }
        Some(error) => {
            parts.push(format!(
                "\nExecution: Failed during step {}: {error}",
                outcome.steps.len()
            ));
        }
    }

    if !parse_warnings.is_empty() {
        parts.push(format!("\nWarning: {}", parse_warnings.join("; ")));
    }

    if !outcome.warnings.is_empty() {
        parts.push("\nForgiving mode assumptions:".to_owned());
        parts.extend(outcome.warnings.iter().map(|w| format!("- {w}")));
    }

    parts.push(format!("\n\n{DISCLAIMER}"));

    parts.join("\n")
}
