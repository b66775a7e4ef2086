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

//! Human readable rendering of explanations

use crossterm::style::{style, Color, Stylize};

use script::Explanation;

const BANNER: &str = "\
╔══════════════════════════════════════════════════════════════╗
║                  Bitcoin Script Explainer                    ║
║              Educational Tool for Bitcoin Script             ║
╚══════════════════════════════════════════════════════════════╝";

/// Stack rendered bottom to top, separated by bars.
pub fn format_stack(items: &[String]) -> String {
    if items.is_empty() {
        "(empty)".to_owned()
    } else {
        items.join(" | ")
    }
}

#[derive(Clone, Copy, Debug)]
pub struct Renderer {
    colored: bool,
}

impl Renderer {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    fn paint(&self, text: &str, color: Color) -> String {
        if self.colored {
            style(text).with(color).to_string()
        } else {
            text.to_owned()
        }
    }

    fn bold(&self, text: &str, color: Color) -> String {
        if self.colored {
            style(text).with(color).bold().to_string()
        } else {
            text.to_owned()
        }
    }

    fn dim(&self, text: &str) -> String {
        if self.colored {
            style(text).dim().to_string()
        } else {
            text.to_owned()
        }
    }

    fn heading(&self, title: &str) -> String {
        let text = format!("━━━ {title} ━━━");
        if self.colored {
            style(text).bold().to_string()
        } else {
            text
        }
    }

    pub fn banner(&self) -> String {
        self.paint(BANNER, Color::Yellow)
    }

    pub fn error(&self, message: &str) -> String {
        self.paint(&format!("Error: {message}"), Color::Red)
    }

    pub fn explanation(&self, explanation: &Explanation) -> String {
        let mut lines = vec![
            self.heading("Script Type"),
            self.paint(&explanation.script_type.to_string(), Color::Cyan),
        ];

        if let Some(script_type) = explanation.script_type.script_type() {
            let info = script_type.info();
            lines.push(format!("{}{}", self.dim("Usage: "), info.usage));
            lines.push(format!("{}{}", self.dim("Security: "), info.security));
            lines.push(format!("{}{}", self.dim("Address prefix: "), info.example_address_prefix));
        }

        lines.push(String::new());
        if explanation.success {
            lines.push(self.paint("✓ Execution completed successfully", Color::Green));
        } else {
            let error = explanation.error.as_deref().unwrap_or("unknown error");
            lines.push(self.paint(&format!("✗ Execution failed: {error}"), Color::Red));
        }

        lines.push(String::new());
        lines.push(self.heading("Step-by-Step Execution"));

        for step in &explanation.steps {
            lines.push(String::new());
            lines.push(format!(
                "{} {}",
                self.paint(&format!("[Step {}]", step.step + 1), Color::Yellow),
                self.bold(&step.opcode, Color::Cyan)
            ));
            lines.push(format!("  {}{}", self.dim("Explanation: "), step.explanation));
            lines.push(format!(
                "  {}{}",
                self.dim("Stack Before: "),
                self.paint(&format_stack(&step.stack_before), Color::Blue)
            ));
            lines.push(format!(
                "  {}{}",
                self.dim("Stack After:  "),
                self.paint(&format_stack(&step.stack_after), Color::Green)
            ));
        }

        lines.push(String::new());
        lines.push(self.heading("Summary"));
        lines.push(explanation.summary.clone());
        lines.join("\n")
    }
}
