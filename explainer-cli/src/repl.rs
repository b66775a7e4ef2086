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

//! Interactive prompt reading one script per line

use std::borrow::Cow;

use reedline::{
    Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus, Reedline, Signal,
};

use script::Explainer;

use crate::render::Renderer;

const PROMPT: &str = "Enter script> ";
const QUIT_WORDS: [&str; 3] = ["quit", "exit", "q"];

/// Static prompt ([reedline::DefaultPrompt] adds the current dir and a clock)
struct ScriptPrompt;

impl Prompt for ScriptPrompt {
    fn render_prompt_left(&self) -> Cow<str> {
        Cow::Borrowed(PROMPT)
    }

    fn render_prompt_right(&self) -> Cow<str> {
        Cow::Borrowed("")
    }

    fn render_prompt_indicator(&self, _edit_mode: PromptEditMode) -> Cow<str> {
        Cow::Borrowed("")
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<str> {
        Cow::Borrowed("::: ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };

        Cow::Owned(format!("({prefix}reverse-search: {}) ", history_search.term))
    }
}

#[derive(Debug, PartialEq, Eq)]
enum LineAction<'a> {
    Quit,
    Empty,
    Explain(&'a str),
}

fn classify_line(line: &str) -> LineAction<'_> {
    let line = line.trim();
    if line.is_empty() {
        LineAction::Empty
    } else if QUIT_WORDS.iter().any(|word| line.eq_ignore_ascii_case(word)) {
        LineAction::Quit
    } else {
        LineAction::Explain(line)
    }
}

pub fn run(explainer: &Explainer, renderer: Renderer) -> anyhow::Result<()> {
    println!("{}", renderer.banner());
    println!("Interactive mode. Type 'quit' or 'exit' to stop.\n");

    let mut line_editor = Reedline::create();

    loop {
        let line = match line_editor.read_line(&ScriptPrompt)? {
            Signal::Success(line) => line,
            Signal::CtrlC => {
                println!("Interrupted. Goodbye!");
                return Ok(());
            }
            Signal::CtrlD => {
                println!("Goodbye!");
                return Ok(());
            }
        };

        match classify_line(&line) {
            LineAction::Quit => {
                println!("Goodbye!");
                return Ok(());
            }
            LineAction::Empty => println!("Please enter a script or 'quit' to exit."),
            LineAction::Explain(script) => {
                let explanation = explainer.explain(script);
                println!("{}\n", renderer.explanation(&explanation));
            }
        }
    }
}
