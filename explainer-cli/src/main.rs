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

mod config;
mod render;
mod repl;

use std::{path::Path, process::ExitCode};

use anyhow::Context;
use clap::{CommandFactory, Parser};
use crossterm::tty::IsTty;

use logging::log;
use script::Explainer;

use crate::{config::ExplainerCliArgs, render::Renderer};

fn read_script(path: &Path) -> anyhow::Result<String> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read script file {}", path.display()))?;
    Ok(content.trim().to_owned())
}

/// Returns whether the explained script executed successfully.
fn run(args: &ExplainerCliArgs, renderer: Renderer) -> anyhow::Result<bool> {
    let explainer = Explainer::new(args.explainer_config());
    log::debug!("Explainer configuration: {:?}", explainer.config());

    if args.interactive {
        repl::run(&explainer, renderer)?;
        return Ok(true);
    }

    let script = match (&args.file, &args.script) {
        (Some(path), _) => read_script(path)?,
        (None, Some(script)) => script.clone(),
        (None, None) => {
            ExplainerCliArgs::command().print_help()?;
            return Ok(true);
        }
    };

    let explanation = explainer.explain(&script);

    if args.json {
        println!("{}", serde_json::to_string_pretty(&explanation)?);
        return Ok(explanation.success);
    }

    if !args.quiet {
        println!("{}\n", renderer.banner());
    }
    println!("{}\n", renderer.explanation(&explanation));

    Ok(explanation.success)
}

fn main() -> ExitCode {
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "error");
    }
    logging::init_logging();

    let args = ExplainerCliArgs::parse();
    let renderer = Renderer::new(!args.no_color && std::io::stdout().is_tty());

    match run(&args, renderer) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("{}", renderer.error(&format!("{e:#}")));
            ExitCode::FAILURE
        }
    }
}
