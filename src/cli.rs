//! CLI argument parsing using clap

use crate::config::{
    load_project_config, Config, OutputFormat, ProjectConfig, RunOptions, DEFAULT_CONFIG_FILE,
};
use crate::error::Result;
use crate::puzzle::Puzzle;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Puzzle solution runner
#[derive(Parser, Debug)]
#[command(name = "aoc-run")]
#[command(version)]
#[command(about = "Run puzzle solutions against their inputs", long_about = None)]
pub struct Cli {
    /// Project config file
    #[arg(long, global = true, value_name = "PATH", default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run a puzzle solution against its input
    Run(RunArgs),
    /// Create the solution and input files of a new puzzle
    New(NewArgs),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Puzzle to run, as YEAR/DAY (e.g. 2023/01)
    #[arg(value_name = "PUZZLE")]
    pub puzzle: String,

    /// Solution program (defaults to the project layout)
    #[arg(long, value_name = "PATH")]
    pub solution: Option<PathBuf>,

    /// Puzzle input (defaults to the project layout)
    #[arg(long, value_name = "PATH")]
    pub input: Option<PathBuf>,

    /// Puzzle part to solve
    #[arg(short = 'p', long, value_name = "N", value_parser = clap::value_parser!(u8).range(1..=2))]
    pub part: Option<u8>,

    /// Extra option passed to the solution (repeatable)
    #[arg(long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// Output the report as JSON
    #[arg(long)]
    pub json: bool,

    /// Re-run whenever the solution or the input changes
    #[arg(short = 'w', long)]
    pub watch: bool,
}

#[derive(Args, Debug)]
pub struct NewArgs {
    /// Puzzle to create, as YEAR/DAY (e.g. 2023/01)
    #[arg(value_name = "PUZZLE")]
    pub puzzle: String,

    /// Overwrite an existing solution file
    #[arg(long)]
    pub force: bool,
}

/// What the command line asked for
#[derive(Debug)]
pub enum Action {
    Run(Config),
    New {
        project: ProjectConfig,
        puzzle: Puzzle,
        force: bool,
    },
}

impl Cli {
    /// Resolve the command line and project config into an action
    pub fn into_action(self) -> Result<Action> {
        let project = load_project_config(&self.config)?;

        match self.command {
            Command::Run(args) => {
                let puzzle: Puzzle = args.puzzle.parse()?;

                let mut options = RunOptions {
                    part: args.part,
                    ..RunOptions::default()
                };
                for raw in &args.params {
                    options.insert_param(raw)?;
                }

                let output_format = if args.json {
                    OutputFormat::Json
                } else {
                    OutputFormat::Console
                };

                Ok(Action::Run(Config {
                    solution_file: args
                        .solution
                        .unwrap_or_else(|| project.solution_path(&puzzle)),
                    input_file: args.input.unwrap_or_else(|| project.input_path(&puzzle)),
                    puzzle,
                    options,
                    output_format,
                    watch: args.watch,
                    project,
                }))
            }
            Command::New(args) => Ok(Action::New {
                puzzle: args.puzzle.parse()?,
                force: args.force,
                project,
            }),
        }
    }
}
