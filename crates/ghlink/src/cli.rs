//! Command-line front end.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use clap::{ArgAction, CommandFactory, Parser};
use clap_complete::Shell;

use crate::app::link::{LinkOptions, Linker, Outcome};
use crate::app::output::{self, OutputFormat};
use crate::domain::model::{LineSelection, LinkRequest};
use crate::infra::clipboard::Clipboard;
use crate::infra::config::Config;
use crate::infra::git::GitClient;
use crate::ui::prompt::TerminalHost;

#[derive(Debug, Parser)]
#[command(
    name = "ghlink",
    author,
    version,
    about = "Copy the GitHub URL of a local file, optionally anchored to a line range"
)]
pub struct Cli {
    /// File to link to
    pub file: Option<PathBuf>,

    /// Selected lines: START or START-END, 1-based as shown by the editor
    #[arg(short, long, value_name = "START[-END]")]
    pub lines: Option<LineSpec>,

    /// Interpret --lines as 0-based editor positions
    #[arg(long, requires = "lines")]
    pub zero_based: bool,

    /// Remote to link to instead of resolving one
    #[arg(short, long, value_name = "NAME")]
    pub remote: Option<String>,

    /// Branch to link to instead of prompting
    #[arg(short, long, value_name = "NAME")]
    pub branch: Option<String>,

    /// Print the URL without copying it
    #[arg(long)]
    pub no_copy: bool,

    /// Format of the line written to stdout
    #[arg(long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Print shell completions and exit
    #[arg(long, value_enum, value_name = "SHELL", exclusive = true)]
    pub completions: Option<Shell>,
}

/// A line range as typed on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineSpec {
    pub start: usize,
    pub end: usize,
}

impl FromStr for LineSpec {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|_| format!("'{part}' is not a line number"))
        };

        match value.split_once(['-', ':']) {
            Some((start, end)) => Ok(Self {
                start: parse(start)?,
                end: parse(end)?,
            }),
            None => {
                let line = parse(value)?;
                Ok(Self {
                    start: line,
                    end: line,
                })
            }
        }
    }
}

impl Cli {
    /// Capture the invocation inputs once, up front.
    pub fn request(&self) -> Result<LinkRequest> {
        let file = self.file.as_deref().map(absolute).transpose()?;

        let selection = match self.lines {
            None => None,
            Some(spec) if self.zero_based => {
                let Some(selection) = LineSelection::from_editor(spec.start, spec.end) else {
                    bail!("line {} is out of range", spec.start.max(spec.end));
                };
                Some(selection)
            }
            Some(spec) => match LineSelection::from_one_based(spec.start, spec.end) {
                Some(selection) => Some(selection),
                None => bail!("line numbers start at 1; pass --zero-based for editor positions"),
            },
        };

        Ok(LinkRequest {
            file,
            selection,
            remote: self.remote.clone(),
            branch: self.branch.clone(),
        })
    }

    /// Load configuration near the requested file and apply command-line overrides.
    pub fn config(&self, request: &LinkRequest) -> Result<Config> {
        let start = match request.file.as_deref().and_then(Path::parent) {
            Some(dir) => dir.to_path_buf(),
            None => std::env::current_dir().context("unable to determine working directory")?,
        };

        let mut config = Config::load_for(&start)?;
        if self.no_copy {
            config.output.set_copy(false);
        }
        Ok(config)
    }

    fn output_format(&self, config: &Config) -> OutputFormat {
        if let Some(format) = self.format {
            return format;
        }
        config.output.format().parse().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "falling back to plain output");
            OutputFormat::Plain
        })
    }
}

/// Run one invocation end to end.
pub fn run(cli: Cli) -> Result<ExitCode> {
    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "ghlink", &mut io::stdout());
        return Ok(ExitCode::SUCCESS);
    }

    let request = cli.request()?;
    let config = cli.config(&request)?;
    let format = cli.output_format(&config);

    let mut host = TerminalHost;
    let mut clipboard = Clipboard::new();
    let outcome = Linker::new(&mut host, &mut clipboard, LinkOptions::from_config(&config))
        .run(&request, |dir: &Path| GitClient::discover(dir));

    if let Some(link) = outcome.link() {
        println!("{}", output::render(link, format)?);
    }

    Ok(match outcome {
        Outcome::Failed(_) | Outcome::ClipboardFailed(_) => ExitCode::FAILURE,
        Outcome::Copied(_) | Outcome::Resolved(_) | Outcome::Cancelled => ExitCode::SUCCESS,
    })
}

fn absolute(path: &Path) -> Result<PathBuf> {
    match fs::canonicalize(path) {
        Ok(resolved) => Ok(resolved),
        Err(_) => std::path::absolute(path)
            .with_context(|| format!("failed to resolve {}", path.display())),
    }
}
