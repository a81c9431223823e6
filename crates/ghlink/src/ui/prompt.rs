//! Prompts and notifications.

use std::io::{self, BufRead, IsTerminal, Write};

use anyhow::{Context, Result};

use crate::ui::picker;

/// Interactive surface the pipeline talks to: single-choice pickers and notifications.
pub trait Host {
    /// Ask the user to pick one of `options`. `Ok(None)` means the prompt was dismissed.
    fn choose(&mut self, options: &[String], title: &str) -> Result<Option<String>>;

    fn info(&mut self, message: &str);

    fn error(&mut self, message: &str);
}

/// Host backed by the controlling terminal. Notifications go to stderr so stdout stays
/// reserved for the link itself.
#[derive(Debug, Default)]
pub struct TerminalHost;

impl Host for TerminalHost {
    fn choose(&mut self, options: &[String], title: &str) -> Result<Option<String>> {
        if options.is_empty() {
            return Ok(None);
        }

        if io::stdin().is_terminal() && io::stderr().is_terminal() {
            picker::run(options, title)
        } else {
            read_choice(io::stdin().lock(), &mut io::stderr(), options, title)
        }
    }

    fn info(&mut self, message: &str) {
        eprintln!("{message}");
    }

    fn error(&mut self, message: &str) {
        eprintln!("error: {message}");
    }
}

/// Line-based fallback picker for non-interactive input.
///
/// Accepts a 1-based index or the exact option text; an empty line takes the first option.
/// Unrecognised answers are rejected and the question is asked again until input runs out.
pub fn read_choice<R, W>(
    mut input: R,
    output: &mut W,
    options: &[String],
    title: &str,
) -> Result<Option<String>>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "{title}")?;
    for (index, option) in options.iter().enumerate() {
        writeln!(output, "  {:>2}) {option}", index + 1)?;
    }

    let mut line = String::new();
    loop {
        write!(output, "> ")?;
        output.flush()?;

        line.clear();
        let read = input
            .read_line(&mut line)
            .context("failed to read selection")?;
        if read == 0 {
            return Ok(None);
        }

        match parse_choice(&line, options) {
            Some(index) => return Ok(Some(options[index].clone())),
            None => writeln!(output, "'{}' is not one of the options", line.trim())?,
        }
    }
}

/// Map a typed answer to an option index.
pub fn parse_choice(answer: &str, options: &[String]) -> Option<usize> {
    let answer = answer.trim();
    if answer.is_empty() {
        return (!options.is_empty()).then_some(0);
    }

    if let Some(index) = options.iter().position(|option| option == answer) {
        return Some(index);
    }

    answer
        .parse::<usize>()
        .ok()
        .filter(|number| (1..=options.len()).contains(number))
        .map(|number| number - 1)
}
