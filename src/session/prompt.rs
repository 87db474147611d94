use std::io::{BufRead, Write};

use anyhow::Result;
use console::style;

/// Block until the user presses Enter.
pub fn wait_for_enter() -> Result<()> {
    let mut line = String::new();
    std::io::stdin().read_line(&mut line)?;
    Ok(())
}

/// Parse a 1-based menu choice typed by the user. Returns the 0-based
/// option index, or None for anything that isn't a valid choice.
pub fn parse_choice(input: &str, option_count: usize) -> Option<usize> {
    let n: usize = input.trim().parse().ok()?;
    if (1..=option_count).contains(&n) {
        Some(n - 1)
    } else {
        None
    }
}

/// Present a numbered menu and read a choice from stdin, re-prompting on
/// invalid input. Returns the 0-based index of the selected option.
pub fn read_choice(options: &[&str]) -> Result<usize> {
    for (i, option) in options.iter().enumerate() {
        println!("    {} {}", style(format!("{}.", i + 1)).bold(), option);
    }

    let stdin = std::io::stdin();
    read_choice_from(&mut stdin.lock(), options.len())
}

/// The prompt/re-prompt loop over any line source. End of input (a closed
/// stdin, an exhausted pipe) is an error, not another re-prompt: there is
/// no terminal left to answer.
fn read_choice_from(input: &mut impl BufRead, option_count: usize) -> Result<usize> {
    loop {
        print!("  Choice [1-{option_count}]: ");
        std::io::stdout().flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            anyhow::bail!("input ended before a choice was made");
        }

        match parse_choice(&line, option_count) {
            Some(index) => return Ok(index),
            None => {
                println!(
                    "  {} Please enter a number between 1 and {option_count}.",
                    style("Invalid input.").yellow()
                );
            }
        }
    }
}
