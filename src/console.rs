//! Interactive startup choices for the native binary.

use std::error::Error;
use std::io::{stdin, stdout, Write};

/// Lists `options` on the terminal and reads a 1-based pick from stdin.
///
/// An empty or unparsable answer picks the first option. Returns the 0-based
/// index of the chosen entry.
pub fn choose(what: &str, options: &[String]) -> Result<usize, Box<dyn Error>> {
    if options.is_empty() {
        return Err(format!("no {} available", what).into());
    }
    if options.len() == 1 {
        return Ok(0);
    }

    let mut out = stdout().lock();
    writeln!(out, "fourop: {} choices", what)?;
    for (i, option) in options.iter().enumerate() {
        writeln!(out, "  {}) {}", i + 1, option)?;
    }
    write!(out, "{} [1-{}, Enter for 1]: ", what, options.len())?;
    out.flush()?;
    drop(out);

    let mut answer = String::new();
    stdin().read_line(&mut answer)?;
    let index = answer.trim().parse::<usize>().unwrap_or(1).saturating_sub(1);
    if index >= options.len() {
        return Err(format!("no {} numbered {}", what, index + 1).into());
    }
    log::info!("Using {}: {}", what, options[index]);
    Ok(index)
}
