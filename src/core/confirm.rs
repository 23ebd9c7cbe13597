use crate::utils::error::Result;
use std::io::{BufRead, Write};

/// Writes `question` followed by ` (y/n) ` and reads a single answer line.
/// End of input counts as a refusal.
pub fn confirm(question: &str, stdin: &mut dyn BufRead, stdout: &mut dyn Write) -> Result<bool> {
    write!(stdout, "{} (y/n) ", question)?;
    stdout.flush()?;

    let mut answer = String::new();
    stdin.read_line(&mut answer)?;
    Ok(is_affirmative(&answer))
}

pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim();
    answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
}
