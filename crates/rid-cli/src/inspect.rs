use crate::config::Action;
use chrono::{DateTime, SecondsFormat, Utc};
use rid::Rid;
use std::io::Write;

/// Executes `action`, writing one line per ID to `out`.
///
/// Returns the number of inputs that failed to decode. Failures are reported
/// inline, echoing the offending input, and never stop the remaining inputs
/// from being processed.
///
/// # Errors
///
/// Returns an error only if writing to `out` fails.
pub fn run<W: Write>(action: &Action, out: &mut W) -> anyhow::Result<usize> {
    match action {
        Action::Generate { count } => {
            for _ in 0..*count {
                writeln!(out, "{}", Rid::new())?;
            }
            Ok(0)
        }
        Action::Inspect { ids } => {
            let mut errors = 0;
            for input in ids {
                match Rid::from_text(input) {
                    Ok(id) => writeln!(out, "{}", describe(input, &id))?,
                    Err(e) => {
                        errors += 1;
                        tracing::debug!(input = %input, "rejected input: {e}");
                        writeln!(out, "[{input}] {e}")?;
                    }
                }
            }
            if errors > 0 {
                writeln!(out, "{errors} error(s)")?;
            }
            Ok(errors)
        }
    }
}

/// Renders the decoded fields of `id`, prefixed by the original input.
#[must_use]
pub fn describe(input: &str, id: &Rid) -> String {
    let time = DateTime::<Utc>::from(id.time());
    let time = time.to_rfc3339_opts(SecondsFormat::Millis, true);
    let bytes = id
        .as_bytes()
        .iter()
        .map(|b| format!("{b:#04x}"))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "[{input}] ts:{} sig:{} random:{} time:{time} ID{{{bytes}}}",
        id.timestamp_millis(),
        id.signature(),
        id.random(),
    )
}
