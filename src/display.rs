use std::io::Write;

use anyhow::Result;
use serde_json::Value;

/// Writes `value` as pretty-printed JSON followed by a newline.
pub fn write_json<W: Write>(value: &Value, writer: &mut W) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    Ok(())
}

/// Writes diff text followed by a newline.
pub fn write_diff<W: Write>(diff: &str, writer: &mut W) -> Result<()> {
    writeln!(writer, "{diff}")?;
    Ok(())
}

/// Writes the human-readable confirmation of a submitted review.
pub fn write_review_summary<W: Write>(comment_count: usize, writer: &mut W) -> Result<()> {
    writeln!(
        writer,
        "\n✅ Review submitted successfully with {comment_count} comments"
    )?;
    Ok(())
}
