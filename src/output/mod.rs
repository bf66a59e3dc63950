// Output: JSON sinks for run results and terminal summaries.

pub mod terminal;

use std::io::{Read, Write};

use anyhow::{Context, Result};

use crate::bot::store::StoredPost;
use crate::vk::PageSet;

/// Write the accepted pages as one JSON array of integers, plus a newline.
///
/// The set is written in ascending id order. Consumers should still treat
/// it as unordered.
pub fn write_result<W: Write>(pages: &PageSet, mut sink: W) -> Result<()> {
    serde_json::to_writer(&mut sink, pages).context("Failed to serialize page ids")?;
    writeln!(sink).context("Failed to write page ids")?;
    sink.flush().context("Failed to flush output")?;
    Ok(())
}

/// Read a page set previously written by `write_result`.
pub fn read_page_set<R: Read>(source: R) -> Result<PageSet> {
    serde_json::from_reader(source).context("Expected a JSON array of page ids")
}

/// Write collected posts as a pretty-printed JSON array.
pub fn write_posts<W: Write>(posts: &[StoredPost], mut sink: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut sink, posts).context("Failed to serialize posts")?;
    writeln!(sink).context("Failed to write posts")?;
    sink.flush().context("Failed to flush output")?;
    Ok(())
}

/// Truncate a string to at most `max_chars` characters, appending "..." if truncated.
///
/// Counts characters, not bytes, so Cyrillic and emoji never get split.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    let char_count = text.chars().count();
    if char_count <= max_chars {
        text.to_string()
    } else {
        let truncated: String = text.chars().take(max_chars).collect();
        format!("{truncated}...")
    }
}
