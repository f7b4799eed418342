use std::io::{BufRead, Write};

use tracing::{info, warn};

use super::table::{write_header, write_row};
use super::tally::{tally, CountTable};
use super::tokenizer::{format_tokens, tokenize, Token};
use super::PileupLine;
use crate::PileupError;

/// Counters reported once a pileup stream has been fully processed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Lines read from the input, blank ones included.
    pub lines_read: usize,
    /// Tally rows written, header excluded.
    pub rows_written: usize,
    /// Blank lines passed over.
    pub skipped_blank: usize,
}

/// Tokenize and tally one line, checking the counts against its depth.
///
/// Returns the parsed record with its counts so the caller can emit the row.
pub fn tally_line<'a>(
    line: &'a str,
    line_number: usize,
) -> Result<(PileupLine<'a>, CountTable), PileupError> {
    let record = PileupLine::parse(line)
        .map_err(|source| PileupError::Record { line_number, source })?;

    let mut stripped = String::new();
    let tokens = tokenize(record.bases, &mut stripped)
        .map_err(|source| PileupError::Tokenize { line_number, source })?;
    let counts = tally(&tokens, record.ref_base)
        .map_err(|source| PileupError::Tally { line_number, source })?;

    check_depth(line, line_number, &tokens, &counts, record.depth)?;
    Ok((record, counts))
}

fn check_depth(
    line: &str,
    line_number: usize,
    tokens: &[Token<'_>],
    counts: &CountTable,
    reported: u64,
) -> Result<(), PileupError> {
    let observed = counts.depth_sum();
    if observed == reported {
        return Ok(());
    }
    Err(PileupError::DepthMismatch {
        line_number,
        line: line.to_string(),
        tokens: format_tokens(tokens),
        counts: *counts,
        observed,
        reported,
    })
}

/// Read pileup lines from `reader` and write the tally table to `writer`.
///
/// The header is written before any input is read. Processing stops at the
/// first failing line; rows for earlier lines have already been written and
/// no row is written for the failing one. The writer is flushed on both paths.
pub fn process_pileup<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
) -> Result<RunSummary, PileupError> {
    let outcome = write_table(reader, writer);
    let flushed = writer.flush();
    let summary = outcome?;
    flushed?;
    Ok(summary)
}

fn write_table<R: BufRead, W: Write>(
    reader: R,
    writer: &mut W,
) -> Result<RunSummary, PileupError> {
    let mut summary = RunSummary::default();
    write_header(writer)?;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_number = idx + 1;
        summary.lines_read += 1;

        if line.trim().is_empty() {
            warn!(line_number, "skipping blank line");
            summary.skipped_blank += 1;
            continue;
        }

        let (record, counts) = tally_line(&line, line_number)?;
        write_row(writer, &record, &counts)?;
        summary.rows_written += 1;
    }

    info!(
        lines_read = summary.lines_read,
        rows_written = summary.rows_written,
        skipped_blank = summary.skipped_blank,
        "pileup tally complete"
    );
    Ok(summary)
}

/// Render the tally table for an in-memory pileup (useful for tests and snapshots).
pub fn render_table(pileup: &str) -> Result<String, PileupError> {
    let mut buffer = Vec::new();
    process_pileup(pileup.as_bytes(), &mut buffer)?;
    String::from_utf8(buffer).map_err(|err| {
        PileupError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err))
    })
}
