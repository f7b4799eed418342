//! Pileup parsing and per-position tallies.
//!
//! A line flows through [`PileupLine::parse`], [`tokenize`], [`tally`] and
//! finally [`write_row`]; [`process_pileup`] drives that for a whole stream.

mod record;
mod runner;
mod table;
mod tally;
mod tokenizer;

pub use record::{PileupLine, RecordError};
pub use runner::{process_pileup, render_table, tally_line, RunSummary};
pub use table::{write_header, write_row, HEADER_COLUMNS};
pub use tally::{classify, tally, Category, CountTable, TallyError};
pub use tokenizer::{
    format_tokens, strip_read_starts, tokenize, tokenize_stripped, IndelKind, Token,
    TokenizeError,
};
