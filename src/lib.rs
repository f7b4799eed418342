//! # Pileup allele tallies
//!
//! Reads samtools-style pileup text (one reference position per line) and
//! counts, for each position, the reads supporting A, T, C, G and N, plus the
//! insertion and deletion events that start there.
//!
//! ## Pipeline
//!
//! 1. **Record parsing**: split the line into id, position, reference base,
//!    depth and bases field
//! 2. **Tokenizing**: drop `^` read-start markers, then walk the bases field
//!    with a single cursor, keeping `+N`/`-N` indel runs whole
//! 3. **Tallying**: classify each token against the reference base
//! 4. **Validation**: A+T+C+G+N plus `*` gaps must equal the reported depth
//!
//! Any failure is fatal for the run.
//!
//! ## Usage Example
//!
//! ```
//! use pileup_tally::pileup::render_table;
//!
//! let table = render_table("chr1\t7\tA\t6\t.,AtN*+2GG-1T\n")?;
//! assert!(table.ends_with("chr1\t7\tA\t6\t3\t1\t0\t0\t1\t1\t1\n"));
//! # Ok::<(), pileup_tally::PileupError>(())
//! ```

#![warn(missing_docs, missing_debug_implementations)]

pub mod pileup; // Tokenizer, tally and table output

pub use pileup::{process_pileup, CountTable, PileupLine, RunSummary, Token};

use std::path::PathBuf;
use std::sync::Once;

use pileup::{RecordError, TallyError, TokenizeError};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

/// Inputs of a single tally run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunConfig {
    /// Pileup text to read.
    pub input: PathBuf,

    /// Destination of the tally table; created or truncated.
    pub output: PathBuf,
}

impl RunConfig {
    /// Create a configuration from the two paths.
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
        }
    }
}

/// Errors that abort a tally run
#[derive(Error, Debug)]
pub enum PileupError {
    /// Column extraction failed
    #[error("malformed pileup record on line {line_number}")]
    Record {
        /// 1-based input line
        line_number: usize,
        /// Underlying column error
        source: RecordError,
    },

    /// The bases field could not be tokenized
    #[error("malformed bases field on line {line_number}")]
    Tokenize {
        /// 1-based input line
        line_number: usize,
        /// Underlying tokenizer error
        source: TokenizeError,
    },

    /// A token could not be classified
    #[error("cannot tally line {line_number}")]
    Tally {
        /// 1-based input line
        line_number: usize,
        /// Underlying classification error
        source: TallyError,
    },

    /// Category sum disagrees with the reported depth
    #[error(
        "{line}\n\n{tokens}\n\n{counts}\n\n\
         line {line_number}: sum of counts ({observed}) does not match total number of reads ({reported})"
    )]
    DepthMismatch {
        /// 1-based input line
        line_number: usize,
        /// Raw input line
        line: String,
        /// Token sequence as produced by the tokenizer
        tokens: String,
        /// Counts computed for the line
        counts: CountTable,
        /// A+T+C+G+N+gap
        observed: u64,
        /// Depth column of the line
        reported: u64,
    },

    /// Reading input or writing output failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

static TRACING_INIT: Once = Once::new();

/// Install the stderr log subscriber, filtered by `RUST_LOG` (default `warn`).
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
