use thiserror::Error;

const MIN_COLUMNS: usize = 5;

/// Column-extraction failures for a single pileup line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RecordError {
    /// Fewer tab-separated columns than a pileup record needs.
    #[error("expected at least {MIN_COLUMNS} tab-separated columns, found {found}")]
    TooFewColumns {
        /// Number of columns present.
        found: usize,
    },
    /// A column could not be interpreted.
    #[error("invalid {column} '{value}': {reason}")]
    InvalidColumn {
        /// Column name as used in the output header.
        column: &'static str,
        /// Raw column text.
        value: String,
        /// What was wrong with it.
        reason: String,
    },
}

/// One pileup record, borrowing from the line it was split from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PileupLine<'a> {
    /// Reference sequence name.
    pub ref_id: &'a str,
    /// 1-based reference coordinate.
    pub ref_pos: u64,
    /// Coordinate column as written, echoed to the output table.
    pub ref_pos_text: &'a str,
    /// Reference base exactly as written.
    pub ref_base: char,
    /// Read depth reported by the pileup producer.
    pub depth: u64,
    /// Depth column as written, echoed to the output table.
    pub depth_text: &'a str,
    /// Raw bases field, read-start markers included.
    pub bases: &'a str,
}

impl<'a> PileupLine<'a> {
    /// Split a line on tabs; the line terminator is ignored and columns past
    /// the fifth (qualities and so on) are never inspected.
    pub fn parse(line: &'a str) -> Result<Self, RecordError> {
        let mut fields = line.trim_end_matches(['\r', '\n']).split('\t');
        let mut columns: [&str; MIN_COLUMNS] = [""; MIN_COLUMNS];
        for (idx, slot) in columns.iter_mut().enumerate() {
            *slot = fields
                .next()
                .ok_or(RecordError::TooFewColumns { found: idx })?;
        }
        let [ref_id, pos, base, depth_text, bases] = columns;

        let ref_pos = pos.parse().map_err(|err| RecordError::InvalidColumn {
            column: "ref.pos",
            value: pos.to_string(),
            reason: format!("{err}"),
        })?;

        let depth = depth_text.parse().map_err(|err| RecordError::InvalidColumn {
            column: "total.reads",
            value: depth_text.to_string(),
            reason: format!("{err}"),
        })?;

        let mut base_chars = base.chars();
        let ref_base = match (base_chars.next(), base_chars.next()) {
            (Some(c), None) => c,
            _ => {
                return Err(RecordError::InvalidColumn {
                    column: "ref.base",
                    value: base.to_string(),
                    reason: "expected a single character".to_string(),
                })
            }
        };

        Ok(Self {
            ref_id,
            ref_pos,
            ref_pos_text: pos,
            ref_base,
            depth,
            depth_text,
            bases,
        })
    }

    /// Reference base as it appears in the output table.
    pub fn ref_base_upper(&self) -> char {
        self.ref_base.to_ascii_uppercase()
    }
}
