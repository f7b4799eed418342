use std::fmt;

use thiserror::Error;

use super::tokenizer::{IndelKind, Token};

const NUM_CATEGORIES: usize = 8;

/// Bucket a token is counted into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Adenine.
    A,
    /// Thymine.
    T,
    /// Cytosine.
    C,
    /// Guanine.
    G,
    /// Unknown base.
    N,
    /// Insertion following this position.
    Ins,
    /// Deletion following this position.
    Del,
    /// `*` placeholder for a base deleted in an earlier indel.
    Gap,
}

impl Category {
    /// All categories in table order.
    pub const ALL: [Category; NUM_CATEGORIES] = [
        Category::A,
        Category::T,
        Category::C,
        Category::G,
        Category::N,
        Category::Ins,
        Category::Del,
        Category::Gap,
    ];

    /// Categories written to the output table, in column order.
    pub const EMITTED: [Category; 7] = [
        Category::A,
        Category::T,
        Category::C,
        Category::G,
        Category::N,
        Category::Ins,
        Category::Del,
    ];

    /// Nucleotide category for a base letter, any case.
    pub fn from_base(base: char) -> Option<Self> {
        match base.to_ascii_uppercase() {
            'A' => Some(Category::A),
            'T' => Some(Category::T),
            'C' => Some(Category::C),
            'G' => Some(Category::G),
            'N' => Some(Category::N),
            _ => None,
        }
    }

    /// Whether the category counts towards the read depth.
    pub fn counts_towards_depth(self) -> bool {
        !matches!(self, Category::Ins | Category::Del)
    }

    /// Column label used in headers and diagnostics.
    pub fn label(self) -> &'static str {
        match self {
            Category::A => "A",
            Category::T => "T",
            Category::C => "C",
            Category::G => "G",
            Category::N => "N",
            Category::Ins => "ins",
            Category::Del => "del",
            Category::Gap => "*",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Errors raised while classifying tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TallyError {
    /// A `.` or `,` was seen but the reference base is not a countable nucleotide.
    #[error("reference base '{reference}' cannot absorb reference-match reads")]
    UnresolvableReference {
        /// Reference base as given in the record.
        reference: char,
    },
}

/// Per-position counts for every category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CountTable {
    counts: [u64; NUM_CATEGORIES],
}

impl CountTable {
    /// Empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Count for one category.
    pub fn get(&self, category: Category) -> u64 {
        self.counts[category.index()]
    }

    pub(crate) fn increment(&mut self, category: Category) {
        self.counts[category.index()] += 1;
    }

    /// Sum of A, T, C, G, N and gap; the figure compared against the depth.
    pub fn depth_sum(&self) -> u64 {
        Category::ALL
            .into_iter()
            .filter(|c| c.counts_towards_depth())
            .map(|c| self.get(c))
            .sum()
    }

    /// Counts in output-table column order.
    pub fn emitted(&self) -> impl Iterator<Item = u64> + '_ {
        Category::EMITTED.into_iter().map(move |c| self.get(c))
    }
}

impl fmt::Display for CountTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, category) in Category::ALL.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "'{}': {}", category.label(), self.get(*category))?;
        }
        f.write_str("}")
    }
}

/// Category for a single token, or `None` when the token is discarded.
///
/// Order matters: base letters first, then reference matches, then indel
/// signs (a bare `+` or `-` symbol counts as its indel kind), then `*`.
/// Every other symbol (`$`, `<`, `>`, stray digits...) is dropped.
pub fn classify(token: &Token<'_>, reference: char) -> Result<Option<Category>, TallyError> {
    match *token {
        Token::Indel {
            kind: IndelKind::Insertion,
            ..
        } => Ok(Some(Category::Ins)),
        Token::Indel {
            kind: IndelKind::Deletion,
            ..
        } => Ok(Some(Category::Del)),
        Token::Symbol(c) => {
            if let Some(base) = Category::from_base(c) {
                return Ok(Some(base));
            }
            match c {
                '.' | ',' => Category::from_base(reference)
                    .map(Some)
                    .ok_or(TallyError::UnresolvableReference { reference }),
                '+' => Ok(Some(Category::Ins)),
                '-' => Ok(Some(Category::Del)),
                '*' => Ok(Some(Category::Gap)),
                _ => Ok(None),
            }
        }
    }
}

/// Count every token against the given reference base.
pub fn tally(tokens: &[Token<'_>], reference: char) -> Result<CountTable, TallyError> {
    let mut table = CountTable::new();
    for token in tokens {
        if let Some(category) = classify(token, reference)? {
            table.increment(category);
        }
    }
    Ok(table)
}
