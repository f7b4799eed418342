use std::io::{self, Write};

use super::PileupLine;
use super::tally::CountTable;

/// Column names of the tally table, in order.
pub const HEADER_COLUMNS: [&str; 11] = [
    "ref.id",
    "ref.pos",
    "ref.base",
    "total.reads",
    "A",
    "T",
    "C",
    "G",
    "N",
    "ins",
    "del",
];

/// Write the fixed header row.
pub fn write_header<W: Write>(writer: &mut W) -> io::Result<()> {
    writeln!(writer, "{}", HEADER_COLUMNS.join("\t"))
}

/// Write the row for one pileup line.
pub fn write_row<W: Write>(
    writer: &mut W,
    record: &PileupLine<'_>,
    counts: &CountTable,
) -> io::Result<()> {
    write!(
        writer,
        "{}\t{}\t{}\t{}",
        record.ref_id,
        record.ref_pos_text,
        record.ref_base_upper(),
        record.depth_text
    )?;
    for count in counts.emitted() {
        write!(writer, "\t{count}")?;
    }
    writeln!(writer)
}
