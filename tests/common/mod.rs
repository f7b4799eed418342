#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

/// Pileup exercising read starts/ends, long indels, gaps and stray symbols.
pub const MIXED_PILEUP: &str = concat!(
    "chr1\t100\tA\t6\t.,AtN*+2GG-1T\tIIIIII\n",
    "chr1\t101\tC\t4\t^].^F,$gG\tIIII\n",
    "chr1\t102\tT\t5\t.,.+10ACGTACGTAC,*-3NNN\tIIIII\n",
    "chr1\t103\tg\t3\t,$.^!c\tIII\n",
    "chr2\t7\tN\t2\tNn<\tII\n",
);

/// One pileup line with a quality column as wide as the reported depth.
pub fn pileup_line(chrom: &str, pos: &str, ref_base: char, depth: &str, bases: &str) -> String {
    let width = depth.parse::<usize>().unwrap_or(0);
    format!("{chrom}\t{pos}\t{ref_base}\t{depth}\t{bases}\t{}\n", "I".repeat(width))
}

/// Expected table row for one position, counts in A, T, C, G, N, ins, del order.
pub fn tally_row(chrom: &str, pos: &str, ref_base: char, depth: &str, counts: [u64; 7]) -> String {
    let counts: Vec<String> = counts.iter().map(u64::to_string).collect();
    format!("{chrom}\t{pos}\t{ref_base}\t{depth}\t{}\n", counts.join("\t"))
}

/// Fresh directory under the cargo test scratch area.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = Path::new(env!("CARGO_TARGET_TMPDIR")).join(name);
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).expect("create scratch directory");
    dir
}

/// Write `lines` as a pileup file inside `dir`.
pub fn write_pileup(dir: &Path, name: &str, lines: &[String]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, lines.concat()).expect("write pileup fixture");
    path
}
