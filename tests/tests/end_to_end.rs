//! End-to-end pipeline scenarios over small in-memory buffers.

use std::io::Cursor;

use bloom::BloomFilter;
use dedup_metrics::Metrics;
use dedup_pipeline::{run, PipelineConfig};

fn rec(qname: &str, flag: u16, rname: &str, pos: u32, cigar: &str) -> String {
    format!("{qname}\t{flag}\t{rname}\t{pos}\t60\t{cigar}\tchr1\t0\t0\tACGT\tFFFF")
}

fn run_pipeline(input: &str, workers: usize) -> (String, dedup_metrics::MetricsSnapshot) {
    let filter = BloomFilter::new(10_000, 1e-6).unwrap();
    let metrics = Metrics::new();
    let cursor = Cursor::new(input.as_bytes().to_vec());
    let mut out = Vec::new();
    run(
        cursor,
        &mut out,
        &filter,
        &metrics,
        PipelineConfig {
            workers,
            queue_capacity: 8,
        },
    )
    .expect("pipeline should succeed on well-formed input");
    let snapshot = metrics.snapshot(&filter);
    (String::from_utf8(out).unwrap(), snapshot)
}

fn flag_of(line: &str) -> u16 {
    line.split('\t').nth(1).unwrap().parse().unwrap()
}

#[test]
fn single_end_duplicate_second_record_marked() {
    let input = format!(
        "@HD\tVN:1.6\n{}\n{}\n",
        rec("r1", 0, "chr1", 100, "90M"),
        rec("r2", 0, "chr1", 100, "90M"),
    );
    let (out, snap) = run_pipeline(&input, 1);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(lines[0], "@HD\tVN:1.6");
    assert_eq!(flag_of(lines[1]) & 0x400, 0);
    assert_ne!(flag_of(lines[2]) & 0x400, 0);
    assert_eq!(snap.templates_duplicate, 1);
}

#[test]
fn soft_clip_equivalence_second_record_marked() {
    let input = format!(
        "{}\n{}\n",
        rec("r1", 0, "chr1", 100, "10S90M"),
        rec("r2", 0, "chr1", 95, "15S85M"),
    );
    let (out, _) = run_pipeline(&input, 1);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(flag_of(lines[0]) & 0x400, 0);
    assert_ne!(flag_of(lines[1]) & 0x400, 0);
}

#[test]
fn reverse_strand_equivalence_second_record_marked() {
    let input = format!(
        "{}\n{}\n",
        rec("r1", 0x10, "chr1", 100, "90M"),
        rec("r2", 0x10, "chr1", 95, "85M10S"),
    );
    let (out, _) = run_pipeline(&input, 1);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(flag_of(lines[0]) & 0x400, 0);
    assert_ne!(flag_of(lines[1]) & 0x400, 0);
}

#[test]
fn mate_order_invariance_second_template_marked() {
    let r1a = rec("t1", 0x1 | 0x40, "chr1", 100, "90M");
    let r2a = rec("t1", 0x1 | 0x80, "chr2", 500, "90M");
    let r2b = rec("t2", 0x1 | 0x80, "chr2", 500, "90M");
    let r1b = rec("t2", 0x1 | 0x40, "chr1", 100, "90M");
    let input = format!("{r1a}\n{r2a}\n{r2b}\n{r1b}\n");
    let (out, snap) = run_pipeline(&input, 1);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(flag_of(lines[0]) & 0x400, 0);
    assert_eq!(flag_of(lines[1]) & 0x400, 0);
    assert_ne!(flag_of(lines[2]) & 0x400, 0);
    assert_ne!(flag_of(lines[3]) & 0x400, 0);
    assert_eq!(snap.templates_duplicate, 1);
}

#[test]
fn unmapped_template_is_skipped_not_marked() {
    let input = format!("{}\n", rec("r1", 0x4, "*", 0, "*"));
    let (out, snap) = run_pipeline(&input, 1);
    let lines: Vec<&str> = out.lines().collect();
    assert_eq!(flag_of(lines[0]) & 0x400, 0);
    assert_eq!(snap.templates_unmapped, 1);
    assert_eq!(snap.templates_seen, 0);
}

#[test]
fn secondary_alignment_inherits_primary_duplicate_decision() {
    let input = format!(
        "{}\n{}\n{}\n",
        rec("r1", 0, "chr1", 100, "90M"),
        rec("r2", 0, "chr1", 100, "90M"),
        rec("r2", 0x100, "chr1", 100, "90M"),
    );
    let (out, snap) = run_pipeline(&input, 1);
    let lines: Vec<&str> = out.lines().collect();
    assert_ne!(flag_of(lines[1]) & 0x400, 0);
    assert_ne!(flag_of(lines[2]) & 0x400, 0);
    assert_eq!(snap.secondary_supplementary_passed, 1);
}

#[test]
fn multi_worker_run_still_marks_all_duplicates() {
    let mut input = String::new();
    for i in 0..20 {
        input.push_str(&rec(&format!("orig{i}"), 0, "chr1", 1000 + i, "90M"));
        input.push('\n');
        input.push_str(&rec(&format!("dup{i}"), 0, "chr1", 1000 + i, "90M"));
        input.push('\n');
    }
    let (out, snap) = run_pipeline(&input, 4);
    assert_eq!(out.lines().count(), 40);
    assert_eq!(snap.templates_duplicate, 20);
}
