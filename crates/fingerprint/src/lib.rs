//! Derive a canonical duplicate-detection fingerprint from a group of
//! alignment records sharing one query name.
//!
//! The fingerprint is built from 5'-soft-clip-corrected reference
//! coordinates so that PCR replicates differing only in soft-clipped
//! bases collide on the same key, and from a canonical ordering of mate
//! tuples so that read1/read2 order doesn't affect the result.

use align_record::Record;
use std::cmp::Ordering;

/// One mate's canonical coordinate: reference name, unclipped 5' position,
/// and strand.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct MateCoord {
    rname: String,
    coord: u32,
    reverse: bool,
}

/// The outcome of attempting to fingerprint a query-name group.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fingerprint {
    /// A canonical byte string suitable for Bloom filter lookup/insert.
    Key(Vec<u8>),
    /// All primary alignments in the group are unmapped; not eligible
    /// for duplicate marking.
    Unmapped,
}

/// Compute the unclipped 5' reference coordinate for one primary
/// alignment.
fn unclipped_5p(record: &Record) -> u32 {
    if record.is_reverse() {
        let ref_len = record.cigar.reference_length();
        let trailing_clip = record.cigar.trailing_soft_clip();
        (record.pos + ref_len + trailing_clip).saturating_sub(1)
    } else {
        let leading_clip = record.cigar.leading_soft_clip();
        record.pos.saturating_sub(leading_clip)
    }
}

fn mate_coord(record: &Record) -> MateCoord {
    MateCoord {
        rname: record.rname.clone(),
        coord: unclipped_5p(record),
        reverse: record.is_reverse(),
    }
}

/// Compute the fingerprint for a query-name group. `records` must
/// contain only the primary alignments of the template (the caller
/// excludes secondary/supplementary records before calling this).
pub fn fingerprint(records: &[Record]) -> Fingerprint {
    let mapped: Vec<&Record> = records.iter().filter(|r| !r.is_unmapped()).collect();

    if mapped.is_empty() {
        return Fingerprint::Unmapped;
    }

    let mut coords: Vec<MateCoord> = mapped.iter().map(|r| mate_coord(r)).collect();

    // Sort so that read1/read2 emission order never affects the key.
    coords.sort_by(|a, b| {
        a.rname
            .cmp(&b.rname)
            .then(a.coord.cmp(&b.coord))
            .then_with(|| match (a.reverse, b.reverse) {
                (false, true) => Ordering::Less,
                (true, false) => Ordering::Greater,
                _ => Ordering::Equal,
            })
    });

    let unmapped_mate_count = records.len() - mapped.len();

    let mut key = Vec::new();
    for c in &coords {
        key.extend_from_slice(c.rname.as_bytes());
        key.push(0);
        key.extend_from_slice(&c.coord.to_le_bytes());
        key.push(c.reverse as u8);
        key.push(0xFF);
    }
    if unmapped_mate_count > 0 {
        key.extend_from_slice(b"UNMAPPED_MATE");
    }

    Fingerprint::Key(key)
}
