//! The `Record` type: a parsed alignment line plus original-line
//! pass-through for unmodified re-emission.

use crate::cigar::Cigar;
use crate::error::ParseError;
use crate::flags;

/// One parsed alignment record.
///
/// `raw` retains the original line bytes; only the flag field is ever
/// rewritten, and `to_line` patches just that field back into `raw`
/// rather than re-serializing every column, so any trailing tags the
/// parser doesn't model are preserved byte-for-byte.
#[derive(Debug, Clone)]
pub struct Record {
    pub qname: String,
    pub flag: u16,
    pub rname: String,
    pub pos: u32,
    pub mapq: u8,
    pub cigar: Cigar,
    pub rnext: String,
    pub pnext: u32,
    pub tlen: i32,
    raw: String,
    flag_field_range: std::ops::Range<usize>,
}

impl Record {
    /// Parse one tab-separated record line. `line_no` is used only for
    /// error messages.
    pub fn parse(line: &str, line_no: u64) -> Result<Self, ParseError> {
        let mut field_ranges = Vec::with_capacity(11);
        let mut start = 0;
        for (i, b) in line.bytes().enumerate() {
            if b == b'\t' {
                field_ranges.push(start..i);
                start = i + 1;
            }
        }
        field_ranges.push(start..line.len());

        if field_ranges.len() < 11 {
            return Err(ParseError::TooFewFields {
                line: line_no,
                found: field_ranges.len(),
            });
        }
        let field = |i: usize| &line[field_ranges[i].clone()];

        let qname = field(0).to_string();
        let flag_field_range = field_ranges[1].clone();
        let flag: u16 = field(1).parse().map_err(|_| ParseError::InvalidFlag {
            line: line_no,
            value: field(1).to_string(),
        })?;
        let rname = field(2).to_string();
        let pos: u32 = field(3).parse().map_err(|_| ParseError::InvalidPosition {
            line: line_no,
            value: field(3).to_string(),
        })?;
        let mapq: u8 = field(4)
            .parse()
            .map_err(|_| ParseError::InvalidMappingQuality {
                line: line_no,
                value: field(4).to_string(),
            })?;
        let cigar = Cigar::parse(field(5)).map_err(|reason| ParseError::InvalidCigar {
            line: line_no,
            reason,
        })?;
        let rnext = field(6).to_string();
        let pnext: u32 = field(7).parse().unwrap_or(0);
        let tlen: i32 = field(8).parse().unwrap_or(0);

        Ok(Self {
            qname,
            flag,
            rname,
            pos,
            mapq,
            cigar,
            rnext,
            pnext,
            tlen,
            raw: line.to_string(),
            flag_field_range,
        })
    }

    pub fn is_unmapped(&self) -> bool {
        flags::has(self.flag, flags::UNMAPPED)
    }

    pub fn is_reverse(&self) -> bool {
        flags::has(self.flag, flags::REVERSE)
    }

    pub fn is_secondary(&self) -> bool {
        flags::has(self.flag, flags::SECONDARY)
    }

    pub fn is_supplementary(&self) -> bool {
        flags::has(self.flag, flags::SUPPLEMENTARY)
    }

    pub fn is_first_in_pair(&self) -> bool {
        flags::has(self.flag, flags::FIRST_IN_PAIR)
    }

    pub fn is_paired(&self) -> bool {
        flags::has(self.flag, flags::PAIRED)
    }

    /// Set the duplicate bit (0x400).
    pub fn mark_duplicate(&mut self) {
        self.flag |= flags::DUPLICATE;
    }

    /// Serialize back to a line, patching only the flag field if it
    /// changed; every other byte is untouched.
    pub fn to_line(&self) -> String {
        let mut out = String::with_capacity(self.raw.len() + 4);
        out.push_str(&self.raw[..self.flag_field_range.start]);
        out.push_str(&self.flag.to_string());
        out.push_str(&self.raw[self.flag_field_range.end..]);
        out
    }
}
