//! Minimal cigar (operation run) parsing: just enough to compute
//! reference-consuming spans and leading/trailing soft-clip lengths.

/// A single run of `len` applications of `op`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CigarOp {
    pub len: u32,
    pub kind: OpKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpKind {
    Match,         // M
    Insertion,     // I
    Deletion,      // D
    Skip,          // N
    SoftClip,      // S
    HardClip,      // H
    Padding,       // P
    SeqMatch,      // =
    SeqMismatch,   // X
}

impl OpKind {
    fn from_char(c: char) -> Option<Self> {
        Some(match c {
            'M' => OpKind::Match,
            'I' => OpKind::Insertion,
            'D' => OpKind::Deletion,
            'N' => OpKind::Skip,
            'S' => OpKind::SoftClip,
            'H' => OpKind::HardClip,
            'P' => OpKind::Padding,
            '=' => OpKind::SeqMatch,
            'X' => OpKind::SeqMismatch,
            _ => return None,
        })
    }

    /// Whether this operation consumes reference bases.
    fn consumes_reference(self) -> bool {
        matches!(
            self,
            OpKind::Match | OpKind::Deletion | OpKind::Skip | OpKind::SeqMatch | OpKind::SeqMismatch
        )
    }
}

/// A parsed cigar string, as an ordered list of operation runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cigar(pub Vec<CigarOp>);

impl Cigar {
    /// Parse a cigar string such as `"10S90M"`. The unmapped sentinel
    /// `"*"` parses to an empty cigar.
    pub fn parse(s: &str) -> Result<Self, String> {
        if s == "*" {
            return Ok(Cigar(Vec::new()));
        }
        let mut ops = Vec::new();
        let mut num = String::new();
        for c in s.chars() {
            if c.is_ascii_digit() {
                num.push(c);
            } else {
                let len: u32 = num
                    .parse()
                    .map_err(|_| format!("invalid cigar run length in '{s}'"))?;
                let kind = OpKind::from_char(c).ok_or_else(|| format!("invalid cigar op '{c}' in '{s}'"))?;
                ops.push(CigarOp { len, kind });
                num.clear();
            }
        }
        if !num.is_empty() {
            return Err(format!("trailing unterminated run in cigar '{s}'"));
        }
        Ok(Cigar(ops))
    }

    /// Sum of reference-consuming operation lengths.
    pub fn reference_length(&self) -> u32 {
        self.0
            .iter()
            .filter(|op| op.kind.consumes_reference())
            .map(|op| op.len)
            .sum()
    }

    /// Length of the leading soft-clip run, if the first operation is one.
    pub fn leading_soft_clip(&self) -> u32 {
        match self.0.first() {
            Some(op) if op.kind == OpKind::SoftClip => op.len,
            _ => 0,
        }
    }

    /// Length of the trailing soft-clip run, if the last operation is one.
    pub fn trailing_soft_clip(&self) -> u32 {
        match self.0.last() {
            Some(op) if op.kind == OpKind::SoftClip => op.len,
            _ => 0,
        }
    }
}
