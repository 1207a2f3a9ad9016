//! Reader stage: forwards header lines verbatim, then groups consecutive
//! records sharing one query name into batches, the unit of parallelism
//! handed to workers.

use std::collections::HashSet;
use std::io::BufRead;
use std::sync::mpsc::SyncSender;

use align_record::{is_header_line, ParseError, Record};

use crate::error::PipelineError;

/// A chunk of output lines ready for the writer, bypassing the work
/// queue. Used for the header block, which has no duplicate decision to
/// make.
pub struct HeaderChunk(pub Vec<String>);

/// Read `input` line by line, forwarding the header block to `header_tx`
/// and dispatching qname-grouped record batches to `work_tx`.
///
/// Dropping `work_tx` on return signals "no more batches" to every
/// worker, which is how shutdown propagates without an explicit
/// sentinel value.
pub fn read_and_group<R: BufRead>(
    input: R,
    header_tx: SyncSender<HeaderChunk>,
    work_tx: SyncSender<Vec<Record>>,
) -> Result<(), PipelineError> {
    let mut lines = input.lines();
    let mut line_no: u64 = 0;
    let mut headers = Vec::new();
    let mut first_record_line: Option<String> = None;

    for line in &mut lines {
        line_no += 1;
        let line = line?;
        if is_header_line(&line) {
            headers.push(line);
        } else {
            first_record_line = Some(line);
            break;
        }
    }
    // Headers must reach the writer before any batch output, so send
    // them before the first batch is ever dispatched.
    let _ = header_tx.send(HeaderChunk(headers));

    let mut finished_qnames: HashSet<String> = HashSet::new();
    let mut current_qname: Option<String> = None;
    let mut current_group: Vec<Record> = Vec::new();

    let mut handle_line = |line: String, line_no: u64| -> Result<(), PipelineError> {
        let record = Record::parse(&line, line_no)?;
        match &current_qname {
            Some(qname) if *qname == record.qname => {
                current_group.push(record);
            }
            Some(_) => {
                let finished = current_qname.take().unwrap();
                finished_qnames.insert(finished);
                if finished_qnames.contains(&record.qname) {
                    return Err(ParseError::UnorderedQueryNames {
                        line: line_no,
                        expected: current_group
                            .first()
                            .map(|r| r.qname.clone())
                            .unwrap_or_default(),
                        found: record.qname.clone(),
                    }
                    .into());
                }
                let batch = std::mem::replace(&mut current_group, vec![record.clone()]);
                current_qname = Some(record.qname);
                if work_tx.send(batch).is_err() {
                    return Err(PipelineError::Internal(
                        "work queue closed while reader still has input".into(),
                    ));
                }
            }
            None => {
                current_qname = Some(record.qname.clone());
                current_group.push(record);
            }
        }
        Ok(())
    };

    if let Some(line) = first_record_line {
        handle_line(line, line_no)?;
    }
    for line in lines {
        line_no += 1;
        let line = line?;
        handle_line(line, line_no)?;
    }

    if !current_group.is_empty() {
        let _ = work_tx.send(current_group);
    }

    Ok(())
}
