//! Writer stage: drains the header block then the output queue, in
//! that order, to standard output (or wherever the caller points it).

use std::io::Write;
use std::sync::mpsc::Receiver;

use crate::error::PipelineError;
use crate::reader::HeaderChunk;

/// With more than one worker, batch order on `out_rx` is not the
/// reader's input order — see the module-level design notes.
pub fn drain<W: Write>(
    mut output: W,
    header_rx: Receiver<HeaderChunk>,
    out_rx: Receiver<Vec<String>>,
) -> Result<(), PipelineError> {
    if let Ok(HeaderChunk(lines)) = header_rx.recv() {
        for line in lines {
            writeln!(output, "{line}")?;
        }
    }
    for lines in out_rx {
        for line in lines {
            writeln!(output, "{line}")?;
        }
    }
    output.flush()?;
    Ok(())
}
