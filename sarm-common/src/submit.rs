use std::io::Write;

use serde::Serialize;

use crate::types::CallIntent;

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("could not serialize intent: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("could not write intent: {0}")]
    Io(#[from] std::io::Error),
}

/// Acknowledgment returned once an intent has been accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IntentAck {
    pub sequence: u64,
}

/// Boundary through which call intents leave the process.
pub trait IntentSubmitter {
    fn submit(&mut self, intent: &CallIntent) -> Result<IntentAck, SubmitError>;
}

/// Writes every intent as one JSON document per line.
pub struct JsonLinesSubmitter<W> {
    writer: W,
    submitted: u64,
}

impl<W: Write> JsonLinesSubmitter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            submitted: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> IntentSubmitter for JsonLinesSubmitter<W> {
    fn submit(&mut self, intent: &CallIntent) -> Result<IntentAck, SubmitError> {
        serde_json::to_writer(&mut self.writer, intent)?;
        writeln!(self.writer)?;
        self.writer.flush()?;
        self.submitted += 1;
        Ok(IntentAck {
            sequence: self.submitted,
        })
    }
}
