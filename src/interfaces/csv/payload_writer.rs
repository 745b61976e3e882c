use crate::application::payload::PayloadRecord;
use crate::error::Result;
use std::io::Write;

/// Writes generated payloads as CSV with a `target,category,amount,payload`
/// header.
pub struct PayloadWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> PayloadWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_record(&mut self, record: &PayloadRecord) -> Result<()> {
        self.writer.serialize(record)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
