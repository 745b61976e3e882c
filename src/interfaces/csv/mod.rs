pub mod payload_writer;
pub mod target_reader;
