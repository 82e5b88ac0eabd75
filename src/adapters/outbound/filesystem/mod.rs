/// Filesystem adapters for reading record files
mod record_file_reader;

pub use record_file_reader::RecordFileReader;
