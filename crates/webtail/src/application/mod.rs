pub mod tail_reader_service;

pub use tail_reader_service::TailReaderService;
