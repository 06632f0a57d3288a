pub mod tail_reader;

pub use tail_reader::TailReader;
