pub mod validation;

pub use validation::{resolve_file, resolve_seek_request, resolve_tail_request};
