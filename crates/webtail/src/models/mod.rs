pub mod requests;
pub mod responses;

pub use requests::{TailQuery, TailRequest};
pub use responses::{TailResponse, TailResult};
