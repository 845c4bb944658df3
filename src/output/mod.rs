//! Output destination for query records

pub mod path;
pub mod sink;

pub use path::{expand_home, output_path};
pub use sink::{Destination, OutputSink};
