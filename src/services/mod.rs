pub mod output_writer;
pub mod warn_writer;

pub use output_writer::OutputWriter;
pub use warn_writer::WarnWriter;
