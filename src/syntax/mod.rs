// Parsed document wrapper
pub mod file;

pub use file::SyntaxFile;
