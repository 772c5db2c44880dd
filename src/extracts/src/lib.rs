pub mod fs;
pub mod ingest;
pub mod parser;
