pub mod extractor;
pub mod gate;
pub mod jwt;
