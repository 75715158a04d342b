pub mod airports;
pub mod flights;
pub mod orders;
pub mod parser;
