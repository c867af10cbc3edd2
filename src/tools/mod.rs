// Modular tools
pub mod extract;
pub mod parse;
pub mod variants;
