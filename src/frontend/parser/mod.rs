pub mod ast;
mod declarations;
mod expressions;
pub mod parser;
mod statements;

pub use parser::Parser;
