pub mod ast;
pub mod token;

mod ast_printer;

pub use ast_printer::AstPrint;
