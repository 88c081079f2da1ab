/// The file name given to each line read by the repl
pub const REPL_MODULE: &str = "repl.lox";

/// The file name given to source interpreted directly
pub const SOURCE_MODULE: &str = "source.lox";

pub const PROMPT: &str = "> ";
