mod error;
mod interpreter;
mod ops;

pub use error::{RuntimeError, RuntimeResult};
pub use interpreter::Interpreter;

use crate::{
  compiler::{Parser, Scanner},
  constants::{PROMPT, REPL_MODULE, SOURCE_MODULE},
  source::{VmFileId, VmFiles},
};
use codespan_reporting::{
  diagnostic::Diagnostic,
  term::{self, Config},
};
use loxe_core::value::Value;
use loxe_env::io::Io;
use loxe_native::io::io_native;
use std::{io::Write, path::PathBuf};

#[cfg(feature = "debug")]
use crate::debug::{print_ast, print_tokens};

const VERSION: &str = "0.1.0";

/// The outcome of a single scan, parse and evaluate cycle
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionResult {
  Ok(Value),
  CompileError,
  RuntimeError,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VmExit {
  Ok,
  CompileError,
  RuntimeError,
  IoError,
}

impl VmExit {
  /// The process exit code associated with this exit
  pub fn code(&self) -> i32 {
    match self {
      VmExit::Ok => 0,
      VmExit::CompileError => 65,
      VmExit::RuntimeError => 70,
      VmExit::IoError => 66,
    }
  }
}

pub fn default_native_vm() -> Vm {
  Vm::new(io_native())
}

/// The session driver for the loxe language. Each run scans,
/// parses and evaluates a single expression
pub struct Vm {
  /// The environments io access
  io: Io,

  /// The currently loaded files
  files: VmFiles,

  /// The expression evaluator
  interpreter: Interpreter,
}

impl Vm {
  pub fn new(io: Io) -> Vm {
    Vm {
      io,
      files: VmFiles::default(),
      interpreter: Interpreter::default(),
    }
  }

  pub fn version(&self) -> &'static str {
    VERSION
  }

  /// Start an interactive session. Each line is a full cycle and
  /// errors are reported without ending the session
  pub fn repl(&mut self) -> (i32, VmExit) {
    let mut stdio = self.io.stdio();

    loop {
      let mut buffer = String::new();

      write!(stdio.stdout(), "{}", PROMPT).expect("Could not write to stdout");
      stdio.stdout().flush().expect("Could not write to stdout");

      match stdio.read_line(&mut buffer) {
        Ok(0) => return (VmExit::Ok.code(), VmExit::Ok),
        Ok(_) => {
          let line = buffer.trim_end_matches(|c| c == '\n' || c == '\r');
          let file_id = self.files.upsert(REPL_MODULE, line);
          self.interpret(file_id, line);
        },
        Err(error) => {
          writeln!(stdio.stderr(), "{}", error).expect("Unable to write to stderr");
          return (74, VmExit::IoError);
        },
      }
    }
  }

  /// Run the file at the provided path
  pub fn run_file(&mut self, path: PathBuf) -> (i32, VmExit) {
    match self.io.fs().read_file(&path) {
      Ok(source) => self.run(path, &source),
      Err(err) => self.io_error(&err),
    }
  }

  /// Run the provided source as if it came from the provided path
  pub fn run(&mut self, path: PathBuf, source: &str) -> (i32, VmExit) {
    match self.io.fs().canonicalize(&path) {
      Ok(path) => {
        let file_id = self.files.upsert(&path.to_string_lossy(), source);

        let exit = match self.interpret(file_id, source) {
          ExecutionResult::Ok(_) => VmExit::Ok,
          ExecutionResult::CompileError => VmExit::CompileError,
          ExecutionResult::RuntimeError => VmExit::RuntimeError,
        };

        (exit.code(), exit)
      },
      Err(err) => self.io_error(&err),
    }
  }

  /// Interpret a source string directly returning the execution result
  ///
  /// # Examples
  /// ```
  /// use loxe_vm::vm::{ExecutionResult, Vm};
  /// use loxe_env::io::Io;
  /// use loxe_core::value::Value;
  ///
  /// let mut vm = Vm::new(Io::default());
  ///
  /// assert_eq!(vm.interpret_source("7 / 2"), ExecutionResult::Ok(Value::Number(3.5)));
  /// assert_eq!(vm.interpret_source("1 +"), ExecutionResult::CompileError);
  /// assert_eq!(vm.interpret_source("-nil"), ExecutionResult::RuntimeError);
  /// ```
  pub fn interpret_source(&mut self, source: &str) -> ExecutionResult {
    let file_id = self.files.upsert(SOURCE_MODULE, source);
    self.interpret(file_id, source)
  }

  /// Scan, parse and evaluate the provided source. The value is
  /// printed on success and all diagnostics are reported otherwise
  fn interpret(&mut self, file_id: VmFileId, source: &str) -> ExecutionResult {
    let scanned = Scanner::new(source).scan_tokens(file_id);
    self
      .files
      .update_line_offsets(file_id, scanned.line_offsets)
      .expect("Unable to locate file that was just inserted");

    #[cfg(feature = "debug")]
    print_tokens(&mut self.io.stdio(), &scanned.tokens).expect("Unable to write to stdout");

    let mut errors = scanned.errors;
    let expr = match Parser::new(scanned.tokens, file_id).parse() {
      Ok(expr) => expr,
      Err(mut parse_errors) => {
        errors.append(&mut parse_errors);
        return self.compile_errors(&errors);
      },
    };

    if !errors.is_empty() {
      return self.compile_errors(&errors);
    }

    #[cfg(feature = "debug")]
    print_ast(&mut self.io.stdio(), &expr).expect("Unable to write to stdout");

    match self.interpreter.evaluate(&expr) {
      Ok(value) => {
        writeln!(self.io.stdio().stdout(), "{}", value).expect("Unable to write to stdout");
        ExecutionResult::Ok(value)
      },
      Err(error) => {
        self.emit(&error.to_diagnostic(file_id));
        ExecutionResult::RuntimeError
      },
    }
  }

  /// Report each lexical or syntax error
  fn compile_errors(&self, errors: &[Diagnostic<VmFileId>]) -> ExecutionResult {
    for error in errors {
      self.emit(error);
    }

    ExecutionResult::CompileError
  }

  /// Render a diagnostic to stderr
  fn emit(&self, diagnostic: &Diagnostic<VmFileId>) {
    let mut stdio = self.io.stdio();
    let stderr_color = stdio.stderr_color();

    term::emit(stderr_color, &Config::default(), &self.files, diagnostic)
      .expect("Unable to write to stderr");
  }

  /// Report a file system error
  fn io_error(&self, err: &std::io::Error) -> (i32, VmExit) {
    writeln!(self.io.stdio().stderr(), "{}", err).expect("Unable to write to stderr");
    (VmExit::IoError.code(), VmExit::IoError)
  }
}
