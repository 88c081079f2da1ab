use loxe_env::{
  io::IoImpl,
  stdio::{Stdio, StdioImpl},
};
use std::io::{self, stdin, stdout, Stdout, Write};
use termcolor::{ColorChoice, StandardStream, WriteColor};

#[derive(Debug)]
pub struct IoStdioNative();

impl IoImpl<Stdio> for IoStdioNative {
  fn make(&self) -> Stdio {
    Stdio::new(Box::<NativeStdio>::default())
  }
}

pub struct NativeStdio {
  stdout: Stdout,
  stderr: StandardStream,
}

impl Default for NativeStdio {
  fn default() -> Self {
    Self {
      stdout: stdout(),
      stderr: StandardStream::stderr(ColorChoice::Auto),
    }
  }
}

impl StdioImpl for NativeStdio {
  fn stdout(&mut self) -> &mut dyn Write {
    &mut self.stdout
  }

  fn stderr(&mut self) -> &mut dyn Write {
    &mut self.stderr
  }

  fn stderr_color(&mut self) -> &mut dyn WriteColor {
    &mut self.stderr
  }

  fn read_line(&self, buffer: &mut String) -> io::Result<usize> {
    stdin().read_line(buffer)
  }
}
