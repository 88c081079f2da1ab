use crate::io::IoImpl;
use std::io::{self, Write};
use termcolor::{ColorSpec, WriteColor};

/// A wrapper the provided facilities around standard input output and err
pub struct Stdio {
  stdio: Box<dyn StdioImpl>,
}

impl Default for Stdio {
  fn default() -> Self {
    Self {
      stdio: Box::new(StdioMock::default()),
    }
  }
}

impl Stdio {
  /// Create a new wrapper from the provided stdio facilities
  pub fn new(stdio: Box<dyn StdioImpl>) -> Self {
    Self { stdio }
  }

  /// Get a Write to stdout
  pub fn stdout(&mut self) -> &mut dyn Write {
    self.stdio.stdout()
  }

  /// Get a Write to stderr
  pub fn stderr(&mut self) -> &mut dyn Write {
    self.stdio.stderr()
  }

  /// Get a color aware Write to stderr
  pub fn stderr_color(&mut self) -> &mut dyn WriteColor {
    self.stdio.stderr_color()
  }

  /// Read a line from standard in. A return of `Ok(0)`
  /// indicates the end of input
  pub fn read_line(&self, buffer: &mut String) -> io::Result<usize> {
    self.stdio.read_line(buffer)
  }
}

pub trait StdioImpl {
  fn stdout(&mut self) -> &mut dyn Write;
  fn stderr(&mut self) -> &mut dyn Write;
  fn stderr_color(&mut self) -> &mut dyn WriteColor;

  fn read_line(&self, buffer: &mut String) -> io::Result<usize>;
}

#[derive(Debug)]
pub struct IoStdioMock();

impl IoImpl<Stdio> for IoStdioMock {
  fn make(&self) -> Stdio {
    Stdio::default()
  }
}

#[derive(Default)]
pub struct StdioMock {
  write: MockWrite,
}

impl StdioImpl for StdioMock {
  fn stdout(&mut self) -> &mut dyn Write {
    &mut self.write
  }
  fn stderr(&mut self) -> &mut dyn Write {
    &mut self.write
  }
  fn stderr_color(&mut self) -> &mut dyn WriteColor {
    &mut self.write
  }
  fn read_line(&self, _buffer: &mut String) -> io::Result<usize> {
    Ok(0)
  }
}

#[derive(Default)]
pub struct MockWrite();

impl Write for MockWrite {
  fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
    Ok(buf.len())
  }
  fn flush(&mut self) -> io::Result<()> {
    Ok(())
  }
}

impl WriteColor for MockWrite {
  fn supports_color(&self) -> bool {
    false
  }

  fn set_color(&mut self, _: &ColorSpec) -> io::Result<()> {
    Ok(())
  }

  fn reset(&mut self) -> io::Result<()> {
    Ok(())
  }
}

pub mod support {
  use super::{Stdio, StdioImpl};
  use crate::io::IoImpl;
  use std::cell::{Cell, RefCell};
  use std::io::{self, Write};
  use std::rc::Rc;
  use termcolor::{ColorSpec, WriteColor};

  /// A writer that captures everything written to it in a shared buffer
  #[derive(Debug, Clone, Default)]
  pub struct TestWriter(Rc<RefCell<Vec<u8>>>);

  impl TestWriter {
    /// The lossy utf8 contents written so far
    pub fn contents(&self) -> String {
      String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }

    /// The written contents split into lines without trailing whitespace
    pub fn lines(&self) -> Vec<String> {
      let contents = self.contents();
      let trimmed = contents.trim_end();

      if trimmed.is_empty() {
        return vec![];
      }

      trimmed.split('\n').map(|line| line.to_string()).collect()
    }
  }

  impl Write for TestWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
      self.0.borrow_mut().extend_from_slice(buf);
      Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> {
      Ok(())
    }
  }

  impl WriteColor for TestWriter {
    fn supports_color(&self) -> bool {
      false
    }

    fn set_color(&mut self, _: &ColorSpec) -> io::Result<()> {
      Ok(())
    }

    fn reset(&mut self) -> io::Result<()> {
      Ok(())
    }
  }

  #[derive(Debug, Default)]
  pub struct StdioTestContainer {
    pub stdout: TestWriter,
    pub stderr: TestWriter,
    pub lines: Vec<String>,
    line_index: Cell<usize>,
  }

  impl StdioTestContainer {
    pub fn with_lines(lines: Vec<String>) -> Self {
      Self {
        lines,
        ..Default::default()
      }
    }

    pub fn log_stdio(&self) {
      eprintln!("{}", self.stdout.contents());
      eprintln!("{}", self.stderr.contents());
    }
  }

  #[derive(Debug)]
  pub struct IoStdioTest {
    container: Rc<StdioTestContainer>,
  }

  impl IoStdioTest {
    pub fn new(container: &Rc<StdioTestContainer>) -> Self {
      Self {
        container: Rc::clone(container),
      }
    }
  }

  impl IoImpl<Stdio> for IoStdioTest {
    fn make(&self) -> Stdio {
      Stdio::new(Box::new(StdioTest {
        stdout: self.container.stdout.clone(),
        stderr: self.container.stderr.clone(),
        container: Rc::clone(&self.container),
      }))
    }
  }

  #[derive(Debug)]
  pub struct StdioTest {
    stdout: TestWriter,
    stderr: TestWriter,
    container: Rc<StdioTestContainer>,
  }

  impl StdioImpl for StdioTest {
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
      let index = self.container.line_index.get();

      match self.container.lines.get(index) {
        Some(line) => {
          buffer.push_str(line);
          buffer.push('\n');

          self.container.line_index.set(index + 1);
          Ok(line.len() + 1)
        },
        None => Ok(0),
      }
    }
  }
}

#[cfg(test)]
mod test {
  use super::support::*;
  use super::*;
  use std::rc::Rc;

  #[test]
  fn mock_read_line() {
    let stdio = Stdio::default();
    let mut buffer = String::new();

    assert_eq!(stdio.read_line(&mut buffer).unwrap(), 0);
    assert!(buffer.is_empty());
  }

  #[test]
  fn captured_writes() {
    let container = Rc::new(StdioTestContainer::default());
    let io_stdio = IoStdioTest::new(&container);

    let mut stdio = io_stdio.make();
    write!(stdio.stdout(), "first\n").unwrap();

    let mut stdio = io_stdio.make();
    writeln!(stdio.stdout(), "second").unwrap();
    writeln!(stdio.stderr_color(), "oops").unwrap();

    assert_eq!(container.stdout.lines(), vec!["first", "second"]);
    assert_eq!(container.stderr.contents(), "oops\n");
  }

  #[test]
  fn captured_lines() {
    let container = Rc::new(StdioTestContainer::with_lines(vec![
      "1 + 2".to_string(),
      "nil".to_string(),
    ]));
    let stdio = IoStdioTest::new(&container).make();

    let mut buffer = String::new();
    assert_eq!(stdio.read_line(&mut buffer).unwrap(), 6);
    assert_eq!(buffer, "1 + 2\n");

    buffer.clear();
    assert_eq!(stdio.read_line(&mut buffer).unwrap(), 4);
    assert_eq!(buffer, "nil\n");

    buffer.clear();
    assert_eq!(stdio.read_line(&mut buffer).unwrap(), 0);
  }
}
