use loxe_env::{
  io::Io,
  stdio::support::{IoStdioTest, StdioTestContainer},
};
use loxe_native::fs::IoFsNative;
use loxe_vm::vm::{Vm, VmExit};
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Locate a fixture relative to this crate
pub fn fixture_path(fixture: &str) -> PathBuf {
  Path::new(env!("CARGO_MANIFEST_DIR"))
    .join("fixture")
    .join(fixture)
}

fn test_io(container: &Rc<StdioTestContainer>) -> Io {
  Io::default()
    .with_stdio(Rc::new(IoStdioTest::new(container)))
    .with_fs(Rc::new(IoFsNative()))
}

/// Assert each fixture exits with the provided result
#[allow(dead_code)]
pub fn assert_files_exit(paths: &[&str], result: VmExit) -> io::Result<()> {
  for path in paths {
    let container = Rc::new(StdioTestContainer::default());
    let mut vm = Vm::new(test_io(&container));

    let exit = vm.run_file(fixture_path(path));
    if let Err(err) = assert_eq_io(
      &(result.code(), result),
      &exit,
      Some(format!("Failing file {}", path)),
    ) {
      container.log_stdio();
      return Err(err);
    }
  }

  Ok(())
}

/// Assert a fixture exits with the provided result, writes exactly the expected
/// stdout lines and that stderr contains each expected fragment
#[allow(dead_code)]
pub fn assert_file_exit_and_stdio(
  path: &str,
  stdout: Option<Vec<&str>>,
  stderr: Option<Vec<&str>>,
  result: VmExit,
) -> io::Result<()> {
  let container = Rc::new(StdioTestContainer::default());
  let mut vm = Vm::new(test_io(&container));

  let exit = vm.run_file(fixture_path(path));
  if let Err(err) = assert_eq_io(
    &(result.code(), result),
    &exit,
    Some(format!("Failing file {}", path)),
  ) {
    container.log_stdio();
    return Err(err);
  }

  if let Some(stdout) = stdout {
    let expected: Vec<String> = stdout.iter().map(|line| line.to_string()).collect();

    if let Err(err) = assert_eq_io(&expected, &container.stdout.lines(), None) {
      container.log_stdio();
      return Err(err);
    }
  }

  if let Some(stderr) = stderr {
    let contents = container.stderr.contents();

    for fragment in stderr {
      if !contents.contains(fragment) {
        container.log_stdio();
        return Err(io::Error::new(
          io::ErrorKind::Other,
          format!("Expected stderr of {} to contain {:?}", path, fragment),
        ));
      }
    }
  }

  Ok(())
}

/// Run the repl over the provided lines returning the captured stdio
#[allow(dead_code)]
pub fn run_repl(lines: &[&str]) -> (VmExit, Rc<StdioTestContainer>) {
  let container = Rc::new(StdioTestContainer::with_lines(
    lines.iter().map(|line| line.to_string()).collect(),
  ));
  let mut vm = Vm::new(test_io(&container));

  let (_, exit) = vm.repl();
  (exit, container)
}

/// Assert equal returning a result so debug information has a chance to be captured and displayed
fn assert_eq_io<T: PartialEq + fmt::Debug>(
  expected: &T,
  received: &T,
  message: Option<String>,
) -> io::Result<()> {
  if expected == received {
    return Ok(());
  }

  Err(io::Error::new(
    io::ErrorKind::Other,
    format!(
      "{} Expected {:?} Received {:?}",
      message.unwrap_or_default(),
      expected,
      received
    ),
  ))
}
