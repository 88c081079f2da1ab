use crate::io::IoImpl;
use std::{
  io,
  path::{Path, PathBuf},
};

/// A wrapper around file system facilities provided to loxe
pub struct Fs {
  fs: Box<dyn FsImpl>,
}

impl Default for Fs {
  fn default() -> Self {
    Self {
      fs: Box::new(FsMock()),
    }
  }
}

impl Fs {
  /// Create a new file system wrapper
  pub fn new(fs: Box<dyn FsImpl>) -> Self {
    Self { fs }
  }

  /// Read a file into String
  pub fn read_file(&self, path: &Path) -> io::Result<String> {
    self.fs.read_file(path)
  }

  /// Canonicalize a provided filepath
  pub fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
    self.fs.canonicalize(path)
  }
}

pub trait FsImpl {
  fn read_file(&self, path: &Path) -> io::Result<String>;
  fn canonicalize(&self, path: &Path) -> io::Result<PathBuf>;
}

#[derive(Debug)]
pub struct IoFsMock();

impl IoImpl<Fs> for IoFsMock {
  fn make(&self) -> Fs {
    Fs::new(Box::new(FsMock()))
  }
}

pub struct FsMock();

impl FsImpl for FsMock {
  fn read_file(&self, _path: &Path) -> io::Result<String> {
    Ok("1 + 2".to_string())
  }
  fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
    Ok(path.to_path_buf())
  }
}

pub mod support {
  use super::{Fs, FsImpl};
  use crate::io::IoImpl;
  use fnv::FnvHashMap;
  use std::{
    io,
    path::{Path, PathBuf},
    rc::Rc,
  };

  /// An in memory file system keyed by path
  #[derive(Debug, Default)]
  pub struct IoFsTest {
    files: Rc<FnvHashMap<PathBuf, String>>,
  }

  impl IoFsTest {
    pub fn new(files: Vec<(PathBuf, String)>) -> Self {
      Self {
        files: Rc::new(files.into_iter().collect()),
      }
    }
  }

  impl IoImpl<Fs> for IoFsTest {
    fn make(&self) -> Fs {
      Fs::new(Box::new(FsTest {
        files: Rc::clone(&self.files),
      }))
    }
  }

  pub struct FsTest {
    files: Rc<FnvHashMap<PathBuf, String>>,
  }

  impl FsImpl for FsTest {
    fn read_file(&self, path: &Path) -> io::Result<String> {
      self.files.get(path).cloned().ok_or_else(|| {
        io::Error::new(
          io::ErrorKind::NotFound,
          format!("No such file {}", path.display()),
        )
      })
    }

    fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
      if self.files.contains_key(path) {
        Ok(path.to_path_buf())
      } else {
        Err(io::Error::new(
          io::ErrorKind::NotFound,
          format!("No such file {}", path.display()),
        ))
      }
    }
  }
}

#[cfg(test)]
mod test {
  use super::support::IoFsTest;
  use crate::io::IoImpl;
  use std::path::PathBuf;

  #[test]
  fn read_file() {
    let fs = IoFsTest::new(vec![(PathBuf::from("main.lox"), "1 + 2".to_string())]).make();

    assert_eq!(fs.read_file(&PathBuf::from("main.lox")).unwrap(), "1 + 2");
    assert!(fs.read_file(&PathBuf::from("missing.lox")).is_err());
    assert!(fs.canonicalize(&PathBuf::from("missing.lox")).is_err());
  }
}
