use loxe_env::{
  fs::{Fs, FsImpl},
  io::IoImpl,
};
use std::{
  fs::{canonicalize, read_to_string},
  io,
  path::{Path, PathBuf},
};

#[derive(Debug)]
pub struct IoFsNative();

impl IoImpl<Fs> for IoFsNative {
  fn make(&self) -> Fs {
    Fs::new(Box::new(FsNative()))
  }
}

#[derive(Clone, Default)]
pub struct FsNative();

impl FsImpl for FsNative {
  fn read_file(&self, path: &Path) -> io::Result<String> {
    read_to_string(path)
  }

  fn canonicalize(&self, path: &Path) -> io::Result<PathBuf> {
    canonicalize(path)
  }
}
