use crate::{fs::IoFsNative, stdio::IoStdioNative};
use loxe_env::io::Io;
use std::rc::Rc;

pub fn io_native() -> Io {
  Io::new(Rc::new(IoStdioNative()), Rc::new(IoFsNative()))
}
