#![deny(clippy::all)]
use loxe_vm::vm::default_native_vm;
use std::env;
use std::{path::PathBuf, process};

#[cfg(feature = "jemalloc")]
use jemallocator::Jemalloc;

#[cfg(feature = "jemalloc")]
#[global_allocator]
static GLOBAL: Jemalloc = Jemalloc;

const USAGE_EXIT: i32 = 64;

fn main() {
  let args: Vec<String> = env::args().collect();

  match args.as_slice() {
    [_] => {
      let mut vm = default_native_vm();
      process::exit(vm.repl().0)
    },
    [_, file_path] => {
      let mut vm = default_native_vm();
      process::exit(vm.run_file(PathBuf::from(file_path)).0)
    },
    _ => {
      eprintln!("Usage: loxe [script]");
      process::exit(USAGE_EXIT)
    },
  }
}
