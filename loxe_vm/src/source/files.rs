use std::ops::Range;

use codespan_reporting::files;
use fnv::FnvHashMap;

/// A struct for efficiently determine lines for an associated
/// file.
#[derive(Default, Clone, Debug)]
pub struct LineOffsets {
  /// The offsets where line break occur in the associated file
  offsets: Vec<usize>,

  /// The full length of the file
  len: usize,
}

#[derive(Debug, PartialEq, Eq)]
pub enum LineError {
  OffsetOutOfBounds,
  LineOutOfBounds,
}

impl LineOffsets {
  /// Create a new instance of LineOffsets
  ///
  /// # Examples
  /// ```
  /// use loxe_vm::source::LineOffsets;
  ///
  /// let offsets = LineOffsets::new(vec![0, 10], 20);
  /// ```
  pub fn new(offsets: Vec<usize>, len: usize) -> Self {
    assert!(!offsets.is_empty());
    assert!(*offsets.last().unwrap_or(&0) <= len);

    Self { offsets, len }
  }

  /// Retrieve the total number of lines cataloged
  ///
  /// # Examples
  /// ```
  /// use loxe_vm::source::LineOffsets;
  ///
  /// let offsets = LineOffsets::new(vec![0, 10], 20);
  /// assert_eq!(offsets.lines(), 2);
  /// ```
  pub fn lines(&self) -> usize {
    self.offsets.len()
  }

  /// What line is the provided offset located at
  ///
  /// # Examples
  /// ```
  /// use loxe_vm::source::{LineOffsets, LineError};
  ///
  /// let offsets = LineOffsets::new(vec![0, 10], 20);
  /// assert_eq!(offsets.offset_line(5), Ok(0));
  /// assert_eq!(offsets.offset_line(17), Ok(1));
  /// assert_eq!(offsets.offset_line(25), Err(LineError::OffsetOutOfBounds));
  /// ```
  pub fn offset_line(&self, offset: usize) -> Result<usize, LineError> {
    if offset > self.len {
      return Err(LineError::OffsetOutOfBounds);
    }

    Ok(match self.offsets.binary_search(&offset) {
      Ok(line) => line,
      Err(line) => line - 1,
    })
  }

  /// Get the offset ranges bounding a line
  ///
  /// # Examples
  /// ```
  /// use loxe_vm::source::{LineOffsets, LineError};
  ///
  /// let offsets = LineOffsets::new(vec![0, 10], 20);
  /// assert_eq!(offsets.line_range(0), Ok(0..10));
  /// assert_eq!(offsets.line_range(1), Ok(10..20));
  /// assert_eq!(offsets.line_range(2), Err(LineError::LineOutOfBounds));
  /// ```
  pub fn line_range(&self, line: usize) -> Result<Range<usize>, LineError> {
    let lines = self.lines();
    if line >= lines {
      return Err(LineError::LineOutOfBounds);
    }

    if line == lines - 1 {
      Ok(self.offsets[line]..self.len)
    } else {
      Ok(self.offsets[line]..self.offsets[line + 1])
    }
  }
}

/// A source file known to the vm
struct VmFile {
  /// The name of this file
  name: String,

  /// The full source of this file
  source: String,

  /// The line offsets for this file, set once scanned
  line_offsets: Option<LineOffsets>,
}

/// A unique id to a `VmFile`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct VmFileId(usize);

/// A file database managed by the virtual machine
#[derive(Default)]
pub struct VmFiles {
  /// The files stored in this file database
  files: Vec<VmFile>,

  /// A map between file names and their index
  name_map: FnvHashMap<String, usize>,
}

impl VmFiles {
  /// Insert or update a file into the file database. Returns the
  /// `VmFileId` for the new file or updated file.
  ///
  /// # Examples
  /// ```
  /// use loxe_vm::source::VmFiles;
  ///
  /// let mut files = VmFiles::default();
  /// let id1 = files.upsert("first.lox", "1 + 2");
  /// let id2 = files.upsert("second.lox", "1 + 2");
  /// let id3 = files.upsert("first.lox", "!true");
  ///
  /// assert_ne!(id1, id2);
  /// assert_ne!(id2, id3);
  /// assert_eq!(id1, id3);
  /// ```
  pub fn upsert(&mut self, name: &str, source: &str) -> VmFileId {
    let file = VmFile {
      name: name.to_string(),
      source: source.to_string(),
      line_offsets: None,
    };

    match self.name_map.get(name) {
      Some(id) => {
        self.files[*id] = file;
        VmFileId(*id)
      },
      None => {
        self.files.push(file);

        let id = self.files.len() - 1;
        self.name_map.insert(name.to_string(), id);
        VmFileId(id)
      },
    }
  }

  /// Update a files line offsets after it has been calculated
  ///
  /// # Examples
  /// ```
  /// use loxe_vm::source::{VmFiles, LineOffsets};
  ///
  /// let mut files = VmFiles::default();
  /// let id = files.upsert("first.lox", "1 + 2");
  ///
  /// assert!(files.update_line_offsets(id, LineOffsets::new(vec![0], 5)).is_ok());
  /// ```
  pub fn update_line_offsets(
    &mut self,
    id: VmFileId,
    line_offsets: LineOffsets,
  ) -> Result<(), files::Error> {
    let vm_file = self.get_mut(id)?;
    vm_file.line_offsets = Some(line_offsets);
    Ok(())
  }

  /// Retrieve an immutable file reference from the file database. Return
  /// a file missing error if not found
  fn get(&self, id: VmFileId) -> Result<&VmFile, files::Error> {
    self.files.get(id.0).ok_or(files::Error::FileMissing)
  }

  /// Retrieve an mutable file reference from the file database. Return
  /// a file missing error if not found
  fn get_mut(&mut self, id: VmFileId) -> Result<&mut VmFile, files::Error> {
    self.files.get_mut(id.0).ok_or(files::Error::FileMissing)
  }

  /// Retrieve a files line offsets. Files that have not been scanned
  /// yet are treated as missing
  fn line_offsets(&self, id: VmFileId) -> Result<(&VmFile, &LineOffsets), files::Error> {
    let vm_file = self.get(id)?;

    match &vm_file.line_offsets {
      Some(line_offsets) => Ok((vm_file, line_offsets)),
      None => Err(files::Error::FileMissing),
    }
  }
}

impl<'a> files::Files<'a> for VmFiles {
  type FileId = VmFileId;
  type Name = &'a str;
  type Source = &'a str;

  fn name(&'a self, id: Self::FileId) -> Result<Self::Name, files::Error> {
    Ok(self.get(id)?.name.as_str())
  }

  fn source(&'a self, id: Self::FileId) -> Result<Self::Source, files::Error> {
    Ok(self.get(id)?.source.as_str())
  }

  fn line_index(&'a self, id: Self::FileId, byte_index: usize) -> Result<usize, files::Error> {
    let (vm_file, line_offsets) = self.line_offsets(id)?;

    line_offsets
      .offset_line(byte_index)
      .map_err(|_| files::Error::IndexTooLarge {
        given: byte_index,
        max: vm_file.source.len(),
      })
  }

  fn line_range(&'a self, id: Self::FileId, line_index: usize) -> Result<Range<usize>, files::Error> {
    let (_, line_offsets) = self.line_offsets(id)?;

    line_offsets
      .line_range(line_index)
      .map_err(|_| files::Error::LineTooLarge {
        given: line_index,
        max: line_offsets.lines() - 1,
      })
  }
}

#[cfg(test)]
mod test {
  use super::*;

  mod line_offsets {
    use super::*;

    #[test]
    fn lines() {
      let offsets = LineOffsets::new(vec![0, 10], 20);
      assert_eq!(offsets.lines(), 2);
    }

    #[test]
    fn offset_line() {
      let offsets = LineOffsets::new(vec![0, 10], 20);

      assert_eq!(offsets.offset_line(0), Ok(0));
      assert_eq!(offsets.offset_line(1), Ok(0));
      assert_eq!(offsets.offset_line(10), Ok(1));
      assert_eq!(offsets.offset_line(11), Ok(1));
      assert_eq!(offsets.offset_line(20), Ok(1));
      assert_eq!(offsets.offset_line(30), Err(LineError::OffsetOutOfBounds));
    }

    #[test]
    fn line_range() {
      let offsets = LineOffsets::new(vec![0, 10], 20);

      assert_eq!(offsets.line_range(0), Ok(0..10));
      assert_eq!(offsets.line_range(1), Ok(10..20));
      assert_eq!(offsets.line_range(2), Err(LineError::LineOutOfBounds));
    }
  }

  mod vm_files {
    use super::*;
    use codespan_reporting::files::Files;

    #[test]
    fn name_and_source() {
      let mut files = VmFiles::default();
      let id = files.upsert("script.lox", "1 +\n2");

      assert_eq!(files.name(id).unwrap(), "script.lox");
      assert_eq!(files.source(id).unwrap(), "1 +\n2");
    }

    #[test]
    fn missing_offsets() {
      let mut files = VmFiles::default();
      let id = files.upsert("script.lox", "1 +\n2");

      assert!(matches!(files.line_index(id, 0), Err(files::Error::FileMissing)));
    }

    #[test]
    fn lines() {
      let mut files = VmFiles::default();
      let id = files.upsert("script.lox", "1 +\n2");
      files
        .update_line_offsets(id, LineOffsets::new(vec![0, 4], 5))
        .unwrap();

      assert_eq!(files.line_index(id, 2).unwrap(), 0);
      assert_eq!(files.line_index(id, 4).unwrap(), 1);
      assert_eq!(files.line_range(id, 1).unwrap(), 4..5);
      assert!(matches!(
        files.line_index(id, 9),
        Err(files::Error::IndexTooLarge { given: 9, max: 5 })
      ));
      assert!(matches!(
        files.line_range(id, 2),
        Err(files::Error::LineTooLarge { given: 2, max: 1 })
      ));
    }

    #[test]
    fn missing_file() {
      let files = VmFiles::default();
      assert!(matches!(files.name(VmFileId(3)), Err(files::Error::FileMissing)));
    }
  }
}
