mod files;
pub use files::{LineError, LineOffsets, VmFileId, VmFiles};
