//! Persistence module split across logical submodules: where the data file
//! lives, and how the library is read from and written to it.

mod file;
mod path;

pub use file::Store;
pub use path::{library_path, log_path};
