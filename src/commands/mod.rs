//! Command implementations

mod fix_imports;
mod verify;

pub use fix_imports::fix_imports;
pub use verify::{apply_db_args, verify};
