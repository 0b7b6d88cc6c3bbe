pub mod download;
pub mod format;
pub mod lookup;
pub mod storage;
pub mod table;
pub mod time;

pub use download::*;
