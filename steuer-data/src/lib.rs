pub mod loader;
pub mod sheet;

pub use loader::{LoadError, TableError, build_table, load_path};
pub use sheet::{Cell, Sheet, SheetError};
