pub mod reader;
pub mod values;
pub mod writer;

pub use reader::{read_table, read_table_with_renames};
pub use values::{any_to_string, any_to_string_non_empty, format_numeric};
pub use writer::write_table;
