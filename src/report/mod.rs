pub mod comparison;
pub mod listing;

pub use comparison::{ComparisonRow, comparison_rows, export_tables, table_file_name, write_comparison};
pub use listing::write_listing;

/// Cent ranges exported when none are configured
pub const DEFAULT_RANGES_CENTS: [i64; 8] = [100, 200, 500, 700, 1200, 2400, 4800, 9600];
