pub mod analyze_parallel;
pub mod analyze_sites;
pub mod column;

pub use analyze_parallel::heterogeneous_sites_parallel;
pub use analyze_sites::{heterogeneous_sites, validate_fraction, validate_lengths};
pub use column::{majority_fraction, ColumnTally};
