pub mod filter;
pub mod sort;
pub mod step1_fetch;
pub mod step2_import;
