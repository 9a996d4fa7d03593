/// Field and column naming, create-input decoding
pub mod mapping_tests;

/// DSN construction and live connection checks
pub mod db_tests;
