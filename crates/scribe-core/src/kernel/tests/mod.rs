pub mod bootstrap_tests;
pub mod config_tests;
