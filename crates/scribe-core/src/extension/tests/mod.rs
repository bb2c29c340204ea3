pub mod file_type_tests;
pub mod navigation_tests;
