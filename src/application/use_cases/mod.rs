pub mod test_case_generator;
