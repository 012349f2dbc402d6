mod logger_tests;
mod test_helpers;
