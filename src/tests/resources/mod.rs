mod helpers;
mod key_value_tests;
