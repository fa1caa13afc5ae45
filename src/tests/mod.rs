mod config_tests;
mod payments_tests;
