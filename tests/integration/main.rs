//! Integration test suite

mod helpers;

mod config_test;
mod play_test;
mod script_test;
