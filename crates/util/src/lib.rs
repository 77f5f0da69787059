//! balance-forest-util - helpers shared by the balance-forest test suites.

pub mod fuzzer;

pub use fuzzer::Fuzzer;
