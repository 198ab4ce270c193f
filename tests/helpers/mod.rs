//! Shared test helpers

pub mod test_data;
