//! Common test utilities for bulk-import
//!
//! - Row and record factories
//! - A wiremock responder that behaves like the console bulk endpoint

pub mod fixtures;
pub mod server;

pub use fixtures::{RecordFactory, RowFactory};
pub use server::{BULK_CREATE_PATH, ConsoleResponder, VALIDATE_PATH, endpoint_for};

/// Assert that a result is Ok and return the value
#[macro_export]
macro_rules! assert_ok {
    ($expr:expr) => {
        match $expr {
            Ok(v) => v,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
}

/// Assert that a result is Err
#[macro_export]
macro_rules! assert_err {
    ($expr:expr) => {
        match $expr {
            Ok(v) => panic!("Expected Err, got Ok: {:?}", v),
            Err(e) => e,
        }
    };
}
