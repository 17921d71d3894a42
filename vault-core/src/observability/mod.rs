pub mod logging;

pub use logging::{LogFormat, init_test_tracing, init_tracing};
