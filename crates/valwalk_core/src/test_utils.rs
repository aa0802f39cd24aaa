use std::sync::Once;

use tracing_subscriber::EnvFilter;
use valwalk_value::{Record, Value};

static INIT_TRACING: Once = Once::new();

/// Installs a test subscriber honouring `RUST_LOG`.
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// A record with three public fields, one of them an integer.
pub fn simple(count: i32) -> Record {
    Record::new("Simple")
        .with_field("flag", false)
        .with_field("count", count)
        .with_field("label", "s")
}

/// `Outer { inner: Inner { count } }`
pub fn nested(count: i32) -> Value {
    let inner = Record::new("Inner").with_field("count", count);
    Value::from(Record::new("Outer").with_field("inner", inner))
}
