use tracing::{Span, field};

use super::TraceId;

/// Create a root span for a monitor tick / CLI command.
///
/// `account` and `block` start empty and are recorded once known.
pub fn root_span(name: &'static str, trace_id: &TraceId) -> Span {
    tracing::info_span!(
        "root",
        name = %name,
        trace_id = %trace_id.as_str(),
        account = field::Empty,
        block = field::Empty
    )
}

/// Create a child span (inherits trace_id automatically)
pub fn child_span(name: &'static str) -> Span {
    tracing::info_span!("child", name = %name)
}

/// Record the observed account and block on the current span.
pub fn annotate_span(account: &dyn std::fmt::Display, block: u64) {
    let span = Span::current();
    span.record("account", field::display(account));
    span.record("block", block);
}
