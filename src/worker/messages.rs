//! Cross-thread message envelope with trace context propagation.
//!
//! Every [`UpdateEvent`] handed to the queue is wrapped in an [`Envelope`] that
//! records the producer's active span. The render context re-attaches that
//! context before dispatching, so a `dispatch` span on the render thread is
//! linked to the RPC or probe span that produced it.

use crate::domain::UpdateEvent;
use serde::{Deserialize, Serialize};

/// Distributed tracing context for cross-thread span propagation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Span ID of the producer span, as a hex string.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the trace and span IDs of the current tracing span.
    ///
    /// Returns `None` when no OpenTelemetry layer is installed or the current
    /// span is not sampled.
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Makes this context the parent of spans created on the current thread.
    ///
    /// The returned guard must be held for as long as the linkage should last.
    /// Returns `None` if either ID fails to parse.
    #[must_use]
    pub fn attach(&self) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());
        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }
}

/// An event in flight between a producer and the render context.
#[derive(Debug, Clone)]
pub struct Envelope {
    /// The payload. Immutable once enqueued.
    pub event: UpdateEvent,

    /// Producer span, if tracing is active.
    pub trace_context: Option<TraceContext>,
}

impl Envelope {
    /// Wraps an event, capturing the caller's trace context.
    #[must_use]
    pub fn new(event: UpdateEvent) -> Self {
        Self {
            event,
            trace_context: TraceContext::from_current(),
        }
    }
}
