use opentelemetry::trace::Status;
use std::{future::Future, time::Instant};
use tracing::{info_span, Span};
use tracing_futures::Instrument;
use tracing_opentelemetry::OpenTelemetrySpanExt;

/// Span wrapping one call to an external service.
pub struct ServiceSpan {
    span: Span,
    start_time: Instant,
    ended: bool,
}

impl ServiceSpan {
    pub fn new(service: &str, operation: &str) -> Self {
        let span = info_span!("frame_art.call", service, operation);
        span.set_attribute("frame_art.service", service.to_string());
        span.set_attribute("frame_art.operation", operation.to_string());

        Self {
            span,
            start_time: Instant::now(),
            ended: false,
        }
    }

    fn span(&self) -> Span {
        self.span.clone()
    }

    pub async fn instrument_future<F>(&self, future: F) -> F::Output
    where
        F: Future,
    {
        future.instrument(self.span()).await
    }

    pub fn on_error(&mut self, error: &(dyn std::error::Error + 'static)) {
        self.span
            .set_attribute("exception.message", error.to_string());
        self.span.set_status(Status::error(error.to_string()));
    }

    pub fn on_end(&mut self) {
        if self.ended {
            return;
        }
        self.ended = true;
        self.span.set_attribute(
            "frame_art.duration_seconds",
            self.start_time.elapsed().as_secs_f64(),
        );
    }
}

impl Drop for ServiceSpan {
    fn drop(&mut self) {
        self.on_end();
    }
}

pub async fn trace_call<T, E, Fut>(service: &str, operation: &str, future: Fut) -> Result<T, E>
where
    E: std::error::Error + 'static,
    Fut: Future<Output = Result<T, E>>,
{
    let mut span = ServiceSpan::new(service, operation);
    let result = span.instrument_future(future).await;

    if let Err(error) = &result {
        span.on_error(error);
    }

    span.on_end();
    result
}
