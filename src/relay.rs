//! Relays one streaming completion to a [`Renderer`].
//!
//! The relay makes exactly one attempt per call: open the stream, write each
//! fragment in arrival order, stop at end-of-stream or the first error. The
//! stream handle lives in a [`StreamSession`] that closes it on every exit
//! path.

use futures::StreamExt;
use std::rc::Rc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

use crate::output::Renderer;
use crate::transport::{CompletionRequest, CompletionTransport, FragmentStream, TransportError};

/// Streams completions from a transport to the terminal.
#[derive(Clone)]
pub struct StreamRelay {
    transport: Rc<dyn CompletionTransport>,
    idle_timeout: Option<Duration>,
}

impl StreamRelay {
    pub fn new(transport: Rc<dyn CompletionTransport>) -> Self {
        Self {
            transport,
            idle_timeout: None,
        }
    }

    /// Fail the stream when no fragment arrives within `timeout`.
    ///
    /// The limit also bounds opening the stream, which may wait for the
    /// first fragment.
    pub fn with_idle_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.idle_timeout = timeout;
        self
    }

    /// Model every request from this relay is sent to.
    pub fn model(&self) -> &str {
        self.transport.model()
    }

    /// Sends `system_prompt` and `user_prompt` and renders the response.
    ///
    /// Fragments already rendered stay rendered when the stream fails; the
    /// error is still returned so the caller can report a failed invocation.
    pub async fn relay(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        renderer: &mut dyn Renderer,
    ) -> Result<(), TransportError> {
        debug!(system_prompt, "Sending system prompt");
        debug!(user_prompt, "Sending user prompt");
        let request = CompletionRequest::new(self.model(), system_prompt, user_prompt);

        let opened = match self.idle_timeout {
            Some(limit) => tokio::time::timeout(limit, self.transport.open_stream(request))
                .await
                .unwrap_or(Err(TransportError::IdleTimeout(limit))),
            None => self.transport.open_stream(request).await,
        };
        let stream = match opened {
            Ok(stream) => stream,
            Err(err) => {
                error!("Failed to create completion stream: {err}");
                return Err(err);
            }
        };

        let mut session = StreamSession::new(stream, self.idle_timeout);
        let outcome = loop {
            match session.next().await {
                Some(Ok(fragment)) => renderer.render_fragment(&fragment),
                Some(Err(err)) => {
                    warn!("Error receiving from stream: {err}");
                    break Err(err);
                }
                None => break Ok(()),
            }
        };
        session.close();
        renderer.render_done();

        if outcome.is_ok() {
            info!(
                fragments = session.received(),
                "Completed streaming response"
            );
        }
        outcome
    }
}

/// An open completion stream, closed when the session ends.
struct StreamSession {
    stream: Option<FragmentStream>,
    idle_timeout: Option<Duration>,
    received: usize,
}

impl StreamSession {
    fn new(stream: FragmentStream, idle_timeout: Option<Duration>) -> Self {
        Self {
            stream: Some(stream),
            idle_timeout,
            received: 0,
        }
    }

    /// Waits for the next item. Returns `None` once the stream ended or was closed.
    async fn next(&mut self) -> Option<Result<String, TransportError>> {
        let stream = self.stream.as_mut()?;
        let item = match self.idle_timeout {
            Some(limit) => match tokio::time::timeout(limit, stream.next()).await {
                Ok(item) => item,
                Err(_) => Some(Err(TransportError::IdleTimeout(limit))),
            },
            None => stream.next().await,
        };
        if let Some(Ok(_)) = item {
            self.received += 1;
        }
        item
    }

    fn received(&self) -> usize {
        self.received
    }

    fn close(&mut self) {
        if self.stream.take().is_some() {
            debug!("Closed completion stream");
        }
    }
}

impl Drop for StreamSession {
    fn drop(&mut self) {
        self.close();
    }
}
