//! Three-channel event streams between a query engine and its consumer.
//!
//! A producer holds an [`EventSink`] and emits any number of data events
//! followed by exactly one terminal event. The terminal methods consume the
//! sink, so a second `end` or `error` cannot be expressed. Dropping the sink
//! without a terminal event closes the stream, which consumers treat as a
//! failure.

use tokio::sync::mpsc;

use crate::error::QueryError;

/// Error type engines report through a stream.
pub type EngineError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// One event on a result stream.
#[derive(Debug)]
pub enum StreamEvent<T> {
    /// A result item.
    Data(T),
    /// Normal end of results.
    End,
    /// The query failed; no further events follow.
    Error(EngineError),
}

/// Creates a connected sink/stream pair.
#[must_use]
pub fn event_channel<T>() -> (EventSink<T>, EventStream<T>) {
    let (tx, rx) = mpsc::unbounded_channel();
    (EventSink { tx }, EventStream { rx })
}

/// Producer half of a result stream.
#[derive(Debug)]
pub struct EventSink<T> {
    tx: mpsc::UnboundedSender<StreamEvent<T>>,
}

impl<T> EventSink<T> {
    /// Emits one result item.
    ///
    /// Returns `false` once the consumer has stopped listening; producers
    /// should stop work at that point.
    pub fn data(&self, item: T) -> bool {
        self.tx.send(StreamEvent::Data(item)).is_ok()
    }

    /// Signals normal completion.
    pub fn end(self) {
        let _ = self.tx.send(StreamEvent::End);
    }

    /// Signals failure.
    pub fn error(self, err: impl Into<EngineError>) {
        let _ = self.tx.send(StreamEvent::Error(err.into()));
    }

    /// Whether the consumer has gone away.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

/// Consumer half of a result stream.
#[derive(Debug)]
pub struct EventStream<T> {
    rx: mpsc::UnboundedReceiver<StreamEvent<T>>,
}

impl<T> EventStream<T> {
    /// Receives the next event, or `None` once the producer is gone.
    pub async fn next(&mut self) -> Option<StreamEvent<T>> {
        self.rx.recv().await
    }

    /// Feeds every data event to `on_data` until the stream terminates.
    ///
    /// Stops at the first terminal event. The receiver is dropped on return,
    /// so anything the producer emits afterwards is discarded.
    pub(crate) async fn drain(mut self, mut on_data: impl FnMut(T)) -> Result<usize, QueryError> {
        let mut received = 0;
        loop {
            match self.rx.recv().await {
                Some(StreamEvent::Data(item)) => {
                    on_data(item);
                    received += 1;
                }
                Some(StreamEvent::End) => return Ok(received),
                Some(StreamEvent::Error(err)) => return Err(QueryError::Stream(err)),
                None => return Err(QueryError::Closed),
            }
        }
    }
}
