use bytes::Bytes;

/// The transport refused to queue an indication.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("indication not sent: {0}")]
pub struct IndicateError(pub String);

/// Send primitive for control-point indications.
///
/// Fire and forget: the peer's acknowledgement arrives out of band and the
/// service never waits for it.
pub trait IndicationSink: Send {
    fn indicate(&mut self, payload: Bytes) -> Result<(), IndicateError>;
}

/// Collects indications in order. Useful for tests and offline tools.
impl IndicationSink for Vec<Bytes> {
    fn indicate(&mut self, payload: Bytes) -> Result<(), IndicateError> {
        self.push(payload);
        Ok(())
    }
}
