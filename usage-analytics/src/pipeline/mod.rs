use std::{pin::Pin, sync::Arc, time::SystemTime};

use futures::{Stream, StreamExt};

#[derive(Debug, Clone)]
pub struct Envelope<T> {
    pub payload: T,
    pub received_at: SystemTime,
}

impl<T> Envelope<T> {
    pub fn new(payload: T) -> Self {
        Self {
            payload,
            received_at: SystemTime::now(),
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("source error: {0}")]
    Source(String),
    #[error("transform error: {0}")]
    Transform(String),
}

pub type RecordStream<T> = Pin<Box<dyn Stream<Item = Result<Envelope<T>, PipelineError>> + Send>>;

#[async_trait::async_trait]
pub trait Source<T>: Send + Sync {
    async fn stream(&self) -> RecordStream<T>;
}

#[async_trait::async_trait]
pub trait Transform<I, O>: Send + Sync {
    async fn apply(&self, input: Envelope<I>) -> Result<Envelope<O>, PipelineError>;
}

/// Streams records that are already in memory, such as series split out of
/// one parsed file.
pub struct MemorySource<T> {
    records: Vec<T>,
}

impl<T> MemorySource<T> {
    pub fn new(records: Vec<T>) -> Self {
        Self { records }
    }
}

#[async_trait::async_trait]
impl<T> Source<T> for MemorySource<T>
where
    T: Clone + Send + Sync + 'static,
{
    async fn stream(&self) -> RecordStream<T> {
        let items: Vec<Result<Envelope<T>, PipelineError>> =
            self.records.iter().cloned().map(|r| Ok(Envelope::new(r))).collect();
        Box::pin(futures::stream::iter(items))
    }
}

/// Drains a source through a chain of validation transforms.
///
/// A source error aborts the run. A transform error only drops the record it
/// was raised for, so one bad row never hides the rest of a file.
pub struct Pipeline<S, T> {
    pub source: S,
    pub transforms: Vec<Arc<dyn Transform<T, T> + Send + Sync>>, // same-type transforms chain
}

impl<T, S> Pipeline<S, T>
where
    T: Send + 'static,
    S: Source<T> + Send + Sync + 'static,
{
    pub fn new(source: S) -> Self {
        Self {
            source,
            transforms: Vec::new(),
        }
    }

    pub fn with_transform(mut self, transform: Arc<dyn Transform<T, T> + Send + Sync>) -> Self {
        self.transforms.push(transform);
        self
    }

    pub async fn collect(self) -> Result<Vec<T>, PipelineError> {
        let mut stream = self.source.stream().await;
        let mut out = Vec::new();
        let mut rejected = 0usize;

        'records: while let Some(item) = stream.next().await {
            let mut env = item?;
            for t in &self.transforms {
                match t.apply(env).await {
                    Ok(next) => env = next,
                    Err(e) => {
                        tracing::warn!(error = %e, "dropping record rejected by validation");
                        rejected += 1;
                        continue 'records;
                    }
                }
            }
            out.push(env.payload);
        }

        tracing::debug!(accepted = out.len(), rejected, "pipeline drained");
        Ok(out)
    }
}
