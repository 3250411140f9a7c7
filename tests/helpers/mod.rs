use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use bytes::Bytes;
use chrono::{DateTime, Utc};

use podrelay::application::ports::{
    AsrError, BlobObject, BlobStore, BlobStoreError, TranscriptionEngine,
};
use podrelay::domain::{EngineType, ObjectKey, TranscriptResult, TranscriptWord};

pub fn sample_result(engine: EngineType, text: &str) -> TranscriptResult {
    let words = vec![
        TranscriptWord::from_provider("hello".to_string(), 0, 480, Some("1")),
        TranscriptWord::from_provider("world".to_string(), 500, 2_750, Some("1")),
    ];
    TranscriptResult::new(text.to_string(), engine, words, "trace-123".to_string())
}

/// Engine returning a fixed outcome and counting calls.
pub struct StubEngine {
    engine_type: EngineType,
    outcome: Result<TranscriptResult, AsrError>,
    calls: AtomicUsize,
}

impl StubEngine {
    pub fn succeeding(engine_type: EngineType, text: &str) -> Self {
        Self {
            engine_type,
            outcome: Ok(sample_result(engine_type, text)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing(engine_type: EngineType, error: AsrError) -> Self {
        Self {
            engine_type,
            outcome: Err(error),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl TranscriptionEngine for StubEngine {
    async fn transcribe(&self, _audio_data: &[u8]) -> Result<TranscriptResult, AsrError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }

    fn engine_name(&self) -> &'static str {
        match self.engine_type {
            EngineType::Doubao => "Doubao",
            EngineType::Qwen => "Qwen",
        }
    }

    fn engine_type(&self) -> EngineType {
        self.engine_type
    }
}

pub struct StoredObject {
    pub data: Bytes,
    pub content_type: String,
    pub last_modified: DateTime<Utc>,
}

/// In-memory blob store with controllable timestamps and injectable
/// failures per bucket or key.
#[derive(Default)]
pub struct FakeBlobStore {
    objects: Mutex<HashMap<String, HashMap<String, StoredObject>>>,
    failing_put_buckets: HashSet<String>,
    failing_list_buckets: HashSet<String>,
    failing_delete_keys: HashSet<String>,
    delete_calls: AtomicUsize,
}

#[allow(dead_code)]
impl FakeBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail_puts_to(mut self, bucket: &str) -> Self {
        self.failing_put_buckets.insert(bucket.to_string());
        self
    }

    pub fn fail_lists_of(mut self, bucket: &str) -> Self {
        self.failing_list_buckets.insert(bucket.to_string());
        self
    }

    pub fn fail_deletes_of(mut self, key: &str) -> Self {
        self.failing_delete_keys.insert(key.to_string());
        self
    }

    pub fn insert(&self, bucket: &str, key: &str, last_modified: DateTime<Utc>) {
        self.objects
            .lock()
            .unwrap()
            .entry(bucket.to_string())
            .or_default()
            .insert(
                key.to_string(),
                StoredObject {
                    data: Bytes::from_static(b"data"),
                    content_type: "application/octet-stream".to_string(),
                    last_modified,
                },
            );
    }

    pub fn keys(&self, bucket: &str) -> Vec<String> {
        let objects = self.objects.lock().unwrap();
        let mut keys: Vec<String> = objects
            .get(bucket)
            .map(|b| b.keys().cloned().collect())
            .unwrap_or_default();
        keys.sort();
        keys
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<(Bytes, String)> {
        let objects = self.objects.lock().unwrap();
        objects
            .get(bucket)
            .and_then(|b| b.get(key))
            .map(|o| (o.data.clone(), o.content_type.clone()))
    }

    pub fn delete_calls(&self) -> usize {
        self.delete_calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl BlobStore for FakeBlobStore {
    async fn put(
        &self,
        bucket: &str,
        key: &ObjectKey,
        data: Bytes,
        content_type: &str,
    ) -> Result<String, BlobStoreError> {
        if self.failing_put_buckets.contains(bucket) {
            return Err(BlobStoreError::UploadFailed(
                "injected put failure".to_string(),
            ));
        }
        self.objects
            .lock()
            .unwrap()
            .entry(bucket.to_string())
            .or_default()
            .insert(
                key.as_str().to_string(),
                StoredObject {
                    data,
                    content_type: content_type.to_string(),
                    last_modified: Utc::now(),
                },
            );
        Ok(format!("fake://{}/{}", bucket, key))
    }

    async fn list(&self, bucket: &str) -> Result<Vec<BlobObject>, BlobStoreError> {
        if self.failing_list_buckets.contains(bucket) {
            return Err(BlobStoreError::ListFailed(
                "injected list failure".to_string(),
            ));
        }
        let objects = self.objects.lock().unwrap();
        Ok(objects
            .get(bucket)
            .map(|b| {
                b.iter()
                    .map(|(key, o)| BlobObject {
                        key: key.clone(),
                        size: o.data.len() as u64,
                        last_modified: o.last_modified,
                    })
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn delete(&self, bucket: &str, key: &ObjectKey) -> Result<(), BlobStoreError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        if self.failing_delete_keys.contains(key.as_str()) {
            return Err(BlobStoreError::DeleteFailed(
                "injected delete failure".to_string(),
            ));
        }
        if let Some(b) = self.objects.lock().unwrap().get_mut(bucket) {
            b.remove(key.as_str());
        }
        Ok(())
    }
}
