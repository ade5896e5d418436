//! Moves shader file I/O off the UI-critical path. One dedicated thread
//! drains storage requests in arrival order and answers on a result channel,
//! so concurrent saves and loads for the same name serialize naturally and
//! the latest completed operation wins. Dropping the handle closes the
//! request channel and joins the thread.

use std::thread::{self, JoinHandle};

use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::debug;

use crate::storage::{FileMeta, ShaderStorage, StorageError};

#[derive(Debug)]
pub enum StorageRequest {
    Save { name: String, source: String },
    Load(FileMeta),
    List,
    Delete(FileMeta),
}

#[derive(Debug)]
pub enum StorageResponse {
    Saved(Result<FileMeta, StorageError>),
    Loaded(Result<String, StorageError>),
    Listed(Result<Vec<FileMeta>, StorageError>),
    Deleted(Result<(), StorageError>),
}

pub struct StorageWorker {
    requests: Option<Sender<StorageRequest>>,
    responses: Receiver<StorageResponse>,
    handle: Option<JoinHandle<()>>,
}

impl StorageWorker {
    pub fn spawn(storage: ShaderStorage) -> Self {
        let (request_tx, request_rx) = unbounded::<StorageRequest>();
        let (response_tx, response_rx) = unbounded();

        let handle = thread::spawn(move || {
            for request in request_rx {
                debug!(?request, "storage worker handling request");
                let response = match request {
                    StorageRequest::Save { name, source } => {
                        StorageResponse::Saved(storage.save(&name, &source))
                    }
                    StorageRequest::Load(meta) => StorageResponse::Loaded(storage.load(&meta)),
                    StorageRequest::List => StorageResponse::Listed(storage.list()),
                    StorageRequest::Delete(meta) => StorageResponse::Deleted(storage.delete(&meta)),
                };
                if response_tx.send(response).is_err() {
                    break;
                }
            }
        });

        Self {
            requests: Some(request_tx),
            responses: response_rx,
            handle: Some(handle),
        }
    }

    /// Enqueues a request; returns false if the worker already shut down.
    pub fn submit(&self, request: StorageRequest) -> bool {
        self.requests
            .as_ref()
            .map(|tx| tx.send(request).is_ok())
            .unwrap_or(false)
    }

    pub fn responses(&self) -> Receiver<StorageResponse> {
        self.responses.clone()
    }
}

impl Drop for StorageWorker {
    fn drop(&mut self) {
        self.requests.take();
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn worker_round_trips_save_and_load() {
        let temp = tempfile::tempdir().unwrap();
        let worker = StorageWorker::spawn(ShaderStorage::new(temp.path()));
        let responses = worker.responses();

        assert!(worker.submit(StorageRequest::Save {
            name: "demo".into(),
            source: "// demo".into(),
        }));
        let meta = match responses.recv_timeout(Duration::from_secs(5)).unwrap() {
            StorageResponse::Saved(Ok(meta)) => meta,
            other => panic!("expected save ack, got {other:?}"),
        };

        assert!(worker.submit(StorageRequest::Load(meta)));
        match responses.recv_timeout(Duration::from_secs(5)).unwrap() {
            StorageResponse::Loaded(Ok(source)) => assert_eq!(source, "// demo"),
            other => panic!("expected load result, got {other:?}"),
        }
    }

    #[test]
    fn requests_are_answered_in_submission_order() {
        let temp = tempfile::tempdir().unwrap();
        let worker = StorageWorker::spawn(ShaderStorage::new(temp.path()));
        let responses = worker.responses();

        worker.submit(StorageRequest::Save {
            name: "first".into(),
            source: "// 1".into(),
        });
        worker.submit(StorageRequest::List);

        assert!(matches!(
            responses.recv_timeout(Duration::from_secs(5)).unwrap(),
            StorageResponse::Saved(Ok(_))
        ));
        match responses.recv_timeout(Duration::from_secs(5)).unwrap() {
            StorageResponse::Listed(Ok(listed)) => assert_eq!(listed.len(), 1),
            other => panic!("expected listing, got {other:?}"),
        }
    }

    #[test]
    fn drop_joins_the_worker_thread() {
        let temp = tempfile::tempdir().unwrap();
        let worker = StorageWorker::spawn(ShaderStorage::new(temp.path()));
        drop(worker);
    }
}
