use std::sync::Arc;

use service::{RecordService, Storage};

/// Shared handler state; cheap to clone per request.
#[derive(Clone)]
pub struct ServerState {
    pub records: RecordService,
}

impl ServerState {
    pub fn new(storage: Arc<dyn Storage>) -> Self {
        Self { records: RecordService::new(storage) }
    }
}
