/*!
 * Client implementations for the remote services the pipeline depends on:
 * - Editor: video-editing automation API (drafts, tracks, subtitle burn-in)
 * - Speech: narration synthesis and word-level alignment
 */

use async_trait::async_trait;
use std::fmt::Debug;

use crate::errors::ServiceError;

/// Common trait for all remote service clients
///
/// Every client can identify itself and answer a cheap preflight check, so
/// the controller can verify all collaborators are reachable before starting
/// a generation run.
#[async_trait]
pub trait RemoteService: Send + Sync + Debug {
    /// Human-readable service name for log output
    fn name(&self) -> &str;

    /// Check that the service is reachable and answering
    async fn health_check(&self) -> Result<(), ServiceError>;
}

pub mod editor;
pub mod speech;
