//! Presigned upload URLs.

use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::presigning::PresigningConfig;
use todo_core::types::TodoId;
use uuid::Uuid;

use crate::attachment_key;
use crate::config::StorageConfig;

/// Query parameter carrying the per-call nonce on presigned URLs.
pub const UPLOAD_NONCE_PARAM: &str = "upload-nonce";

#[derive(Debug, thiserror::Error)]
pub enum SignerError {
    #[error("Invalid presigning configuration: {0}")]
    Config(String),

    #[error("Failed to presign upload: {0}")]
    Presign(String),
}

/// Mints short-lived, write-only URLs for direct client uploads.
///
/// Implementations do not check that the item exists or who owns it.
#[async_trait]
pub trait UploadUrlSigner: Send + Sync {
    /// URL accepting a single `PUT` of the attachment for `todo_id`.
    async fn create_upload_url(&self, todo_id: TodoId) -> Result<String, SignerError>;
}

/// [`UploadUrlSigner`] that presigns S3 `PutObject` requests.
#[derive(Clone)]
pub struct S3UploadSigner {
    client: aws_sdk_s3::Client,
    bucket: String,
    expires_in: Duration,
}

impl S3UploadSigner {
    pub fn new(client: aws_sdk_s3::Client, bucket: impl Into<String>, expires_in: Duration) -> Self {
        Self {
            client,
            bucket: bucket.into(),
            expires_in,
        }
    }

    /// Build a signer using the AWS default credential and region chain.
    pub async fn from_config(config: &StorageConfig) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = &config.region {
            loader = loader.region(Region::new(region.clone()));
        }
        let sdk_config = loader.load().await;

        Self::new(
            aws_sdk_s3::Client::new(&sdk_config),
            config.bucket.clone(),
            Duration::from_secs(config.signed_url_expiry_secs),
        )
    }
}

#[async_trait]
impl UploadUrlSigner for S3UploadSigner {
    async fn create_upload_url(&self, todo_id: TodoId) -> Result<String, SignerError> {
        let presigning = PresigningConfig::expires_in(self.expires_in)
            .map_err(|e| SignerError::Config(e.to_string()))?;

        // SigV4 timestamps have one-second resolution; a signed nonce keeps
        // URLs minted for the same object within a second distinct.
        let nonce = Uuid::new_v4().simple().to_string();
        let request = self
            .client
            .put_object()
            .bucket(&self.bucket)
            .key(attachment_key(todo_id))
            .customize()
            .mutate_request(move |request| {
                let separator = if request.uri().contains('?') { '&' } else { '?' };
                let uri = format!("{}{separator}{UPLOAD_NONCE_PARAM}={nonce}", request.uri());
                if let Err(err) = request.set_uri(uri) {
                    tracing::warn!(error = %err, "Could not add upload nonce");
                }
            })
            .presigned(presigning)
            .await
            .map_err(|e| SignerError::Presign(e.to_string()))?;

        tracing::debug!(%todo_id, bucket = %self.bucket, "Presigned attachment upload");
        Ok(request.uri().to_string())
    }
}
