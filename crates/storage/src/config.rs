/// Default lifetime of a presigned upload URL, in seconds.
pub const DEFAULT_SIGNED_URL_EXPIRY_SECS: u64 = 300;

/// Attachment storage configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Bucket attachments are uploaded to.
    pub bucket: String,
    /// Lifetime of presigned upload URLs (default: `300`).
    pub signed_url_expiry_secs: u64,
    /// Region override. When unset the AWS default chain decides.
    pub region: Option<String>,
}

impl StorageConfig {
    /// Load storage configuration from environment variables.
    ///
    /// | Env Var                 | Required | Default |
    /// |-------------------------|----------|---------|
    /// | `ATTACHMENT_S3_BUCKET`  | **yes**  | --      |
    /// | `SIGNED_URL_EXPIRATION` | no       | `300`   |
    /// | `AWS_REGION`            | no       | --      |
    ///
    /// # Panics
    ///
    /// Panics if `ATTACHMENT_S3_BUCKET` is missing or empty, or if
    /// `SIGNED_URL_EXPIRATION` is not a positive integer.
    pub fn from_env() -> Self {
        let bucket = std::env::var("ATTACHMENT_S3_BUCKET")
            .expect("ATTACHMENT_S3_BUCKET must be set in the environment");
        assert!(!bucket.trim().is_empty(), "ATTACHMENT_S3_BUCKET must not be empty");

        let signed_url_expiry_secs: u64 = std::env::var("SIGNED_URL_EXPIRATION")
            .unwrap_or_else(|_| DEFAULT_SIGNED_URL_EXPIRY_SECS.to_string())
            .parse()
            .expect("SIGNED_URL_EXPIRATION must be a valid u64");
        assert!(signed_url_expiry_secs > 0, "SIGNED_URL_EXPIRATION must be positive");

        let region = std::env::var("AWS_REGION")
            .ok()
            .filter(|r| !r.trim().is_empty());

        Self {
            bucket,
            signed_url_expiry_secs,
            region,
        }
    }
}
