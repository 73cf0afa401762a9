use clap::Args;

use graftfs::http_server::api::client::ApiError;
use graftfs::http_server::api::truncate::TruncateRequest;

#[derive(Args, Debug, Clone)]
pub struct Truncate {
    /// File to resize
    pub path: String,

    /// New size in bytes
    pub size: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum TruncateError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Truncate {
    type Error = TruncateError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut client = ctx.client.clone();

        let request = TruncateRequest {
            path: self.path.clone(),
            size: self.size,
        };

        client.call(request).await?;
        Ok(format!("truncated {} to {} bytes", self.path, self.size))
    }
}
