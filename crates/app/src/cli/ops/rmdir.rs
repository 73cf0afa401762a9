use clap::Args;

use graftfs::http_server::api::client::ApiError;
use graftfs::http_server::api::rmdir::RmdirRequest;

#[derive(Args, Debug, Clone)]
pub struct Rmdir {
    /// Directory to remove (must be empty)
    pub path: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RmdirError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Rmdir {
    type Error = RmdirError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut client = ctx.client.clone();

        let request = RmdirRequest {
            path: Some(self.path.clone()),
        };

        client.call(request).await?;
        Ok(format!("removed directory {}", self.path))
    }
}
