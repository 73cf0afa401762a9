use clap::Args;

use graftfs::http_server::api::client::ApiError;
use graftfs::http_server::api::unlink::UnlinkRequest;

#[derive(Args, Debug, Clone)]
pub struct Rm {
    /// File to remove
    pub path: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RmError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Rm {
    type Error = RmError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut client = ctx.client.clone();

        let request = UnlinkRequest {
            path: Some(self.path.clone()),
        };

        client.call(request).await?;
        Ok(format!("removed {}", self.path))
    }
}
