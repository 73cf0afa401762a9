use std::path::PathBuf;

use clap::Args;

use graftfs::http_server::api::client::ApiError;
use graftfs::http_server::api::link::LinkRequest;

#[derive(Args, Debug, Clone)]
pub struct Link {
    /// Namespace path to bind (e.g. /ext)
    pub path: String,

    /// Host directory that backs the subtree
    pub target: PathBuf,
}

#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Link {
    type Error = LinkError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut client = ctx.client.clone();

        let request = LinkRequest {
            path: self.path.clone(),
            target: self.target.clone(),
        };

        client.call(request).await?;
        Ok(format!("linked {} -> {}", self.path, self.target.display()))
    }
}
