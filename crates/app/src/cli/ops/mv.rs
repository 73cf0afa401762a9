use clap::Args;

use graftfs::http_server::api::client::ApiError;
use graftfs::http_server::api::rename::RenameRequest;

#[derive(Args, Debug, Clone)]
pub struct Mv {
    /// Current path
    pub old_path: String,

    /// Destination path
    pub new_path: String,
}

#[derive(Debug, thiserror::Error)]
pub enum MvError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Mv {
    type Error = MvError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut client = ctx.client.clone();

        let request = RenameRequest {
            old_path: self.old_path.clone(),
            new_path: self.new_path.clone(),
        };

        client.call(request).await?;
        Ok(format!("renamed {} -> {}", self.old_path, self.new_path))
    }
}
