use clap::Args;

use graftfs::http_server::api::client::ApiError;
use graftfs::http_server::api::statfs::StatfsRequest;

#[derive(Args, Debug, Clone)]
pub struct Df {
    /// Path to query (the figures are the same for every path)
    #[arg(default_value = "/")]
    pub path: String,
}

#[derive(Debug, thiserror::Error)]
pub enum DfError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("daemon returned no filesystem figures")]
    EmptyResponse,
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Df {
    type Error = DfError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut client = ctx.client.clone();

        let request = StatfsRequest {
            path: Some(self.path.clone()),
        };

        let response = client.call(request).await?;
        let st = response.data.ok_or(DfError::EmptyResponse)?;

        let mut lines = Vec::new();
        lines.push(format!("block size:  {}", st.bsize));
        lines.push(format!(
            "blocks:      {} total, {} free, {} available",
            st.blocks, st.bfree, st.bavail
        ));
        lines.push(format!(
            "inodes:      {} total, {} free",
            st.files, st.ffree
        ));
        lines.push(format!("name length: {}", st.namemax));
        Ok(lines.join("\n"))
    }
}
