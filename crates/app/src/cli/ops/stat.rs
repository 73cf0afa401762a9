use clap::Args;

use graftfs::http_server::api::client::ApiError;
use graftfs::http_server::api::getattr::GetattrRequest;

use super::format_time;

#[derive(Args, Debug, Clone)]
pub struct Stat {
    /// Path to inspect
    pub path: String,
}

#[derive(Debug, thiserror::Error)]
pub enum StatError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("daemon returned no attributes")]
    EmptyResponse,
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Stat {
    type Error = StatError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut client = ctx.client.clone();

        // Create API request
        let request = GetattrRequest {
            path: Some(self.path.clone()),
        };

        // Call API
        let response = client.call(request).await?;
        let attr = response.data.ok_or(StatError::EmptyResponse)?;

        let kind = if attr.is_dir() {
            "directory"
        } else {
            "regular file"
        };

        let mut lines = Vec::new();
        lines.push(format!("file:  {}", self.path));
        lines.push(format!("type:  {}", kind));
        lines.push(format!("size:  {}", attr.size));
        lines.push(format!("mode:  {:04o}", attr.perm()));
        lines.push(format!("links: {}", attr.nlink));
        lines.push(format!("owner: {}:{}", attr.uid, attr.gid));
        lines.push(format!("mtime: {}", format_time(attr.mtime)));
        Ok(lines.join("\n"))
    }
}
