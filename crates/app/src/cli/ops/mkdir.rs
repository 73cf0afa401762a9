use clap::Args;

use graftfs::http_server::api::client::ApiError;
use graftfs::http_server::api::mkdir::MkdirRequest;

use super::parse_octal;

#[derive(Args, Debug, Clone)]
pub struct Mkdir {
    /// Directory to create
    pub path: String,

    /// Permission bits in octal
    #[arg(long, default_value = "755", value_parser = parse_octal)]
    pub mode: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum MkdirError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Mkdir {
    type Error = MkdirError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut client = ctx.client.clone();

        let request = MkdirRequest {
            path: self.path.clone(),
            mode: self.mode,
        };

        client.call(request).await?;
        Ok(format!("created directory {}", self.path))
    }
}
