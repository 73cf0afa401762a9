use clap::Args;

use graftfs::http_server::api::client::ApiError;
use graftfs::http_server::api::create::CreateRequest;

use super::parse_octal;

#[derive(Args, Debug, Clone)]
pub struct Touch {
    /// File to create
    pub path: String,

    /// Permission bits in octal
    #[arg(long, default_value = "644", value_parser = parse_octal)]
    pub mode: u32,
}

#[derive(Debug, thiserror::Error)]
pub enum TouchError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Touch {
    type Error = TouchError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut client = ctx.client.clone();

        let request = CreateRequest {
            path: self.path.clone(),
            flags: 0,
            mode: self.mode,
        };

        client.call(request).await?;
        Ok(format!("created {}", self.path))
    }
}
