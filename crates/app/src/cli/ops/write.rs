use clap::Args;
use tokio::io::AsyncReadExt;

use graftfs::http_server::api::client::ApiError;
use graftfs::http_server::api::files::write::WriteRequest;

#[derive(Args, Debug, Clone)]
pub struct Write {
    /// File to write (created if missing)
    pub path: String,

    /// Content to write (reads stdin when omitted)
    pub content: Option<String>,

    /// Byte offset to write at
    #[arg(long, default_value_t = 0)]
    pub offset: u64,
}

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("failed to read stdin: {0}")]
    Io(#[from] std::io::Error),

    #[error("daemon returned no write result")]
    EmptyResponse,
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Write {
    type Error = WriteError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut client = ctx.client.clone();

        let data = match &self.content {
            Some(content) => content.clone().into_bytes(),
            None => {
                let mut buf = Vec::new();
                tokio::io::stdin().read_to_end(&mut buf).await?;
                buf
            }
        };

        let request = WriteRequest {
            path: self.path.clone(),
            offset: self.offset,
            data,
        };

        let response = client.call(request).await?;
        let result = response.data.ok_or(WriteError::EmptyResponse)?;
        Ok(format!(
            "wrote {} bytes to {}",
            result.bytes_written, self.path
        ))
    }
}
