use clap::Args;

use graftfs::http_server::api::client::ApiError;

#[derive(Args, Debug, Clone)]
pub struct Cat {
    /// File to read
    pub path: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CatError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Cat {
    type Error = CatError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let base = ctx.client.base_url();
        let client = ctx.client.http_client();

        // Content comes back as the raw body, not the JSON envelope
        let url = format!("{}/api/files/read", base.as_str().trim_end_matches('/'));
        let response = client
            .get(&url)
            .query(&[("path", self.path.as_str())])
            .send()
            .await
            .map_err(ApiError::from)?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.map_err(ApiError::from)?;
            return Err(CatError::Api(ApiError::HttpStatus(status, body)));
        }

        let bytes = response.bytes().await.map_err(ApiError::from)?;

        // Try to convert to UTF-8 string, or show hex if binary
        match String::from_utf8(bytes.to_vec()) {
            Ok(text) => Ok(text),
            Err(_) => Ok(bytes
                .iter()
                .map(|b| format!("{:02x}", b))
                .collect::<Vec<_>>()
                .join(" ")),
        }
    }
}
