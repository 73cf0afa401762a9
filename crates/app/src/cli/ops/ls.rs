use clap::Args;

use graftfs::http_server::api::client::ApiError;
use graftfs::http_server::api::readdir::paginated::ReaddirPageRequest;

use super::format_time;

#[derive(Args, Debug, Clone)]
pub struct Ls {
    /// Directory to list
    #[arg(default_value = "/")]
    pub path: String,

    /// Entry offset to start the page at
    #[arg(long)]
    pub offset: Option<usize>,

    /// Maximum entries per page
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Debug, thiserror::Error)]
pub enum LsError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),
}

#[async_trait::async_trait]
impl crate::cli::op::Op for Ls {
    type Error = LsError;
    type Output = String;

    async fn execute(&self, ctx: &crate::cli::op::OpContext) -> Result<Self::Output, Self::Error> {
        let mut client = ctx.client.clone();

        // Create API request
        let request = ReaddirPageRequest {
            path: Some(self.path.clone()),
            offset: self.offset,
            limit: self.limit,
        };

        // Call API
        let response = client.call(request).await?;
        let Some(page) = response.data else {
            return Ok("No entries found".to_string());
        };

        let mut lines = page
            .entries
            .iter()
            .map(|entry| match entry.attr {
                Some(attr) => {
                    let kind = if attr.is_dir() { 'd' } else { '-' };
                    format!(
                        "{}{:03o} {:>10} {} {}",
                        kind,
                        attr.perm(),
                        attr.size,
                        format_time(attr.mtime),
                        entry.name
                    )
                }
                // The synthetic "." and ".." entries carry no attributes
                None => entry.name.clone(),
            })
            .collect::<Vec<_>>();

        if page.total > page.entries.len() {
            lines.push(format!(
                "({} of {} entries, offset {})",
                page.entries.len(),
                page.total,
                page.offset
            ));
        }

        Ok(lines.join("\n"))
    }
}
