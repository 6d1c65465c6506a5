use anyhow::Result;
use glr::{Client, RequestOption};

pub async fn remove_runner(client: &Client, options: &[RequestOption], id: u64) -> Result<()> {
    let resp = client.runners().remove_runner(id, options).await?;
    println!("Runner {} removed ({})", id, resp.status);
    Ok(())
}
