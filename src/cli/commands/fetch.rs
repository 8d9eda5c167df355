//! Fetch command.

use console::style;
use fpath::Path;

pub async fn run(url: String, target: Option<String>) -> anyhow::Result<()> {
    // The blocking client must not run on an async worker.
    let path = tokio::task::spawn_blocking(move || Path::from_url(&url, target.as_deref())).await??;
    println!("{} {path} ({})", style("saved").green(), path.pretty_size());
    Ok(())
}
