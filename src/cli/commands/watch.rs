//! Watch command.

use console::style;
use fpath::Path;
use fpath::watcher::{self, EventMap, WatchOptions};

pub async fn run(dir: &str, patterns: &[String], options: &WatchOptions) -> anyhow::Result<()> {
    let dir = Path::from_env(dir);

    let mut events = EventMap::new();
    for pattern in patterns {
        let tag = pattern.clone();
        events.insert(pattern.clone(), move |action: &str, file: &Path| {
            println!(
                "{} {:<6} {file}",
                style(format!("[{tag}]")).dim(),
                style(action).yellow()
            );
            true
        });
    }

    let handle = watcher::watch(&dir, events, options)?;
    eprintln!(
        "Watching {} for {} (Ctrl-C to stop)",
        style(&dir).cyan(),
        patterns.join(" ")
    );

    tokio::signal::ctrl_c().await?;
    handle.close();
    Ok(())
}
