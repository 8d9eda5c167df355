//! Kv command.

use fpath::{LoadOptions, Path, ProcessEnv};

pub fn run(file: &str, options: &LoadOptions, json: bool) -> anyhow::Result<()> {
    let path = Path::from_env(file);
    let map = path.read_kv_with(options, &mut ProcessEnv)?;
    tracing::debug!("[kv] loaded {} keys from {path}", map.len());

    if json {
        let object: serde_json::Map<String, serde_json::Value> = map
            .sorted()
            .into_iter()
            .map(|(k, v)| (k.to_string(), serde_json::Value::from(v.as_str())))
            .collect();
        println!("{}", serde_json::to_string_pretty(&object)?);
    } else {
        for (key, value) in map.sorted() {
            println!("{key}{}{value}", options.separator);
        }
    }
    Ok(())
}
