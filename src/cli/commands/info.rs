//! Info command.

use console::style;
use fpath::Path;

fn row(label: &str, value: impl std::fmt::Display) {
    println!("{:>10}  {value}", style(label).cyan());
}

pub fn run(path: &str) -> anyhow::Result<()> {
    let path = Path::from_env(path);

    row("path", &path);
    row("absolute", path.abs());
    row("parent", path.parent());
    row("base", path.base());
    row("stem", path.stem());
    row("ext", path.ext());

    let Some(meta) = path.stat() else {
        row("exists", style("no").red());
        return Ok(());
    };

    let kind = if meta.is_dir() {
        "directory"
    } else if meta.is_file() {
        "file"
    } else {
        "other"
    };
    row("exists", style("yes").green());
    row("kind", kind);
    row("size", path.pretty_size());
    if let Some(target) = path.read_link() {
        row("link to", target);
    }
    Ok(())
}
