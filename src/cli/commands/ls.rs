//! Ls command.

use anyhow::bail;
use console::style;
use fpath::Path;

pub struct LsArgs {
    pub all: bool,
    pub recursive: bool,
    pub glob: Option<String>,
    pub find: Option<String>,
}

fn print_entry(path: &Path) {
    if path.is_dir() {
        println!("{}", style(format!("{path}/")).blue().bold());
    } else {
        println!("{path}");
    }
}

pub fn run(dir: &str, args: LsArgs) -> anyhow::Result<()> {
    let dir = Path::from_env(dir);
    if !dir.is_dir() {
        bail!("{dir} is not a directory");
    }

    if let Some(pattern) = &args.glob {
        for path in dir.try_glob(pattern)? {
            print_entry(&path);
        }
        return Ok(());
    }

    if let Some(regex) = &args.find {
        if !dir.try_find(regex, |path| print_entry(&path))? {
            eprintln!("{}", style(format!("{dir} is empty")).dim());
        }
        return Ok(());
    }

    let entries = if args.recursive {
        dir.walk(args.all)
    } else {
        dir.list_dir(args.all)
    };
    for path in &entries {
        print_entry(path);
    }
    Ok(())
}
