//! Fetch a URL into a file.

use super::{OpenMode, Path, lexical};
use crate::error::FsResult;

impl Path {
    /// Download `url` into this path with a plain, synchronous GET.
    ///
    /// Does nothing if the path already exists, whatever its content. A
    /// non-success HTTP status is an error and leaves the path untouched.
    /// A failure while streaming the body can leave a partial file behind.
    ///
    /// Blocks the calling thread; from async code run it on a blocking task.
    pub fn download_from(&self, url: &str) -> FsResult<()> {
        if self.exists() {
            crate::debug_event!("download", "skipped", "{} already exists", self.0);
            return Ok(());
        }

        crate::log_event!("download", "fetching", "{url} -> {}", self.0);
        let mut response = reqwest::blocking::get(url)?.error_for_status()?;

        let mut out = self.open(OpenMode::NewWrite)?;
        let written = response.copy_to(&mut out)?;
        crate::debug_event!("download", "complete", "{written} bytes to {}", self.0);
        Ok(())
    }

    /// Download `url` into `target`, or into the URL's final element when no
    /// target is given. The target is expanded against the environment.
    pub fn from_url(url: &str, target: Option<&str>) -> FsResult<Path> {
        let path = match target {
            Some(target) => Path::from_env(target),
            None => Path::from_env(&url_base(url)),
        };
        path.download_from(url)?;
        Ok(path)
    }
}

/// Final path element of a URL, ignoring query and fragment.
fn url_base(url: &str) -> String {
    let end = url.find(['?', '#']).unwrap_or(url.len());
    lexical::base(&url[..end])
}
