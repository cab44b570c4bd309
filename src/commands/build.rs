//! Build the static site

use anyhow::Result;
use notify::Watcher;
use std::sync::mpsc::channel;
use std::time::{Duration, Instant};

use crate::content::loader::ContentLoader;
use crate::generator::Generator;
use crate::{Site, CONFIG_FILE};

/// Load every post and write the whole site
pub fn run(site: &Site) -> Result<()> {
    let start = Instant::now();

    let index = ContentLoader::new(site).with_images().load_index()?;
    tracing::info!("Loaded {} posts", index.len());

    Generator::new(site)?.generate(&index)?;

    let duration = start.elapsed();
    tracing::info!("Built in {:.2}s", duration.as_secs_f64());

    Ok(())
}

/// Watch posts and the config file, rebuilding on change
pub async fn watch(site: &Site) -> Result<()> {
    let (tx, rx) = channel();

    let mut watcher = notify::recommended_watcher(move |res| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    if site.content_dir.exists() {
        watcher.watch(&site.content_dir, notify::RecursiveMode::Recursive)?;
    }

    let config_path = site.base_dir.join(CONFIG_FILE);
    if config_path.exists() {
        watcher.watch(&config_path, notify::RecursiveMode::NonRecursive)?;
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    let mut last_rebuild = Instant::now();

    loop {
        match rx.recv_timeout(Duration::from_millis(100)) {
            Ok(_event) => {
                // Debounce bursts of events from a single save
                if last_rebuild.elapsed() > Duration::from_millis(500) {
                    tracing::info!("File changed, rebuilding...");
                    if let Err(e) = Site::new(&site.base_dir).and_then(|fresh| run(&fresh)) {
                        tracing::error!("Build failed: {}", e);
                    }
                    last_rebuild = Instant::now();
                }
            }
            Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {}
            Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => break,
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_build_from_config_file() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE),
            "title: Notes\ncontent_dir: posts\npublic_dir: out\n",
        )
        .unwrap();
        fs::create_dir_all(dir.path().join("posts/hello")).unwrap();
        fs::write(
            dir.path().join("posts/hello/index.md"),
            "---\ntitle: Hello\ndate: 2021-06-01\n---\nBody text.\n",
        )
        .unwrap();

        let site = Site::new(dir.path()).unwrap();
        run(&site).unwrap();

        let page = fs::read_to_string(dir.path().join("out/hello/index.html")).unwrap();
        assert!(page.contains("<title>Hello | Notes</title>"));
        assert!(dir.path().join("out/index.html").exists());
    }

    #[test]
    fn test_duplicate_slugs_fail_the_build() {
        let dir = TempDir::new().unwrap();
        let site = Site::new(dir.path()).unwrap();
        fs::create_dir_all(site.content_dir.join("hello")).unwrap();
        fs::write(site.content_dir.join("hello/index.md"), "---\ntitle: A\n---\n").unwrap();
        fs::write(site.content_dir.join("hello.md"), "---\ntitle: B\n---\n").unwrap();

        assert!(run(&site).is_err());
    }
}
