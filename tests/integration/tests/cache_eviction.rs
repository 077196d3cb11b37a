//! End-to-end cache eviction scenarios: render, sweep, document deletion.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use mdfence_cache::{CacheCollector, CacheManager, SourcePathHasher, stale_entries_for_source};
use mdfence_core::{DocumentEvent, DocumentEventBus, FenceRenderer, connect_cache};
use mdfence_plugin::{
    CacheableProvider, CodeFence, ExtensionRegistry, FenceGeneratingProvider, ProviderError,
    RenderedFence,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

/// Writes one SVG per fence, named after the fence body.
struct SvgProvider {
    root: PathBuf,
}

impl FenceGeneratingProvider for SvgProvider {
    fn id(&self) -> &str {
        "svg"
    }

    fn accepts(&self, info_string: &str) -> bool {
        info_string.trim() == "svg"
    }

    fn render(
        &self,
        fence: &CodeFence,
        cache_dir: Option<&Path>,
    ) -> Result<RenderedFence, ProviderError> {
        let dir = cache_dir.ok_or_else(|| ProviderError::MissingCacheDir("svg".into()))?;
        let artifact = dir.join(format!("{}.svg", fence.content.trim()));
        fs::write(&artifact, b"<svg/>")?;

        Ok(RenderedFence {
            html: format!("<img src=\"{}\"/>", artifact.display()),
            artifacts: vec![artifact],
        })
    }

    fn as_cacheable(&self) -> Option<&dyn CacheableProvider> {
        Some(self)
    }
}

impl CacheableProvider for SvgProvider {
    fn cache_root(&self) -> PathBuf {
        self.root.clone()
    }
}

fn setup(root: &Path) -> (Arc<CacheManager>, FenceRenderer) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let mut extensions = ExtensionRegistry::new();
    extensions.register_generating(Arc::new(SvgProvider {
        root: root.to_path_buf(),
    }));
    let manager = Arc::new(CacheManager::new(
        Arc::new(extensions),
        Duration::from_millis(20),
    ));
    let renderer = FenceRenderer::new(Arc::clone(&manager));
    (manager, renderer)
}

async fn wait_until_gone(path: &Path) {
    for _ in 0..200 {
        if !path.exists() {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("{} was not deleted", path.display());
}

#[tokio::test]
async fn sweep_removes_artifacts_dropped_between_renders() {
    let temp = TempDir::new().unwrap();
    let (manager, renderer) = setup(temp.path());
    let source = Path::new("/docs/readme.md");

    renderer
        .render_document(source, "```svg\none\n```\n\n```svg\ntwo\n```\n")
        .unwrap();
    let dir = manager.hasher().cache_dir_for(temp.path(), source);
    assert!(dir.join("one.svg").exists());
    assert!(dir.join("two.svg").exists());

    // First sweep: everything rendered is alive, nothing is deleted.
    manager.run_sweep();
    tokio::time::sleep(Duration::from_millis(30)).await;
    assert!(dir.join("one.svg").exists());
    assert!(dir.join("two.svg").exists());

    // The second fence disappears from the document.
    renderer.render_document(source, "```svg\none\n```\n").unwrap();
    manager.run_sweep();

    wait_until_gone(&dir.join("two.svg")).await;
    assert!(dir.join("one.svg").exists());
}

#[tokio::test]
async fn delete_event_removes_whole_cache_directory() {
    let temp = TempDir::new().unwrap();
    let (manager, renderer) = setup(temp.path());
    let source = Path::new("/docs/readme.md");

    renderer.render_document(source, "```svg\none\n```\n").unwrap();
    let dir = manager.hasher().cache_dir_for(temp.path(), source);
    assert!(dir.exists());

    let bus = DocumentEventBus::new();
    connect_cache(&bus, Arc::clone(&manager));
    bus.publish(&DocumentEvent::Deleted {
        path: source.to_path_buf(),
    });
    assert_eq!(manager.pending_deletions(), 1);

    manager.run_sweep();
    wait_until_gone(&dir).await;
}

#[tokio::test]
async fn non_markdown_delete_event_is_ignored() {
    let temp = TempDir::new().unwrap();
    let (manager, renderer) = setup(temp.path());
    let source = Path::new("/docs/readme.md");

    renderer.render_document(source, "```svg\none\n```\n").unwrap();

    let bus = DocumentEventBus::new();
    connect_cache(&bus, Arc::clone(&manager));
    bus.publish(&DocumentEvent::Deleted {
        path: PathBuf::from("/docs/readme.txt"),
    });

    assert_eq!(manager.pending_deletions(), 0);
}

#[tokio::test]
async fn periodic_sweep_triggers_without_manual_runs() {
    let temp = TempDir::new().unwrap();
    let (manager, renderer) = setup(temp.path());
    let source = Path::new("/docs/readme.md");

    renderer.render_document(source, "```svg\none\n```\n").unwrap();
    let dir = manager.hasher().cache_dir_for(temp.path(), source);

    manager.on_source_file_deleted(source);
    Arc::clone(&manager).start();

    wait_until_gone(&dir).await;
    manager.shutdown();
    assert!(!manager.is_running());
}

/// The conservative-sweep scenario: root has cache directories for two
/// documents but only one has a registered collector; the other is left
/// untouched.
#[test]
fn unmatched_directory_survives_periodic_sweep() {
    let temp = TempDir::new().unwrap();
    let hasher = SourcePathHasher::default();

    let d1 = hasher.cache_dir_for(temp.path(), Path::new("/a.md"));
    let d2 = hasher.cache_dir_for(temp.path(), Path::new("/b.md"));
    fs::create_dir_all(&d1).unwrap();
    fs::create_dir_all(&d2).unwrap();
    fs::write(d1.join("img1.png"), b"x").unwrap();
    fs::write(d1.join("img2.png"), b"x").unwrap();
    fs::write(d2.join("img.png"), b"x").unwrap();

    let alive = HashSet::from([d1.join("img1.png")]);
    let stale = stale_entries_for_source(
        Path::new("/a.md"),
        &alive,
        &[temp.path().to_path_buf()],
        &hasher,
    );

    assert_eq!(stale, HashSet::from([d1.join("img2.png")]));
}

#[tokio::test]
async fn collector_registered_during_sweep_is_processed_next_sweep() {
    let temp = TempDir::new().unwrap();
    let (manager, _renderer) = setup(temp.path());
    let source = Path::new("/docs/late.md");

    let dir = manager.hasher().cache_dir_for(temp.path(), source);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("old.png"), b"x").unwrap();

    manager.run_sweep();

    // Registered after the sweep's snapshot: nothing claimed alive, so the
    // directory goes stale in the following sweep.
    manager.register_collector(Arc::new(CacheCollector::new(source)));
    manager.run_sweep();

    wait_until_gone(&dir).await;
}
