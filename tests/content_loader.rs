//! Library-level tests for the content loader feeding folio-core.

use std::fs;
use std::path::Path;

use folio::config::ContentConfig;
use folio::content::{load_content, ContentError};
use folio::progress::{LoadProgressEvent, LoadProgressReporter, NoProgress};
use folio_core::hierarchy::build_hierarchy;
use folio_core::models::Collection;
use folio_core::ordering::OrderingConfig;
use std::sync::Mutex;
use tempfile::TempDir;

fn write(root: &Path, rel: &str, content: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn config_for(root: &Path) -> ContentConfig {
    ContentConfig {
        root: root.to_path_buf(),
        ..ContentConfig::default()
    }
}

#[derive(Default)]
struct Recorder {
    events: Mutex<Vec<LoadProgressEvent>>,
}

impl LoadProgressReporter for Recorder {
    fn report(&self, event: LoadProgressEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[test]
fn test_loads_and_builds_hierarchy() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(root, "docs/guide/overview.mdx", "---\ntitle: Overview\norder: 0\n---\n");
    write(root, "docs/guide/setup.mdx", "---\ntitle: Setup\norder: 1\n---\n");
    write(root, "docs/guide/advanced/tips.md", "---\ntitle: Tips\n---\n");

    let loaded = load_content(&config_for(root), &NoProgress).unwrap();
    assert_eq!(loaded.docs.len(), 3);
    assert!(loaded.skipped.is_empty());

    let hierarchy = build_hierarchy(&loaded.docs, &OrderingConfig::default());
    let guide = &hierarchy.category("guide").unwrap().node;
    assert_eq!(guide.root_documents[0].slug, "guide/overview");
    assert_eq!(guide.docs_here[0].slug, "guide/setup");
    assert_eq!(guide.child("advanced").unwrap().docs_here[0].slug, "guide/advanced/tips");

    let flat: Vec<&str> = hierarchy.flatten().iter().map(|d| d.slug.as_str()).collect();
    assert_eq!(flat, vec!["guide/overview", "guide/advanced/tips", "guide/setup"]);
}

#[test]
fn test_bad_files_are_skipped_not_fatal() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(root, "docs/a/good.md", "---\ntitle: Good\n---\n");
    write(root, "docs/a/no-front.md", "plain text\n");
    write(root, "docs/a/no-title.md", "---\norder: 3\n---\n");
    write(root, "blog/bad-date.md", "---\ntitle: X\npublishedAt: soon\n---\n");

    let loaded = load_content(&config_for(root), &NoProgress).unwrap();
    assert_eq!(loaded.docs.len(), 1);
    assert!(loaded.blog.is_empty());

    let mut errors: Vec<(&str, &ContentError)> = loaded
        .skipped
        .iter()
        .map(|s| (s.path.as_str(), &s.error))
        .collect();
    errors.sort_by(|a, b| a.0.cmp(b.0));
    assert_eq!(errors.len(), 3);
    assert!(matches!(errors[0].1, ContentError::BadDate { .. }));
    assert_eq!(*errors[1].1, ContentError::MissingFrontMatter);
    assert_eq!(*errors[2].1, ContentError::MissingTitle);
}

#[test]
fn test_duplicate_slug_keeps_first() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(root, "docs/guide/setup.md", "---\ntitle: From md\n---\n");
    write(root, "docs/guide/setup/index.mdx", "---\ntitle: From index\n---\n");

    let loaded = load_content(&config_for(root), &NoProgress).unwrap();
    assert_eq!(loaded.docs.len(), 1);
    assert_eq!(loaded.docs[0].title, "From md");
    assert_eq!(
        loaded.skipped[0].error,
        ContentError::DuplicateSlug("guide/setup".to_string())
    );
}

#[test]
fn test_excludes_and_foreign_directories() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(root, "docs/guide/a.md", "---\ntitle: A\n---\n");
    write(root, "docs/drafts/b.md", "---\ntitle: B\n---\n");
    write(root, "docs/node_modules/pkg/readme.md", "---\ntitle: Pkg\n---\n");
    write(root, "docs/guide/data.json", "{}");
    write(root, "pages/c.md", "---\ntitle: C\n---\n");

    let mut config = config_for(root);
    config.exclude_globs = vec!["**/drafts/**".to_string()];
    let loaded = load_content(&config, &NoProgress).unwrap();

    let slugs: Vec<&str> = loaded.docs.iter().map(|d| d.slug.as_str()).collect();
    assert_eq!(slugs, vec!["guide/a"]);
    assert!(loaded.skipped.is_empty());
}

#[test]
fn test_blog_newest_first_and_lookup() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(root, "blog/old.md", "---\ntitle: Old\npublishedAt: 2022-01-01\n---\n");
    write(root, "blog/new.md", "---\ntitle: New\npublishedAt: 2024-01-01T09:30:00+02:00\n---\n");

    let loaded = load_content(&config_for(root), &NoProgress).unwrap();
    let titles: Vec<&str> = loaded.blog.iter().map(|d| d.title.as_str()).collect();
    assert_eq!(titles, vec!["New", "Old"]);
    assert_eq!(loaded.find(Collection::Blog, "/old/").unwrap().url, "/blog/old");
    assert!(loaded.find(Collection::Docs, "old").is_none());
}

#[test]
fn test_progress_events() {
    let tmp = TempDir::new().unwrap();
    let root = tmp.path();
    write(root, "docs/a/one.md", "---\ntitle: One\n---\n");
    write(root, "docs/a/two.md", "plain\n");

    let recorder = Recorder::default();
    load_content(&config_for(root), &recorder).unwrap();
    let events = recorder.events.lock().unwrap();
    assert!(matches!(events[0], LoadProgressEvent::Discovering { .. }));
    assert_eq!(events[1], LoadProgressEvent::Parsing { n: 2, total: 2 });
    assert_eq!(events[2], LoadProgressEvent::Done { loaded: 1, skipped: 1 });
}

#[test]
fn test_missing_root_is_error() {
    let tmp = TempDir::new().unwrap();
    let err = load_content(&config_for(&tmp.path().join("absent")), &NoProgress).unwrap_err();
    assert!(err.to_string().contains("Content root does not exist"));
}
