#![cfg(unix)]

use glkpack::core::models::{BundleCatalog, BundleSpec, MinifierCommand};
use glkpack::core::services::BuildOrchestrator;
use glkpack::infrastructure::{ProcessMinifier, TokioFileSystemService};
use glkpack::utils::BundleError;
use std::path::Path;
use std::sync::Arc;
use tempfile::tempdir;

fn orchestrator(command: MinifierCommand) -> BuildOrchestrator {
    BuildOrchestrator::new(
        Arc::new(TokioFileSystemService),
        Arc::new(ProcessMinifier::new(command)),
    )
}

fn identity_minifier() -> MinifierCommand {
    MinifierCommand::new("cat", Vec::<String>::new())
}

fn write_source(root: &Path, name: &str, content: &[u8]) {
    let path = root.join(name);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

#[tokio::test]
async fn test_bundle_is_filtered_concatenation() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    write_source(root, "src/a.js", b"var x = 1; ;;;console.log(x);\nvar y = 2;\n");
    write_source(root, "src/b.js", b";;;assert(y == 2);\nfunction f() {}\n");

    let catalog = BundleCatalog::new(vec![BundleSpec::new("lib/out.min.js", ["src/a.js", "src/b.js"])])
        .resolve_against(root);
    let report = orchestrator(identity_minifier()).run(&catalog).await.unwrap();

    let output = std::fs::read(root.join("lib/out.min.js")).unwrap();
    assert_eq!(output, b"var x = 1; \nvar y = 2;\n\nfunction f() {}\n".to_vec());
    assert_eq!(report.bundles[0].output_size, output.len() as u64);
    assert_eq!(report.bundles[0].debug_fragments_stripped, 2);
}

#[tokio::test]
async fn test_missing_source_stops_after_first_bundle() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    write_source(root, "src/a.js", b"var a;\n");

    let catalog = BundleCatalog::new(vec![
        BundleSpec::new("lib/first.js", ["src/a.js"]),
        BundleSpec::new("lib/second.js", ["src/a.js", "src/missing.js"]),
        BundleSpec::new("lib/third.js", ["src/a.js"]),
    ])
    .resolve_against(root);

    let err = orchestrator(identity_minifier()).run(&catalog).await.unwrap_err();
    match &err {
        BundleError::Read { path, .. } => assert_eq!(path, &root.join("src/missing.js")),
        other => panic!("unexpected error: {other}"),
    }
    assert_ne!(err.exit_code(), 0);

    assert_eq!(std::fs::read(root.join("lib/first.js")).unwrap(), b"var a;\n");
    assert!(!root.join("lib/second.js").exists());
    assert!(!root.join("lib/third.js").exists());
}

#[tokio::test]
async fn test_minifier_failure_stops_catalog() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    write_source(root, "src/a.js", b"syntax error (\n");

    let catalog = BundleCatalog::new(vec![
        BundleSpec::new("lib/first.js", ["src/a.js"]),
        BundleSpec::new("lib/second.js", ["src/a.js"]),
    ])
    .resolve_against(root);

    let failing = MinifierCommand::new("sh", ["-c", "cat > /dev/null; exit 4"]);
    let err = orchestrator(failing).run(&catalog).await.unwrap_err();

    assert!(matches!(err, BundleError::Process { code: 4, .. }));
    assert_eq!(err.exit_code(), 4);
    assert!(!root.join("lib/second.js").exists());
}

#[tokio::test]
async fn test_missing_minifier_is_launch_error() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    write_source(root, "src/a.js", b"var a;\n");

    let catalog = BundleCatalog::new(vec![BundleSpec::new("lib/out.js", ["src/a.js"])]).resolve_against(root);
    let missing = MinifierCommand::new("/nonexistent/minifier", Vec::<String>::new());

    let err = orchestrator(missing).run(&catalog).await.unwrap_err();
    assert!(matches!(err, BundleError::Launch { .. }));
}

#[tokio::test]
async fn test_output_is_rebuilt_from_scratch() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    write_source(root, "src/a.js", b"short\n");
    write_source(root, "lib/out.js", b"a much longer stale bundle from an earlier run\n");

    let catalog = BundleCatalog::new(vec![BundleSpec::new("lib/out.js", ["src/a.js"])]).resolve_against(root);
    orchestrator(identity_minifier()).run(&catalog).await.unwrap();

    assert_eq!(std::fs::read(root.join("lib/out.js")).unwrap(), b"short\n");
}

#[tokio::test]
async fn test_minifier_sees_whole_stream() {
    // The minifier only writes once its input is closed, and sees every source.
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    write_source(root, "src/a.js", b"one\n");
    write_source(root, "src/b.js", b"two\n");
    write_source(root, "src/c.js", b"three\n");

    let catalog = BundleCatalog::new(vec![BundleSpec::new("lib/count.txt", ["src/a.js", "src/b.js", "src/c.js"])])
        .resolve_against(root);
    let counter = MinifierCommand::new("sh", ["-c", "wc -l | tr -d ' '"]);
    orchestrator(counter).run(&catalog).await.unwrap();

    assert_eq!(std::fs::read_to_string(root.join("lib/count.txt")).unwrap().trim(), "3");
}

#[tokio::test]
async fn test_large_bundle_streams_without_deadlock() {
    let temp_dir = tempdir().unwrap();
    let root = temp_dir.path();
    let line = b"var filler = 'xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx'; ;;;trace(filler);\n";
    let content: Vec<u8> = line.iter().copied().cycle().take(line.len() * 50_000).collect();
    write_source(root, "src/big.js", &content);

    let catalog = BundleCatalog::new(vec![BundleSpec::new("lib/big.js", ["src/big.js", "src/big.js"])])
        .resolve_against(root);
    let report = orchestrator(identity_minifier()).run(&catalog).await.unwrap();

    let kept = b"var filler = 'xxxxxxxxxxxxxxxxxxxxxxxxxxxxxxxx'; \n".len() as u64;
    assert_eq!(report.bundles[0].output_size, kept * 100_000);
}
