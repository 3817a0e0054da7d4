//! Warnings logged for duplicate set ids, no-op exclusions and broken files

mod common;

use common::{rule, set};
use ruleset_resolver::{Configuration, RegistryLoader, RuleSetResolver};
use std::fs;
use std::io;
use std::sync::{Arc, Mutex};
use tempfile::TempDir;

#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
    }
}

fn with_captured_warnings<T>(f: impl FnOnce() -> T) -> (T, String) {
    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    let result = tracing::subscriber::with_default(subscriber, f);
    (result, logs.contents())
}

#[test]
fn test_duplicate_set_id_warning() {
    let temp_dir = TempDir::new().unwrap();
    let dir1 = temp_dir.path().join("sets1");
    let dir2 = temp_dir.path().join("sets2");
    fs::create_dir_all(&dir1).unwrap();
    fs::create_dir_all(&dir2).unwrap();
    fs::write(dir1.join("shared.yaml"), "id: SHARED\nrules: [FirstRule]\n").unwrap();
    fs::write(dir2.join("shared.yaml"), "id: SHARED\nrules: [SecondRule]\n").unwrap();

    let (registry, logs) = with_captured_warnings(|| {
        RegistryLoader::new(vec![dir1.clone(), dir2.clone()])
            .with_builtin(false)
            .load()
            .unwrap()
    });

    assert!(logs.contains("WARN"));
    assert!(logs.contains("Duplicate rule set 'SHARED'"));
    assert!(logs.contains(&dir1.join("shared.yaml").display().to_string()));
    assert_eq!(registry.get(&set("SHARED")).unwrap().rules, vec![rule("FirstRule")]);
}

#[test]
fn test_ineffective_exclusion_warning() {
    let registry = common::scenario_registry();
    let config = Configuration::new(["src"], [set("DEAD_CODE")], [rule("NeverContributed")]);

    let (active, logs) =
        with_captured_warnings(|| RuleSetResolver::new(&registry).resolve(&config).unwrap());

    assert!(logs.contains("Excluded rule 'NeverContributed' is not part of any included set"));
    assert!(!active.is_active(&rule("NeverContributed")));
}

#[test]
fn test_broken_registry_file_warning() {
    let temp_dir = TempDir::new().unwrap();
    fs::write(temp_dir.path().join("broken.yaml"), "id: [unclosed\n").unwrap();
    fs::write(temp_dir.path().join("good.yaml"), "id: GOOD\nrules: [RuleA]\n").unwrap();

    let (registry, logs) = with_captured_warnings(|| {
        RegistryLoader::new(vec![temp_dir.path().to_path_buf()])
            .with_builtin(false)
            .load()
            .unwrap()
    });

    assert!(logs.contains("Failed to load rule sets from"));
    assert!(logs.contains("broken.yaml"));
    assert!(registry.contains(&set("GOOD")));
}

#[test]
fn test_clean_resolution_logs_no_warnings() {
    let registry = common::scenario_registry();
    let config = Configuration::new(["src"], [set("DEAD_CODE")], [rule("RuleA")]);

    let (_, logs) =
        with_captured_warnings(|| RuleSetResolver::new(&registry).resolve(&config).unwrap());

    assert!(logs.is_empty(), "unexpected warnings: {logs}");
}
