//! Integration tests for the gossip facade
//!
//! These tests verify:
//! - Configuration resolution from properties and JSON files
//! - Fall-back behavior when configuration is missing or broken
//! - Hierarchy behavior through the public API
//! - Listener output end to end

use gossip::core::configurator::FALLBACK_PROFILE_NAME;
use gossip::model::{Model, SourceNode};
use gossip::prelude::*;
use std::fs;
use std::io::Write;
use tempfile::TempDir;

fn file_source_bootstrap(path: &std::path::Path) -> Model {
    let mut source = SourceNode::of_kind("file");
    source
        .configuration
        .insert("path".to_string(), path.display().to_string());

    let mut bootstrap = Model::new();
    bootstrap.sources.push(source);
    bootstrap
}

#[test]
fn test_properties_config_to_file_listener_end_to_end() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("gossip.properties");
    let log_path = temp_dir.path().join("out.log");

    let config = format!(
        "version = 1.0.0\n\
         profiles = default\n\
         profile.default.logger.com.example = DEBUG\n\
         profile.default.listeners = out\n\
         profile.default.listener.out = file\n\
         profile.default.listener.out.file = {}\n\
         profile.default.listener.out.append = false\n",
        log_path.display()
    );
    fs::write(&config_path, config).expect("Failed to write config");

    let profile = Configurator::with_bootstrap(file_source_bootstrap(&config_path)).configure();
    let hierarchy = Hierarchy::with_profile(profile);

    let log = hierarchy.get_logger("com.example");
    assert_eq!(log.effective_level(), Level::Debug);

    log.debug("hello");
    log.trace("too quiet to appear");

    let child = hierarchy.get_logger("com.example.child");
    child.info("inherited verbosity");

    let content = fs::read_to_string(&log_path).expect("Failed to read log file");
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines, vec![
        "[DEBUG] com.example - hello",
        "[INFO] com.example.child - inherited verbosity",
    ]);
}

#[test]
fn test_json_config_end_to_end() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("gossip.json");
    let log_path = temp_dir.path().join("out.log");

    let config = format!(
        r#"{{
            "version": "1.0.0",
            "profiles": [
                {{
                    "name": "default",
                    "loggers": [{{"name": "svc", "level": "INFO"}}],
                    "listeners": [
                        {{"kind": "file", "configuration": {{"file": "{}"}}}}
                    ]
                }}
            ]
        }}"#,
        log_path.display()
    );
    fs::write(&config_path, config).expect("Failed to write config");

    let profile = Configurator::with_bootstrap(file_source_bootstrap(&config_path)).configure();
    let hierarchy = Hierarchy::with_profile(profile);

    let log = hierarchy.get_logger("svc");
    log.info("from json config");
    log.debug("below threshold");

    let content = fs::read_to_string(&log_path).expect("Failed to read log file");
    assert_eq!(content, "[INFO] svc - from json config\n");
}

#[test]
fn test_missing_config_degrades_to_fallback() {
    let bootstrap =
        file_source_bootstrap(std::path::Path::new("/definitely/not/here/gossip.properties"));
    let profile = Configurator::with_bootstrap(bootstrap).configure();

    assert_eq!(profile.profiles().len(), 1);
    assert_eq!(profile.profiles()[0].name, FALLBACK_PROFILE_NAME);
    assert_eq!(profile.listeners().len(), 1);
}

#[test]
fn test_broken_config_degrades_to_fallback() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("gossip.properties");
    fs::write(&config_path, "version = 9.9.9\n").expect("Failed to write config");

    let profile = Configurator::with_bootstrap(file_source_bootstrap(&config_path)).configure();
    assert_eq!(profile.profiles()[0].name, FALLBACK_PROFILE_NAME);
}

#[test]
fn test_listener_threshold_filters_below_logger_level() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("gossip.properties");
    let log_path = temp_dir.path().join("out.log");

    // Logger allows DEBUG, the listener only lets WARN and above through.
    let config = format!(
        "version = 1.0.0\n\
         profiles = default\n\
         profile.default.logger.app = DEBUG\n\
         profile.default.listeners = out\n\
         profile.default.listener.out = file\n\
         profile.default.listener.out.file = {}\n\
         profile.default.listener.out.threshold = WARN\n",
        log_path.display()
    );
    fs::write(&config_path, config).expect("Failed to write config");

    let profile = Configurator::with_bootstrap(file_source_bootstrap(&config_path)).configure();
    let hierarchy = Hierarchy::with_profile(profile);

    let log = hierarchy.get_logger("app");
    log.debug("filtered");
    log.error("kept");

    let content = fs::read_to_string(&log_path).expect("Failed to read log file");
    assert_eq!(content, "[ERROR] app - kept\n");
}

#[test]
fn test_trigger_gated_profile_activation() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let config_path = temp_dir.path().join("gossip.properties");
    let log_path = temp_dir.path().join("out.log");

    let config = format!(
        "version = 1.0.0\n\
         profiles = noisy, default\n\
         profile.noisy.triggers = flag\n\
         profile.noisy.trigger.flag = env\n\
         profile.noisy.trigger.flag.name = GOSSIP_TEST_NOISY_SURELY_UNSET\n\
         profile.noisy.logger.app = TRACE\n\
         profile.default.logger.app = ERROR\n\
         profile.default.listeners = out\n\
         profile.default.listener.out = file\n\
         profile.default.listener.out.file = {}\n",
        log_path.display()
    );
    fs::write(&config_path, config).expect("Failed to write config");

    let profile = Configurator::with_bootstrap(file_source_bootstrap(&config_path)).configure();

    // The env trigger did not fire, so only the default profile activated.
    assert_eq!(profile.profiles().len(), 1);
    assert_eq!(profile.profiles()[0].name, "default");

    let hierarchy = Hierarchy::with_profile(profile);
    assert_eq!(hierarchy.get_logger("app").effective_level(), Level::Error);
}

#[test]
fn test_hierarchy_inheritance_through_public_api() {
    let hierarchy = Hierarchy::with_profile(EffectiveProfile::new());

    let grandchild = hierarchy.get_logger("a.b.c");
    assert_eq!(grandchild.effective_level(), Level::Warn);

    hierarchy.set_level("a", Some(Level::Trace));
    assert_eq!(grandchild.effective_level(), Level::Trace);

    hierarchy.set_level("a.b", Some(Level::Error));
    assert_eq!(grandchild.effective_level(), Level::Error);

    hierarchy.set_level("a.b", None);
    assert_eq!(grandchild.effective_level(), Level::Trace);
}

#[test]
fn test_macros_write_through_listeners() {
    use gossip::model::{ListenerNode, LoggerNode, ProfileNode};
    use gossip::{debug, error};

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_path = temp_dir.path().join("out.log");

    let mut listener = ListenerNode::of_kind("file");
    listener
        .configuration
        .insert("file".to_string(), log_path.display().to_string());

    let mut node = ProfileNode::named("test");
    node.loggers.push(LoggerNode::new("m", "INFO"));
    node.listeners.push(listener);

    let mut profile = EffectiveProfile::new();
    profile.add_profile(node);
    let hierarchy = Hierarchy::with_profile(profile);

    let log = hierarchy.get_logger("m");
    debug!(log, "suppressed {}", "message");
    error!(log, "enabled {}", "message");

    let content = fs::read_to_string(&log_path).expect("Failed to read log file");
    assert_eq!(content, "[ERROR] m - enabled message\n");
}

#[test]
fn test_console_listener_custom_writer() {
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    let buffer = SharedBuffer(Arc::new(Mutex::new(Vec::new())));
    let listener = ConsoleListener::with_writer(Box::new(buffer.clone()));

    let event = Event::new("com.example.App", Level::Error, "boom");
    listener.on_event(&event).expect("Listener failed");

    let bytes = buffer.0.lock().unwrap().clone();
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        "[ERROR] com.example.App - boom\n"
    );
}
