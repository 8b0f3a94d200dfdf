use boxdraft_domain::config::LoggingConfig;
use boxdraft_logger::Logger;
use std::fs;
use std::time::Duration;
use tempfile::tempdir;

#[test]
fn config_section_enables_json_file_logging() -> Result<(), Box<dyn std::error::Error>> {
    let tmp_dir = tempdir()?;
    let log_dir = tmp_dir.path().join("logs");
    let config =
        LoggingConfig { level: "info".into(), directory: Some(log_dir.clone()), json: true };

    let logger = Logger::builder().name("integration-file-logging").apply(&config)?.init()?;

    tracing::info!(player_id = "p_abc", box_id = "box-2", "Player joined box");
    tracing::debug!("below the configured level");

    std::thread::sleep(Duration::from_millis(30));
    drop(logger);

    let log_file = fs::read_dir(&log_dir)?
        .flatten()
        .map(|entry| entry.path())
        .find(|path| path.extension().and_then(|ext| ext.to_str()) == Some("log"))
        .expect("log file should be created");

    let contents = fs::read_to_string(&log_file)?;
    let line = contents.lines().find(|l| l.contains("Player joined box")).expect("record written");
    assert!(line.starts_with('{'), "file records should be JSON: {line}");
    assert!(line.contains("\"box_id\":\"box-2\""));
    assert!(!contents.contains("below the configured level"));

    Ok(())
}
