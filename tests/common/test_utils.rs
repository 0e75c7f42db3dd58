use query_form::{
    Result,
    api::QueryClient,
    config::BackendConfig,
    form::QueryForm,
    session::SessionId,
};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::fs;

/// Build a form over any client with the default session id
pub fn create_test_form<C: QueryClient + 'static>(client: Arc<C>) -> QueryForm {
    QueryForm::new(client, SessionId::default())
}

/// Backend config pointing at a mock server
pub fn backend_for(base_url: &str) -> BackendConfig {
    BackendConfig {
        base_url: base_url.to_string(),
        ..BackendConfig::default()
    }
}

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Create a test config YAML file
pub async fn create_test_config_file(dir: &TempDir, content: &str) -> Result<String> {
    let config_path = dir.path().join("config.yaml");
    fs::write(&config_path, content).await?;
    Ok(config_path.to_string_lossy().to_string())
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
backend:
  base_url: "http://localhost:5000"
  endpoint: "/get_response"
  timeout_secs: 10

session:
  id: "session_42"

logs:
  level: "debug"
  format: "pretty"
"#;

/// Invalid configuration YAML for testing error cases
pub const INVALID_CONFIG_YAML: &str = r#"
backend:
  timeout_secs: "soon"

logs:
  format: "xml"
"#;
