// ABOUTME: Config scaffolding for new setups.
// ABOUTME: Creates a commented pullwatch.yml template.

use std::path::Path;

use crate::error::{Error, Result};

use super::{CONFIG_FILENAME, Config};

pub fn init_config(dir: &Path, force: bool) -> Result<()> {
    let config_path = dir.join(CONFIG_FILENAME);

    if config_path.exists() && !force {
        return Err(Error::AlreadyExists(config_path));
    }

    let yaml = generate_template_yaml(&Config::default());
    std::fs::write(&config_path, yaml)?;
    tracing::info!(path = %config_path.display(), "wrote config template");

    Ok(())
}

fn generate_template_yaml(config: &Config) -> String {
    format!(
        r#"# Registry used when the image reference does not name one
registry: {}
# One of: amd64, arm64, arm, i386
architecture: {}
# Events buffered between the pull worker and the display
relay_capacity: {}
engine:
  # socket: /var/run/docker.sock
  timeout: {}s
"#,
        config.registry,
        config.architecture,
        config.relay_capacity,
        config.engine.timeout.as_secs()
    )
}
