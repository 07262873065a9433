//! Resolve the [`ClientConfig`] for this run.
//!
//! Native builds read `.env` (via `dotenvy`), then the TOML file named by
//! `UNIVLOOP_CONFIG` if set, then apply the individual overrides below. Web
//! builds have no environment at run time, so the same overrides are taken
//! from the build environment instead.

use store::ClientConfig;

pub const CONFIG_PATH_VAR: &str = "UNIVLOOP_CONFIG";
pub const BACKEND_URL_VAR: &str = "UNIVLOOP_BACKEND_URL";
pub const CLOUD_NAME_VAR: &str = "UNIVLOOP_CLOUD_NAME";
pub const UPLOAD_PRESET_VAR: &str = "UNIVLOOP_UPLOAD_PRESET";

/// Apply the `UNIVLOOP_*` overrides found by `lookup`. Blank values are ignored.
pub fn apply_overrides(mut config: ClientConfig, lookup: impl Fn(&str) -> Option<String>) -> ClientConfig {
    let get = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

    if let Some(url) = get(BACKEND_URL_VAR) {
        config.api.backend_url = url;
    }
    if let Some(cloud) = get(CLOUD_NAME_VAR) {
        config.upload.cloud_name = cloud;
    }
    if let Some(preset) = get(UPLOAD_PRESET_VAR) {
        config.upload.upload_preset = preset;
    }
    config
}

#[cfg(not(target_arch = "wasm32"))]
pub fn load_config() -> Result<ClientConfig, String> {
    dotenvy::dotenv().ok();

    let config = match std::env::var(CONFIG_PATH_VAR) {
        Ok(path) => {
            let text = std::fs::read_to_string(&path)
                .map_err(|e| format!("cannot read {path}: {e}"))?;
            ClientConfig::from_toml(&text).map_err(|e| format!("invalid {path}: {e}"))?
        }
        Err(_) => ClientConfig::default(),
    };

    let config = apply_overrides(config, |key| std::env::var(key).ok());
    tracing::debug!(backend = %config.api.backend_url, "client configuration loaded");
    Ok(config)
}

#[cfg(target_arch = "wasm32")]
pub fn load_config() -> Result<ClientConfig, String> {
    let built = |key: &str| -> Option<String> {
        match key {
            BACKEND_URL_VAR => option_env!("UNIVLOOP_BACKEND_URL"),
            CLOUD_NAME_VAR => option_env!("UNIVLOOP_CLOUD_NAME"),
            UPLOAD_PRESET_VAR => option_env!("UNIVLOOP_UPLOAD_PRESET"),
            _ => None,
        }
        .map(str::to_string)
    };
    Ok(apply_overrides(ClientConfig::default(), built))
}
