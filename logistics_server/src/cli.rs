use std::env;

use crate::config::ServerConfig;

/// The server has no flags. Any argument prints the help text and the configuration the server would start with.
pub fn handle_command_line_args() -> bool {
    let has_cli_args = env::args().count() > 1;
    if has_cli_args {
        const README: &str = include_str!("./cli-help.txt");
        println!("\n{README}\n");
        let config = ServerConfig::from_env_or_default();
        let log_filter = env::var("RUST_LOG").unwrap_or_else(|_| "Not set".into());
        println!("{}", effective_settings(&config, &log_filter));
    }
    has_cli_args
}

/// Renders the resolved settings, defaults included. Credentials are only reported as set or missing.
fn effective_settings(config: &ServerConfig, log_filter: &str) -> String {
    let credential = |missing: bool| if missing { "Missing" } else { "Set" };
    let cors = if config.cors_origins.is_empty() { "*".to_string() } else { config.cors_origins.join(",") };
    let rows = [
        ("RUST_LOG", log_filter.to_string()),
        ("LOGI_HOST", config.host.clone()),
        ("LOGI_PORT", config.port.to_string()),
        ("LOGI_DATABASE_URL", config.database_url.clone()),
        ("LOGI_RUN_MIGRATIONS", config.run_migrations.to_string()),
        ("LOGI_APP_NAME", config.app_name.clone()),
        ("LOGI_CORS_ORIGINS", cors),
        ("LOGI_FALABELLA_BASE_URL", config.falabella.base_url.clone()),
        ("LOGI_FALABELLA_USER_ID", config.falabella.user_id.clone()),
        ("LOGI_FALABELLA_API_KEY", credential(config.falabella.api_key.is_empty()).into()),
        ("LOGI_MELI_BASE_URL", config.mercadolibre.base_url.clone()),
        ("LOGI_MELI_USER_ID", config.mercadolibre.user_id.clone()),
        ("LOGI_MELI_ACCESS_TOKEN", credential(config.mercadolibre.access_token.is_empty()).into()),
    ];
    let mut out = String::from("Effective configuration:");
    for (name, val) in rows {
        out.push_str(&format!("\n  {name:<35} {val}"));
    }
    out
}
