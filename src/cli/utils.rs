use serde_json::{json, Value};
use sqlx::PgPool;

use crate::cli::OutputFormat;
use crate::config::AppConfig;
use crate::database::DatabaseManager;

/// Output a success message in the appropriate format
pub fn output_success(
    output_format: &OutputFormat,
    message: &str,
    data: Option<Value>,
) -> anyhow::Result<()> {
    match output_format {
        OutputFormat::Json => {
            let mut response = json!({
                "success": true,
                "message": message
            });

            if let (Some(target), Some(Value::Object(extra))) = (response.as_object_mut(), data) {
                target.extend(extra);
            }

            println!("{}", serde_json::to_string_pretty(&response)?);
        }
        OutputFormat::Text => {
            println!("✓ {}", message);
        }
    }
    Ok(())
}

/// Connect using `DATABASE_URL` (after `.env`), with an optional override
pub async fn connect_pool(database_url: Option<String>) -> anyhow::Result<PgPool> {
    let mut config = AppConfig::from_env();
    if database_url.is_some() {
        config.database.url = database_url;
    }
    Ok(DatabaseManager::connect(&config).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_success_accepts_non_object_data() {
        assert!(output_success(&OutputFormat::Json, "ok", Some(json!([1, 2]))).is_ok());
        assert!(output_success(&OutputFormat::Text, "ok", None).is_ok());
    }
}
