//! Generates providers compiled and tested by this crate.

use anyhow::Result;
use propkeys_codegen::{Generator, NamingStrategy, SchemaDeclaration};

fn main() -> Result<()> {
    println!("cargo::rerun-if-changed=build.rs");

    let app = SchemaDeclaration::new("AppKey", "config/app.properties")
        .keys(["IGNORED", "HOST", "PORT", "DB_URL"])
        .key_validator("PORT", "crate::is_port")
        .metadata_tag("derive(Clone)");
    Generator::new(app)?.write_to_out_dir("app_key.rs")?;

    let naming = NamingStrategy::custom(|key| format!("metrics.{}", key.name().to_lowercase()));
    let metrics = SchemaDeclaration::new("MetricsKey", "config/metrics.properties")
        .keys(["ENDPOINT", "UNSET", "INTERVAL_SECS"])
        .null_key("UNSET")
        .naming(naming)
        .rename("ENDPOINT", "metrics_endpoint")
        .validator("crate::metrics::is_ascii")
        .key_validator("INTERVAL_SECS", "crate::metrics::is_interval")
        .provider_name("MetricsConfig")
        .qualifier_name("MetricsSetting")
        .visibility("");
    Generator::new(metrics)?.write_to_out_dir("metrics_key.rs")?;
    Ok(())
}
