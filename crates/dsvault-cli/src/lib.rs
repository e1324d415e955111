use anyhow::Context;
use dsvault_client::ObjectHashRecord;
use dsvault_resources::{ResourceDescriptor, DSVAULT_FORMAT};

/// Build a descriptor from `DSVAULT_URL`, `DSVAULT_COLLECTION`, `DSVAULT_API_KEY`
/// and the optional `DSVAULT_FORMAT`.
pub fn descriptor_from_env() -> anyhow::Result<ResourceDescriptor> {
    descriptor_from_vars(|key| std::env::var(key).ok())
}

pub fn descriptor_from_vars(
    var: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<ResourceDescriptor> {
    let url = var("DSVAULT_URL").context("Missing resource URL. Set DSVAULT_URL")?;
    let identity = var("DSVAULT_COLLECTION").context("Missing collection. Set DSVAULT_COLLECTION")?;
    let secret = var("DSVAULT_API_KEY").context("Missing API key. Set DSVAULT_API_KEY")?;
    let format = var("DSVAULT_FORMAT").unwrap_or_else(|| DSVAULT_FORMAT.to_string());

    Ok(ResourceDescriptor::new(url, format, identity, secret))
}

/// Render hash records as two aligned columns.
pub fn hash_table(records: &[ObjectHashRecord]) -> String {
    let width = records
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(0)
        .max("NAME".len());

    let mut out = format!("{:<width$}  SHA256\n", "NAME", width = width);
    for record in records {
        out.push_str(&format!(
            "{:<width$}  {}\n",
            record.name,
            record.hash_sha256,
            width = width
        ));
    }
    out
}

/// Initialize tracing for CLI binaries. Logs go to stderr so stdout stays clean
/// for JSON and downloaded bytes.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
