use serde::Serialize;

/// Render a serializable response, pretty unless `compact`.
pub fn render<T: Serialize>(value: &T, compact: bool) -> anyhow::Result<String> {
    if compact {
        Ok(serde_json::to_string(value)?)
    } else {
        Ok(serde_json::to_string_pretty(value)?)
    }
}

/// Print a serializable response on stdout.
pub fn output<T: Serialize>(value: &T, compact: bool) -> anyhow::Result<()> {
    let rendered = render(value, compact)?;
    println!("{rendered}");
    Ok(())
}
