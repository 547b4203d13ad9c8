//! CLI argument validators.

/// Parse and validate a chunk duration in seconds (finite, greater than zero).
pub fn parse_chunk_duration(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !value.is_finite() || value <= 0.0 {
        return Err(format!(
            "chunk duration must be a positive number of seconds, got {value}"
        ));
    }

    Ok(value)
}
