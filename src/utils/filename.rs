use uuid::Uuid;

/// Replaces every character outside `[A-Za-z0-9]` with `_`.
pub fn sanitize(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect()
}

/// Longest base kept, so base + suffix + extension stays under the usual
/// 255-byte filename limit.
pub const MAX_BASE_LEN: usize = 200;

/// Appends a random v4 suffix and the fixed `.jpg` extension.
///
/// Uniqueness is probabilistic, the photo store is not consulted. Bases longer
/// than `MAX_BASE_LEN` characters are truncated.
pub fn generate_unique_name(sanitized_base: &str) -> String {
    let base: String = sanitized_base.chars().take(MAX_BASE_LEN).collect();
    format!("{}-{}.jpg", base, Uuid::new_v4())
}
