mod chunker;
mod hasher;
mod ledger;

pub use chunker::ChunkingPolicy;
pub use hasher::content_hash;
pub use ledger::IngestLedger;

/// Restrict a user identifier to filesystem-safe characters before it
/// becomes part of a ledger or collection path.
pub(crate) fn sanitize_user_id(user_id: &str) -> String {
    let cleaned: String = user_id
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if cleaned.is_empty() || cleaned.chars().all(|c| c == '.') {
        "default".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_passes_safe_ids_through() {
        assert_eq!(sanitize_user_id("default"), "default");
        assert_eq!(
            sanitize_user_id("550e8400-e29b-41d4-a716-446655440000"),
            "550e8400-e29b-41d4-a716-446655440000"
        );
    }

    #[test]
    fn sanitize_neutralizes_path_separators() {
        assert_eq!(sanitize_user_id("../../etc/passwd"), ".._.._etc_passwd");
        assert_eq!(sanitize_user_id("a/b"), "a_b");
    }

    #[test]
    fn sanitize_rejects_degenerate_ids() {
        assert_eq!(sanitize_user_id(""), "default");
        assert_eq!(sanitize_user_id(".."), "default");
    }
}
