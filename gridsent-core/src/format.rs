//! Score rendering

/// Render a score with an explicit sign
///
/// Positive values get a leading `+`, zero stays `0` and negative values
/// keep their `-`.
pub fn format_score(score: i64) -> String {
    if score > 0 {
        format!("+{score}")
    } else {
        score.to_string()
    }
}
