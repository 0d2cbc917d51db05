/// Jaro-Winkler similarity in [0, 1].
///
/// Returns 0.0 when either side is empty, including the empty/empty case.
pub fn similarity(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    strsim::jaro_winkler(a, b).clamp(0.0, 1.0)
}
