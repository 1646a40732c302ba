/// Cut `s` to at most `max` characters, never splitting a char.
pub fn truncate(s: &str, max: usize) -> String {
  match s.char_indices().nth(max) {
    Some((idx, _)) => s[..idx].to_string(),
    None => s.to_string(),
  }
}

/// Round half away from zero to two decimal places.
pub fn round2(value: f64) -> f64 {
  (value * 100.0).round() / 100.0
}
