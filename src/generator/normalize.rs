// src/generator/normalize.rs

/// Glyphs OCR tends to emit for table rules, underlines and bullet points.
const NOISE_GLYPHS: [char; 4] = ['|', '_', '•', '■'];

/// Cleans raw notes text: noise glyphs become spaces, every whitespace run
/// (newlines included) collapses to a single space, and the ends are trimmed.
pub fn normalize(text: &str) -> String {
    let cleaned: String = text
        .chars()
        .map(|c| if NOISE_GLYPHS.contains(&c) { ' ' } else { c })
        .collect();

    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}
