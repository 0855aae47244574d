pub fn format_percent(weight: f32) -> String {
    format!("{:.0}%", weight.clamp(0.0, 1.0) * 100.0)
}

pub fn format_score(score: Option<f32>) -> String {
    match score {
        Some(score) => format!("{score:.2}"),
        None => "unscored".to_string(),
    }
}

pub fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        return label.to_string();
    }
    let head: String = label.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{head}…")
}
