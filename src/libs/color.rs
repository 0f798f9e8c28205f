use rand::Rng;

/// Returns a random `#rrggbb` color in lowercase hex.
pub fn random_color() -> String {
    let value: u32 = rand::rng().random_range(0..=0xFF_FFFF);
    format!("#{:06x}", value)
}

/// Picks the supplied color unless it is missing or blank.
pub fn color_or_random(color: Option<&str>) -> String {
    match color.map(str::trim) {
        Some(color) if !color.is_empty() => color.to_string(),
        _ => random_color(),
    }
}

pub fn is_hex_color(value: &str) -> bool {
    value.len() == 7 && value.starts_with('#') && value[1..].chars().all(|c| c.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn random_color_is_six_lowercase_hex_digits() {
        for _ in 0..200 {
            let color = random_color();
            assert!(is_hex_color(&color), "unexpected color {}", color);
            assert_eq!(color, color.to_lowercase());
        }
    }

    #[test]
    fn explicit_color_wins() {
        assert_eq!(color_or_random(Some("#ff0000")), "#ff0000");
        assert!(is_hex_color(&color_or_random(Some("  "))));
        assert!(is_hex_color(&color_or_random(None)));
    }
}
