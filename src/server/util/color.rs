/// Discord brand colors used across embeds.
pub const PRIMARY: u32 = 0x5865F2;
pub const SUCCESS: u32 = 0x57F287;
pub const WARNING: u32 = 0xFEE75C;
pub const ERROR: u32 = 0xED4245;
pub const TICKET: u32 = 0xD4AF37;

/// Parses a `#RRGGBB` (or `RRGGBB`) hex color, falling back to `default`.
pub fn parse_hex_color(value: Option<&str>, default: u32) -> u32 {
    value
        .map(|v| v.trim().trim_start_matches('#'))
        .filter(|v| v.len() == 6)
        .and_then(|v| u32::from_str_radix(v, 16).ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_with_and_without_hash() {
        assert_eq!(parse_hex_color(Some("#ff0000"), PRIMARY), 0xFF0000);
        assert_eq!(parse_hex_color(Some("00ff00"), PRIMARY), 0x00FF00);
    }

    #[test]
    fn falls_back_on_garbage() {
        assert_eq!(parse_hex_color(Some("red"), PRIMARY), PRIMARY);
        assert_eq!(parse_hex_color(None, ERROR), ERROR);
    }
}
