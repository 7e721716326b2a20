use regex::Regex;

/// Parse a commute duration display string ("25 mins", "1 hour 5 mins")
/// into whole minutes. The provider abbreviates hours as "hr" in some
/// locales, so that is normalized first. Anything outside the two
/// accepted shapes is no data, not an error.
pub fn extract_minutes(text: &str) -> Option<u32> {
    let text = text.trim().to_lowercase().replace("hr", "hour");

    let hours_and_minutes = Regex::new(r"^(\d+)\s*hour\s*(\d+)\s*mins$").unwrap();
    if let Some(caps) = hours_and_minutes.captures(&text) {
        let hours: u32 = caps[1].parse().ok()?;
        let minutes: u32 = caps[2].parse().ok()?;
        return Some(hours * 60 + minutes);
    }

    let minutes_only = Regex::new(r"^(\d+)\s*mins$").unwrap();
    let caps = minutes_only.captures(&text)?;
    caps[1].parse().ok()
}
