pub fn normalize_district(code: &str) -> String {
    code.chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|ch| ch.to_ascii_uppercase())
        .collect()
}

pub fn parse_count(raw: &str) -> Option<u64> {
    let digits: String = raw.chars().filter(|ch| *ch != ',').collect();
    if digits.is_empty() || !digits.chars().all(|ch| ch.is_ascii_digit()) {
        return None;
    }
    digits.parse::<u64>().ok()
}
