/// Centralized validation for pool write operations. Scoring assumes
/// non-negative inputs, so everything that persists a score line funnels
/// through here first.

const MAX_GOALS: i32 = 99;

/// Validate a predicted or official score pair.
pub fn validate_score_pair(home_score: i32, away_score: i32) -> Result<(), String> {
    if home_score < 0 || away_score < 0 {
        return Err("Scores cannot be negative".to_string());
    }
    if home_score > MAX_GOALS || away_score > MAX_GOALS {
        return Err(format!("Scores cannot exceed {}", MAX_GOALS));
    }
    Ok(())
}

/// Validate a group name the way display names are validated elsewhere:
/// trimmed, bounded, with at least some real content.
pub fn validate_group_name(name: &str) -> Result<(), String> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err("Group name cannot be empty".to_string());
    }
    if trimmed.len() < 2 {
        return Err("Group name must be at least 2 characters".to_string());
    }
    if trimmed.len() > 50 {
        return Err("Group name cannot exceed 50 characters".to_string());
    }
    if !trimmed.chars().any(|c| c.is_alphanumeric()) {
        return Err("Group name must contain at least one letter or number".to_string());
    }
    Ok(())
}

/// Join codes are 7 uppercase alphanumerics; normalize before lookup so
/// codes typed in lowercase still resolve.
pub fn normalize_join_code(code: &str) -> Result<String, String> {
    let normalized = code.trim().to_uppercase();
    if normalized.len() != 7 || !normalized.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err("Invalid group code format".to_string());
    }
    Ok(normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_scores() {
        assert!(validate_score_pair(-1, 0).is_err());
        assert!(validate_score_pair(0, -3).is_err());
        assert!(validate_score_pair(0, 0).is_ok());
    }

    #[test]
    fn group_name_bounds() {
        assert!(validate_group_name("").is_err());
        assert!(validate_group_name(" x ").is_err());
        assert!(validate_group_name("Família & Futebol").is_ok());
        assert!(validate_group_name(&"x".repeat(51)).is_err());
    }

    #[test]
    fn join_code_normalization() {
        assert_eq!(normalize_join_code(" ab12cd9 ").unwrap(), "AB12CD9");
        assert!(normalize_join_code("SHORT").is_err());
        assert!(normalize_join_code("WAYTOOLONG").is_err());
        assert!(normalize_join_code("AB12CD-").is_err());
    }
}
