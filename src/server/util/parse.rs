use crate::server::error::{internal::InternalError, AppError};

/// Parses a u64 value from String
///
/// # Arguments
/// - `value` - The String to attempt to parse into `u64`
///
/// # Returns
/// - `Ok(u64)` - Successfully parsed String to `u64`
/// - `Err(AppError::InternalErr(ParseStringId))` - Failed to parse
///   the string as a u64
pub fn parse_u64_from_string(value: String) -> Result<u64, AppError> {
    let result = value
        .parse::<u64>()
        .map_err(|e| InternalError::ParseStringId {
            value: value,
            source: e,
        })?;

    Ok(result)
}

/// Parses an optional snowflake column.
pub fn parse_optional_u64(value: Option<String>) -> Result<Option<u64>, AppError> {
    value.map(parse_u64_from_string).transpose()
}

/// Decodes a JSON id-list column (`["123","456"]`).
///
/// Numeric entries are accepted as well since older rows were written by hand
/// through the dashboard. Empty or blank columns decode to an empty list.
///
/// # Returns
/// - `Ok(Vec<u64>)` - Decoded ids in stored order
/// - `Err(AppError::InternalErr(InvalidIdList))` - Column is not a JSON array of ids
pub fn parse_id_list(value: &str) -> Result<Vec<u64>, AppError> {
    if value.trim().is_empty() {
        return Ok(Vec::new());
    }

    let invalid = || InternalError::InvalidIdList {
        value: value.to_string(),
    };

    let raw: Vec<serde_json::Value> =
        serde_json::from_str(value).map_err(|_| AppError::from(invalid()))?;

    raw.into_iter()
        .map(|entry| match entry {
            serde_json::Value::String(s) => s.parse::<u64>().map_err(|_| AppError::from(invalid())),
            serde_json::Value::Number(n) => n.as_u64().ok_or_else(|| AppError::from(invalid())),
            _ => Err(AppError::from(invalid())),
        })
        .collect()
}

/// Encodes ids as a JSON array of strings for storage.
pub fn encode_id_list(ids: &[u64]) -> String {
    let as_strings: Vec<String> = ids.iter().map(|id| id.to_string()).collect();
    serde_json::Value::from(as_strings).to_string()
}

/// Parses ids sent by the dashboard as strings, skipping blanks.
pub fn parse_id_strings(values: &[String]) -> Result<Vec<u64>, AppError> {
    values
        .iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(|v| {
            v.parse::<u64>()
                .map_err(|_| AppError::BadRequest(format!("Invalid Discord id '{}'", v)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_string_and_numeric_ids() {
        let ids = parse_id_list(r#"["123", 456]"#).unwrap();
        assert_eq!(ids, vec![123, 456]);
    }

    #[test]
    fn empty_column_is_empty_list() {
        assert!(parse_id_list("").unwrap().is_empty());
        assert!(parse_id_list("[]").unwrap().is_empty());
    }

    #[test]
    fn rejects_malformed_list() {
        assert!(parse_id_list("not json").is_err());
        assert!(parse_id_list(r#"["abc"]"#).is_err());
    }

    #[test]
    fn encodes_ids_as_strings() {
        assert_eq!(encode_id_list(&[1, 22]), r#"["1","22"]"#);
    }

    #[test]
    fn dashboard_ids_skip_blanks() {
        let ids = parse_id_strings(&["10".to_string(), " ".to_string()]).unwrap();
        assert_eq!(ids, vec![10]);
        assert!(parse_id_strings(&["x".to_string()]).is_err());
    }
}
