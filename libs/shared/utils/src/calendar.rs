use shared_models::entities::Weekday;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognized weekday token '{0}'")]
pub struct WeekdayParseError(pub String);

/// Accepts either an integer 1-7 or one of `ma, di, wo, do, vr, za, zo`
/// (Monday through Sunday).
pub fn parse_weekday_token(token: &str) -> Result<Weekday, WeekdayParseError> {
    let trimmed = token.trim();
    if let Ok(n) = trimmed.parse::<Weekday>() {
        if (1..=7).contains(&n) {
            return Ok(n);
        }
        return Err(WeekdayParseError(token.to_string()));
    }

    match trimmed.to_ascii_lowercase().as_str() {
        "ma" => Ok(1),
        "di" => Ok(2),
        "wo" => Ok(3),
        "do" => Ok(4),
        "vr" => Ok(5),
        "za" => Ok(6),
        "zo" => Ok(7),
        _ => Err(WeekdayParseError(token.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_integers_and_dutch_tokens() {
        assert_eq!(parse_weekday_token("1").unwrap(), 1);
        assert_eq!(parse_weekday_token("ma").unwrap(), 1);
        assert_eq!(parse_weekday_token("Zo").unwrap(), 7);
        assert_eq!(parse_weekday_token("vr").unwrap(), 5);
    }

    #[test]
    fn rejects_out_of_range_and_unknown_tokens() {
        assert!(parse_weekday_token("0").is_err());
        assert!(parse_weekday_token("8").is_err());
        assert!(parse_weekday_token("maandag").is_err());
    }
}
