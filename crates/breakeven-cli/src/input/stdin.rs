use serde::de::DeserializeOwned;
use std::io::{self, Read};

/// Read piped stdin and parse it as JSON, falling back to YAML.
///
/// Returns None when stdin is a terminal or nothing was piped.
pub fn read_stdin<T: DeserializeOwned>() -> Result<Option<T>, Box<dyn std::error::Error>> {
    if atty::is(atty::Stream::Stdin) {
        return Ok(None);
    }

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;
    parse_piped(&buffer)
}

fn parse_piped<T: DeserializeOwned>(buffer: &str) -> Result<Option<T>, Box<dyn std::error::Error>> {
    let trimmed = buffer.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    match serde_json::from_str(trimmed) {
        Ok(value) => Ok(Some(value)),
        Err(json_err) => serde_yaml::from_str(trimmed)
            .map(Some)
            .map_err(|_| format!("stdin is neither valid JSON nor YAML: {json_err}").into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use breakeven_core::analysis::BreakEvenInput;

    #[test]
    fn test_blank_is_none() {
        assert!(parse_piped::<BreakEvenInput>("  \n").unwrap().is_none());
    }

    #[test]
    fn test_yaml_fallback() {
        let input: BreakEvenInput = parse_piped("products: []\nexpenses: []\n")
            .unwrap()
            .unwrap();
        assert!(input.products.is_empty());
    }

    #[test]
    fn test_garbage_is_error() {
        assert!(parse_piped::<BreakEvenInput>("{ not json").is_err());
    }
}
