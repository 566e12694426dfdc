//! TOML parsing for follower constants
//!
//! Reads the `[follower]` section of a configuration file. Other top-level
//! sections are ignored so the constants can live alongside unrelated
//! settings.
//!
//! ```toml
//! [follower]
//! deceleration_type = "last_path"   # none | global | last_path
//! deceleration_start_multiplier = 0.8
//! ```

use heapless::String;
use serde::Deserialize;

use pathchain_core::config::FollowerConstants;
use pathchain_core::motion::DecelerationType;

/// Longest accepted deceleration type name
const MAX_NAME_LEN: usize = 16;

/// Parse error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ParseError {
    /// Malformed TOML or unknown key in `[follower]`
    Syntax,
    /// Value outside its valid range, or an unknown name
    InvalidValue,
}

#[derive(Debug, Default, Deserialize)]
struct Document {
    #[serde(default)]
    follower: Option<FollowerSection>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FollowerSection {
    deceleration_type: Option<String<MAX_NAME_LEN>>,
    deceleration_start_multiplier: Option<f64>,
}

/// Parse TOML text into follower constants
///
/// Missing keys keep their defaults. The multiplier must lie in `(0, 1]`.
pub fn parse_constants(input: &str) -> Result<FollowerConstants, ParseError> {
    let document: Document = ::toml::from_str(input).map_err(|_| ParseError::Syntax)?;

    let mut constants = FollowerConstants::default();
    let Some(follower) = document.follower else {
        return Ok(constants);
    };

    if let Some(name) = follower.deceleration_type {
        constants.deceleration_type =
            DecelerationType::from_name(&name).ok_or(ParseError::InvalidValue)?;
    }
    if let Some(multiplier) = follower.deceleration_start_multiplier {
        constants.deceleration_start_multiplier = multiplier;
    }

    if !constants.is_valid() {
        return Err(ParseError::InvalidValue);
    }
    Ok(constants)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pathchain_core::config::DEFAULT_DECELERATION_START_MULTIPLIER;

    #[test]
    fn test_parse_multiplier() {
        let constants = parse_constants(
            r#"
            # Follower tuning
            [follower]
            deceleration_start_multiplier = 0.75
            "#,
        )
        .unwrap();

        assert_eq!(constants.deceleration_start_multiplier, 0.75);
    }

    #[test]
    fn test_parse_deceleration_type() {
        for (input, expected) in [
            ("[follower]\ndeceleration_type = \"none\"\n", DecelerationType::None),
            ("[follower]\ndeceleration_type = \"global\"\n", DecelerationType::Global),
            ("[follower]\ndeceleration_type = \"last_path\"\n", DecelerationType::LastPath),
        ] {
            let constants = parse_constants(input).unwrap();
            assert_eq!(constants.deceleration_type, expected);
            assert_eq!(
                constants.deceleration_start_multiplier,
                DEFAULT_DECELERATION_START_MULTIPLIER
            );
        }
    }

    #[test]
    fn test_parse_full_section() {
        let constants = parse_constants(
            r#"
            [follower]
            deceleration_type = "global"
            deceleration_start_multiplier = 0.4
            "#,
        )
        .unwrap();

        assert_eq!(
            constants,
            FollowerConstants::new(0.4).with_deceleration_type(DecelerationType::Global)
        );
    }

    #[test]
    fn test_unknown_deceleration_type() {
        for bad in [
            "[follower]\ndeceleration_type = \"linear\"\n",
            "[follower]\ndeceleration_type = \"LAST_PATH\"\n",
        ] {
            assert_eq!(parse_constants(bad), Err(ParseError::InvalidValue));
        }
        assert_eq!(
            parse_constants("[follower]\ndeceleration_type = 3\n"),
            Err(ParseError::Syntax)
        );
    }

    #[test]
    fn test_missing_section_uses_defaults() {
        let constants = parse_constants("").unwrap();
        assert_eq!(
            constants.deceleration_start_multiplier,
            DEFAULT_DECELERATION_START_MULTIPLIER
        );

        let constants = parse_constants("[follower]\n").unwrap();
        assert_eq!(constants, FollowerConstants::default());
    }

    #[test]
    fn test_other_sections_ignored() {
        let constants = parse_constants(
            r#"
            [drivetrain]
            wheel_base = 12.5

            [follower]
            deceleration_start_multiplier = 0.5
            "#,
        )
        .unwrap();

        assert_eq!(constants.deceleration_start_multiplier, 0.5);
    }

    #[test]
    fn test_unknown_follower_key() {
        let result = parse_constants("[follower]\nbraking = 2.0\n");
        assert_eq!(result, Err(ParseError::Syntax));
    }

    #[test]
    fn test_out_of_range() {
        for bad in [
            "[follower]\ndeceleration_start_multiplier = 0.0\n",
            "[follower]\ndeceleration_start_multiplier = -0.5\n",
            "[follower]\ndeceleration_start_multiplier = 1.5\n",
        ] {
            assert_eq!(parse_constants(bad), Err(ParseError::InvalidValue));
        }
    }

    #[test]
    fn test_malformed() {
        assert_eq!(
            parse_constants("[follower\ndeceleration_start_multiplier = 0.5"),
            Err(ParseError::Syntax)
        );
    }
}
