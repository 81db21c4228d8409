//! Preset response styles.

use serde::{Deserialize, Serialize};

use super::{ValidationError, check_length, check_text};

pub const DEFAULT_TEMPERATURE: f64 = 0.7;

const NAME_MAX_CHARS: usize = 80;

/// Preset as submitted by a caller.
#[derive(Debug, Clone, Deserialize)]
pub struct PresetInput {
    pub name: String,
    #[serde(default)]
    pub system_prompt: Option<String>,
    #[serde(default)]
    pub temperature: Option<f64>,
    #[serde(default)]
    pub creativity: Option<i64>,
}

/// A named response style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,
    pub system_prompt: Option<String>,
    pub temperature: f64,
    pub creativity: Option<u8>,
}

impl PresetInput {
    pub fn validate(self) -> Result<Preset, ValidationError> {
        check_length("name", &self.name, 1, Some(NAME_MAX_CHARS))?;
        if let Some(prompt) = &self.system_prompt {
            check_text("system_prompt", prompt)?;
        }

        let temperature = self.temperature.unwrap_or(DEFAULT_TEMPERATURE);
        if !(0.0..=1.0).contains(&temperature) {
            return Err(ValidationError::new(
                "temperature",
                "must be between 0.0 and 1.0",
            ));
        }

        let creativity = self
            .creativity
            .map(|c| match u8::try_from(c) {
                Ok(c) if c <= 100 => Ok(c),
                _ => Err(ValidationError::new(
                    "creativity",
                    "must be between 0 and 100",
                )),
            })
            .transpose()?;

        Ok(Preset {
            name: self.name,
            system_prompt: self.system_prompt,
            temperature,
            creativity,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(temperature: Option<f64>, creativity: Option<i64>) -> PresetInput {
        PresetInput {
            name: "Muse".into(),
            system_prompt: None,
            temperature,
            creativity,
        }
    }

    #[test]
    fn temperature_defaults_when_absent() {
        let preset = input(None, None).validate().unwrap();
        assert_eq!(preset.temperature, DEFAULT_TEMPERATURE);
        assert_eq!(preset.creativity, None);
    }

    #[test]
    fn temperature_bounds_are_inclusive() {
        assert!(input(Some(0.0), None).validate().is_ok());
        assert!(input(Some(1.0), None).validate().is_ok());
        assert_eq!(
            input(Some(1.01), None).validate().unwrap_err().field,
            "temperature"
        );
        assert_eq!(
            input(Some(-0.1), None).validate().unwrap_err().field,
            "temperature"
        );
        assert_eq!(
            input(Some(f64::NAN), None).validate().unwrap_err().field,
            "temperature"
        );
    }

    #[test]
    fn creativity_bounds() {
        assert_eq!(
            input(None, Some(100)).validate().unwrap().creativity,
            Some(100)
        );
        assert_eq!(input(None, Some(0)).validate().unwrap().creativity, Some(0));
        assert_eq!(
            input(None, Some(101)).validate().unwrap_err().field,
            "creativity"
        );
        assert_eq!(
            input(None, Some(-1)).validate().unwrap_err().field,
            "creativity"
        );
    }

    #[test]
    fn name_bounds() {
        let mut long = input(None, None);
        long.name = "n".repeat(81);
        assert_eq!(long.validate().unwrap_err().field, "name");

        let mut empty = input(None, None);
        empty.name = String::new();
        assert_eq!(empty.validate().unwrap_err().field, "name");
    }
}
