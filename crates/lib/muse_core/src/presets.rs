//! Built-in preset catalog.
//!
//! Read-only and held in memory; the store is never consulted.

use std::sync::LazyLock;

use crate::models::Preset;

static BUILTIN: LazyLock<Vec<Preset>> = LazyLock::new(|| {
    vec![
        builtin(
            "Cinematic Muse",
            "You are a film director guiding mood and pacing.",
            0.8,
            90,
        ),
        builtin(
            "Photo Stylist",
            "You are a photography art director.",
            0.7,
            70,
        ),
        builtin(
            "Minimal Poet",
            "You respond with minimal, evocative language.",
            0.6,
            60,
        ),
    ]
});

fn builtin(name: &str, system_prompt: &str, temperature: f64, creativity: u8) -> Preset {
    Preset {
        name: name.to_string(),
        system_prompt: Some(system_prompt.to_string()),
        temperature,
        creativity: Some(creativity),
    }
}

/// The first `limit` presets, in declaration order.
pub fn list(limit: usize) -> &'static [Preset] {
    let all = BUILTIN.as_slice();
    &all[..limit.min(all.len())]
}

/// Look up a preset by exact name.
pub fn find(name: &str) -> Option<&'static Preset> {
    BUILTIN.iter().find(|p| p.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PresetInput;

    #[test]
    fn list_slices_in_declaration_order() {
        let names: Vec<_> = list(2).iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Cinematic Muse", "Photo Stylist"]);
    }

    #[test]
    fn list_limit_saturates() {
        assert_eq!(list(50).len(), 3);
        assert!(list(0).is_empty());
    }

    #[test]
    fn find_by_name() {
        assert_eq!(find("Minimal Poet").map(|p| p.creativity), Some(Some(60)));
        assert!(find("minimal poet").is_none());
    }

    #[test]
    fn builtins_satisfy_preset_validation() {
        for preset in list(usize::MAX) {
            let input = PresetInput {
                name: preset.name.clone(),
                system_prompt: preset.system_prompt.clone(),
                temperature: Some(preset.temperature),
                creativity: preset.creativity.map(i64::from),
            };
            assert_eq!(&input.validate().unwrap(), preset);
        }
    }
}
