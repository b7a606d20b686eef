//! Loading [`Profile`] documents — built-in, embedded YAML fixtures or an
//! arbitrary path on disk — and layering `Overrides` atop them (`spec.md`
//! §4.5).

use std::path::Path;

use repomesh_model::{AssuranceWeights, Overrides, Profile};

use crate::error::ConfigError;

const BASELINE_YAML: &str = include_str!("profiles/baseline.yaml");
const OPEN_SOURCE_YAML: &str = include_str!("profiles/open-source.yaml");
const REGULATED_YAML: &str = include_str!("profiles/regulated.yaml");

/// Load one of the three embedded named profiles (`baseline`,
/// `open-source`, `regulated`).
pub fn load_builtin(name: &str) -> Result<Profile, ConfigError> {
    let yaml = match name {
        "baseline" => BASELINE_YAML,
        "open-source" => OPEN_SOURCE_YAML,
        "regulated" => REGULATED_YAML,
        other => {
            return Err(ConfigError::UnknownBuiltinProfile {
                name: other.to_string(),
            })
        }
    };
    parse_profile_yaml(yaml, name)
}

/// Load a `Profile` document from an arbitrary path on disk.
pub fn load_from_path(path: impl AsRef<Path>) -> Result<Profile, ConfigError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_profile_yaml(&contents, &path.display().to_string())
}

/// Load an `Overrides` document from an arbitrary path on disk.
pub fn load_overrides_from_path(path: impl AsRef<Path>) -> Result<Overrides, ConfigError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    serde_yaml::from_str(&contents).map_err(|source| ConfigError::YamlParse {
        path: path.display().to_string(),
        source,
    })
}

fn parse_profile_yaml(yaml: &str, path: &str) -> Result<Profile, ConfigError> {
    serde_yaml::from_str(yaml).map_err(|source| ConfigError::YamlParse {
        path: path.to_string(),
        source,
    })
}

/// Three-layer precedence for a single check's assurance weights
/// (`spec.md` §4.5): base default < profile weights < target override
/// weights. The target override wins wherever it names a check.
pub fn effective_assurance_weights(
    base_default: AssuranceWeights,
    profile: &Profile,
    overrides: Option<&Overrides>,
    check_kind: &str,
) -> AssuranceWeights {
    let mut weights = base_default;
    if let Some(profile_weights) = profile.scoring.assurance_weights.get(check_kind) {
        weights = *profile_weights;
    }
    if let Some(override_weights) = overrides
        .and_then(|o| o.scoring.assurance_weights.get(check_kind))
    {
        weights = *override_weights;
    }
    weights
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_builtin_baseline() {
        let profile = load_builtin("baseline").unwrap();
        assert_eq!(profile.name, "baseline");
        assert!(profile.required_evidence.is_empty());
    }

    #[test]
    fn test_load_builtin_open_source() {
        let profile = load_builtin("open-source").unwrap();
        assert_eq!(profile.name, "open-source");
        assert!(profile.required_evidence.contains("sbom"));
        assert!(profile.required_checks.integrity.contains("signed"));
    }

    #[test]
    fn test_load_builtin_regulated() {
        let profile = load_builtin("regulated").unwrap();
        assert_eq!(profile.name, "regulated");
        assert!(profile.required_evidence.contains("provenance"));
        assert!(profile
            .required_checks
            .assurance
            .contains("security.scan"));
    }

    #[test]
    fn test_load_builtin_unknown_name_errors() {
        let result = load_builtin("enterprise");
        assert!(matches!(
            result,
            Err(ConfigError::UnknownBuiltinProfile { .. })
        ));
    }

    #[test]
    fn test_effective_assurance_weights_base_only() {
        let profile = load_builtin("baseline").unwrap();
        let base = AssuranceWeights {
            pass: 100,
            warn: 10,
            fail: 0,
        };
        let effective =
            effective_assurance_weights(base, &profile, None, "security.scan");
        assert_eq!(effective, base);
    }

    #[test]
    fn test_effective_assurance_weights_profile_overrides_base() {
        let profile = load_builtin("baseline").unwrap();
        let base = AssuranceWeights {
            pass: 0,
            warn: 0,
            fail: 0,
        };
        let effective =
            effective_assurance_weights(base, &profile, None, "license.audit");
        assert_eq!(
            effective,
            AssuranceWeights {
                pass: 100,
                warn: 50,
                fail: 0
            }
        );
    }

    #[test]
    fn test_effective_assurance_weights_target_override_wins() {
        let profile = load_builtin("baseline").unwrap();
        let base = AssuranceWeights {
            pass: 0,
            warn: 0,
            fail: 0,
        };
        let mut overrides = Overrides::default();
        overrides.scoring.assurance_weights.insert(
            "license.audit".to_string(),
            AssuranceWeights {
                pass: 100,
                warn: 90,
                fail: 0,
            },
        );
        let effective = effective_assurance_weights(
            base,
            &profile,
            Some(&overrides),
            "license.audit",
        );
        assert_eq!(effective.warn, 90);
    }
}
