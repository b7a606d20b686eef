//! Loading [`VerifierPolicy`] documents from YAML.

use std::path::Path;

use repomesh_model::VerifierPolicy;

use crate::error::ConfigError;

/// Load a `VerifierPolicy` document from an arbitrary path on disk.
pub fn load_verifier_policy_from_path(
    path: impl AsRef<Path>,
) -> Result<VerifierPolicy, ConfigError> {
    let path = path.as_ref();
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_verifier_policy_yaml(&contents, &path.display().to_string())
}

fn parse_verifier_policy_yaml(yaml: &str, path: &str) -> Result<VerifierPolicy, ConfigError> {
    serde_yaml::from_str(yaml).map_err(|source| ConfigError::YamlParse {
        path: path.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_verifier_policy_yaml() {
        let yaml = "license.audit:\n  mode: open\n  conflictPolicy: fail-wins\n";
        let policy = parse_verifier_policy_yaml(yaml, "<test>").unwrap();
        let check = policy.policy_for("license.audit").unwrap();
        assert_eq!(check.mode, repomesh_model::PolicyMode::Open);
    }

    #[test]
    fn test_parse_verifier_policy_yaml_rejects_garbage() {
        let result = parse_verifier_policy_yaml("not: [valid, yaml, :::", "<test>");
        assert!(result.is_err());
    }
}
