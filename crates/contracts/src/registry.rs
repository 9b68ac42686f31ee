use {
    crate::Artifact,
    anyhow::{Context, Result},
    std::{
        fs,
        path::PathBuf,
    },
    walkdir::WalkDir,
};

/// Directory Hardhat writes its compilation output to.
pub const DEFAULT_ARTIFACTS_DIR: &str = "artifacts";

/// Looks up compiled contract artifacts by contract name below a root
/// directory.
///
/// Hardhat nests artifacts as `<root>/contracts/<File>.sol/<Name>.json` next to
/// a `<Name>.dbg.json` debug file, while vendored artifacts usually live flat
/// as `<root>/<Name>.json`. Both layouts are supported.
#[derive(Clone, Debug)]
pub struct ArtifactRegistry {
    root: PathBuf,
}

impl ArtifactRegistry {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Returns the path of the artifact for contract `name`, if one exists.
    pub fn find(&self, name: &str) -> Result<Option<PathBuf>> {
        if !self.root.is_dir() {
            tracing::warn!(root = ?self.root, "artifacts directory does not exist");
            return Ok(None);
        }

        let file_name = format!("{name}.json");
        let mut matches = Vec::new();
        for entry in WalkDir::new(&self.root).follow_links(true) {
            let entry = entry.with_context(|| format!("failed to scan {:?}", self.root))?;
            if entry.file_type().is_file() && entry.file_name() == file_name.as_str() {
                matches.push(entry.into_path());
            }
        }
        matches.sort();

        if matches.len() > 1 {
            tracing::warn!(?matches, name, "multiple artifacts found, using the first one");
        }
        Ok(matches.into_iter().next())
    }

    /// Loads the artifact for contract `name`. Returns `Ok(None)` if no
    /// artifact with that name exists.
    pub fn get(&self, name: &str) -> Result<Option<Artifact>> {
        let Some(path) = self.find(name)? else {
            return Ok(None);
        };
        tracing::debug!(?path, "loading artifact");
        let json = fs::read_to_string(&path).with_context(|| format!("failed to read {path:?}"))?;
        let artifact =
            Artifact::from_json(&json, name).with_context(|| format!("failed to parse {path:?}"))?;
        Ok(Some(artifact))
    }
}

#[cfg(test)]
mod tests {
    use {super::*, tempfile::TempDir};

    const ARTIFACT: &str = r#"{
        "contractName": "WinBattle",
        "abi": [],
        "bytecode": "0x6001600c60003960016000f300"
    }"#;

    fn write(dir: &TempDir, path: &str, content: &str) {
        let path = dir.path().join(path);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn finds_nested_hardhat_artifact() {
        let dir = TempDir::new().unwrap();
        write(&dir, "build-info/4f1c.json", "{}");
        write(&dir, "contracts/WinBattle.sol/WinBattle.dbg.json", "{}");
        write(&dir, "contracts/WinBattle.sol/WinBattle.json", ARTIFACT);

        let registry = ArtifactRegistry::new(dir.path());
        assert_eq!(
            registry.find("WinBattle").unwrap().unwrap(),
            dir.path().join("contracts/WinBattle.sol/WinBattle.json")
        );
        let artifact = registry.get("WinBattle").unwrap().unwrap();
        assert_eq!(artifact.name, "WinBattle");
        assert!(artifact.creation_code().is_ok());
    }

    #[test]
    fn finds_flat_artifact() {
        let dir = TempDir::new().unwrap();
        write(&dir, "WinBattle.json", ARTIFACT);

        let registry = ArtifactRegistry::new(dir.path());
        assert!(registry.get("WinBattle").unwrap().is_some());
    }

    #[test]
    fn missing_artifact() {
        let dir = TempDir::new().unwrap();
        write(&dir, "contracts/Other.sol/Other.json", ARTIFACT);
        write(&dir, "contracts/WinBattle.sol/WinBattle.dbg.json", "{}");

        let registry = ArtifactRegistry::new(dir.path());
        assert!(registry.get("WinBattle").unwrap().is_none());
        assert!(registry.get("winbattle").unwrap().is_none());
    }

    #[test]
    fn missing_root_directory() {
        let dir = TempDir::new().unwrap();
        let registry = ArtifactRegistry::new(dir.path().join("does-not-exist"));
        assert!(registry.get("WinBattle").unwrap().is_none());
    }

    #[test]
    fn prefers_first_path_on_duplicates() {
        let dir = TempDir::new().unwrap();
        write(&dir, "b/WinBattle.json", ARTIFACT);
        write(&dir, "a/WinBattle.json", ARTIFACT);

        let registry = ArtifactRegistry::new(dir.path());
        assert_eq!(
            registry.find("WinBattle").unwrap().unwrap(),
            dir.path().join("a/WinBattle.json")
        );
    }

    #[test]
    fn malformed_artifact_is_an_error() {
        let dir = TempDir::new().unwrap();
        write(&dir, "WinBattle.json", "{ not json");

        let registry = ArtifactRegistry::new(dir.path());
        assert!(registry.get("WinBattle").is_err());
    }
}
