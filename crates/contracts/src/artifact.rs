use {
    alloy::{json_abi::JsonAbi, primitives::Bytes},
    anyhow::{Context, Result},
    serde::Deserialize,
    std::collections::BTreeSet,
};

/// Library placeholders emitted by solc are always 40 characters long and
/// start with two underscores, e.g. `__$<34 hex chars>$__` (solc >= 0.5) or
/// `__MyLibrary_____________________________` (older compilers).
const PLACEHOLDER_LEN: usize = 40;

/// A compiled contract as produced by the build toolchain.
#[derive(Clone, Debug)]
pub struct Artifact {
    pub name: String,
    pub abi: JsonAbi,
    /// Creation bytecode exactly as found in the artifact (hex, possibly
    /// containing link placeholders).
    bytecode: String,
}

/// Reasons an artifact can't be deployed as-is.
#[derive(Debug, thiserror::Error)]
pub enum ArtifactError {
    #[error("artifact has no creation bytecode")]
    MissingBytecode,
    #[error("bytecode references unlinked libraries: {}", .0.join(", "))]
    UnlinkedLibraries(Vec<String>),
    #[error("constructor expects {0} argument(s) but none are supplied")]
    ConstructorArguments(usize),
    #[error("bytecode is not valid hex")]
    InvalidHex(#[from] const_hex::FromHexError),
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawArtifact {
    #[serde(default)]
    contract_name: Option<String>,
    abi: JsonAbi,
    #[serde(default)]
    bytecode: Option<RawBytecode>,
}

/// Hardhat stores the bytecode as a plain hex string, Foundry and solc's
/// standard JSON output wrap it in an object.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawBytecode {
    Hex(String),
    Object { object: String },
}

impl Artifact {
    /// Parses an artifact. `fallback_name` is used when the artifact does not
    /// carry a `contractName` itself.
    pub fn from_json(json: &str, fallback_name: &str) -> Result<Self> {
        let raw: RawArtifact = serde_json::from_str(json).context("invalid artifact JSON")?;
        let bytecode = match raw.bytecode {
            Some(RawBytecode::Hex(code) | RawBytecode::Object { object: code }) => code,
            None => String::new(),
        };
        Ok(Self {
            name: raw
                .contract_name
                .unwrap_or_else(|| fallback_name.to_string()),
            abi: raw.abi,
            bytecode,
        })
    }

    /// Returns the code of a deployment transaction that creates the contract
    /// without passing any constructor arguments.
    pub fn creation_code(&self) -> Result<Bytes, ArtifactError> {
        let code = self.bytecode.trim();
        let code = code.strip_prefix("0x").unwrap_or(code);
        if code.is_empty() {
            return Err(ArtifactError::MissingBytecode);
        }
        let constructor_inputs = self
            .abi
            .constructor
            .as_ref()
            .map_or(0, |constructor| constructor.inputs.len());
        if constructor_inputs > 0 {
            return Err(ArtifactError::ConstructorArguments(constructor_inputs));
        }
        const_hex::decode(code).map(Bytes::from).map_err(|err| {
            let placeholders = unlinked_placeholders(code);
            if placeholders.is_empty() {
                ArtifactError::InvalidHex(err)
            } else {
                ArtifactError::UnlinkedLibraries(placeholders)
            }
        })
    }
}

fn unlinked_placeholders(code: &str) -> Vec<String> {
    let bytes = code.as_bytes();
    let mut found = BTreeSet::new();
    let mut i = 0;
    while i + 1 < bytes.len() {
        if bytes[i] == b'_' && bytes[i + 1] == b'_' {
            let end = (i + PLACEHOLDER_LEN).min(bytes.len());
            found.insert(String::from_utf8_lossy(&bytes[i..end]).into_owned());
            i = end;
        } else {
            i += 1;
        }
    }
    found.into_iter().collect()
}
