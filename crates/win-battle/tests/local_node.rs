//! Runs against a development node (anvil or hardhat) listening on `NODE_URL`
//! or `http://localhost:8545`.

use {
    alloy::signers::local::PrivateKeySigner,
    contracts::ArtifactRegistry,
    std::time::Duration,
    url::Url,
    win_battle::{Error, Outcome, Runner, chain::AlloyChain},
};

// First default account of anvil and hardhat dev nodes.
const KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

/// Deploys a contract whose runtime code is a single `STOP`, so any call
/// succeeds.
const ACCEPTING: &str = "0x6001600c60003960016000f300";
/// Deploys a contract whose runtime code always reverts.
const REVERTING: &str = "0x6005600c60003960056000f360006000fd";
/// Init code that reverts.
const UNDEPLOYABLE: &str = "0x60006000fd";

const ABI: &str = r#"[{
    "type": "function",
    "name": "winBattle",
    "inputs": [{ "name": "attempts", "type": "uint256" }],
    "outputs": [],
    "stateMutability": "nonpayable"
}]"#;

fn node_url() -> Url {
    std::env::var("NODE_URL")
        .unwrap_or_else(|_| "http://localhost:8545".to_string())
        .parse()
        .unwrap()
}

async fn run(bytecode: &str) -> (Result<Outcome, Error>, String) {
    observe::tracing::initialize_reentrant("warn,win_battle=debug,ethrpc=debug");

    let dir = tempfile::tempdir().unwrap();
    let artifacts = dir.path().join("contracts").join("WinBattle.sol");
    std::fs::create_dir_all(&artifacts).unwrap();
    std::fs::write(
        artifacts.join("WinBattle.json"),
        format!(r#"{{ "contractName": "WinBattle", "abi": {ABI}, "bytecode": "{bytecode}" }}"#),
    )
    .unwrap();

    let signer: PrivateKeySigner = KEY.parse().unwrap();
    let provider = ethrpc::provider(&node_url(), signer);
    let chain = AlloyChain::new(provider, 1, Duration::from_secs(30));
    let runner = Runner::new(ArtifactRegistry::new(dir.path()), chain);

    let mut out = Vec::new();
    let result = runner.run(&mut out).await;
    (result, String::from_utf8(out).unwrap())
}

#[tokio::test]
#[ignore]
async fn local_node_deploys_and_wins_battle() {
    let (result, out) = run(ACCEPTING).await;
    let outcome = result.unwrap();

    assert!(outcome.deployment.success);
    assert!(outcome.invocation.success);
    assert_ne!(outcome.deployment.tx_hash, outcome.invocation.tx_hash);
    assert_eq!(
        out,
        format!(
            "WinBattle deployed to: {}\nBattle completed!\n",
            outcome.address
        )
    );
}

#[tokio::test]
#[ignore]
async fn local_node_reverting_call() {
    let (result, out) = run(REVERTING).await;

    assert!(matches!(result, Err(Error::InvocationFailed(_))));
    assert!(out.starts_with("WinBattle deployed to: 0x"));
    assert!(!out.contains("Battle completed!"));
}

#[tokio::test]
#[ignore]
async fn local_node_reverting_deployment() {
    let (result, out) = run(UNDEPLOYABLE).await;

    assert!(matches!(result, Err(Error::DeploymentFailed(_))));
    assert!(out.is_empty());
}
