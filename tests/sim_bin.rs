use std::process::Command;

#[test]
fn sim_binary_smoke() {
    let output = Command::new(env!("CARGO_BIN_EXE_sim"))
        .arg("42")
        .env("SEABATTLE_LOG", "off")
        .output()
        .expect("failed to run sim binary");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).expect("non utf8 output");
    let v: serde_json::Value = serde_json::from_str(stdout.trim()).expect("invalid json");
    let winner = v["winner"].as_str().unwrap();
    assert!(winner == "human" || winner == "opponent");
    let human = v["human_shots"].as_u64().unwrap();
    let opponent = v["opponent_shots"].as_u64().unwrap();
    assert!(human == opponent || (human == opponent + 1 && winner == "human"));
}

#[test]
fn sim_binary_rejects_missing_seed() {
    let output = Command::new(env!("CARGO_BIN_EXE_sim"))
        .output()
        .expect("failed to run sim binary");
    assert!(!output.status.success());
}
