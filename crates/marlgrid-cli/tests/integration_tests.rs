use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("marlgrid").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("marlgrid - multi-agent gridworlds"));
}

#[test]
fn test_cli_list() {
    let mut cmd = Command::cargo_bin("marlgrid").unwrap();
    cmd.arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("Available environments:"))
        .stdout(predicate::str::contains("social_rejection"));
}

#[test]
fn test_cli_eval() {
    let mut cmd = Command::cargo_bin("marlgrid").unwrap();
    cmd.arg("eval")
        .arg("--episodes")
        .arg("2")
        .assert()
        .success()
        .stdout(predicate::str::contains("Starting evaluation"))
        .stdout(predicate::str::contains("survivors="))
        .stdout(predicate::str::contains("Evaluation complete"));
}

#[test]
fn test_cli_demo_with_comm_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("social.json");
    std::fs::write(
        &config,
        r#"{
            "width": 10,
            "height": 10,
            "FLASHING_TIME_POISONED_BERRIES": 3,
            "max_steps": 5,
            "clutter_density": 0.1,
            "n_good_berries": 2,
            "n_bad_berries": 2,
            "good_berry_reward": 0.1,
            "poisoned_berry_reward": -0.8,
            "comm": {"max_msg_len": 4, "vocab_size": 5}
        }"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("marlgrid").unwrap();
    cmd.arg("demo")
        .arg("--config")
        .arg(&config)
        .arg("--steps")
        .arg("5")
        .assert()
        .success()
        .stdout(predicate::str::contains("rewards:"))
        .stdout(predicate::str::contains("actions: [{actions: "));
}

#[test]
fn test_cli_rejects_bad_config() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("bad.json");
    std::fs::write(
        &config,
        r#"{
            "width": 10,
            "height": 10,
            "FLASHING_TIME_POISONED_BERRIES": 3,
            "max_steps": 5,
            "n_clutter": 3,
            "clutter_density": 0.1,
            "n_good_berries": 2,
            "n_bad_berries": 2,
            "good_berry_reward": 0.1,
            "poisoned_berry_reward": -0.8
        }"#,
    )
    .unwrap();

    let mut cmd = Command::cargo_bin("marlgrid").unwrap();
    cmd.arg("eval")
        .arg("--config")
        .arg(&config)
        .assert()
        .failure()
        .stderr(predicate::str::contains("n_clutter xor clutter_density"));
}
