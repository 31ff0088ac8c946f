//! Basic CLI E2E tests.
//!
//! Each test drives the built binary against its own temporary data directory.

use std::path::Path;
use std::process::Command;

/// Run a CLI command and return (stdout, stderr, exit code).
fn run_cli(data_dir: &Path, args: &[&str]) -> (String, String, i32) {
    let output = Command::new(env!("CARGO_BIN_EXE_liftquest"))
        .args(args)
        .env("LIFTQUEST_DATA_DIR", data_dir)
        .env("RUST_LOG", "off")
        .output()
        .expect("Failed to execute CLI command");

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    let stderr = String::from_utf8_lossy(&output.stderr).to_string();
    let code = output.status.code().unwrap_or(-1);

    (stdout, stderr, code)
}

fn run_json(data_dir: &Path, args: &[&str]) -> serde_json::Value {
    let (stdout, stderr, code) = run_cli(data_dir, args);
    assert_eq!(code, 0, "{args:?} failed: {stderr}");
    serde_json::from_str(&stdout).unwrap_or_else(|e| panic!("{args:?} printed non-JSON ({e}): {stdout}"))
}

fn init_user(data_dir: &Path) -> String {
    let user = run_json(
        data_dir,
        &["user", "init", "--name", "Kim", "--age", "30", "--bodyweight", "80", "--sex", "male"],
    );
    user["user_id"].as_str().unwrap().to_string()
}

#[test]
fn test_user_init_and_show() {
    let dir = tempfile::tempdir().unwrap();
    let user_id = init_user(dir.path());

    let shown = run_json(dir.path(), &["user", "show", &user_id]);
    assert_eq!(shown["user"]["name"], "Kim");
    assert_eq!(shown["character"]["total_level"], 1);
    assert_eq!(shown["progress"].as_array().unwrap().len(), 7);
}

#[test]
fn test_unknown_user_fails() {
    let dir = tempfile::tempdir().unwrap();
    let (_, stderr, code) = run_cli(dir.path(), &["user", "show", "nobody"]);
    assert_eq!(code, 1);
    assert!(stderr.contains("error:"));
}

#[test]
fn test_workout_log_and_recommend() {
    let dir = tempfile::tempdir().unwrap();
    let user_id = init_user(dir.path());

    let empty = run_json(dir.path(), &["recommend", &user_id, "bench_press"]);
    assert!(empty["recommendation"].is_null());

    let outcome = run_json(
        dir.path(),
        &[
            "workout", "log", &user_id, "bench_press", "--sets", "3", "--reps", "5", "--weight", "80", "--rpe",
            "6", "--date", "2026-03-01",
        ],
    );
    assert_eq!(outcome["workout"]["exercise_id"], "bench_press");
    assert_eq!(outcome["is_personal_record"], true);

    let rec = run_json(dir.path(), &["recommend", &user_id, "bench_press"]);
    assert_eq!(rec["progression_type"], "linear");
    assert_eq!(rec["next_weight_kg"], 82.0);

    let history = run_json(dir.path(), &["workout", "history", &user_id]);
    assert_eq!(history.as_array().unwrap().len(), 1);
}

#[test]
fn test_workout_with_heart_rate_reports_calories() {
    let dir = tempfile::tempdir().unwrap();
    let user_id = init_user(dir.path());
    let outcome = run_json(
        dir.path(),
        &[
            "workout", "log", &user_id, "back_squat", "--sets", "4", "--reps", "6", "--weight", "100", "--duration",
            "25", "--heart-rate", "135",
        ],
    );
    assert_eq!(outcome["calories"]["method"], "heart_rate");
    assert!(outcome["calories"]["total_kcal"].as_f64().unwrap() > 0.0);
}

#[test]
fn test_invalid_workout_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let user_id = init_user(dir.path());
    let (_, stderr, code) = run_cli(
        dir.path(),
        &["workout", "log", &user_id, "bench_press", "--sets", "3", "--reps", "5", "--rpe", "11"],
    );
    assert_eq!(code, 1);
    assert!(stderr.contains("rpe"));
    let history = run_json(dir.path(), &["workout", "history", &user_id]);
    assert!(history.as_array().unwrap().is_empty());
}

#[test]
fn test_apply_exp_levels_up() {
    let dir = tempfile::tempdir().unwrap();
    let user_id = init_user(dir.path());
    let outcome = run_json(dir.path(), &["progress", "apply-exp", &user_id, "leg", "2150"]);
    assert_eq!(outcome["level_up"]["new_level"], 3);
    assert_eq!(outcome["level_up"]["remaining_exp"], 0.0);
}

#[test]
fn test_grade_from_lift() {
    let dir = tempfile::tempdir().unwrap();
    let graded = run_json(
        dir.path(),
        &["grade", "--body-part", "chest", "--sex", "male", "--age", "30", "--metric", "0"],
    );
    assert_eq!(graded["classification"]["grade"], "BRONZE");
    assert_eq!(graded["classification"]["percentile"], 0);
}

#[test]
fn test_skills_list() {
    let dir = tempfile::tempdir().unwrap();
    let skills = run_json(dir.path(), &["skills", "list"]);
    assert_eq!(skills[0]["id"], "pushup_normal");

    let user_id = init_user(dir.path());
    let for_user = run_json(dir.path(), &["skills", "list", "--user", &user_id]);
    assert_eq!(for_user["skills"][0]["eligible"], true);
    let (_, _, code) = run_cli(dir.path(), &["skills", "unlock", &user_id, "pushup_normal"]);
    assert_eq!(code, 1, "no skill points yet");
}

#[test]
fn test_config_commands() {
    let dir = tempfile::tempdir().unwrap();
    let (stdout, _, code) = run_cli(dir.path(), &["config", "get", "leveling.growth_factor"]);
    assert_eq!(code, 0);
    assert_eq!(stdout.trim(), "1.15");

    let (_, _, code) = run_cli(dir.path(), &["config", "set", "overload.rep_ceiling", "15"]);
    assert_eq!(code, 0);
    let (stdout, _, _) = run_cli(dir.path(), &["config", "get", "overload.rep_ceiling"]);
    assert_eq!(stdout.trim(), "15");

    let (_, _, code) = run_cli(dir.path(), &["config", "set", "leveling.growth_factor", "0.9"]);
    assert_eq!(code, 1);

    let (_, _, code) = run_cli(dir.path(), &["config", "validate"]);
    assert_eq!(code, 0);
    let (_, _, code) = run_cli(dir.path(), &["config", "reset"]);
    assert_eq!(code, 0);
    let listed = run_json(dir.path(), &["config", "list"]);
    assert_eq!(listed["overload"]["rep_ceiling"], 12);
}
