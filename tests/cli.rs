use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const CONFIG: &str = r#"
general:
  partial_match: true
catalog:
  labels:
    groceries: 5
    grocery run: 9
  projects:
    Shopping: 3
    Inbox: 1
  project_ids:
    Shopping: "shop-1"
    Inbox: "inbox-1"
"#;

fn home_with_config(contents: &str) -> TempDir {
    let home = TempDir::new().unwrap();
    let root = home.path().join(".tasklex");
    std::fs::create_dir_all(&root).unwrap();
    std::fs::write(root.join("config.yaml"), contents).unwrap();
    home
}

fn tasklex(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tasklex").unwrap();
    cmd.env("HOME", home.path())
        .env("LANG", "C")
        .env_remove("LC_ALL")
        .env_remove("LANGUAGE")
        .env_remove("TASKLEX_LANG")
        .env_remove("TASKLEX_LOG");
    cmd
}

fn stdout_json(cmd: &mut Command) -> serde_json::Value {
    let output = cmd.output().unwrap();
    assert!(output.status.success(), "command failed: {output:?}");
    serde_json::from_slice(&output.stdout).unwrap()
}

#[test]
fn parse_prints_task_preview() {
    let home = home_with_config(CONFIG);
    let value = stdout_json(tasklex(&home).args(["parse", "buy milk @groceries #Shopping p1"]));
    let item = &value["items"][0];

    assert_eq!(item["title"], "buy milk");
    assert_eq!(item["icon"]["path"], "icons/newTask.png");
    assert_eq!(item["variables"]["myTagString"], "groceries");
    assert_eq!(item["variables"]["myProjectID"], "shop-1");
    assert_eq!(item["variables"]["myPriority"], 4);
}

#[test]
fn parse_joins_words() {
    let home = home_with_config(CONFIG);
    let value = stdout_json(tasklex(&home).args(["parse", "water", "the", "plants"]));

    assert_eq!(value["items"][0]["title"], "water the plants");
    assert_eq!(value["items"][0]["variables"]["myProjectID"], "inbox-1");
}

#[test]
fn parse_unknown_label_offers_candidates() {
    let home = home_with_config(CONFIG);
    let value = stdout_json(tasklex(&home).args(["parse", "milk @groc"]));
    let items = value["items"].as_array().unwrap();

    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["title"], "@grocery run (9)");
    assert_eq!(items[0]["arg"], "milk @(grocery run) ");
}

#[test]
fn parse_unresolved_due_offers_picker() {
    let home = home_with_config(CONFIG);
    let value = stdout_json(tasklex(&home).args(["parse", "call mom due:"]));
    let items = value["items"].as_array().unwrap();

    assert_eq!(items.len(), 4);
    assert_eq!(items[0]["arg"], "call mom due:0d ");
    assert_eq!(items[3]["arg"], "call mom due:30d ");
}

#[test]
fn parse_pretty_output() {
    let home = home_with_config(CONFIG);
    tasklex(&home)
        .args(["--output", "pretty", "parse", "buy milk #Shopping"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Parsed Task"))
        .stdout(predicate::str::contains("#Shopping"));
}

#[test]
fn works_without_config_file() {
    let home = TempDir::new().unwrap();
    let value = stdout_json(tasklex(&home).args(["parse", "plain task"]));

    assert_eq!(value["items"][0]["title"], "plain task");
}

#[test]
fn invalid_config_is_reported() {
    let home = home_with_config("general: [1, 2\n");
    tasklex(&home)
        .args(["parse", "anything"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"))
        .stderr(predicate::str::contains("config"));
}

#[test]
fn due_menu_quantity() {
    let home = home_with_config(CONFIG);
    let value = stdout_json(tasklex(&home).args(["due-menu", "3d", "--through", "pay rent due:3"]));
    let items = value["items"].as_array().unwrap();

    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["arg"], "pay rent due:3d ");
    assert!(items[0]["title"].as_str().unwrap().starts_with("Due in 3 days"));
}

#[test]
fn due_menu_invalid() {
    let home = home_with_config(CONFIG);
    let value = stdout_json(tasklex(&home).args(["due-menu", "3x"]));

    assert_eq!(value["items"][0]["title"], "Invalid format!");
    assert_eq!(value["items"][0]["arg"], "");
}

#[test]
fn reschedule_menu_canned() {
    let home = home_with_config(CONFIG);
    let value = stdout_json(tasklex(&home).args(["reschedule-menu", "--task", "water plants"]));
    let args: Vec<&str> = value["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["arg"].as_str().unwrap())
        .collect();

    assert_eq!(args, vec!["0d", "1d", "7d", "30d"]);
    assert_eq!(value["items"][0]["subtitle"], "water plants");
}

#[test]
fn resolve_absolute_date() {
    let home = home_with_config(CONFIG);
    let value = stdout_json(tasklex(&home).args(["resolve", "2025-12-24T18:30"]));

    assert_eq!(value["date"], "2025-12-24T18:30");
    assert_eq!(value["source"], "coded");
}

#[test]
fn resolve_uses_lang_override() {
    let home = home_with_config(CONFIG);
    let value = stdout_json(tasklex(&home).args(["--lang", "it", "resolve", "domani"]));

    assert_eq!(value["source"], "natural");
}

#[test]
fn resolve_uses_system_language() {
    let home = home_with_config(CONFIG);
    let value = stdout_json(
        tasklex(&home)
            .env("LANG", "de_DE.UTF-8")
            .args(["resolve", "übermorgen"]),
    );

    assert_eq!(value["source"], "natural");
}

#[test]
fn resolve_unknown_fails() {
    let home = home_with_config(CONFIG);
    tasklex(&home)
        .args(["resolve", "whenever"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not resolve date"));
}

#[test]
fn reschedule_date_passthrough() {
    let home = home_with_config(CONFIG);
    tasklex(&home)
        .args(["-o", "pretty", "reschedule-date", "2025-07-04"])
        .assert()
        .success()
        .stdout("2025-07-04\n");
}
