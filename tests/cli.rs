use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

const EXPORT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<rss version="0.92">
  <channel>
    <title>Tracker export</title>
    <item>
      <title>[PRJ-1] Crash on start</title>
      <link>https://tracker.example.com/browse/PRJ-1</link>
      <project id="10010" key="PRJ">Project</project>
      <description>&lt;p&gt;It &lt;b&gt;crashes&lt;/b&gt;&lt;/p&gt;</description>
      <key id="100">PRJ-1</key>
      <type id="1">Bug</type>
      <priority id="3">Major</priority>
      <status id="6">Closed</status>
      <resolution id="1">Fixed</resolution>
      <assignee username="bob">bob</assignee>
      <reporter username="alice">alice</reporter>
      <created>Thu, 6 Nov 2014 18:47:35 +0000</created>
      <resolved>Fri, 7 Nov 2014 10:00:00 +0000</resolved>
      <votes>0</votes>
      <watches>1</watches>
      <comments>
        <comment id="1" author="x" created="Thu, 6 Nov 2014 19:00:00 +0000">one</comment>
        <comment id="2" author="x" created="Thu, 6 Nov 2014 19:10:00 +0000">two</comment>
        <comment id="3" author="y" created="Thu, 6 Nov 2014 19:20:00 +0000">three</comment>
      </comments>
    </item>
    RESOLUTION_ITEM
  </channel>
</rss>
"#;

const SECOND_ITEM: &str = r#"<item>
      <title>[PRJ-2] Typo</title>
      <link>https://tracker.example.com/browse/PRJ-2</link>
      <project id="10010" key="PRJ">Project</project>
      <description></description>
      <key id="101">PRJ-2</key>
      <type id="2">Task</type>
      <priority id="4">Minor</priority>
      <status id="1">Open</status>
      RESOLUTION
      <assignee username="-1">Unassigned</assignee>
      <reporter username="alice">alice</reporter>
      <created>Mon, 10 Nov 2014 08:00:00 +0000</created>
      <resolved></resolved>
      <votes>2</votes>
      <watches>3</watches>
    </item>"#;

fn export(second_resolution: &str) -> String {
    EXPORT.replace(
        "RESOLUTION_ITEM",
        &SECOND_ITEM.replace("RESOLUTION", second_resolution),
    )
}

fn convert(input: &Path, output_dir: &Path, extra: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_issues-to-csv"))
        .arg(input)
        .arg("--output_dir")
        .arg(output_dir)
        .args(extra)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn files_in(dir: &Path) -> Vec<String> {
    let mut names = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect::<Vec<_>>();
    names.sort();
    names
}

#[test]
fn converts_export_into_two_tables() {
    let work = TempDir::new().unwrap();
    let input = work.path().join("export.xml");
    fs::write(&input, export(r#"<resolution id="2">Won't Fix</resolution>"#)).unwrap();
    let output_dir = work.path().join("output");
    fs::create_dir(&output_dir).unwrap();

    let output = convert(&input, &output_dir, &[]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines = stdout.lines().collect::<Vec<_>>();
    assert_eq!(lines.len(), 2, "{stdout}");
    assert!(lines[0].starts_with("Issues extracted to `"));
    assert!(lines[1].starts_with("Reporters summarized to `"));

    let files = files_in(&output_dir);
    assert_eq!(files.len(), 2);
    let issues_file = files.iter().find(|f| f.starts_with("issues_")).unwrap();
    let reporters_file = files.iter().find(|f| f.starts_with("reporters_")).unwrap();

    let issues = fs::read_to_string(output_dir.join(issues_file)).unwrap();
    let rows = issues.lines().collect::<Vec<_>>();
    assert_eq!(
        rows,
        [
            "id,title,link,description_length,project_id,project_name,date_submitted,date_resolved,type,status,resolution_id,priority,votes,assignee,reporter,watches,authors,comment_count",
            "PRJ-1,[PRJ-1] Crash on start,https://tracker.example.com/browse/PRJ-1,10,10010,Project,2014-11-06T18:47:35+00:00,2014-11-07T10:00:00+00:00,Bug,Closed,1,Major,0,bob,alice,1,2,3",
            "PRJ-2,[PRJ-2] Typo,https://tracker.example.com/browse/PRJ-2,0,10010,Project,2014-11-10T08:00:00+00:00,,Task,Open,2,Minor,2,Unassigned,alice,3,0,0",
        ]
    );

    assert_eq!(
        fs::read_to_string(output_dir.join(reporters_file)).unwrap(),
        "Name,Issues,Fixed,Won't Fix\nalice,2,1,1\n"
    );
}

#[test]
fn missing_resolution_fails_without_output() {
    let work = TempDir::new().unwrap();
    let input = work.path().join("export.xml");
    fs::write(&input, export("")).unwrap();
    let output_dir = work.path().join("output");
    fs::create_dir(&output_dir).unwrap();

    let output = convert(&input, &output_dir, &[]);
    assert!(!output.status.success());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("item #2 (PRJ-2"), "{stderr}");
    assert!(stderr.contains("resolution@id"), "{stderr}");
    assert!(output.stdout.is_empty());
    assert!(files_in(&output_dir).is_empty());
}

#[test]
fn missing_resolution_can_be_allowed() {
    let work = TempDir::new().unwrap();
    let input = work.path().join("export.xml");
    fs::write(&input, export("")).unwrap();
    let output_dir = work.path().join("output");
    fs::create_dir(&output_dir).unwrap();

    let output = convert(&input, &output_dir, &["--allow_missing_resolution"]);
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let reporters = files_in(&output_dir)
        .into_iter()
        .find(|f| f.starts_with("reporters_"))
        .unwrap();
    assert_eq!(
        fs::read_to_string(output_dir.join(reporters)).unwrap(),
        "Name,Issues,Fixed,Won't Fix\nalice,2,1,0\n"
    );
}

#[test]
fn settings_file_controls_naming() {
    let work = TempDir::new().unwrap();
    let input = work.path().join("export.xml");
    fs::write(&input, export(r#"<resolution id="3">Duplicate</resolution>"#)).unwrap();
    let output_dir = work.path().join("output");
    fs::create_dir(&output_dir).unwrap();
    let config = work.path().join("settings.json");
    fs::write(
        &config,
        format!(
            r#"{{"outputDir": "{}", "issuesPrefix": "jira", "reportersPrefix": "people", "timestampFormat": "run"}}"#,
            output_dir.display()
        ),
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_issues-to-csv"))
        .arg(&input)
        .arg("--config")
        .arg(&config)
        .output()
        .unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    assert_eq!(files_in(&output_dir), ["jira_run.csv", "people_run.csv"]);
}

#[test]
fn missing_output_dir_is_an_error() {
    let work = TempDir::new().unwrap();
    let input = work.path().join("export.xml");
    fs::write(&input, export(r#"<resolution id="1">Fixed</resolution>"#)).unwrap();

    let output = convert(&input, &work.path().join("absent"), &[]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Cannot write to output directory"));
    assert_eq!(files_in(work.path()), ["export.xml"]);
}

#[test]
fn unreadable_input_is_an_error() {
    let work = TempDir::new().unwrap();
    let output = convert(&work.path().join("missing.xml"), work.path(), &[]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("missing.xml"));
    assert!(files_in(work.path()).is_empty());
}
