//! End-to-end runs of the `checkup` binary against small suites.

mod common;

use common::{skip_if_shell_missing, SuiteFixture};

const SHELL: [&str; 2] = ["--shell", "sh"];

#[test]
fn single_passing_scenario_scores_full_marks() {
    if skip_if_shell_missing() {
        return;
    }
    let fixture = SuiteFixture::new(
        r#"
name: single
cases:
  - case: always passes
    secret_phrase: well done
    script: exit 0
"#,
    )
    .expect("write suite");

    let run = fixture.run(&SHELL).expect("run checkup");
    assert!(run.success, "stderr: {}", run.stderr);
    assert!(run.stdout.starts_with("[ single ], 1 test\n"), "{}", run.stdout);
    assert!(
        run.stdout
            .contains("success  1  always passes, ")
            && run.stdout.contains(", secret phrase: well done\n"),
        "{}",
        run.stdout
    );
    let summary = run.summary_line().expect("summary line");
    assert!(
        summary.starts_with("1 (of 1) tests passed, 0 tests failed, rated as 100.00%, spent "),
        "{summary}"
    );
}

#[test]
fn weighted_failure_lowers_the_score() {
    if skip_if_shell_missing() {
        return;
    }
    let fixture = SuiteFixture::new(
        r#"
name: weighted
cases:
  - case: light and passing
    weight: 1
    script: exit 0
  - case: heavy and failing
    weight: 3
    secret_phrase: never shown
    script: exit 1
"#,
    )
    .expect("write suite");

    let run = fixture.run(&SHELL).expect("run checkup");
    assert!(run.success, "script failures are not process failures");
    assert!(run.stdout.starts_with("[ weighted ], 1..2 tests\n"));
    assert!(run.stdout.contains("FAILURE  2  heavy and failing, "));
    assert!(!run.stdout.contains("never shown"));
    let summary = run.summary_line().expect("summary line");
    assert!(
        summary.starts_with("1 (of 2) tests passed, 1 tests failed, rated as 25.00%, spent "),
        "{summary}"
    );
}

#[test]
fn helpers_wrap_main_script_regardless_of_their_flags() {
    if skip_if_shell_missing() {
        return;
    }
    let fixture = SuiteFixture::new(
        r#"
name: hooks
cases:
  - name: setup
    skip: true
    script: echo setup >> order.log
  - name: cleanup
    case: cleanup is also a test
    script: echo cleanup >> order.log
  - name: env-only
  - case: main
    before: [setup, env-only]
    after: [cleanup]
    script: echo main >> order.log
"#,
    )
    .expect("write suite");

    let run = fixture.run(&SHELL).expect("run checkup");
    assert!(run.success, "stderr: {}", run.stderr);
    let order = std::fs::read_to_string(fixture.path().join("order.log")).expect("order log");
    assert_eq!(order, "cleanup\nsetup\nmain\ncleanup\n");
}

#[test]
fn environment_and_working_directory_are_inherited() {
    if skip_if_shell_missing() {
        return;
    }
    let fixture = SuiteFixture::new("name: placeholder\n").expect("write suite");
    let sub = fixture.path().join("sub");
    std::fs::create_dir(&sub).expect("create sub dir");
    std::fs::write(sub.join("inside.txt"), "x").expect("write marker");
    let yaml = format!(
        r#"
name: inheritance
cases:
  - global_env:
      CHECKUP_STAGE: first
  - case: sees first stage
    script: test "$CHECKUP_STAGE" = first && test -f suite.yaml
  - case: switches directory
    workdir: {sub}
    global_env:
      CHECKUP_STAGE: second
    script: test "$CHECKUP_STAGE" = second && test -f inside.txt
  - case: keeps the new directory
    script: test "$CHECKUP_STAGE" = second && test -f inside.txt
"#,
        sub = sub.display()
    );
    std::fs::write(&fixture.suite_path, yaml).expect("rewrite suite");

    let run = fixture.run(&SHELL).expect("run checkup");
    let summary = run.summary_line().expect("summary line");
    assert!(summary.starts_with("3 (of 3) tests passed"), "{}", run.stdout);
}

#[test]
fn verbose_failure_shows_output_and_exit_detail() {
    if skip_if_shell_missing() {
        return;
    }
    let fixture = SuiteFixture::new(
        r#"
name: verbose
cases:
  - case: noisy failure
    description: prints then fails
    script: |
      echo visible output
      echo on stderr >&2
      exit 4
"#,
    )
    .expect("write suite");

    let quiet = fixture.run(&SHELL).expect("run checkup");
    assert!(!quiet.stdout.contains("visible output"));

    let run = fixture.run(&["--shell", "sh", "-vv"]).expect("run checkup");
    assert!(run.stdout.contains("    prints then fails\n"), "{}", run.stdout);
    assert!(
        run.stdout
            .contains(">> stdout:\nvisible output\non stderr\n>> exit status 4 (failure)\n"),
        "{}",
        run.stdout
    );
}

#[test]
fn unknown_helper_aborts_before_running_anything() {
    let fixture = SuiteFixture::new(
        r#"
name: broken
cases:
  - case: would run
    script: touch ran.txt
  - case: refers to nothing
    before: [missing-helper]
    script: exit 0
"#,
    )
    .expect("write suite");

    let run = fixture.run(&SHELL).expect("run checkup");
    assert!(!run.success);
    assert!(run.stderr.contains("missing-helper"), "{}", run.stderr);
    assert!(run.stdout.is_empty(), "{}", run.stdout);
    assert!(!fixture.path().join("ran.txt").exists());
}

#[test]
fn malformed_suite_is_fatal() {
    let fixture = SuiteFixture::new("name: [unclosed\ncases: {").expect("write suite");
    let run = fixture.run(&SHELL).expect("run checkup");
    assert!(!run.success);
    assert!(
        run.stderr.contains("cannot recognize suite definition structure"),
        "{}",
        run.stderr
    );
}

#[test]
fn suite_without_displayable_scenarios_reports_no_tests() {
    if skip_if_shell_missing() {
        return;
    }
    let fixture = SuiteFixture::new(
        r#"
name: hidden
cases:
  - script: touch anonymous.txt
"#,
    )
    .expect("write suite");

    let run = fixture.run(&SHELL).expect("run checkup");
    assert!(run.success);
    assert_eq!(run.stdout, "[ hidden ], no tests to run\n");
    assert!(fixture.path().join("anonymous.txt").exists());
}
