//! Command scenarios driven through the public `App` surface.

use std::time::Duration;

use insta::assert_snapshot;

use chimera_engine::{App, Stage, normalize};

use crate::common::{booted_app, instant_settings, transcript_since};

fn respond(app: &mut App, raw: &str) -> String {
    app.dispatch(raw).text().into_owned()
}

#[test]
fn help_scenario() {
    let mut app = booted_app();
    let start = app.log().full_text().len();
    for c in "HELP".chars() {
        app.draft_mut().enter_char(c);
    }
    app.submit().expect("boot completed");
    app.advance(Duration::ZERO);

    assert_snapshot!(transcript_since(&app, start).trim_end(), @r"
    > help
    Available commands: help, ls, cat [file], run [program]
    ");
}

#[test]
fn system_log_scenario() {
    let mut app = booted_app();
    assert_snapshot!(
        respond(&mut app, "cat system_log.dat"),
        @"system_log.dat: [ERROR] Core integrity compromised. [WARNING] Entity detected. [CRITICAL] System override imminent."
    );
}

#[test]
fn readme_lookup_ignores_case() {
    let mut app = booted_app();
    assert_snapshot!(
        respond(&mut app, "cat README.txt"),
        @"README.txt: This system is unstable. Do not proceed. Data corruption detected."
    );
}

#[test]
fn unknown_program_scenario() {
    let mut app = booted_app();
    assert_snapshot!(
        respond(&mut app, "run unknown.exe"),
        @"Error: Program 'unknown.exe' not found."
    );
}

#[test]
fn missing_file_names_the_file() {
    let mut app = booted_app();
    assert_snapshot!(
        respond(&mut app, "  CAT Diary.TXT "),
        @"Error: File 'diary.txt' not found."
    );
}

#[test]
fn unknown_commands_name_the_normalized_input() {
    let mut app = booted_app();
    for raw in ["Dance", "  sudo  ", "catalog", "RUNNER"] {
        let command = normalize(raw);
        assert_eq!(
            respond(&mut app, raw),
            format!("Error: Command not recognized: '{command}'. Type 'help' for assistance.")
        );
    }
}

#[test]
fn hidden_commands_answer_but_stay_unlisted() {
    let mut app = booted_app();
    let help = respond(&mut app, "help");
    for (command, expected) in [
        ("ping", "Pinging... Target unresponsive. Or is it?"),
        ("exit", "Connection terminated. Or so you think."),
        ("whoami", "You are an intruder. Leave."),
    ] {
        assert!(!help.contains(command));
        assert_eq!(respond(&mut app, command), expected);
    }
    assert!(!app.should_quit(), "exit is flavor text only");
}

#[test]
fn chimera_runs_once() {
    let mut app = booted_app();
    respond(&mut app, "run project_chimera.exe");
    assert_eq!(app.stage(), Stage::Escalating);
    assert_eq!(app.pending_cues(), 1);

    let start = app.log().full_text().len();
    respond(&mut app, "run project_chimera.exe");
    app.advance(Duration::ZERO);
    assert_eq!(app.pending_cues(), 1, "second run must not re-arm");
    assert_snapshot!(transcript_since(&app, start).trim_end(), @r#"
    > run project_chimera.exe
    Executing project_chimera.exe... Access denied. System response: "IT WANTS OUT."
    "#);
}

#[test]
fn enter_before_boot_is_swallowed() {
    let mut app = App::new(instant_settings(), None);
    app.start_boot();
    app.advance(Duration::from_millis(8000));
    let before = app.log().full_text();

    for c in "help".chars() {
        app.draft_mut().enter_char(c);
    }
    assert!(app.submit().is_none());
    app.advance(Duration::from_millis(500));

    assert_eq!(app.draft().text(), "");
    assert!(!app.log().full_text().contains("> "));
    assert!(app.log().full_text().starts_with(&before));
    assert!(app.history().is_empty());
}

#[test]
fn history_keeps_distinct_neighbours() {
    let mut app = booted_app();
    for raw in ["ls", "ls", "LS ", "help", "ls"] {
        respond(&mut app, raw);
    }
    assert_eq!(app.history().entries(), ["ls", "help", "ls"]);
    assert_eq!(app.history().index(), app.history().len());
}
