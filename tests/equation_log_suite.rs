use chaos_equations::equation::EquationParams;
use chaos_equations::equation_log::EquationLog;

#[test]
fn append_writes_one_code_per_line() {
    let dir = tempfile::tempdir().expect("tempdir");
    let log = EquationLog::new(dir.path().join("saved.txt"));

    let a = EquationParams::from_code("LDHQNC");
    let b = EquationParams::from_code("ZZ_A_B");
    assert_eq!(log.append(&a).expect("append a"), "LDHQNC");
    assert_eq!(log.append(&b).expect("append b"), "ZZ_A_B");

    let text = std::fs::read_to_string(log.path()).expect("read log");
    assert_eq!(text, "LDHQNC\nZZ_A_B\n");
    assert_eq!(log.codes().expect("codes"), vec!["LDHQNC", "ZZ_A_B"]);
    assert_eq!(log.last().expect("last"), Some("ZZ_A_B".to_string()));
}

#[test]
fn append_creates_missing_parent_dirs() {
    let dir = tempfile::tempdir().expect("tempdir");
    let log = EquationLog::new(dir.path().join("nested").join("deeper").join("saved.txt"));
    log.append(&EquationParams::zero()).expect("append");
    assert_eq!(log.last().expect("last"), Some("______".to_string()));
}

#[test]
fn missing_file_is_an_empty_log() {
    let dir = tempfile::tempdir().expect("tempdir");
    let log = EquationLog::new(dir.path().join("never-written.txt"));
    assert!(log.codes().expect("codes").is_empty());
    assert_eq!(log.last().expect("last"), None);
}

#[test]
fn blank_and_comment_lines_are_skipped() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("saved.txt");
    std::fs::write(&path, "# favourites\n\n  QWERTY  \n\nABCDEF\n").expect("seed log");

    let log = EquationLog::new(&path);
    assert_eq!(log.codes().expect("codes"), vec!["QWERTY", "ABCDEF"]);

    log.append(&EquationParams::from_code("QWERTY")).expect("append");
    assert_eq!(log.last().expect("last"), Some("QWERTY".to_string()));
}

#[test]
fn unreadable_path_reports_io_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    // A directory cannot be read as a log file.
    let log = EquationLog::new(dir.path());
    let err = log.codes().expect_err("reading a directory should fail");
    assert!(err.to_string().starts_with("I/O error"));
}
