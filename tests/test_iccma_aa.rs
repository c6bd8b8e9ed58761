use assert_cmd::Command;
use assert_fs::{prelude::FileWriteStr, NamedTempFile};
use predicates::{
    prelude::{predicate, PredicateBooleanExt},
    BoxPredicate,
};

// 1 and 2 attack each other, both attack 3, 3 and 4 attack each other.
const INSTANCE: &str = r#"p af 4
1 2
1 3
2 1
2 3
3 4
4 3
"#;

fn run_iccma(
    instance: &str,
    format: Option<&str>,
    track: &str,
    arg: Option<&str>,
    possible_answers: &[&'static str],
) -> Result<(), Box<dyn std::error::Error>> {
    let file = NamedTempFile::new("test_instance.af")?;
    file.write_str(instance)?;
    let mut cmd = Command::cargo_bin("dynabri_iccma")?;
    cmd.arg("-f").arg(file.path()).arg("-p").arg(track);
    if let Some(f) = format {
        cmd.arg("-fo").arg(f);
    }
    if let Some(a) = arg {
        cmd.arg("-a").arg(a);
    }
    let mut pred: BoxPredicate<str> = BoxPredicate::new(predicate::never());
    for a in possible_answers {
        pred = BoxPredicate::new(pred.or(predicate::eq(*a)));
    }
    cmd.assert().success().stdout(pred);
    file.close()?;
    Ok(())
}

fn run_on_instance(
    track: &str,
    arg: Option<&str>,
    possible_answers: &[&'static str],
) -> Result<(), Box<dyn std::error::Error>> {
    run_iccma(INSTANCE, None, track, arg, possible_answers)
}

#[test]
fn test_admissible() -> Result<(), Box<dyn std::error::Error>> {
    run_on_instance(
        "SE-AD",
        None,
        &["w\n", "w 1\n", "w 2\n", "w 4\n", "w 1 4\n", "w 2 4\n"],
    )?;
    run_on_instance("DC-AD", Some("1"), &["YES\nw 1\n", "YES\nw 1 4\n"])?;
    run_on_instance("DC-AD", Some("3"), &["NO\n"])?;
    run_on_instance("DS-AD", Some("4"), &["NO\nw\n", "NO\nw 1\n", "NO\nw 2\n"])
}

#[test]
fn test_complete() -> Result<(), Box<dyn std::error::Error>> {
    run_on_instance("SE-CO", None, &["w\n", "w 4\n", "w 1 4\n", "w 2 4\n"])?;
    run_on_instance("DC-CO", Some("1"), &["YES\nw 1 4\n"])?;
    run_on_instance("DC-CO", Some("2"), &["YES\nw 2 4\n"])?;
    run_on_instance("DC-CO", Some("3"), &["NO\n"])?;
    run_on_instance(
        "DC-CO",
        Some("4"),
        &["YES\nw 4\n", "YES\nw 1 4\n", "YES\nw 2 4\n"],
    )?;
    run_on_instance("DS-CO", Some("1"), &["NO\nw\n", "NO\nw 4\n", "NO\nw 2 4\n"])?;
    run_on_instance("DS-CO", Some("4"), &["NO\nw\n"])
}

#[test]
fn test_preferred() -> Result<(), Box<dyn std::error::Error>> {
    run_on_instance("SE-PR", None, &["w 1 4\n", "w 2 4\n"])?;
    run_on_instance("DC-PR", Some("1"), &["YES\nw 1 4\n"])?;
    run_on_instance("DC-PR", Some("3"), &["NO\n"])?;
    run_on_instance("DS-PR", Some("1"), &["NO\nw 2 4\n"])?;
    run_on_instance("DS-PR", Some("3"), &["NO\nw 1 4\n", "NO\nw 2 4\n"])?;
    run_on_instance("DS-PR", Some("4"), &["YES\n"])
}

#[test]
fn test_stable() -> Result<(), Box<dyn std::error::Error>> {
    run_on_instance("SE-ST", None, &["w 1 4\n", "w 2 4\n"])?;
    run_on_instance("DC-ST", Some("2"), &["YES\nw 2 4\n"])?;
    run_on_instance("DC-ST", Some("3"), &["NO\n"])?;
    run_on_instance("DS-ST", Some("2"), &["NO\nw 1 4\n"])?;
    run_on_instance("DS-ST", Some("4"), &["YES\n"])
}

#[test]
fn test_semi_stable() -> Result<(), Box<dyn std::error::Error>> {
    run_on_instance("SE-SST", None, &["w 1 4\n", "w 2 4\n"])?;
    run_on_instance("DC-SST", Some("1"), &["YES\nw 1 4\n"])?;
    run_on_instance("DC-SST", Some("3"), &["NO\n"])?;
    run_on_instance("DS-SST", Some("1"), &["NO\nw 2 4\n"])?;
    run_on_instance("DS-SST", Some("4"), &["YES\n"])
}

#[test]
fn test_stage() -> Result<(), Box<dyn std::error::Error>> {
    run_on_instance("SE-STG", None, &["w 1 4\n", "w 2 4\n"])?;
    run_on_instance("DC-STG", Some("2"), &["YES\nw 2 4\n"])?;
    run_on_instance("DC-STG", Some("3"), &["NO\n"])?;
    run_on_instance("DS-STG", Some("2"), &["NO\nw 1 4\n"])?;
    run_on_instance("DS-STG", Some("4"), &["YES\n"])
}

#[test]
fn test_ideal() -> Result<(), Box<dyn std::error::Error>> {
    run_on_instance("SE-ID", None, &["w 4\n"])?;
    run_on_instance("DC-ID", Some("1"), &["NO\n"])?;
    run_on_instance("DC-ID", Some("4"), &["YES\nw 4\n"])?;
    run_on_instance("DS-ID", Some("3"), &["NO\nw 4\n"])?;
    run_on_instance("DS-ID", Some("4"), &["YES\n"])
}

#[test]
fn test_empty_framework() -> Result<(), Box<dyn std::error::Error>> {
    for track in ["SE-AD", "SE-ST", "SE-PR", "SE-SST", "SE-STG", "SE-ID"] {
        run_iccma("p af 0\n", None, track, None, &["w\n"])?;
    }
    Ok(())
}

#[test]
fn test_self_attack() -> Result<(), Box<dyn std::error::Error>> {
    run_iccma("p af 1\n1 1\n", None, "DC-AD", Some("1"), &["NO\n"])?;
    run_iccma("p af 1\n1 1\n", None, "SE-ST", None, &["NO\n"])?;
    run_iccma("p af 1\n1 1\n", None, "SE-STG", None, &["w\n"])
}

#[test]
fn test_odd_cycle() -> Result<(), Box<dyn std::error::Error>> {
    let instance = "p af 3\n1 2\n2 3\n3 1\n";
    run_iccma(instance, None, "SE-ST", None, &["NO\n"])?;
    run_iccma(instance, None, "SE-PR", None, &["w\n"])?;
    run_iccma(instance, None, "SE-SST", None, &["w\n"])?;
    run_iccma(instance, None, "SE-STG", None, &["w 1\n", "w 2\n", "w 3\n"])?;
    run_iccma(instance, None, "DS-STG", Some("1"), &["NO\nw 2\n", "NO\nw 3\n"])
}

#[test]
fn test_unattacked_arguments() -> Result<(), Box<dyn std::error::Error>> {
    run_iccma("p af 2", None, "DC-STG", Some("1"), &["YES\nw 1 2\n"])?;
    run_iccma("p af 3\n1 2\n2 3\n", None, "SE-ST", None, &["w 1 3\n"])
}

#[test]
fn test_apx_format() -> Result<(), Box<dyn std::error::Error>> {
    let instance = "arg(a).\narg(b).\narg(c).\natt(a,b).\natt(b,c).\n";
    run_iccma(instance, Some("apx"), "SE-ST", None, &["w a c\n"])?;
    run_iccma(instance, Some("apx"), "DC-PR", Some("b"), &["NO\n"])?;
    run_iccma(instance, Some("apx"), "DS-CO", Some("c"), &["YES\n"])
}

#[test]
fn test_tgf_format() -> Result<(), Box<dyn std::error::Error>> {
    let instance = "a\nb\n#\na b\nb a\n";
    run_iccma(instance, Some("tgf"), "SE-ST", None, &["w a\n", "w b\n"])?;
    run_iccma(instance, Some("tgf"), "DC-ST", Some("b"), &["YES\nw b\n"])
}

#[test]
fn test_missing_argument() -> Result<(), Box<dyn std::error::Error>> {
    let file = NamedTempFile::new("test_instance.af")?;
    file.write_str(INSTANCE)?;
    let mut cmd = Command::cargo_bin("dynabri_iccma")?;
    cmd.arg("-f").arg(file.path()).arg("-p").arg("DC-PR");
    cmd.assert().failure();
    let mut cmd = Command::cargo_bin("dynabri_iccma")?;
    cmd.arg("-f")
        .arg(file.path())
        .arg("-p")
        .arg("DC-PR")
        .arg("-a")
        .arg("5");
    cmd.assert().failure();
    file.close()?;
    Ok(())
}
