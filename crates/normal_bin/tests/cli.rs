use std::fs::read_to_string;

use assert_cmd::Command;
use serde_json::Value;
use tempfile::tempdir;
use test_case::test_case;
use units::ANG_PER_BOHR;

fn normal() -> Command {
    Command::cargo_bin("normal_bin").unwrap()
}

fn stdout(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn water() {
    let assert = normal().arg("testfiles/water.toml").assert();
    let output = assert.get_output();
    assert!(output.status.success(), "stderr: {}", stderr(output));
    let got = stdout(output);
    for want in [
        "Job: testfiles/water.toml",
        "Energy (Eh): -76.0266327341",
        "Molecule is an asymmetric top",
        "Rotational Constants (cyc/cm):",
        "27.277351",
        "14.575165",
        "9.499355",
        "Vibrational Frequencies (cyc/cm):",
        "1650.8",
        "3833.5",
        "3943.4",
        "IR (km/mol)",
        "230.32",
    ] {
        assert!(got.contains(want), "missing {want} in\n{got}");
    }
    assert!(!got.contains("Raman"));
}

#[test_case(0 ; "default threads")]
#[test_case(1 ; "one thread")]
fn json(threads: usize) {
    let assert = normal()
        .arg("--json")
        .arg("-t")
        .arg(threads.to_string())
        .args(["testfiles/water.toml", "testfiles/water.toml"])
        .assert();
    let output = assert.get_output();
    assert!(output.status.success(), "stderr: {}", stderr(output));
    let got: Value = serde_json::from_str(&stdout(output)).unwrap();
    let reports = got.as_array().unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0], reports[1]);

    let report = &reports[0];
    assert_eq!(report["rotor"], "AsymmTop");
    assert_eq!(report["freq_unit"], "cyc/cm");
    assert_eq!(report["rot_const_unit"], "cyc/cm");
    let freqs: Vec<f64> = report["freqs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f.as_f64().unwrap())
        .collect();
    let want = [1650.828243, 3833.470203, 3943.440490];
    assert_eq!(freqs.len(), 3);
    for (f, w) in freqs.iter().zip(want) {
        assert!((f - w).abs() < 1e-3, "{f} != {w}");
    }
    assert_eq!(report["ir"].as_array().unwrap().len(), 3);
    assert!(report["raman"].is_null());
}

/// a job written to a temporary directory with its geometry in Å and its
/// Hessian in Eh/Å², read from a file next to it
#[test]
fn angstrom_job() -> std::io::Result<()> {
    let dir = tempdir()?;
    let hess: Vec<String> = read_to_string("testfiles/water.hess")?
        .split_whitespace()
        .map(|x| {
            let x: f64 = x.parse().unwrap();
            (x / (ANG_PER_BOHR * ANG_PER_BOHR)).to_string()
        })
        .collect();
    std::fs::write(dir.path().join("fort.15"), hess.join(" "))?;
    let job = format!(
        r#"
geometry = """
H 0.0  {y} {z}
O 0.0  0.0 {zo}
H 0.0 -{y} {z}
"""
length_unit = "angstrom"
hessian = {{ file = "fort.15" }}
temperature = 0.0
"#,
        y = 1.4313901416 * ANG_PER_BOHR,
        z = 0.9860410955 * ANG_PER_BOHR,
        zo = -0.1242384417 * ANG_PER_BOHR,
    );
    let path = dir.path().join("job.toml");
    std::fs::write(&path, job)?;

    let assert = normal().arg(&path).arg("--json").assert();
    let output = assert.get_output();
    assert!(output.status.success(), "stderr: {}", stderr(output));
    let got: Value = serde_json::from_str(&stdout(output)).unwrap();
    let report = &got[0];
    assert_eq!(report["energy"], 0.0);
    assert!(report["ir"].is_null());
    let freqs: Vec<f64> = report["freqs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f.as_f64().unwrap())
        .collect();
    let want = [1650.828243, 3833.470203, 3943.440490];
    for (f, w) in freqs.iter().zip(want) {
        assert!((f - w).abs() < 1e-3, "{f} != {w}");
    }
    Ok(())
}

#[test]
fn dimension_mismatch() {
    let assert = normal().arg("testfiles/bad_dim.toml").assert();
    let output = assert.get_output();
    assert!(!output.status.success());
    let err = stderr(output);
    assert!(err.contains("DimensionMismatch"), "{err}");
    assert!(stdout(output).is_empty());
}

/// misshapen dipole derivatives drop the IR intensities but keep everything
/// else in the report
#[test]
fn bad_dipoles() {
    let assert = normal().arg("testfiles/bad_dipoles.toml").assert();
    let output = assert.get_output();
    assert!(output.status.success(), "stderr: {}", stderr(output));
    let got = stdout(output);
    for want in ["Molecule is an asymmetric top", "1650.8", "3943.4"] {
        assert!(got.contains(want), "missing {want} in\n{got}");
    }
    assert!(!got.contains("IR (km/mol)"));
    let err = stderr(output);
    assert!(err.contains("IR intensities failed"), "{err}");
    assert!(err.contains("DimensionMismatch"), "{err}");

    let assert = normal()
        .args(["--json", "testfiles/bad_dipoles.toml"])
        .assert();
    let output = assert.get_output();
    assert!(output.status.success());
    let got: Value = serde_json::from_str(&stdout(output)).unwrap();
    let report = &got[0];
    assert!(report["ir"].is_null());
    assert_eq!(report["freqs"].as_array().unwrap().len(), 3);
    assert_eq!(report["reduced_masses"].as_array().unwrap().len(), 3);
    assert_eq!(report["errors"].as_array().unwrap().len(), 1);

    // and a clean job has no errors at all
    let assert = normal().args(["--json", "testfiles/water.toml"]).assert();
    let got: Value =
        serde_json::from_str(&stdout(assert.get_output())).unwrap();
    assert!(got[0].get("errors").is_none());
}

/// a failing job doesn't stop the others from being reported, but the exit
/// status still reflects the failure
#[test]
fn partial_failure() {
    let assert = normal()
        .args(["testfiles/water.toml", "testfiles/missing.toml"])
        .assert();
    let output = assert.get_output();
    assert!(!output.status.success());
    assert!(stdout(output).contains("3943.4"));
    let err = stderr(output);
    assert!(err.contains("failed to read job file"), "{err}");
    assert!(err.contains("1 of 2 jobs failed"), "{err}");
}

#[test]
fn no_args() {
    normal().assert().failure();
}
