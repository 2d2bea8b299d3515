use rmp_serde::{decode, encode};
use serde::Deserialize;
use std::{
    fs::{self, File},
    io::{BufReader, BufWriter, Write},
    path::{Path, PathBuf},
    process::{Command, Output},
};

#[derive(Debug, Deserialize)]
struct Series {
    time: Vec<f64>,
    values: Vec<f64>,
}

const CONFIG: &str = r#"
[input]
samples = "samples.msgpack"

[columns]
time = 0
position = 1
acceleration = 2
"#;

fn run_bin(args: &[&str]) -> Output {
    let bin = PathBuf::from(env!("CARGO_BIN_EXE_motion-calc"));
    Command::new(bin)
        .args(args)
        .output()
        .expect("failed to execute command")
}

fn assert_success(output: &Output, args: &[&str]) {
    let stdout_str = String::from_utf8_lossy(&output.stdout);
    let stderr_str = String::from_utf8_lossy(&output.stderr);
    assert!(
        output.status.success(),
        "failed to run binary with {args:?}\nstdout:\n{stdout_str}\nstderr:\n{stderr_str}\n"
    );
}

fn setup_dir(name: &str, rows: &[Vec<f64>]) -> PathBuf {
    let test_dir = PathBuf::from(env!("CARGO_TARGET_TMPDIR")).join(name);

    fs::remove_dir_all(&test_dir).ok();
    fs::create_dir(&test_dir).expect("failed to create test directory");

    fs::write(test_dir.join("config.toml"), CONFIG).expect("failed to write config file");

    let file = File::create(test_dir.join("samples.msgpack")).expect("failed to create samples");
    let mut writer = BufWriter::new(file);
    encode::write(&mut writer, &rows).expect("failed to serialize samples");
    writer.flush().expect("failed to flush samples");

    test_dir
}

fn read_series(file: &Path) -> Series {
    let reader = BufReader::new(File::open(file).expect("failed to open results"));
    decode::from_read(reader).expect("failed to deserialize results")
}

#[test]
fn basic_workflow() {
    // time, position, acceleration
    let rows = vec![
        vec![0.0, 0.0, 0.0],
        vec![1.0, 10.0, 2.0],
        vec![2.0, 20.0, 2.0],
        vec![4.0, 40.0, 2.0],
    ];
    let test_dir = setup_dir("basic_workflow", &rows);
    let test_dir_str = test_dir
        .to_str()
        .expect("failed to convert test directory to string");

    for command in ["speed", "integrate"] {
        let args = ["--data-dir", test_dir_str, command];
        assert_success(&run_bin(&args), &args);
    }

    let speed = read_series(&test_dir.join("results-speed.msgpack"));
    assert_eq!(speed.time, vec![1.0, 2.0, 4.0]);
    assert_eq!(speed.values, vec![10.0, 10.0, 10.0]);

    let acc_speed = read_series(&test_dir.join("results-accumulated-speed.msgpack"));
    assert_eq!(acc_speed.time, vec![1.0, 2.0, 4.0]);
    assert_eq!(acc_speed.values, vec![2.0, 4.0, 8.0]);

    let args = ["--data-dir", test_dir_str, "report"];
    let output = run_bin(&args);
    assert_success(&output, &args);
    let stderr_str = String::from_utf8_lossy(&output.stderr);
    assert!(stderr_str.contains("3 values, final value 10 at time 4"));
    assert!(stderr_str.contains("3 values, final value 8 at time 4"));

    let args = ["--data-dir", test_dir_str, "clean"];
    assert_success(&run_bin(&args), &args);
    assert!(!test_dir.join("results-speed.msgpack").exists());
    assert!(!test_dir.join("results-accumulated-speed.msgpack").exists());
    assert!(test_dir.join("samples.msgpack").exists());

    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn repeated_timestamp_fails() {
    let rows = vec![
        vec![0.0, 0.0, 0.0],
        vec![1.0, 5.0, 1.0],
        vec![1.0, 6.0, 1.0],
    ];
    let test_dir = setup_dir("repeated_timestamp", &rows);
    let test_dir_str = test_dir
        .to_str()
        .expect("failed to convert test directory to string");

    let output = run_bin(&["--data-dir", test_dir_str, "speed"]);
    assert!(!output.status.success());
    assert!(!test_dir.join("results-speed.msgpack").exists());

    // Zero-width intervals add nothing to the accumulated speed.
    let args = ["--data-dir", test_dir_str, "integrate"];
    assert_success(&run_bin(&args), &args);
    let acc_speed = read_series(&test_dir.join("results-accumulated-speed.msgpack"));
    assert_eq!(acc_speed.values, vec![1.0, 1.0]);

    fs::remove_dir_all(&test_dir).ok();
}

#[test]
fn short_row_fails() {
    let rows = vec![vec![0.0, 0.0, 0.0], vec![1.0, 5.0]];
    let test_dir = setup_dir("short_row", &rows);
    let test_dir_str = test_dir
        .to_str()
        .expect("failed to convert test directory to string");

    let output = run_bin(&["--data-dir", test_dir_str, "integrate"]);
    assert!(!output.status.success());

    let args = ["--data-dir", test_dir_str, "speed"];
    assert_success(&run_bin(&args), &args);

    fs::remove_dir_all(&test_dir).ok();
}
