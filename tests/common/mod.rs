//! Common test infrastructure for dexcrate integration tests.
//!
//! Provides:
//! - TestProject: temp directory with a reference names file and optional config
//! - Output assertion helpers
//!
//! Every run points the API at a closed local port, so no test touches the
//! network. Anything that reaches the record fetch fails with "not found".

#![allow(dead_code)]

use std::io::{BufRead, Write};
use std::process::{Child, Command, Output, Stdio};

/// Nothing listens on the discard port; connections are refused immediately.
pub const UNREACHABLE_API: &str = "http://127.0.0.1:9/api/v2";

pub const STARTERS: &[&str] = &[
    "bulbasaur",
    "ivysaur",
    "venusaur",
    "charmander",
    "charmeleon",
    "charizard",
    "squirtle",
    "wartortle",
    "blastoise",
    "pikachu",
];

/// A test project with an isolated directory.
pub struct TestProject {
    pub dir: tempfile::TempDir,
}

impl TestProject {
    /// Create a project whose `names.txt` holds the given names.
    pub fn with_names(names: &[&str]) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let mut contents = String::from("# reference names\n");
        for name in names {
            contents.push_str(name);
            contents.push('\n');
        }
        std::fs::write(dir.path().join("names.txt"), contents).expect("Failed to write names.txt");
        Self { dir }
    }

    pub fn starters() -> Self {
        Self::with_names(STARTERS)
    }

    /// Write dexcrate.toml into the project directory
    pub fn write_config(&self, contents: &str) {
        std::fs::write(self.dir.path().join("dexcrate.toml"), contents)
            .expect("Failed to write dexcrate.toml");
    }

    fn command(&self, args: &[&str], with_names: bool) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_dexcrate"));
        cmd.args(args)
            .arg("--api-url")
            .arg(UNREACHABLE_API)
            .arg("--timeout")
            .arg("2s");
        if with_names {
            cmd.arg("--names-file").arg(self.dir.path().join("names.txt"));
        }
        self.isolate(&mut cmd);
        cmd
    }

    fn isolate(&self, cmd: &mut Command) {
        cmd.current_dir(self.dir.path())
            .env_clear()
            .env("HOME", self.dir.path())
            .env("PATH", std::env::var("PATH").unwrap_or_default())
            .env("NO_COLOR", "1");
    }

    /// Spawn dexcrate against a specific API with the project's names file.
    /// No --timeout is added; pass one in `args`.
    pub fn spawn_against(&self, api_url: &str, args: &[&str]) -> Child {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_dexcrate"));
        cmd.args(args)
            .arg("--api-url")
            .arg(api_url)
            .arg("--names-file")
            .arg(self.dir.path().join("names.txt"));
        self.isolate(&mut cmd);
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn dexcrate")
    }

    /// Run dexcrate with the project's names file
    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args, true)
            .stdin(Stdio::null())
            .output()
            .expect("Failed to execute dexcrate")
    }

    /// Run dexcrate against the (unreachable) API listing instead of the file
    pub fn run_without_names(&self, args: &[&str]) -> Output {
        self.command(args, false)
            .stdin(Stdio::null())
            .output()
            .expect("Failed to execute dexcrate")
    }

    /// Run dexcrate feeding `input` on stdin
    pub fn run_with_stdin(&self, args: &[&str], input: &str) -> Output {
        let mut child = self
            .command(args, true)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to spawn dexcrate");
        child
            .stdin
            .take()
            .expect("stdin is piped")
            .write_all(input.as_bytes())
            .expect("Failed to write stdin");
        child.wait_with_output().expect("Failed to wait for dexcrate")
    }

    /// Run and assert a specific exit code
    pub fn run_expect(&self, args: &[&str], expected_code: i32) -> Output {
        let output = self.run(args);
        assert_eq!(
            output.status.code(),
            Some(expected_code),
            "dexcrate {:?} expected exit {} but got {:?}:\nstdout: {}\nstderr: {}",
            args,
            expected_code,
            output.status.code(),
            stdout(&output),
            stderr(&output)
        );
        output
    }
}

// ============================================================================
// Output assertion helpers
// ============================================================================

/// Parse JSON output and return the value
pub fn parse_json(output: &Output) -> serde_json::Value {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::from_str(&stdout).unwrap_or_else(|e| {
        panic!(
            "Invalid JSON output:\n{}\nError: {}\nstderr: {}",
            stdout,
            e,
            String::from_utf8_lossy(&output.stderr)
        )
    })
}

/// Parse a stream of JSON documents from stdout
pub fn parse_json_stream(output: &Output) -> Vec<serde_json::Value> {
    let stdout = String::from_utf8_lossy(&output.stdout);
    serde_json::Deserializer::from_str(&stdout)
        .into_iter::<serde_json::Value>()
        .collect::<Result<_, _>>()
        .unwrap_or_else(|e| panic!("Invalid JSON stream:\n{}\nError: {}", stdout, e))
}

/// Read one pretty-printed JSON document from a live stdout stream
pub fn read_json_doc(reader: &mut impl BufRead) -> serde_json::Value {
    let mut doc = String::new();
    loop {
        let mut line = String::new();
        let n = reader.read_line(&mut line).expect("Failed to read stdout");
        assert!(n > 0, "stdout closed before a full document:\n{}", doc);
        doc.push_str(&line);
        if line.trim_end() == "}" {
            break;
        }
    }
    serde_json::from_str(&doc).unwrap_or_else(|e| panic!("Invalid JSON:\n{}\nError: {}", doc, e))
}

/// A local API that accepts connections and never answers, so every request
/// hangs until the client timeout. Returns the base URL.
pub fn silent_api() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("Failed to bind listener");
    let addr = listener.local_addr().expect("Listener has no address");
    std::thread::spawn(move || {
        let mut held = Vec::new();
        for stream in listener.incoming().flatten() {
            held.push(stream);
        }
    });
    format!("http://{}/api/v2", addr)
}

/// Assert stderr contains a substring
pub fn assert_stderr_contains(output: &Output, expected: &str) {
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains(expected),
        "Expected stderr to contain '{}':\n{}",
        expected,
        stderr
    );
}

/// Get stdout as string
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

/// Get stderr as string
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).to_string()
}
