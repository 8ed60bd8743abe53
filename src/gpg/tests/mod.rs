// Copyright 2025 bakri (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Key source tests
//!
//! Uses fixed listings for keyring assembly and harmless system
//! programs (`true`, `false`) in place of gpg for process handling.

use std::cell::RefCell;
#[cfg(unix)]
use std::io::Write;
#[cfg(unix)]
use std::path::{Path, PathBuf};
#[cfg(unix)]
use std::process::{Command, Stdio};

use tempfile::TempDir;

use crate::core::{KeyKind, ListedKey};
use crate::gpg::{load_keyring, GpgCli, KeySource, KeySourceError};

/// Key source with canned results, recording which kinds were requested
struct FixedSource {
    public: Result<Vec<ListedKey>, ()>,
    secret: Result<Vec<ListedKey>, ()>,
    calls: RefCell<Vec<KeyKind>>,
}

impl FixedSource {
    fn new(public: Result<Vec<ListedKey>, ()>, secret: Result<Vec<ListedKey>, ()>) -> Self {
        Self {
            public,
            secret,
            calls: RefCell::new(Vec::new()),
        }
    }
}

impl KeySource for FixedSource {
    fn list_keys(&self, kind: KeyKind) -> Result<Vec<ListedKey>, KeySourceError> {
        self.calls.borrow_mut().push(kind);

        let result = match kind {
            KeyKind::Public => &self.public,
            KeyKind::Secret => &self.secret,
        };

        result.clone().map_err(|_| KeySourceError::ExecutionFailed {
            command: format!("gpg {}", kind.list_flag()),
            status: "exit status: 2".to_string(),
        })
    }
}

#[test]
fn test_load_keyring_lists_public_then_secret() {
    let source = FixedSource::new(
        Ok(vec![
            ListedKey::new("AAAA1111", "Alice <a@x.com>"),
            ListedKey::new("BBBB2222", "Bob <b@x.com>"),
        ]),
        Ok(vec![ListedKey::new("AAAA1111", "Alice <a@x.com>")]),
    );

    let keyring = load_keyring(&source).unwrap();

    assert_eq!(*source.calls.borrow(), vec![KeyKind::Public, KeyKind::Secret]);
    assert_eq!(keyring.public.len(), 2);
    assert_eq!(keyring.secret.len(), 1);
    assert!(keyring.is_personal("AAAA1111"));
}

#[test]
fn test_public_failure_skips_secret_listing() {
    let source = FixedSource::new(Err(()), Ok(Vec::new()));

    let result = load_keyring(&source);

    assert!(matches!(result, Err(KeySourceError::ExecutionFailed { .. })));
    assert_eq!(*source.calls.borrow(), vec![KeyKind::Public]);
}

#[test]
fn test_secret_failure_discards_public_keys() {
    let source = FixedSource::new(Ok(vec![ListedKey::new("AAAA1111", "Alice")]), Err(()));

    assert!(load_keyring(&source).is_err(), "No partial keyring on failure");
}

#[test]
fn test_args_for_each_kind() {
    let gpg = GpgCli::new("gpg");
    assert_eq!(gpg.args(KeyKind::Public), vec!["--list-keys", "--with-colons"]);
    assert_eq!(
        gpg.args(KeyKind::Secret),
        vec!["--list-secret-keys", "--with-colons"]
    );
}

#[test]
fn test_args_with_homedir() {
    let gpg = GpgCli::new("gpg").with_homedir("/tmp/gnupg-test");
    assert_eq!(
        gpg.args(KeyKind::Public),
        vec!["--homedir", "/tmp/gnupg-test", "--list-keys", "--with-colons"]
    );
}

#[test]
fn test_missing_executable_is_tool_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("no-such-gpg");

    let result = GpgCli::new(&missing).list_keys(KeyKind::Public);

    match result {
        Err(KeySourceError::ToolNotFound(path)) => assert_eq!(path, missing),
        other => panic!("Expected ToolNotFound, got {:?}", other),
    }
}

#[cfg(unix)]
#[test]
fn test_nonzero_exit_is_execution_failed() {
    let result = GpgCli::new("false").list_keys(KeyKind::Secret);

    assert!(
        matches!(result, Err(KeySourceError::ExecutionFailed { .. })),
        "Nonzero exit should be ExecutionFailed, got {:?}",
        result
    );
}

#[cfg(unix)]
#[test]
fn test_empty_output_is_empty_listing() {
    let keys = GpgCli::new("true").list_keys(KeyKind::Public).unwrap();
    assert!(keys.is_empty());
}

/// Writes an executable shell script through `sh`
///
/// The file is created in a child process so no write handle to it is
/// ever open in this process, where a concurrently spawned test could
/// inherit it and make the later exec fail with ETXTBSY.
#[cfg(unix)]
fn write_script(dir: &Path, body: &str) -> PathBuf {
    let path = dir.join("fake-gpg");

    let mut child = Command::new("sh")
        .arg("-c")
        .arg("cat > \"$0\" && chmod 755 \"$0\"")
        .arg(&path)
        .stdin(Stdio::piped())
        .spawn()
        .unwrap();
    child.stdin.take().unwrap().write_all(body.as_bytes()).unwrap();
    assert!(child.wait().unwrap().success());

    path
}

#[cfg(unix)]
#[test]
fn test_truncated_record_is_unknown() {
    let temp_dir = TempDir::new().unwrap();
    let script = write_script(temp_dir.path(), "#!/bin/sh\necho 'pub:u:1'\n");

    let result = GpgCli::new(&script).list_keys(KeyKind::Public);

    match result {
        Err(KeySourceError::Unknown { kind, message }) => {
            assert_eq!(kind, KeyKind::Public);
            assert!(message.contains("missing field 4"), "Got: {}", message);
        }
        other => panic!("Expected Unknown, got {:?}", other),
    }
}

#[cfg(unix)]
#[test]
fn test_non_utf8_output_is_unknown() {
    let temp_dir = TempDir::new().unwrap();
    let script = write_script(
        temp_dir.path(),
        "#!/bin/sh\nprintf 'sec:u:255:22:AAAA1111:::::::\\nuid:u::::::::\\377\\376:\\n'\n",
    );

    let result = GpgCli::new(&script).list_keys(KeyKind::Secret);

    match result {
        Err(KeySourceError::Unknown { kind, message }) => {
            assert_eq!(kind, KeyKind::Secret);
            assert!(message.contains("not valid UTF-8"), "Got: {}", message);
        }
        other => panic!("Expected Unknown, got {:?}", other),
    }
}
