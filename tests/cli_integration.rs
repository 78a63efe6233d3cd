//! End-to-end tests for the git-ff and git-recent binaries.

use std::path::Path;
use std::process::Command as StdCommand;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

struct TestRepo {
    dir: TempDir,
    home: TempDir,
}

impl TestRepo {
    /// `main` (active) and `feature` at the initial commit, `next` one commit
    /// ahead, `topic` diverged from the initial commit.
    fn new() -> Self {
        let dir = TempDir::new().expect("failed to create temp dir");
        let home = TempDir::new().expect("failed to create temp home");
        let repo = Self { dir, home };

        repo.git(&["init", "-q", "-b", "main"]);
        repo.git(&["config", "user.email", "test@example.com"]);
        repo.git(&["config", "user.name", "Test User"]);
        repo.git(&["config", "commit.gpgsign", "false"]);

        repo.commit_at("README.md", "# Test Repo\n", "Initial commit", "2024-01-01T10:00:00Z");
        repo.git(&["branch", "feature"]);
        repo.git(&["checkout", "-q", "-b", "topic"]);
        repo.commit_at("b.txt", "topic\n", "topic work", "2024-01-02T10:00:00Z");
        repo.git(&["checkout", "-q", "-b", "next", "main"]);
        repo.commit_at("a.txt", "next\n", "add a", "2024-01-03T10:00:00Z");
        repo.git(&["checkout", "-q", "main"]);

        repo
    }

    fn path(&self) -> &Path {
        self.dir.path()
    }

    fn git(&self, args: &[&str]) -> String {
        let output = StdCommand::new("git")
            .args(args)
            .current_dir(self.path())
            .output()
            .expect("git command failed");
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8(output.stdout).unwrap().trim().to_string()
    }

    fn commit_at(&self, path: &str, content: &str, message: &str, date: &str) {
        std::fs::write(self.path().join(path), content).unwrap();
        self.git(&["add", path]);
        let output = StdCommand::new("git")
            .args(["commit", "-q", "-m", message])
            .env("GIT_AUTHOR_DATE", date)
            .env("GIT_COMMITTER_DATE", date)
            .current_dir(self.path())
            .output()
            .expect("git commit failed");
        assert!(output.status.success());
    }

    fn rev(&self, rev: &str) -> String {
        self.git(&["rev-parse", rev])
    }

    /// A binary invocation isolated from the user's configuration.
    fn cmd(&self, bin: &str) -> Command {
        let mut cmd = Command::cargo_bin(bin).unwrap();
        cmd.current_dir(self.path())
            .env_remove("GIT_FF_CONFIG")
            .env("HOME", self.home.path())
            .env("XDG_CONFIG_HOME", self.home.path().join(".config"));
        cmd
    }

    fn ff(&self) -> Command {
        self.cmd("git-ff")
    }
}

fn ff_outside_repo() -> (TempDir, Command) {
    let dir = TempDir::new().unwrap();
    let mut cmd = Command::cargo_bin("git-ff").unwrap();
    cmd.current_dir(dir.path()).env_remove("GIT_FF_CONFIG");
    (dir, cmd)
}

mod usage {
    use super::*;

    #[test]
    fn help_exits_zero() {
        let (_dir, mut cmd) = ff_outside_repo();
        cmd.arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("--list"));
    }

    #[test]
    fn missing_target() {
        let (_dir, mut cmd) = ff_outside_repo();
        cmd.assert()
            .code(1)
            .stderr(predicate::str::contains("need a fast-forward target"));
    }

    #[test]
    fn filter_without_list_fails_before_opening_repo() {
        // Not a repository: the flag error must win over the open error
        let (_dir, mut cmd) = ff_outside_repo();
        cmd.args(["--only", "main"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("--only and --not require --list"))
            .stderr(predicate::str::contains("repository").not());
    }

    #[test]
    fn all_with_branches() {
        let (_dir, mut cmd) = ff_outside_repo();
        cmd.args(["--all", "feature", "main"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("--all cannot be combined with explicit branches"));
    }

    #[test]
    fn all_with_list() {
        let (_dir, mut cmd) = ff_outside_repo();
        cmd.args(["--all", "--list", "main"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("--all cannot be combined with --list"));
    }

    #[test]
    fn unknown_flag_exits_one() {
        let (_dir, mut cmd) = ff_outside_repo();
        cmd.args(["--bogus", "main"]).assert().code(1);
    }

    #[test]
    fn not_a_repository() {
        let (_dir, mut cmd) = ff_outside_repo();
        cmd.arg("main")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Failed to open repository"));
    }
}

mod list {
    use super::*;

    #[test]
    fn shows_every_local_branch() {
        let repo = TestRepo::new();
        repo.ff()
            .args(["--list", "next"])
            .assert()
            .success()
            .stdout(
                "  feature  fast-forward to next\n\
                 * main     fast-forward to next\n  \
                 next     already on next\n  \
                 topic    non-fast-forward to next\n",
            );
    }

    #[test]
    fn only_prints_names() {
        let repo = TestRepo::new();
        repo.ff()
            .args(["-l", "-o", "next"])
            .assert()
            .success()
            .stdout("feature\nmain\nnext\n");
    }

    #[test]
    fn not_prints_names() {
        let repo = TestRepo::new();
        repo.ff()
            .args(["-l", "-n", "next"])
            .assert()
            .success()
            .stdout("topic\n");
    }

    #[test]
    fn named_branches_and_remotes() {
        let repo = TestRepo::new();
        let next = repo.rev("next");
        repo.git(&["update-ref", "refs/remotes/origin/next", &next]);

        repo.ff()
            .args(["-l", "-r", "topic", "origin/next", "next"])
            .assert()
            .success()
            .stdout(
                "  topic        non-fast-forward to next\n  \
                 origin/next  already on next\n",
            );
    }

    #[test]
    fn does_not_change_anything() {
        let repo = TestRepo::new();
        let before = repo.rev("feature");
        repo.ff().args(["--list", "next"]).assert().success();
        assert_eq!(repo.rev("feature"), before);
    }
}

mod apply {
    use super::*;

    #[test]
    fn fast_forwards_named_branch() {
        let repo = TestRepo::new();
        let old = repo.rev("feature");
        let new = repo.rev("next");

        repo.ff()
            .args(["feature", "next"])
            .assert()
            .success()
            .stdout(format!(
                "fast-forwarded feature to next ({}..{})\n",
                &old[..7],
                &new[..7]
            ));
        assert_eq!(repo.rev("feature"), new);
    }

    #[test]
    fn current_branch_by_default() {
        let repo = TestRepo::new();
        repo.ff()
            .arg("next")
            .assert()
            .success()
            .stdout(predicate::str::starts_with("fast-forwarded main to next"));
        assert_eq!(repo.rev("main"), repo.rev("next"));
        assert!(repo.path().join("a.txt").exists());
    }

    #[test]
    fn reports_skipped_branches_and_succeeds() {
        let repo = TestRepo::new();
        repo.ff()
            .args(["topic", "next", "ghost", "next"])
            .assert()
            .success()
            .stdout("branch next already on next\n")
            .stderr(predicate::str::contains("not possible to fast-forward topic"))
            .stderr(predicate::str::contains("warning: no such branch: ghost"));
    }

    #[test]
    fn checkout_conflict_is_reported() {
        let repo = TestRepo::new();
        std::fs::write(repo.path().join("a.txt"), "untracked in the way\n").unwrap();
        let main = repo.rev("main");

        repo.ff()
            .arg("next")
            .assert()
            .success()
            .stderr(predicate::str::contains(
                "cannot fast-forward main, checkout conflict",
            ))
            .stderr(predicate::str::contains("  a.txt"));
        assert_eq!(repo.rev("main"), main);
    }

    #[test]
    fn quiet_prints_nothing() {
        let repo = TestRepo::new();
        repo.ff()
            .args(["-q", "--all", "next"])
            .assert()
            .success()
            .stdout("")
            .stderr("");
        assert_eq!(repo.rev("feature"), repo.rev("next"));
    }

    #[test]
    fn unresolved_target() {
        let repo = TestRepo::new();
        repo.ff()
            .arg("nowhere")
            .assert()
            .code(1)
            .stderr(predicate::str::contains("error: can't resolve 'nowhere'"));
    }

    #[test]
    fn debug_reports_resolution() {
        let repo = TestRepo::new();
        repo.ff()
            .args(["--debug", "--list", "next"])
            .assert()
            .success()
            .stderr(predicate::str::contains("[debug] target 'next' resolved via local branch next"));
    }
}

mod config {
    use super::*;

    fn write_repo_config(repo: &TestRepo, contents: &str) {
        let dir = repo.path().join(".git/git-ff");
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("config.toml"), contents).unwrap();
    }

    #[test]
    fn abbrev_from_repo_config() {
        let repo = TestRepo::new();
        write_repo_config(&repo, "abbrev = 12\n");
        let old = repo.rev("feature");
        let new = repo.rev("next");

        repo.ff()
            .args(["feature", "next"])
            .assert()
            .success()
            .stdout(format!(
                "fast-forwarded feature to next ({}..{})\n",
                &old[..12],
                &new[..12]
            ));
    }

    #[test]
    fn global_config_from_env() {
        let repo = TestRepo::new();
        let path = repo.home.path().join("custom.toml");
        std::fs::write(&path, "abbrev = 9\n").unwrap();
        let new = repo.rev("next");

        repo.ff()
            .env("GIT_FF_CONFIG", &path)
            .args(["feature", "next"])
            .assert()
            .success()
            .stdout(predicate::str::contains(format!("..{})", &new[..9])));
    }

    #[test]
    fn invalid_config_is_fatal() {
        let repo = TestRepo::new();
        write_repo_config(&repo, "abbrev = 2\n");
        let before = repo.rev("feature");

        repo.ff()
            .args(["feature", "next"])
            .assert()
            .code(1)
            .stderr(predicate::str::contains("Failed to load configuration"));
        assert_eq!(repo.rev("feature"), before);
    }
}

mod recent {
    use super::*;

    #[test]
    fn newest_first() {
        let repo = TestRepo::new();
        let output = repo.cmd("git-recent").assert().success().get_output().stdout.clone();
        let stdout = String::from_utf8(output).unwrap();
        let names: Vec<&str> = stdout
            .lines()
            .map(|l| l[2..].split_whitespace().next().unwrap())
            .collect();

        // next (Jan 3), topic (Jan 2), then feature and main tie on Jan 1
        assert_eq!(names, ["next", "topic", "feature", "main"]);
        assert!(stdout.lines().any(|l| l.starts_with("* main")));
    }

    #[test]
    fn remote_filter() {
        let repo = TestRepo::new();
        let next = repo.rev("next");
        repo.git(&["update-ref", "refs/remotes/origin/next", &next]);
        repo.git(&["update-ref", "refs/remotes/upstream/main", "main"]);

        repo.cmd("git-recent")
            .args(["-r", "origin"])
            .assert()
            .success()
            .stdout(predicate::str::starts_with("  origin/next  ("))
            .stdout(predicate::str::contains("upstream").not());
    }

    #[test]
    fn all_conflicts_with_remote() {
        let repo = TestRepo::new();
        repo.cmd("git-recent")
            .args(["--all", "--remote", "origin"])
            .assert()
            .code(1);
    }
}
