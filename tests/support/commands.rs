//! Command helper methods for Test.

use super::Test;
use assert_cmd::Command;
use std::process::Output;

impl Test {
    /// Create an envsync command with an isolated environment.
    ///
    /// HOME points at the temporary home, the working directory at the
    /// project, colors are off and no outer config or log filter leaks in.
    pub fn cmd(&self) -> Command {
        #[allow(deprecated)]
        let mut cmd = Command::cargo_bin("envsync").expect("failed to find envsync binary");
        cmd.env("HOME", self.home.path());
        cmd.env("USERPROFILE", self.home.path());
        cmd.env("NO_COLOR", "1");
        cmd.env_remove("ENVSYNC_CONFIG");
        cmd.env_remove("ENVSYNC_LOG");
        cmd.current_dir(self.dir.path());
        cmd
    }

    fn run(&self, args: &[&str]) -> Output {
        self.cmd()
            .args(args)
            .output()
            .expect("failed to run envsync")
    }

    pub fn init(&self, project: &str) -> Output {
        self.run(&["init", "--project", project])
    }

    pub fn plan(&self) -> Output {
        self.run(&["plan"])
    }

    pub fn apply(&self) -> Output {
        self.run(&["apply", "--yes"])
    }

    pub fn refresh(&self) -> Output {
        self.run(&["refresh"])
    }

    pub fn destroy(&self) -> Output {
        self.run(&["destroy", "--yes"])
    }

    pub fn status(&self) -> Output {
        self.run(&["status"])
    }
}
