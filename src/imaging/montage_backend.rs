//! ImageMagick `montage` compositor.
//!
//! Builds one blocking invocation:
//!
//! ```text
//! montage -monitor -tile 29x23 -geometry 600x600+1+1 <tiles...> superposter.png
//! ```
//!
//! Every tile is passed as its own argument, so filenames with spaces are
//! safe. With `-monitor` the child's stderr is inherited so its progress
//! meter reaches the console; otherwise stderr is captured and attached to
//! the error on failure.

use super::backend::{Compositor, CompositorError, validate_params};
use super::params::ComposeParams;
use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::PathBuf;
use std::process::{Command, Stdio};

/// Default program name looked up on `PATH`.
pub const MONTAGE_PROGRAM: &str = "montage";

pub struct MontageCompositor {
    program: String,
    monitor: bool,
}

impl MontageCompositor {
    pub fn new(monitor: bool) -> Self {
        Self::with_program(MONTAGE_PROGRAM, monitor)
    }

    /// Use a different executable, e.g. `magick` wrappers or an absolute path.
    pub fn with_program(program: impl Into<String>, monitor: bool) -> Self {
        Self {
            program: program.into(),
            monitor,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// The exact argument vector passed to the program (program name excluded).
    pub fn args(&self, params: &ComposeParams) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::with_capacity(params.inputs.len() + 6);
        if self.monitor {
            args.push("-monitor".into());
        }
        args.push("-tile".into());
        args.push(params.grid.to_string().into());
        args.push("-geometry".into());
        args.push(params.geometry.to_string().into());
        args.extend(params.inputs.iter().map(|p| p.as_os_str().to_owned()));
        args.push(params.output.as_os_str().to_owned());
        args
    }
}

impl Default for MontageCompositor {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Compositor for MontageCompositor {
    fn name(&self) -> &str {
        &self.program
    }

    fn compose(&self, params: &ComposeParams) -> Result<PathBuf, CompositorError> {
        validate_params(params)?;

        let mut cmd = Command::new(&self.program);
        cmd.args(self.args(params))
            .stdin(Stdio::null())
            .stdout(Stdio::inherit());
        if self.monitor {
            cmd.stderr(Stdio::inherit());
        } else {
            cmd.stderr(Stdio::piped());
        }

        tracing::debug!(
            program = %self.program,
            tiles = params.inputs.len(),
            grid = %params.grid,
            geometry = %params.geometry,
            "invoking montage"
        );

        let out = cmd.output().map_err(|e| match e.kind() {
            ErrorKind::NotFound => CompositorError::Unavailable {
                program: self.program.clone(),
            },
            _ => CompositorError::Io(e),
        })?;

        if !out.status.success() {
            return Err(CompositorError::Failed {
                program: self.program.clone(),
                status: out.status,
                stderr: String::from_utf8_lossy(&out.stderr).into_owned(),
            });
        }

        // Overflowing the grid makes montage write numbered pages instead.
        if !params.output.exists() {
            return Err(CompositorError::MissingOutput(params.output.clone()));
        }

        Ok(params.output.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::backend::tests::sample_params;

    fn strings(args: Vec<OsString>) -> Vec<String> {
        args.into_iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn args_with_monitor() {
        let compositor = MontageCompositor::new(true);
        let args = strings(compositor.args(&sample_params(&["BC0500_b.png", "0250_c.png"])));
        assert_eq!(
            args,
            vec![
                "-monitor",
                "-tile",
                "29x23",
                "-geometry",
                "600x600+1+1",
                "BC0500_b.png",
                "0250_c.png",
                "superposter.png",
            ]
        );
    }

    #[test]
    fn args_without_monitor() {
        let compositor = MontageCompositor::new(false);
        let args = strings(compositor.args(&sample_params(&["0001_x.png"])));
        assert_eq!(args[0], "-tile");
        assert!(!args.iter().any(|a| a == "-monitor"));
    }

    #[test]
    fn names_with_spaces_are_single_args() {
        let compositor = MontageCompositor::new(false);
        let args = strings(compositor.args(&sample_params(&["1611_the tempest.png"])));
        assert!(args.contains(&"1611_the tempest.png".to_string()));
    }

    #[test]
    fn args_are_deterministic() {
        let compositor = MontageCompositor::new(true);
        let params = sample_params(&["BC0500_b.png", "BC0100_a.png", "0250_c.png"]);
        assert_eq!(compositor.args(&params), compositor.args(&params));
    }

    #[test]
    fn missing_program_is_unavailable() {
        let compositor =
            MontageCompositor::with_program("superposter-test-no-such-montage-binary", false);
        let result = compositor.compose(&sample_params(&["0001_x.png"]));
        assert!(matches!(
            result,
            Err(CompositorError::Unavailable { program }) if program == "superposter-test-no-such-montage-binary"
        ));
    }

    #[test]
    fn empty_inputs_rejected_before_spawn() {
        let compositor =
            MontageCompositor::with_program("superposter-test-no-such-montage-binary", false);
        let result = compositor.compose(&sample_params(&[]));
        assert!(matches!(result, Err(CompositorError::NoInputs)));
    }

    #[cfg(unix)]
    #[test]
    fn nonzero_exit_is_failed_with_stderr() {
        // `false` ignores its arguments and exits 1
        let compositor = MontageCompositor::with_program("false", false);
        let result = compositor.compose(&sample_params(&["0001_x.png"]));
        match result {
            Err(CompositorError::Failed { program, status, .. }) => {
                assert_eq!(program, "false");
                assert!(!status.success());
            }
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn success_without_output_is_missing_output() {
        // `true` exits 0 without writing anything
        let tmp = tempfile::TempDir::new().unwrap();
        let mut params = sample_params(&["0001_x.png"]);
        params.output = tmp.path().join("superposter.png");

        let compositor = MontageCompositor::with_program("true", false);
        let result = compositor.compose(&params);
        assert!(matches!(result, Err(CompositorError::MissingOutput(_))));
    }
}
