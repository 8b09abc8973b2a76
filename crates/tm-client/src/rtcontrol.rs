//! rTorrent load state through pyrocore's `rtcontrol`

use std::path::Path;

use async_trait::async_trait;
use tm_core::MatchConfig;
use tm_fs::normalize_lexically;

use crate::process::{ProcessOutput, ProcessRunner, SystemRunner};
use crate::source::{LoadStateSource, ProcessOutcome};
use crate::Error;

/// Queries rTorrent for the descriptors downloading into a directory.
#[derive(Debug, Clone)]
pub struct RtControl<R = SystemRunner> {
    runner: R,
    program: String,
    empty_result_code: i32,
}

impl RtControl<SystemRunner> {
    /// A client that runs the configured program on the host.
    pub fn from_config(config: &MatchConfig) -> Self {
        Self::with_runner(SystemRunner::new(config.query_timeout()), config)
    }
}

impl<R: ProcessRunner> RtControl<R> {
    pub fn with_runner(runner: R, config: &MatchConfig) -> Self {
        Self {
            runner,
            program: config.control_program.clone(),
            empty_result_code: config.empty_result_code,
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Arguments selecting torrents stored at `data_dir` itself (single-file
    /// torrents) or directly below it (multi-file torrents), printing only
    /// the descriptor path of each.
    pub fn query_args(data_dir: &Path) -> Vec<String> {
        let dir = normalize_lexically(data_dir);
        let dir = dir.to_string_lossy();
        let dir = match dir.trim_end_matches('/') {
            "" => "/",
            trimmed => trimmed,
        };

        vec![
            "--quiet".to_string(),
            "-o".to_string(),
            "metafile".to_string(),
            format!("directory={dir}"),
            "OR".to_string(),
            format!("directory={dir}/*"),
        ]
    }

    /// Map a finished process onto an outcome.
    fn interpret(&self, output: ProcessOutput) -> ProcessOutcome {
        match output.code {
            Some(code) if code == 0 || code == self.empty_result_code => {
                ProcessOutcome::Success(parse_listing(&output.stdout))
            }
            code => ProcessOutcome::Failed {
                code,
                message: output.message().to_string(),
            },
        }
    }
}

#[async_trait]
impl<R: ProcessRunner> LoadStateSource for RtControl<R> {
    async fn fetch(&self, data_dir: &Path) -> ProcessOutcome {
        tracing::info!("Getting a list of file/folder names from rTorrent...");
        let args = Self::query_args(data_dir);
        tracing::debug!(program = %self.program, ?args, "querying load state");

        match self.runner.run(&self.program, &args).await {
            Ok(output) => self.interpret(output),
            Err(Error::ToolNotFound { tool }) => ProcessOutcome::Unavailable { tool },
            Err(err) => ProcessOutcome::Failed {
                code: None,
                message: err.to_string(),
            },
        }
    }
}

/// Split `rtcontrol` output into descriptor paths.
///
/// rTorrent renders some paths with a doubled leading separator; exactly two
/// leading slashes are reduced to one. Blank lines are dropped.
pub fn parse_listing(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty())
        .map(|line| match line.strip_prefix("//") {
            Some(rest) if !rest.starts_with('/') => format!("/{rest}"),
            _ => line.to_string(),
        })
        .collect()
}
