//! [`ScriptedRunner`]: a [`ProcessRunner`] that replays canned results.

use std::sync::Mutex;

use async_trait::async_trait;
use tm_client::{Error, ProcessOutput, ProcessRunner, Result};

/// What the scripted process should do.
#[derive(Debug, Clone)]
enum Script {
    Exit(ProcessOutput),
    Missing,
}

/// Replays one scripted result and records every invocation.
#[derive(Debug)]
pub struct ScriptedRunner {
    script: Script,
    calls: Mutex<Vec<(String, Vec<String>)>>,
}

impl ScriptedRunner {
    /// Exit with `code`, printing `stdout`.
    pub fn exits(code: i32, stdout: &str) -> Self {
        Self::with_output(ProcessOutput {
            code: Some(code),
            stdout: stdout.to_string(),
            stderr: String::new(),
        })
    }

    /// Exit with `code`, printing `stderr`.
    pub fn fails(code: i32, stderr: &str) -> Self {
        Self::with_output(ProcessOutput {
            code: Some(code),
            stdout: String::new(),
            stderr: stderr.to_string(),
        })
    }

    /// Behave as though the program is not installed.
    pub fn missing() -> Self {
        Self {
            script: Script::Missing,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn with_output(output: ProcessOutput) -> Self {
        Self {
            script: Script::Exit(output),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every `(program, args)` pair seen so far.
    pub fn calls(&self) -> Vec<(String, Vec<String>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProcessRunner for ScriptedRunner {
    async fn run(&self, program: &str, args: &[String]) -> Result<ProcessOutput> {
        self.calls
            .lock()
            .unwrap()
            .push((program.to_string(), args.to_vec()));

        match &self.script {
            Script::Exit(output) => Ok(output.clone()),
            Script::Missing => Err(Error::ToolNotFound {
                tool: program.to_string(),
            }),
        }
    }
}
