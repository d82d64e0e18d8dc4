use std::process::Command;

use anyhow::{Result, anyhow};

/// External mail sync tool ("mbsync -aq" unless configured otherwise).
/// Whatever it prints is ignored; only the exit status is checked.
pub struct SyncTool {
    program: String,
    args: Vec<String>,
}

impl SyncTool {
    pub fn from_command(command: &[String]) -> Result<Self> {
        let (program, args) = command
            .split_first()
            .ok_or_else(|| anyhow!("sync_command is empty"))?;
        Ok(Self {
            program: program.clone(),
            args: args.to_vec(),
        })
    }

    /// One blocking run; stdout/stderr captured and discarded.
    pub fn run(&self) -> Result<()> {
        let out = Command::new(&self.program)
            .args(&self.args)
            .output()
            .map_err(|e| anyhow!("failed to run {}: {e}", self.program))?;
        if !out.status.success() {
            return Err(anyhow!("{} exited with {}", self.program, out.status));
        }
        Ok(())
    }
}
