//! `padctl replay`: feed a capture through the lifecycle manager.

use std::path::Path;

use anyhow::{Context, Result};

use crate::capture::Capture;
use crate::output;
use crate::replay;

pub fn execute(path: &Path, json: bool) -> Result<()> {
    let capture =
        Capture::load(path).with_context(|| format!("reading capture {}", path.display()))?;
    let outcome = replay::run(capture)?;
    output::print_replay(&outcome, json);
    Ok(())
}
