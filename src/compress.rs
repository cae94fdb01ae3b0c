//! Lossless PNG post-pass through an external optimizer.

use crate::config::CompressionTier;
use std::{
    io,
    path::{Path, PathBuf},
    process::Command,
};
use tracing::{debug, info, warn};

/// Something that can losslessly shrink PNG files in place.
pub trait Optimizer {
    /// Optimize every file in `paths` at `level` (1 = fastest, 3 = smallest).
    fn optimize(&self, paths: &[PathBuf], level: u8) -> io::Result<()>;
}

/// Runs the `optipng` executable once for a whole batch of files.
#[derive(Debug, Clone)]
pub struct OptiPng {
    program: PathBuf,
}

impl OptiPng {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }
}

impl Default for OptiPng {
    fn default() -> Self {
        Self::new("optipng")
    }
}

impl Optimizer for OptiPng {
    fn optimize(&self, paths: &[PathBuf], level: u8) -> io::Result<()> {
        let output = Command::new(&self.program)
            .arg(format!("-o{level}"))
            .args(paths)
            .output()?;

        if output.status.success() {
            Ok(())
        } else {
            Err(io::Error::new(
                io::ErrorKind::Other,
                format!(
                    "{} exited with {}: {}",
                    self.program.display(),
                    output.status,
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            ))
        }
    }
}

/// Compress `batch` in a single optimizer call.
///
/// Returns the level used, or `None` when nothing was run because the tier is
/// [`CompressionTier::None`] or the batch is empty. Optimizer failures are
/// logged and otherwise ignored; the uncompressed files remain valid output.
pub fn compress(
    optimizer: &dyn Optimizer,
    batch: &[PathBuf],
    tier: CompressionTier,
) -> Option<u8> {
    let level = tier.optimizer_level()?;
    if batch.is_empty() {
        debug!("no PNG files to compress");
        return None;
    }

    info!("Compressing {} PNG files at level {level}...", batch.len());
    match optimizer.optimize(batch, level) {
        Ok(()) => info!("✓ Compressed {} PNG files", batch.len()),
        Err(err) => warn!("PNG compression skipped: {err}"),
    }

    Some(level)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        calls: RefCell<Vec<(Vec<PathBuf>, u8)>>,
        fail: bool,
    }

    impl Optimizer for Recorder {
        fn optimize(&self, paths: &[PathBuf], level: u8) -> io::Result<()> {
            self.calls.borrow_mut().push((paths.to_vec(), level));
            if self.fail {
                Err(io::Error::new(io::ErrorKind::NotFound, "optipng not found"))
            } else {
                Ok(())
            }
        }
    }

    fn batch() -> Vec<PathBuf> {
        vec![PathBuf::from("a.png"), PathBuf::from("b c.png")]
    }

    #[test]
    fn test_single_call_per_batch() {
        let recorder = Recorder::default();
        assert_eq!(compress(&recorder, &batch(), CompressionTier::High), Some(3));

        let calls = recorder.calls.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0], (batch(), 3));
    }

    #[test]
    fn test_tier_levels() {
        for (tier, level) in [
            (CompressionTier::Low, 1),
            (CompressionTier::Medium, 2),
            (CompressionTier::High, 3),
        ] {
            let recorder = Recorder::default();
            assert_eq!(compress(&recorder, &batch(), tier), Some(level));
            assert_eq!(recorder.calls.borrow()[0].1, level);
        }
    }

    #[test]
    fn test_none_tier_and_empty_batch_skip_optimizer() {
        let recorder = Recorder::default();
        assert_eq!(compress(&recorder, &batch(), CompressionTier::None), None);
        assert_eq!(compress(&recorder, &[], CompressionTier::Medium), None);
        assert!(recorder.calls.borrow().is_empty());
    }

    #[test]
    fn test_optimizer_failure_is_not_fatal() {
        let recorder = Recorder {
            fail: true,
            ..Default::default()
        };
        assert_eq!(compress(&recorder, &batch(), CompressionTier::Low), Some(1));
    }

    #[test]
    fn test_missing_program_reports_error() {
        let optipng = OptiPng::new("definitely-not-an-installed-optimizer");
        assert!(optipng.optimize(&batch(), 2).is_err());
    }
}
