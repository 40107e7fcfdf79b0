use crate::error::{EnvReplaceError, Result};
use std::io::Write;
use std::path::PathBuf;

/// Write `buffer` to every destination, in order.
///
/// Existing files are overwritten and parent directories are not created.
/// The first failure stops the fan-out; destinations written before it stay
/// on disk. With a trace sink, one line per destination reports `count`, the
/// number of substitutions made in the source.
pub fn write_destinations(
	buffer: &[u8],
	destinations: &[PathBuf],
	count: usize,
	mut trace: Option<&mut dyn Write>,
) -> Result<()> {
	for dest in destinations {
		std::fs::write(dest, buffer).map_err(|source| EnvReplaceError::DestinationWrite {
			path: dest.clone(),
			source,
		})?;
		log::debug!("wrote {} bytes to {}", buffer.len(), dest.display());

		if let Some(out) = trace.as_mut() {
			writeln!(
				out,
				"  Wrote {} replaced variables to destination '{}'",
				count,
				dest.display()
			)
			.map_err(EnvReplaceError::Output)?;
		}
	}

	Ok(())
}
