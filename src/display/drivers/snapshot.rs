/*
 *  display/drivers/snapshot.rs
 *
 *  StockFace - worth the glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  PBM snapshot driver, the face as a file for desktop runs
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use log::{debug, info};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::display::error::DisplayError;
use crate::display::framebuffer::FrameBuffer;
use crate::display::traits::{DisplayCapabilities, DisplayDriver};

/// Writes every flushed frame to a plain PBM file.
///
/// The file is replaced atomically so a viewer polling it never sees a
/// half written image.
#[derive(Debug)]
pub struct SnapshotDriver {
    path: PathBuf,
    capabilities: DisplayCapabilities,
    frame: FrameBuffer,
    frames_written: u64,
}

impl SnapshotDriver {
    pub fn new(path: impl Into<PathBuf>, width: u32, height: u32) -> Self {
        Self {
            path: path.into(),
            capabilities: DisplayCapabilities { width, height, name: "pbm-snapshot" },
            frame: FrameBuffer::new(width, height),
            frames_written: 0,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn frames_written(&self) -> u64 {
        self.frames_written
    }

    fn write_file(&self) -> Result<(), DisplayError> {
        let tmp = self.path.with_extension("pbm.tmp");
        {
            let mut out = BufWriter::new(File::create(&tmp)?);
            self.frame.write_pbm(&mut out)?;
            out.flush()?;
        }
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl DisplayDriver for SnapshotDriver {
    fn capabilities(&self) -> &DisplayCapabilities {
        &self.capabilities
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            if !dir.is_dir() {
                return Err(DisplayError::InitializationFailed(format!(
                    "snapshot directory {} does not exist",
                    dir.display()
                )));
            }
        }
        info!("writing face snapshots to {}", self.path.display());
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        self.write_file()?;
        self.frames_written += 1;
        debug!("snapshot {} written", self.frames_written);
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        self.frame.clear_color(embedded_graphics::pixelcolor::BinaryColor::Off);
        self.flush()
    }

    fn write_buffer(&mut self, buffer: &[u8]) -> Result<(), DisplayError> {
        let expected = self.capabilities.frame_bytes();
        if buffer.len() != expected {
            return Err(DisplayError::BufferSizeMismatch { expected, actual: buffer.len() });
        }
        self.frame.load_packed_bytes(buffer);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::process;

    fn scratch(name: &str) -> PathBuf {
        env::temp_dir().join(format!("stockface-{}-{}.pbm", process::id(), name))
    }

    #[test]
    fn test_flush_writes_pbm() {
        let path = scratch("flush");
        let mut driver = SnapshotDriver::new(&path, 8, 2);
        driver.init().unwrap();
        driver.write_buffer(&[0b0000_0001, 0xFF]).unwrap();
        driver.flush().unwrap();

        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text, "P1\n8 2\n0 1 1 1 1 1 1 1\n0 0 0 0 0 0 0 0\n");
        assert_eq!(driver.frames_written(), 1);
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_size_checked() {
        let mut driver = SnapshotDriver::new(scratch("size"), 144, 168);
        assert!(matches!(
            driver.write_buffer(&[0; 10]),
            Err(DisplayError::BufferSizeMismatch { expected: 3024, actual: 10 })
        ));
    }

    #[test]
    fn test_missing_directory() {
        let mut driver = SnapshotDriver::new("/definitely/not/here/face.pbm", 144, 168);
        assert!(matches!(driver.init(), Err(DisplayError::InitializationFailed(_))));
    }
}
