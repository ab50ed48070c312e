/*
 *  display/drivers/mock.rs
 *
 *  StockFace - worth the glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Mock display driver for testing without hardware
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

use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::config::DisplayConfig;
use crate::constants::{FACE_HEIGHT, FACE_WIDTH};
use crate::display::error::DisplayError;
use crate::display::framebuffer::FrameBuffer;
use crate::display::traits::{DisplayCapabilities, DisplayDriver};

use std::sync::{Arc, Mutex};

/// Mock display driver for testing
///
/// Records every operation and keeps the last frame so tests can look
/// at pixels. Counters live behind a shared handle so they can be read
/// after the driver has been moved into the code under test.
#[derive(Debug, Clone)]
pub struct MockDriver {
    framebuffer: FrameBuffer,
    capabilities: DisplayCapabilities,
    state: Arc<Mutex<MockDriverState>>,
}

/// Internal state for the mock driver (shared for inspection in tests)
#[derive(Debug, Default)]
pub struct MockDriverState {
    pub init_count: usize,
    pub flush_count: usize,
    pub clear_count: usize,
    pub is_initialized: bool,
    /// Total bytes written via write_buffer
    pub bytes_written: usize,

    /// Simulate failures (for error testing)
    pub simulate_flush_failure: bool,
    pub simulate_init_failure: bool,
}

impl MockDriver {
    pub fn new(config: &DisplayConfig) -> Result<Self, DisplayError> {
        let width = config.width.unwrap_or(FACE_WIDTH);
        let height = config.height.unwrap_or(FACE_HEIGHT);

        Ok(Self {
            framebuffer: FrameBuffer::new(width, height),
            capabilities: DisplayCapabilities { width, height, name: "mock" },
            state: Arc::new(Mutex::new(MockDriverState::default())),
        })
    }

    /// Create a mock driver with specific dimensions
    pub fn new_with_size(width: u32, height: u32) -> Result<Self, DisplayError> {
        let config = DisplayConfig {
            width: Some(width),
            height: Some(height),
            ..Default::default()
        };
        Self::new(&config)
    }

    pub fn framebuffer(&self) -> &FrameBuffer {
        &self.framebuffer
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Option<BinaryColor> {
        self.framebuffer.pixel(x, y)
    }

    /// Get reference to state for inspection in tests
    pub fn state(&self) -> Arc<Mutex<MockDriverState>> {
        Arc::clone(&self.state)
    }

    pub fn count_on_pixels(&self) -> usize {
        self.framebuffer.count_on()
    }
}

impl DisplayDriver for MockDriver {
    fn capabilities(&self) -> &DisplayCapabilities {
        &self.capabilities
    }

    fn init(&mut self) -> Result<(), DisplayError> {
        let mut state = self.state.lock().unwrap();

        if state.simulate_init_failure {
            return Err(DisplayError::InitializationFailed("Simulated init failure".to_string()));
        }

        state.init_count += 1;
        state.is_initialized = true;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        let mut state = self.state.lock().unwrap();

        if state.simulate_flush_failure {
            return Err(DisplayError::Other("Simulated flush failure".to_string()));
        }

        state.flush_count += 1;
        Ok(())
    }

    fn clear(&mut self) -> Result<(), DisplayError> {
        {
            let mut state = self.state.lock().unwrap();
            state.clear_count += 1;
        } // Release lock before calling flush

        self.framebuffer.clear_color(BinaryColor::Off);
        self.flush()
    }

    fn write_buffer(&mut self, buffer: &[u8]) -> Result<(), DisplayError> {
        let expected = self.capabilities.frame_bytes();
        if buffer.len() != expected {
            return Err(DisplayError::BufferSizeMismatch { expected, actual: buffer.len() });
        }

        self.state.lock().unwrap().bytes_written += buffer.len();
        self.framebuffer.load_packed_bytes(buffer);
        Ok(())
    }
}

impl DrawTarget for MockDriver {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        self.framebuffer.draw_iter(pixels)
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        self.framebuffer.fill_contiguous(area, colors)
    }
}

impl OriginDimensions for MockDriver {
    fn size(&self) -> Size {
        Size::new(self.capabilities.width, self.capabilities.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::primitives::{Line, PrimitiveStyle};

    #[test]
    fn test_mock_driver_creation() {
        let driver = MockDriver::new(&DisplayConfig::default()).unwrap();
        assert_eq!(driver.dimensions(), (144, 168));
        assert_eq!(driver.count_on_pixels(), 0);
    }

    #[test]
    fn test_mock_driver_init() {
        let mut driver = MockDriver::new_with_size(144, 168).unwrap();

        let state = driver.state();
        assert!(!state.lock().unwrap().is_initialized);

        driver.init().unwrap();

        assert_eq!(state.lock().unwrap().init_count, 1);
        assert!(state.lock().unwrap().is_initialized);
    }

    #[test]
    fn test_mock_driver_drawing() {
        let mut driver = MockDriver::new_with_size(144, 168).unwrap();

        Line::new(Point::new(0, 0), Point::new(10, 10))
            .into_styled(PrimitiveStyle::with_stroke(BinaryColor::On, 1))
            .draw(&mut driver)
            .unwrap();

        assert!(driver.count_on_pixels() > 0);
        assert_eq!(driver.get_pixel(0, 0), Some(BinaryColor::On));
    }

    #[test]
    fn test_mock_driver_clear() {
        let mut driver = MockDriver::new_with_size(144, 168).unwrap();
        driver.write_buffer(&vec![0xFF; 3024]).unwrap();
        assert_eq!(driver.count_on_pixels(), 144 * 168);

        // Clear using DisplayDriver trait (to disambiguate from DrawTarget::clear)
        DisplayDriver::clear(&mut driver).unwrap();

        assert_eq!(driver.count_on_pixels(), 0);
        assert_eq!(driver.state().lock().unwrap().clear_count, 1);
    }

    #[test]
    fn test_mock_driver_simulated_failure() {
        let mut driver = MockDriver::new_with_size(144, 168).unwrap();

        driver.state().lock().unwrap().simulate_flush_failure = true;
        assert!(driver.flush().is_err());

        driver.state().lock().unwrap().simulate_flush_failure = false;
        assert!(driver.flush().is_ok());

        driver.state().lock().unwrap().simulate_init_failure = true;
        assert!(matches!(driver.init(), Err(DisplayError::InitializationFailed(_))));
    }

    #[test]
    fn test_mock_driver_buffer_size_mismatch() {
        let mut driver = MockDriver::new_with_size(144, 168).unwrap();
        let err = driver.write_buffer(&vec![0xFF; 512]).unwrap_err();
        assert!(matches!(err, DisplayError::BufferSizeMismatch { expected: 3024, actual: 512 }));
    }
}
