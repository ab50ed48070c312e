/*
 *  display/mod.rs
 *
 *  StockFace - worth the glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Display subsystem: regions, components, framebuffer and drivers
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

// Core trait definitions
pub mod traits;
pub mod error;
pub mod framebuffer;
pub mod color;

// Display drivers
pub mod drivers;

// Face geometry
pub mod layout;
pub mod region;
pub mod state;

// Watch face surface
pub mod manager;

// UI components
pub mod components;

// Re-exports for convenience
pub use traits::{DisplayCapabilities, DisplayDriver};
pub use error::DisplayError;
pub use framebuffer::FrameBuffer;
pub use color::Color;
pub use layout::{FaceLayout, FontSize};
pub use region::Region;
pub use state::DisplayState;
pub use manager::WatchFace;
pub use drivers::snapshot::SnapshotDriver;
