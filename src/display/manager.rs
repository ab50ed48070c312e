/*
 *  display/manager.rs
 *
 *  StockFace - worth the glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Watch face surface: region lifecycle, updates and rendering
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
use embedded_graphics::primitives::{PrimitiveStyle, RoundedRectangle};
use log::{debug, info, warn};

use crate::assets::{Bitmap, ResourceId, ResourceStore};
use crate::clock::TimeText;
use crate::display::components::{ClockDisplay, MoodDisplay, StockDisplay, WeatherDisplay};
use crate::display::error::DisplayError;
use crate::display::framebuffer::FrameBuffer;
use crate::display::layout::FaceLayout;
use crate::display::state::DisplayState;
use crate::display::traits::DisplayDriver;
use crate::message::decoder::InboxUpdate;
use crate::mood::Mood;

/// Everything that exists only while the face is loaded.
struct LoadedFace {
    background: Bitmap,
    clock: ClockDisplay,
    weather: WeatherDisplay,
    stock: StockDisplay,
    mood: MoodDisplay,
}

/// The watch face window
///
/// Owns the background, the mood icon and every text region. All state
/// changes go through here and mark the face dirty, `present` then pushes
/// a fresh frame to a driver.
pub struct WatchFace {
    layout: FaceLayout,
    store: ResourceStore,
    loaded: Option<LoadedFace>,
    frame: FrameBuffer,
    dirty: bool,
}

impl WatchFace {
    pub fn new(layout: FaceLayout) -> Self {
        Self::with_store(layout, ResourceStore::new())
    }

    pub fn with_store(layout: FaceLayout, store: ResourceStore) -> Self {
        let frame = FrameBuffer::new(layout.width, layout.height);
        Self {
            layout,
            store,
            loaded: None,
            frame,
            dirty: false,
        }
    }

    /// Acquire the background and the initial icon and create every region.
    /// Loading twice keeps the existing surface.
    pub fn load(&mut self) {
        if self.loaded.is_some() {
            warn!("watch face already loaded");
            return;
        }
        let layout = &self.layout;
        self.loaded = Some(LoadedFace {
            background: self.store.load_bitmap(ResourceId::ImageBackground),
            clock: ClockDisplay::new(layout.time.clone()),
            weather: WeatherDisplay::new(layout.weather.clone()),
            stock: StockDisplay::new(layout.stock.clone()),
            mood: MoodDisplay::new(layout.mood_icon.clone(), layout.alarm.clone(), &self.store),
        });
        self.dirty = true;
        info!("watch face loaded ({}x{})", self.layout.width, self.layout.height);
    }

    /// Release every resource. A no-op when not loaded.
    pub fn unload(&mut self) {
        if self.loaded.take().is_some() {
            self.dirty = true;
            info!("watch face unloaded, {} resources live", self.store.live_count());
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.is_some()
    }

    pub fn set_time(&mut self, text: TimeText) {
        let Some(face) = self.loaded.as_mut() else {
            debug!("time update while unloaded");
            return;
        };
        self.dirty |= face.clock.update(text);
    }

    /// Push decoded lines and mood. Lines that are `None` keep what is shown.
    pub fn apply_inbox(&mut self, update: &InboxUpdate) {
        let Some(face) = self.loaded.as_mut() else {
            debug!("inbox update while unloaded");
            return;
        };
        if let Some(line) = update.weather_line {
            self.dirty |= face.weather.update(line);
        }
        if let Some(line) = update.stock_line {
            self.dirty |= face.stock.update(line);
        }
        if let Some(mood) = update.mood {
            self.dirty |= face.mood.set_mood(mood, &self.store);
        }
    }

    pub fn set_mood(&mut self, mood: Mood) {
        let Some(face) = self.loaded.as_mut() else {
            debug!("mood update while unloaded");
            return;
        };
        self.dirty |= face.mood.set_mood(mood, &self.store);
    }

    /// Current contents, `None` while unloaded.
    pub fn state(&self) -> Option<DisplayState> {
        self.loaded.as_ref().map(|face| DisplayState {
            time_text: *face.clock.text(),
            weather_text: *face.weather.line(),
            stock_text: *face.stock.line(),
            status_text: *face.mood.caption(),
            mood_icon: face.mood.icon_id(),
        })
    }

    pub fn resources(&self) -> &ResourceStore {
        &self.store
    }

    pub fn layout(&self) -> &FaceLayout {
        &self.layout
    }

    /// Returns whether a redraw is due and clears the flag.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Draw the whole face, background first.
    pub fn render<D>(&self, target: &mut D) -> Result<(), DisplayError>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let face = self.loaded.as_ref().ok_or(DisplayError::NotLoaded)?;

        target
            .clear(BinaryColor::Off)
            .map_err(|_| DisplayError::DrawingError("Failed to clear".to_string()))?;
        face.background
            .draw_at(target, Point::zero())
            .map_err(|_| DisplayError::DrawingError("Failed to draw background".to_string()))?;
        RoundedRectangle::with_equal_corners(self.layout.time_panel(), Size::new(8, 8))
            .into_styled(PrimitiveStyle::with_fill(BinaryColor::On))
            .draw(target)
            .map_err(|_| DisplayError::DrawingError("Failed to draw clock panel".to_string()))?;

        face.clock.render(target)?;
        face.weather.render(target)?;
        face.stock.render(target)?;
        face.mood.render(target)?;
        Ok(())
    }

    /// Render into the internal framebuffer and return it.
    /// An unloaded face renders as a blank screen.
    pub fn render_frame(&mut self) -> Result<&FrameBuffer, DisplayError> {
        let mut frame = std::mem::replace(&mut self.frame, FrameBuffer::new(0, 0));
        let result = match self.loaded {
            Some(_) => self.render(&mut frame),
            None => {
                frame.clear_color(BinaryColor::Off);
                Ok(())
            }
        };
        self.frame = frame;
        result.map(|_| &self.frame)
    }

    /// If dirty, render and hand the frame to `driver`. Returns whether a
    /// frame was pushed.
    pub fn present<T: DisplayDriver + ?Sized>(&mut self, driver: &mut T) -> Result<bool, DisplayError> {
        if !self.take_dirty() {
            return Ok(false);
        }
        let bytes = self.render_frame()?.to_packed_bytes();
        driver.write_buffer(&bytes)?;
        driver.flush()?;
        Ok(true)
    }
}
