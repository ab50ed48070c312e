/*
 *  display/components/mood.rs
 *
 *  StockFace - worth the glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Mood icon and status caption
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
use log::debug;

use crate::assets::{Bitmap, ResourceId, ResourceStore};
use crate::constants::ALARM_PLACEHOLDER;
use crate::display::error::DisplayError;
use crate::display::region::Region;
use crate::display::state::StatusLine;
use crate::mood::Mood;

/// Owns the one live mood icon and the caption in the alarm region.
pub struct MoodDisplay {
    icon_region: Region,
    caption_region: Region,
    icon: Option<Bitmap>,
    caption: StatusLine,
    mood: Option<Mood>,
}

impl MoodDisplay {
    /// Starts on the happy icon with the "..." caption.
    pub fn new(icon_region: Region, caption_region: Region, store: &ResourceStore) -> Self {
        Self {
            icon_region,
            caption_region,
            icon: Some(store.load_bitmap(ResourceId::ImageHappy)),
            caption: StatusLine::from_truncated(ALARM_PLACEHOLDER),
            mood: None,
        }
    }

    /// Swap in the icon and caption for `mood`. The old icon is released
    /// before the new one is loaded.
    pub fn set_mood(&mut self, mood: Mood, store: &ResourceStore) -> bool {
        let caption = StatusLine::from_truncated(mood.caption());
        let changed = self.mood != Some(mood) || self.caption != caption;

        self.icon = None;
        self.icon = Some(store.load_bitmap(mood.icon()));
        self.caption = caption;
        self.mood = Some(mood);
        debug!("mood now {} ({})", mood, mood.icon());
        changed
    }

    pub fn mood(&self) -> Option<Mood> {
        self.mood
    }

    pub fn icon_id(&self) -> ResourceId {
        self.icon.as_ref().map(Bitmap::id).unwrap_or(ResourceId::ImageHappy)
    }

    pub fn caption(&self) -> &StatusLine {
        &self.caption
    }

    pub fn render<D>(&self, target: &mut D) -> Result<(), DisplayError>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        self.caption_region.draw_text(target, &self.caption)?;
        self.icon_region.fill_background(target)?;
        if let Some(icon) = &self.icon {
            icon.draw_at(target, self.icon_region.position())
                .map_err(|_| DisplayError::DrawingError("Failed to draw mood icon".to_string()))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::layout::FaceLayout;

    #[test]
    fn test_exactly_one_icon_live() {
        let store = ResourceStore::new();
        let layout = FaceLayout::default();
        let mut display = MoodDisplay::new(layout.mood_icon.clone(), layout.alarm.clone(), &store);
        assert_eq!(store.live_count(), 1);

        for flag in [0, 1, 2, 0, 3, -7] {
            display.set_mood(Mood::from_flag(flag), &store);
            assert_eq!(store.live_count(), 1, "after flag {flag}");
        }
        assert_eq!(display.icon_id(), ResourceId::ImageStockDown);
        assert_eq!(display.caption(), &"TAT, farewell");
        assert_eq!(store.acquired(), 7);
        assert_eq!(store.released(), 6);

        drop(display);
        assert_eq!(store.live_count(), 0);
    }

    #[test]
    fn test_same_mood_reports_no_change() {
        let store = ResourceStore::new();
        let layout = FaceLayout::default();
        let mut display = MoodDisplay::new(layout.mood_icon.clone(), layout.alarm.clone(), &store);
        assert!(display.set_mood(Mood::BigUp, &store));
        assert!(!display.set_mood(Mood::BigUp, &store));
        assert_eq!(store.live_count(), 1);
    }
}
