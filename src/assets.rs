/*
 *  assets.rs
 *
 *  StockFace - worth the glance
 *  (c) 2020-26 Stuart Hunter
 *
 *  Bitmap resources with load/release accounting
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
use embedded_graphics::primitives::{
    Arc, Circle, Line, PrimitiveStyle, Rectangle, Triangle,
};
use log::{debug, trace};
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::constants::{FACE_HEIGHT, FACE_WIDTH, MOOD_ICON_SIZE};
use crate::display::framebuffer::FrameBuffer;

/// Bitmap resources bundled with the face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceId {
    ImageBackground,
    ImageHappy,
    ImageSad,
    ImageStockUp,
    ImageStockDown,
}

impl ResourceId {
    pub const ALL: [ResourceId; 5] = [
        ResourceId::ImageBackground,
        ResourceId::ImageHappy,
        ResourceId::ImageSad,
        ResourceId::ImageStockUp,
        ResourceId::ImageStockDown,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ResourceId::ImageBackground => "IMAGE_BACKGROUND",
            ResourceId::ImageHappy => "IMAGE_HAPPY",
            ResourceId::ImageSad => "IMAGE_SAD",
            ResourceId::ImageStockUp => "IMAGE_STOCK_UP",
            ResourceId::ImageStockDown => "IMAGE_STOCK_DOWN",
        }
    }

    pub fn size(&self) -> Size {
        match self {
            ResourceId::ImageBackground => Size::new(FACE_WIDTH, FACE_HEIGHT),
            _ => Size::new(MOOD_ICON_SIZE, MOOD_ICON_SIZE),
        }
    }

    fn index(&self) -> usize {
        match self {
            ResourceId::ImageBackground => 0,
            ResourceId::ImageHappy => 1,
            ResourceId::ImageSad => 2,
            ResourceId::ImageStockUp => 3,
            ResourceId::ImageStockDown => 4,
        }
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Default)]
struct Ledger {
    live: [usize; 5],
    acquired: usize,
    released: usize,
}

/// Loads bitmaps and keeps count of which ones are alive.
///
/// Every `Bitmap` handed out reports back when dropped, so a face that
/// swaps icons can be checked for leaks.
#[derive(Debug, Clone, Default)]
pub struct ResourceStore {
    ledger: Rc<RefCell<Ledger>>,
}

impl ResourceStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_bitmap(&self, id: ResourceId) -> Bitmap {
        let size = id.size();
        let mut pixels = FrameBuffer::new(size.width, size.height);
        paint(id, &mut pixels);

        {
            let mut ledger = self.ledger.borrow_mut();
            ledger.live[id.index()] += 1;
            ledger.acquired += 1;
        }
        trace!("loaded bitmap {}", id);

        Bitmap {
            id,
            pixels,
            ledger: Rc::clone(&self.ledger),
        }
    }

    /// Bitmaps currently alive, of any kind
    pub fn live_count(&self) -> usize {
        self.ledger.borrow().live.iter().sum()
    }

    pub fn live_count_of(&self, id: ResourceId) -> usize {
        self.ledger.borrow().live[id.index()]
    }

    pub fn acquired(&self) -> usize {
        self.ledger.borrow().acquired
    }

    pub fn released(&self) -> usize {
        self.ledger.borrow().released
    }
}

/// A loaded bitmap. Releases its resource when dropped.
pub struct Bitmap {
    id: ResourceId,
    pixels: FrameBuffer,
    ledger: Rc<RefCell<Ledger>>,
}

impl Bitmap {
    pub fn id(&self) -> ResourceId {
        self.id
    }

    pub fn size(&self) -> Size {
        self.pixels.size()
    }

    pub fn pixels(&self) -> &FrameBuffer {
        &self.pixels
    }

    /// Blit the whole bitmap with its top left corner at `top_left`.
    pub fn draw_at<D>(&self, target: &mut D, top_left: Point) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = BinaryColor>,
    {
        let area = Rectangle::new(top_left, self.pixels.size());
        target.fill_contiguous(&area, self.pixels.as_slice().iter().copied())
    }
}

impl fmt::Debug for Bitmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Bitmap")
            .field("id", &self.id)
            .field("size", &self.pixels.dimensions())
            .finish()
    }
}

impl Drop for Bitmap {
    fn drop(&mut self) {
        let mut ledger = self.ledger.borrow_mut();
        let live = &mut ledger.live[self.id.index()];
        *live = live.saturating_sub(1);
        ledger.released += 1;
        debug!("released bitmap {}", self.id);
    }
}

fn paint(id: ResourceId, fb: &mut FrameBuffer) {
    match id {
        ResourceId::ImageBackground => paint_background(fb),
        ResourceId::ImageHappy => paint_face(fb, true),
        ResourceId::ImageSad => paint_face(fb, false),
        ResourceId::ImageStockUp => paint_trend(fb, true),
        ResourceId::ImageStockDown => paint_trend(fb, false),
    }
}

/// Plain black backdrop, the clock panel is drawn from the layout.
fn paint_background(fb: &mut FrameBuffer) {
    fb.clear_color(BinaryColor::Off);
}

// Icons are black ink on white
fn paint_face(fb: &mut FrameBuffer, happy: bool) {
    fb.clear_color(BinaryColor::On);
    let ink = PrimitiveStyle::with_stroke(BinaryColor::Off, 2);
    let dot = PrimitiveStyle::with_fill(BinaryColor::Off);

    let _ = Circle::new(Point::new(2, 2), 38).into_styled(ink).draw(fb);
    let _ = Circle::new(Point::new(12, 12), 6).into_styled(dot).draw(fb);
    let _ = Circle::new(Point::new(24, 12), 6).into_styled(dot).draw(fb);

    let mouth = if happy {
        Arc::new(Point::new(11, 10), 20, 30.0.deg(), 120.0.deg())
    } else {
        Arc::new(Point::new(11, 25), 20, 210.0.deg(), 120.0.deg())
    };
    let _ = mouth.into_styled(ink).draw(fb);
}

fn paint_trend(fb: &mut FrameBuffer, up: bool) {
    fb.clear_color(BinaryColor::On);
    let ink = PrimitiveStyle::with_stroke(BinaryColor::Off, 2);
    let solid = PrimitiveStyle::with_fill(BinaryColor::Off);

    let arrow = if up {
        Triangle::new(Point::new(21, 3), Point::new(6, 20), Point::new(36, 20))
    } else {
        Triangle::new(Point::new(21, 38), Point::new(6, 21), Point::new(36, 21))
    };
    let _ = arrow.into_styled(solid).draw(fb);

    // shaft of the arrow
    let shaft = if up {
        Rectangle::new(Point::new(16, 20), Size::new(10, 18))
    } else {
        Rectangle::new(Point::new(16, 3), Size::new(10, 18))
    };
    let _ = shaft.into_styled(solid).draw(fb);

    let _ = Line::new(Point::new(1, 40), Point::new(40, 40))
        .into_styled(ink)
        .draw(fb);
}
