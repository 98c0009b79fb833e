use core::convert::Infallible;

use log::{debug, info};
use stories_core::{
    render::Screen,
    surface::{DisplaySurface, Size},
};

const BAR_CELLS: usize = 8;

/// One story card in the showcase set.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) struct StoryCard {
    pub title: &'static str,
    pub caption: &'static str,
}

/// Surface that logs every containment change instead of drawing.
#[derive(Debug)]
pub(super) struct ConsoleSurface {
    size: Size,
    mounted: Option<StoryCard>,
    offset_y: f32,
    attached: bool,
}

impl ConsoleSurface {
    pub(super) fn new(size: Size) -> Self {
        Self {
            size,
            mounted: None,
            offset_y: 0.0,
            attached: true,
        }
    }
}

impl DisplaySurface for ConsoleSurface {
    type Page = StoryCard;
    type Error = Infallible;

    fn size(&self) -> Size {
        self.size
    }

    fn mount(&mut self, page: Self::Page) -> Result<(), Self::Error> {
        info!("surface: showing \"{}\" ({})", page.title, page.caption);
        self.mounted = Some(page);
        Ok(())
    }

    fn unmount(&mut self) -> Result<Option<Self::Page>, Self::Error> {
        let released = self.mounted.take();
        if let Some(card) = released {
            debug!("surface: released \"{}\"", card.title);
        }
        Ok(released)
    }

    fn raise_progress_bar(&mut self) -> Result<(), Self::Error> {
        debug!("surface: progress bar on top");
        Ok(())
    }

    fn set_offset_y(&mut self, offset_y: f32) -> Result<(), Self::Error> {
        if (offset_y - self.offset_y).abs() >= 1.0 || offset_y == 0.0 {
            debug!("surface: offset {:.0}", offset_y);
        }
        self.offset_y = offset_y;
        Ok(())
    }

    fn detach(&mut self) -> Result<(), Self::Error> {
        if self.attached {
            info!("surface: detached from presentation");
            self.attached = false;
        }
        Ok(())
    }
}

/// Text rendition of the segmented bar, e.g. `[########|###-----|--------] 2/3`.
pub(super) fn describe(screen: &Screen<'_>) -> String {
    let mut line = String::from("[");
    for (segment, fill) in screen.bar.fills.iter().enumerate() {
        if segment > 0 {
            line.push('|');
        }
        let lit = (*fill as usize * BAR_CELLS) / 100;
        for cell in 0..BAR_CELLS {
            line.push(if cell < lit { '#' } else { '-' });
        }
    }
    line.push_str(&format!(
        "] {}/{} {:?}",
        screen.page_index + 1,
        screen.page_count,
        screen.playback
    ));
    if screen.offset_y > 0.0 {
        line.push_str(&format!(" offset={:.0} alpha={:.2}", screen.offset_y, screen.alpha));
    }
    line
}
