#![forbid(unsafe_code)]

//! Application model: the page, its scroll source, and the mounted showcase.

use std::cell::RefCell;
use std::rc::Rc;

use showcase_core::{Catalog, LifecycleError, ScrollEventSource, ShowcaseController};

use crate::input::Action;
use crate::page::{PageGeometry, SharedPage, VirtualPage};
use crate::view::{self, View};

/// Host-side state for one showcase session.
pub struct App {
    page: SharedPage,
    source: ScrollEventSource,
    showcase: ShowcaseController<PageGeometry>,
    width: u16,
    height: u16,
    scroll_step: u16,
    view: View,
    drawn: Option<DrawKey>,
    quit: bool,
}

/// Inputs that fully determine a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DrawKey {
    generation: u64,
    offset: u32,
    width: u16,
    height: u16,
}

impl App {
    /// Build the page and mount the showcase against it.
    pub fn new(
        catalog: Catalog,
        (width, height): (u16, u16),
        section_screens: u16,
        scroll_step: u16,
    ) -> Result<Self, LifecycleError> {
        let page: SharedPage = Rc::new(RefCell::new(VirtualPage::new(height, section_screens)));
        let source = ScrollEventSource::new();
        let mut showcase = ShowcaseController::new(catalog, PageGeometry(Rc::clone(&page)));
        showcase.mount(&source)?;
        tracing::info!(
            records = showcase.catalog().len(),
            width,
            height,
            section_screens,
            "showcase session started"
        );
        Ok(Self {
            page,
            source,
            showcase,
            width,
            height,
            scroll_step,
            view: View::default(),
            drawn: None,
            quit: false,
        })
    }

    /// Apply one action.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::ScrollBy(rows) => self.scroll(|page| page.scroll_by(rows)),
            Action::ScrollPages(pages) => {
                let rows = pages.saturating_mul(i32::from(self.height.max(1)));
                self.scroll(|page| page.scroll_by(rows));
            }
            Action::ScrollHome => self.scroll(VirtualPage::scroll_to_start),
            Action::ScrollEnd => self.scroll(VirtualPage::scroll_to_end),
            Action::Previous => {
                self.showcase.previous();
            }
            Action::Next => {
                self.showcase.next();
            }
            Action::Jump(index) => {
                self.showcase.jump_to(index);
            }
            Action::Resize { width, height } => {
                self.width = width;
                self.height = height;
                self.page.borrow_mut().resize(height);
                self.source.dispatch();
            }
            Action::Quit => self.quit = true,
        }
    }

    /// Move the page and, if it moved, deliver a scroll event.
    fn scroll(&mut self, f: impl FnOnce(&mut VirtualPage) -> bool) {
        let moved = f(&mut self.page.borrow_mut());
        if moved {
            self.source.dispatch();
        }
    }

    /// Lay out a new frame if anything visible changed since the last one.
    pub fn render(&mut self) -> Option<&View> {
        let key = self.draw_key();
        if self.drawn == Some(key) {
            return None;
        }
        let status = self.page.borrow().status();
        self.view = view::layout(&self.showcase.snapshot(), &status, self.width, self.height);
        self.drawn = Some(key);
        Some(&self.view)
    }

    fn draw_key(&self) -> DrawKey {
        DrawKey {
            generation: self.showcase.generation(),
            offset: self.page.borrow().offset(),
            width: self.width,
            height: self.height,
        }
    }

    /// Last laid-out frame, for hit testing.
    pub fn view(&self) -> &View {
        &self.view
    }

    /// Rows per wheel notch or arrow key.
    pub fn scroll_step(&self) -> u16 {
        self.scroll_step
    }

    /// Active catalog index.
    pub fn active(&self) -> usize {
        self.showcase.active()
    }

    /// Page scroll offset in rows.
    pub fn offset(&self) -> u32 {
        self.page.borrow().offset()
    }

    /// Registered scroll listeners; 1 while running, 0 after shutdown.
    pub fn listener_count(&self) -> usize {
        self.source.listener_count()
    }

    /// Whether the user asked to quit.
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Unmount the showcase.
    pub fn shutdown(&mut self) {
        self.showcase.unmount();
        tracing::info!(
            events = self.source.dispatched(),
            active = self.showcase.active(),
            "showcase session ended"
        );
    }
}
