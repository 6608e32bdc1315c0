//! Cyclic-index carousel over two length-matched collections.
//!
//! The carousel is independent of the frame loop: it only changes on discrete
//! next/prev events. Its single invariant is that exactly one slide and one
//! link are visible at any time, both at the current index.

use anyhow::{Result, bail};

/// Carousel state machine with a wrap-around index.
///
/// After every transition a full visibility refresh runs: all slides and all
/// links are marked hidden, then the pair at the current index is marked
/// visible. `O(slides + links)` per transition, not incremental.
#[derive(Debug)]
pub struct Carousel {
    index: usize,
    slides: Vec<bool>,
    links: Vec<bool>,
}

impl Carousel {
    /// Fails fast when the slide and link counts differ (the two collections
    /// navigate in lockstep) or when the carousel is empty.
    pub fn new(total_slides: usize, total_links: usize) -> Result<Self> {
        if total_slides != total_links {
            bail!(
                "carousel slide/link count mismatch: {} slides, {} links",
                total_slides,
                total_links
            );
        }
        if total_slides == 0 {
            bail!("carousel requires at least one slide");
        }
        let mut carousel = Self {
            index: 0,
            slides: vec![false; total_slides],
            links: vec![false; total_links],
        };
        carousel.refresh_visibility();
        Ok(carousel)
    }

    pub fn next(&mut self) {
        if self.index == self.slides.len() - 1 {
            self.index = 0;
        } else {
            self.index += 1;
        }
        self.refresh_visibility();
    }

    pub fn prev(&mut self) {
        if self.index == 0 {
            self.index = self.slides.len() - 1;
        } else {
            self.index -= 1;
        }
        self.refresh_visibility();
    }

    fn refresh_visibility(&mut self) {
        for slide in self.slides.iter_mut() {
            *slide = false;
        }
        for link in self.links.iter_mut() {
            *link = false;
        }
        self.slides[self.index] = true;
        self.links[self.index] = true;
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn total_slides(&self) -> usize {
        self.slides.len()
    }

    /// Visibility flags of the slide collection, indexed by slide position.
    pub fn slide_visibility(&self) -> &[bool] {
        &self.slides
    }

    pub fn link_visibility(&self) -> &[bool] {
        &self.links
    }
}
