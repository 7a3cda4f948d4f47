// stage.rs - Image gallery, click handling and the shatter loop
//
// Lifecycle: place image -> click -> fragments fly -> completion resets the
// session and drops the next image in. One owner, one thread, driven by
// `tick` from the frame loop.

use glam::Vec2;
use image::RgbaImage;
use rand::Rng;

use super::delaunay::Triangulate;
use super::session::ShatterSession;
use crate::config::{ClickPolicy, ShatterConfig};
use crate::error::ShatterError;
use crate::timeline::{Ease, Tween};

/// Result of a click on the stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickOutcome {
    /// A new session started with this many fragments.
    Shattered(usize),
    /// A session was already running and the policy dropped the click.
    Ignored,
}

/// Something the embedding layer should react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageEvent {
    /// Every fragment finished; the next image is now shown.
    ShatterComplete { next_image: usize },
}

/// The image currently on display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedImage {
    pub index: usize,
    drop_in: Option<Tween>,
    elapsed: f32,
}

impl PlacedImage {
    /// Vertical offset of the drop-in transition, 0 once settled
    pub fn offset_y(&self) -> f32 {
        self.drop_in.map_or(0.0, |t| t.sample(self.elapsed))
    }
}

pub struct Stage<T, R> {
    config: ShatterConfig,
    images: Vec<RgbaImage>,
    next_index: usize,
    placed: Option<PlacedImage>,
    session: ShatterSession,
    triangulator: T,
    rng: R,
}

impl<T: Triangulate, R: Rng> Stage<T, R> {
    pub fn new(config: ShatterConfig, triangulator: T, rng: R) -> Self {
        Self {
            config,
            images: Vec::new(),
            next_index: 0,
            placed: None,
            session: ShatterSession::default(),
            triangulator,
            rng,
        }
    }

    pub fn config(&self) -> &ShatterConfig {
        &self.config
    }

    pub fn session(&self) -> &ShatterSession {
        &self.session
    }

    pub fn placed(&self) -> Option<&PlacedImage> {
        self.placed.as_ref()
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Append an image to the gallery. Dimensions must match the config.
    pub fn add_image(&mut self, image: RgbaImage) -> Result<usize, ShatterError> {
        let expected = (self.config.image_width, self.config.image_height);
        if image.dimensions() != expected {
            return Err(ShatterError::ImageSize { expected, actual: image.dimensions() });
        }
        self.images.push(image);
        Ok(self.images.len() - 1)
    }

    /// Show the next gallery image, optionally dropping it in from above.
    pub fn place_image(&mut self, transition_in: bool) -> Result<usize, ShatterError> {
        if self.images.is_empty() {
            return Err(ShatterError::NoImage);
        }
        let index = self.next_index % self.images.len();
        self.next_index = (index + 1) % self.images.len();

        let drop_in = transition_in.then(|| Tween {
            delay: 0.0,
            duration: self.config.drop_duration,
            from: self.config.drop_height,
            to: 0.0,
            ease: Ease::BackOut,
        });
        self.placed = Some(PlacedImage { index, drop_in, elapsed: 0.0 });
        log::debug!("placed image {index}");
        Ok(index)
    }

    /// Place the first image without transition and shatter it at its center.
    pub fn start(&mut self) -> Result<ClickOutcome, ShatterError> {
        self.place_image(false)?;
        let center = Vec2::new(self.config.image_width as f32, self.config.image_height as f32) * 0.5;
        self.shatter_at(center)
    }

    /// Handle a click in screen space; `image_origin` is the image's on-screen top-left.
    pub fn click(&mut self, screen: Vec2, image_origin: Vec2) -> Result<ClickOutcome, ShatterError> {
        self.shatter_at(screen - image_origin)
    }

    /// Shatter the placed image around an image-local focal point.
    pub fn shatter_at(&mut self, focus: Vec2) -> Result<ClickOutcome, ShatterError> {
        let Some(placed) = self.placed else {
            return Err(ShatterError::NoImage);
        };

        if self.session.is_active() {
            match self.config.click_policy {
                ClickPolicy::IgnoreWhileActive => {
                    log::warn!("click ignored, shatter still running");
                    return Ok(ClickOutcome::Ignored);
                }
                ClickPolicy::Restart => log::info!("restarting running shatter"),
            }
        }

        let session = ShatterSession::shatter(
            &self.images[placed.index],
            focus,
            &self.config,
            &self.triangulator,
            &mut self.rng,
        )
        .inspect_err(|e| log::warn!("shatter aborted: {e}"))?;

        let count = session.fragments.len();
        self.session = session;
        Ok(ClickOutcome::Shattered(count))
    }

    /// Advance transitions and the running shatter by `dt` seconds.
    pub fn tick(&mut self, dt: f32) -> Result<Option<StageEvent>, ShatterError> {
        if let Some(placed) = &mut self.placed {
            placed.elapsed += dt;
        }

        if !self.session.advance(dt) {
            return Ok(None);
        }

        self.session.reset();
        let next_image = self.place_image(true)?;
        log::info!("shatter complete, showing image {next_image}");
        Ok(Some(StageEvent::ShatterComplete { next_image }))
    }
}
