use glam::Vec2;
use image::RgbaImage;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use wasm_bindgen::prelude::*;

pub mod config;
pub mod debounce;
pub mod error;
pub mod math;
pub mod shatter;
pub mod sky;
pub mod timeline;

use config::DemoConfig;
use debounce::Debouncer;
use shatter::{ClickOutcome, Delaunay, Fragment, Stage};
use sky::{SkyOctahedron, SkyShell};

// ============================================================================
// BOOT - logging and panic reporting in the browser console
// ============================================================================

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn init() {
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    console_error_panic_hook::set_once();
}

fn js_seed() -> u64 {
    (js_sys::Math::random() * u32::MAX as f64) as u64
}

fn parse_config(ron: Option<String>) -> Result<DemoConfig, JsError> {
    match ron {
        Some(text) => Ok(DemoConfig::from_ron(&text)?),
        None => Ok(DemoConfig::default()),
    }
}

// ============================================================================
// SKY - octahedron attribute buffers and time uniforms
// ============================================================================

#[wasm_bindgen]
pub struct SkyScene {
    sky: SkyOctahedron,
    shell: SkyShell,
}

#[wasm_bindgen]
impl SkyScene {
    /// `config` is optional RON text; `seed` is drawn from `Math.random` when absent.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>, seed: Option<u32>) -> Result<SkyScene, JsError> {
        let config = parse_config(config)?;
        let mut rng = ChaCha8Rng::seed_from_u64(seed.map_or_else(js_seed, u64::from));
        Ok(Self {
            sky: SkyOctahedron::new(&config.sky, &mut rng),
            shell: SkyShell::new(&config.sky),
        })
    }

    /// Advance both time uniforms by one frame's delta (seconds).
    pub fn render(&mut self, dt: f32) {
        self.sky.render(dt);
        self.shell.render(dt);
    }

    pub fn time(&self) -> f32 { self.sky.clock.elapsed }
    pub fn shell_time(&self) -> f32 { self.shell.clock.elapsed }
    pub fn vertex_count(&self) -> usize { self.sky.attributes.vertex_count() }

    pub fn positions(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(self.sky.attributes.positions_flat())
    }

    pub fn face_normals(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(self.sky.attributes.face_normals_flat())
    }

    pub fn centers(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(self.sky.attributes.centers_flat())
    }

    pub fn delays(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(&self.sky.attributes.delays[..])
    }

    pub fn shell_positions(&self) -> js_sys::Float32Array {
        js_sys::Float32Array::from(self.shell.positions_flat())
    }
}

// ============================================================================
// SHATTER - gallery, clicks and per-fragment surfaces
// ============================================================================

#[wasm_bindgen]
pub struct ShatterStage {
    stage: Stage<Delaunay, ChaCha8Rng>,
}

#[wasm_bindgen]
impl ShatterStage {
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>, seed: Option<u32>) -> Result<ShatterStage, JsError> {
        let config = parse_config(config)?;
        let rng = ChaCha8Rng::seed_from_u64(seed.map_or_else(js_seed, u64::from));
        Ok(Self { stage: Stage::new(config.shatter, Delaunay, rng) })
    }

    /// Add decoded RGBA pixels (e.g. from `getImageData`) to the gallery.
    pub fn add_image(&mut self, width: u32, height: u32, rgba: Vec<u8>) -> Result<usize, JsError> {
        let image = RgbaImage::from_raw(width, height, rgba)
            .ok_or_else(|| JsError::new("pixel buffer does not match its dimensions"))?;
        Ok(self.stage.add_image(image)?)
    }

    /// Show the first image and shatter it at its center.
    pub fn start(&mut self) -> Result<usize, JsError> {
        Ok(fragments_of(self.stage.start()?))
    }

    /// Click at client coordinates; `left`/`top` is the image's client rect origin.
    /// Returns the number of new fragments, 0 when the click was ignored.
    pub fn click(&mut self, x: f32, y: f32, left: f32, top: f32) -> Result<usize, JsError> {
        Ok(fragments_of(self.stage.click(Vec2::new(x, y), Vec2::new(left, top))?))
    }

    /// Advance one frame. True when the shatter finished and the next image was placed.
    pub fn tick(&mut self, dt: f32) -> Result<bool, JsError> {
        Ok(self.stage.tick(dt)?.is_some())
    }

    pub fn current_image(&self) -> Option<usize> {
        self.stage.placed().map(|p| p.index)
    }

    pub fn image_offset_y(&self) -> f32 {
        self.stage.placed().map_or(0.0, |p| p.offset_y())
    }

    pub fn perspective(&self) -> f32 { self.stage.config().perspective }
    pub fn width(&self) -> u32 { self.stage.config().image_width }
    pub fn height(&self) -> u32 { self.stage.config().image_height }
    pub fn fragment_count(&self) -> usize { self.stage.session().fragments.len() }

    /// `[x, y, w, h]` of the fragment surface in image pixels
    pub fn fragment_bounds(&self, i: usize) -> Option<Box<[f32]>> {
        self.fragment(i).map(|f| {
            let (w, h) = f.geometry.bounds.pixel_size();
            let b = f.geometry.bounds;
            vec![b.x, b.y, w as f32, h as f32].into_boxed_slice()
        })
    }

    pub fn fragment_z_index(&self, i: usize) -> Option<u32> {
        self.fragment(i).map(|f| f.schedule.z_index)
    }

    /// `[z, rotationX, rotationY, opacity]` at the current session time
    pub fn fragment_transform(&self, i: usize) -> Option<Box<[f32]>> {
        let t = self.stage.session().elapsed();
        self.fragment(i).map(|f| {
            let x = f.transform_at(t);
            vec![x.z, x.rotation_x, x.rotation_y, x.opacity].into_boxed_slice()
        })
    }

    pub fn fragment_pixels_ptr(&self, i: usize) -> *const u8 {
        self.fragment(i).map_or(std::ptr::null(), |f| f.surface.as_raw().as_ptr())
    }

    pub fn fragment_pixels_len(&self, i: usize) -> usize {
        self.fragment(i).map_or(0, |f| f.surface.as_raw().len())
    }
}

impl ShatterStage {
    fn fragment(&self, i: usize) -> Option<&Fragment> {
        self.stage.session().fragments.get(i)
    }
}

fn fragments_of(outcome: ClickOutcome) -> usize {
    match outcome {
        ClickOutcome::Shattered(n) => n,
        ClickOutcome::Ignored => 0,
    }
}

// ============================================================================
// RESIZE - debounced window size updates
// ============================================================================

#[wasm_bindgen]
pub struct ResizeDebouncer {
    inner: Debouncer<(u32, u32)>,
}

#[wasm_bindgen]
impl ResizeDebouncer {
    /// Quiet period is `resize_debounce_ms` from the optional RON config.
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>) -> Result<ResizeDebouncer, JsError> {
        let config = parse_config(config)?;
        Ok(Self { inner: Debouncer::from_config(&config) })
    }

    pub fn quiet_ms(&self) -> f64 { self.inner.quiet_ms() }

    pub fn notify(&mut self, width: u32, height: u32, now_ms: f64) {
        self.inner.notify((width, height), now_ms);
    }

    /// `[width, height]` once the resize burst has settled
    pub fn poll(&mut self, now_ms: f64) -> Option<Box<[u32]>> {
        self.inner.poll(now_ms).map(|(w, h)| vec![w, h].into_boxed_slice())
    }
}
