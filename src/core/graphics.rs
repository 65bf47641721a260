//=========================================================================
// Graphics
//=========================================================================
//
// Render backends owned by the GameManager.
//
// Frame lifecycle:
//   clear_back_buffer() → screens draw_rect()* → render() (present)
//
// Two backends are provided:
// - `SoftwareGraphics`: in-memory ARGB back/front buffers
// - `NullGraphics`: draws nothing, only counts presented frames
//
// The backend is chosen from `RenderMode` before construction. A backend
// that cannot initialize still constructs; it reports
// `initialized() == false` and the GameManager refuses to run.
//
//=========================================================================

//=== External Dependencies ===============================================

use log::{debug, error, info};
use serde::{Deserialize, Serialize};

//=== Internal Dependencies ===============================================

use super::Subsystem;

//=== Constants ===========================================================

/// Largest width or height accepted by the software backend.
pub const MAX_DIMENSION: u32 = 16_384;

//=== RenderMode ==========================================================

/// Backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderMode {
    #[default]
    Software,
    Null,
}

//=== Color ===============================================================

/// 8-bit RGBA colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl Color {
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Packed `0xAARRGGBB`.
    pub const fn to_argb(self) -> u32 {
        (self.a as u32) << 24 | (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32
    }
}

//=== Rect ================================================================

/// Pixel rectangle in back-buffer coordinates. May extend off-screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self { x, y, width, height }
    }
}

//=== GraphicsBackend =====================================================

/// Render contract used by the GameManager and screens.
pub trait GraphicsBackend: Subsystem {
    /// `false` if construction failed; the run loop never starts.
    fn initialized(&self) -> bool;

    /// Fills the back buffer with the clear colour.
    fn clear_back_buffer(&mut self);

    /// Fills `rect` (clipped to the buffer) with `color`.
    fn draw_rect(&mut self, rect: Rect, color: Color);

    /// Presents the back buffer.
    fn render(&mut self);

    /// Buffer size in pixels.
    fn size(&self) -> (u32, u32);

    /// Number of `render()` calls so far.
    fn frames_presented(&self) -> u64;
}

/// Builds the backend selected by `mode`.
pub fn create_graphics(
    mode: RenderMode,
    width: u32,
    height: u32,
    clear_color: Color,
) -> Box<dyn GraphicsBackend> {
    info!(target: "graphics", "Render mode {:?} ({}x{})", mode, width, height);
    match mode {
        RenderMode::Software => Box::new(SoftwareGraphics::new(width, height, clear_color)),
        RenderMode::Null => Box::new(NullGraphics::new(width, height)),
    }
}

//=== SoftwareGraphics ====================================================

pub struct SoftwareGraphics {
    width: u32,
    height: u32,
    clear: u32,
    back: Vec<u32>,
    front: Vec<u32>,
    frames: u64,
    initialized: bool,
}

impl SoftwareGraphics {
    pub fn new(width: u32, height: u32, clear_color: Color) -> Self {
        let valid = (1..=MAX_DIMENSION).contains(&width) && (1..=MAX_DIMENSION).contains(&height);
        if !valid {
            error!(
                target: "graphics",
                "Cannot create {}x{} back buffer (limits 1..={})",
                width, height, MAX_DIMENSION
            );
        }

        let len = if valid { width as usize * height as usize } else { 0 };
        Self {
            width,
            height,
            clear: clear_color.to_argb(),
            back: vec![0; len],
            front: vec![0; len],
            frames: 0,
            initialized: valid,
        }
    }

    /// Last presented frame, row-major `0xAARRGGBB`.
    pub fn front_buffer(&self) -> &[u32] {
        &self.front
    }

    /// Pixel of the last presented frame.
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.front.get((y * self.width + x) as usize).copied()
    }
}

impl GraphicsBackend for SoftwareGraphics {
    fn initialized(&self) -> bool {
        self.initialized
    }

    fn clear_back_buffer(&mut self) {
        self.back.fill(self.clear);
    }

    fn draw_rect(&mut self, rect: Rect, color: Color) {
        if !self.initialized {
            return;
        }

        let x0 = rect.x.clamp(0, self.width as i32) as usize;
        let y0 = rect.y.clamp(0, self.height as i32) as usize;
        let x1 = (rect.x as i64 + rect.width as i64).clamp(0, self.width as i64) as usize;
        let y1 = (rect.y as i64 + rect.height as i64).clamp(0, self.height as i64) as usize;
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        let argb = color.to_argb();
        let stride = self.width as usize;
        for row in y0..y1 {
            self.back[row * stride + x0..row * stride + x1].fill(argb);
        }
    }

    fn render(&mut self) {
        self.front.copy_from_slice(&self.back);
        self.frames += 1;
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn frames_presented(&self) -> u64 {
        self.frames
    }
}

impl Subsystem for SoftwareGraphics {
    fn name(&self) -> &'static str {
        "graphics"
    }

    fn release(&mut self) {
        debug!(target: "graphics", "Presented {} frames", self.frames);
        self.back = Vec::new();
        self.front = Vec::new();
        self.initialized = false;
    }
}

//=== NullGraphics ========================================================

pub struct NullGraphics {
    size: (u32, u32),
    frames: u64,
}

impl NullGraphics {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            frames: 0,
        }
    }
}

impl GraphicsBackend for NullGraphics {
    fn initialized(&self) -> bool {
        true
    }

    fn clear_back_buffer(&mut self) {}

    fn draw_rect(&mut self, _rect: Rect, _color: Color) {}

    fn render(&mut self) {
        self.frames += 1;
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn frames_presented(&self) -> u64 {
        self.frames
    }
}

impl Subsystem for NullGraphics {
    fn name(&self) -> &'static str {
        "graphics"
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
