/// Packs four channel bytes so that the in-memory byte order is always R, G, B, A,
/// which is what the frame texture upload expects.
pub const fn pack_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
    u32::from_ne_bytes([r, g, b, a])
}

pub const BRIGHT: u32 = pack_rgba(252, 252, 252, 255);
pub const DARK: u32 = pack_rgba(0, 35, 64, 255);

/// One rendered animation frame. Not `Clone`: it moves between the presenter and the
/// transformer by value, one holder at a time.
#[derive(Debug, PartialEq, Eq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    generation: u64,
    pixels: Vec<u32>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32, generation: u64) -> Self {
        Self {
            width,
            height,
            generation,
            pixels: vec![0; width as usize * height as usize],
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Resize generation this buffer was allocated for.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn pixels(&self) -> &[u32] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [u32] {
        &mut self.pixels
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }

        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    pub fn row(&self, y: u32) -> Option<&[u32]> {
        if y >= self.height {
            return None;
        }

        let begin = y as usize * self.width as usize;
        self.pixels.get(begin..begin + self.width as usize)
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }
}
