/// Where non-finite or hidden samples are parked; always outside any viewport.
pub const OFFSCREEN: [f32; 2] = [f32::MAX, f32::MAX];

pub const DEFAULT_SCALE: f32 = 0.25;
const CENTER_LIMIT: f32 = 4.0;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlotView {
    pub width: u32,
    pub height: u32,
    pub scale: f32,
    pub offset_x: f32,
    pub offset_y: f32,
}

impl PlotView {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            scale: DEFAULT_SCALE,
            offset_x: 0.0,
            offset_y: 0.0,
        }
    }

    pub fn reset(&mut self) {
        self.scale = DEFAULT_SCALE;
        self.offset_x = 0.0;
        self.offset_y = 0.0;
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    pub fn is_drawable(&self) -> bool {
        self.width > 0 && self.height > 0
    }

    #[inline]
    pub fn to_screen(&self, x: f64, y: f64) -> [f32; 2] {
        let s = self.scale * (self.height / 2) as f32;
        let sx = self.width as f32 * 0.5 + (x as f32 - self.offset_x) * s;
        let sy = self.height as f32 * 0.5 + (y as f32 - self.offset_y) * s;
        if sx.is_finite() && sy.is_finite() {
            [sx, sy]
        } else {
            OFFSCREEN
        }
    }

    #[inline]
    pub fn contains(&self, p: [f32; 2]) -> bool {
        p[0] > 0.0 && p[1] > 0.0 && p[0] < self.width as f32 && p[1] < self.height as f32
    }

    /// Fits the plot to the bounding box of `points`, ignoring anything beyond ±4.
    pub fn center_on(&mut self, points: &[[f32; 2]]) {
        let mut min_x = f32::MAX;
        let mut max_x = -f32::MAX;
        let mut min_y = f32::MAX;
        let mut max_y = -f32::MAX;
        for p in points {
            min_x = min_x.min(p[0]);
            max_x = max_x.max(p[0]);
            min_y = min_y.min(p[1]);
            max_y = max_y.max(p[1]);
        }
        max_x = max_x.min(CENTER_LIMIT);
        max_y = max_y.min(CENTER_LIMIT);
        min_x = min_x.max(-CENTER_LIMIT);
        min_y = min_y.max(-CENTER_LIMIT);

        self.offset_x = (max_x + min_x) * 0.5;
        self.offset_y = (max_y + min_y) * 0.5;
        let extent = (max_x - min_x).max(max_y - min_y);
        self.scale = 1.0 / (extent * 0.6).max(0.1);
    }
}
