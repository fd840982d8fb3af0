use bowyer_watson::Point;

/// Width and height of the fuzzed frame.
pub const FRAME_SIZE: f64 = 40.0;

#[derive(Clone, Copy, arbitrary::Arbitrary)]
pub struct FuzzPoint {
    pub x: f64,
    pub y: f64,
}

impl FuzzPoint {
    pub fn position(&self) -> Point<f64> {
        Point::new(self.x, self.y)
    }
}

impl core::fmt::Debug for FuzzPoint {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_fmt(format_args!("Point::new({:?}, {:?})", self.x, self.y))
    }
}
