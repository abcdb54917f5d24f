/// Where each dot of the ellipsis goes inside the available area.
///
/// Dots are as tall as the area and spread so the first and last dots touch the edges. When the
/// area is too narrow the spacing goes negative and the dots overlap.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct DotLayout {
    diameter: u32,
    spacing: i32,
}

impl DotLayout {
    pub fn measure(quantity: usize, width: u32, height: u32) -> Self {
        let diameter = height;
        let spacing = match quantity {
            0 | 1 => 0,
            quantity => {
                let quantity = i64::try_from(quantity).unwrap_or(i64::MAX);
                let consumed = quantity.saturating_mul(diameter as i64);
                let remaining = width as i64 - consumed;
                (remaining / (quantity - 1)).clamp(i32::MIN as i64, i32::MAX as i64) as i32
            }
        };
        Self { diameter, spacing }
    }

    pub fn diameter(&self) -> u32 {
        self.diameter
    }

    pub fn radius(&self) -> f32 {
        self.diameter as f32 * 0.5
    }

    pub fn spacing(&self) -> i32 {
        self.spacing
    }

    /// The horizontal center of the dot in `slot`.
    pub fn center_x(&self, slot: usize) -> f32 {
        let stride = self.diameter as f32 + self.spacing as f32;
        slot as f32 * stride + self.radius()
    }

    /// The vertical center shared by every dot.
    pub fn center_y(&self) -> f32 {
        self.radius()
    }
}
