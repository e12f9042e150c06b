/// Strategy used to fold a raw displacement back into the primary periodic image.
///
/// Both strategies yield the same separation; they can only disagree in sign
/// when a component sits exactly on `±L / 2`, where both images are equally short.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MinimumImage {
    /// `d -= L * round(d / L)`
    #[default]
    Round,
    /// Compare against `L / 2` and shift by one box length until inside.
    HalfBox,
}

impl MinimumImage {
    #[inline]
    pub fn apply(self, d: f64, box_size: f64) -> f64 {
        match self {
            MinimumImage::Round => wrap_round(d, box_size),
            MinimumImage::HalfBox => wrap_half_box(d, box_size),
        }
    }

    /// Minimum-image displacement `a - b` over all three axes.
    #[inline]
    pub fn displacement(self, a: &[f64; 3], b: &[f64; 3], box_size: f64) -> [f64; 3] {
        [
            self.apply(a[0] - b[0], box_size),
            self.apply(a[1] - b[1], box_size),
            self.apply(a[2] - b[2], box_size),
        ]
    }
}

#[inline]
pub fn wrap_round(d: f64, box_size: f64) -> f64 {
    d - box_size * (d / box_size).round()
}

#[inline]
pub fn wrap_half_box(mut d: f64, box_size: f64) -> f64 {
    let half = 0.5 * box_size;
    while d > half {
        d -= box_size;
    }
    while d < -half {
        d += box_size;
    }
    d
}
