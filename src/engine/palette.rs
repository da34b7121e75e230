//! Named colors and the gradient colormap built from them.
//!
//! The pick table deliberately leaves out black: the canvas background
//! defaults to black and invisible points are wasted points.

use rand::Rng;

/// A named RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub name: &'static str,
    pub rgb: [u8; 3],
}

pub const BLACK: Color = Color {
    name: "black",
    rgb: [0x00, 0x00, 0x00],
};

/// Colors eligible for random picks.
#[rustfmt::skip]
const PALETTE: &[Color] = &[
    Color { name: "red", rgb: [0xff, 0x00, 0x00] },
    Color { name: "crimson", rgb: [0xdc, 0x14, 0x3c] },
    Color { name: "firebrick", rgb: [0xb2, 0x22, 0x22] },
    Color { name: "darkred", rgb: [0x8b, 0x00, 0x00] },
    Color { name: "salmon", rgb: [0xfa, 0x80, 0x72] },
    Color { name: "lightcoral", rgb: [0xf0, 0x80, 0x80] },
    Color { name: "coral", rgb: [0xff, 0x7f, 0x50] },
    Color { name: "tomato", rgb: [0xff, 0x63, 0x47] },
    Color { name: "orangered", rgb: [0xff, 0x45, 0x00] },
    Color { name: "darkorange", rgb: [0xff, 0x8c, 0x00] },
    Color { name: "orange", rgb: [0xff, 0xa5, 0x00] },
    Color { name: "gold", rgb: [0xff, 0xd7, 0x00] },
    Color { name: "yellow", rgb: [0xff, 0xff, 0x00] },
    Color { name: "khaki", rgb: [0xf0, 0xe6, 0x8c] },
    Color { name: "darkkhaki", rgb: [0xbd, 0xb7, 0x6b] },
    Color { name: "olive", rgb: [0x80, 0x80, 0x00] },
    Color { name: "yellowgreen", rgb: [0x9a, 0xcd, 0x32] },
    Color { name: "chartreuse", rgb: [0x7f, 0xff, 0x00] },
    Color { name: "lawngreen", rgb: [0x7c, 0xfc, 0x00] },
    Color { name: "lightgreen", rgb: [0x90, 0xee, 0x90] },
    Color { name: "limegreen", rgb: [0x32, 0xcd, 0x32] },
    Color { name: "green", rgb: [0x00, 0x80, 0x00] },
    Color { name: "darkgreen", rgb: [0x00, 0x64, 0x00] },
    Color { name: "seagreen", rgb: [0x2e, 0x8b, 0x57] },
    Color { name: "mediumseagreen", rgb: [0x3c, 0xb3, 0x71] },
    Color { name: "springgreen", rgb: [0x00, 0xff, 0x7f] },
    Color { name: "teal", rgb: [0x00, 0x80, 0x80] },
    Color { name: "darkcyan", rgb: [0x00, 0x8b, 0x8b] },
    Color { name: "cyan", rgb: [0x00, 0xff, 0xff] },
    Color { name: "turquoise", rgb: [0x40, 0xe0, 0xd0] },
    Color { name: "deepskyblue", rgb: [0x00, 0xbf, 0xff] },
    Color { name: "dodgerblue", rgb: [0x1e, 0x90, 0xff] },
    Color { name: "cornflowerblue", rgb: [0x64, 0x95, 0xed] },
    Color { name: "steelblue", rgb: [0x46, 0x82, 0xb4] },
    Color { name: "royalblue", rgb: [0x41, 0x69, 0xe1] },
    Color { name: "blue", rgb: [0x00, 0x00, 0xff] },
    Color { name: "mediumblue", rgb: [0x00, 0x00, 0xcd] },
    Color { name: "navy", rgb: [0x00, 0x00, 0x80] },
    Color { name: "blueviolet", rgb: [0x8a, 0x2b, 0xe2] },
    Color { name: "indigo", rgb: [0x4b, 0x00, 0x82] },
    Color { name: "darkviolet", rgb: [0x94, 0x00, 0xd3] },
    Color { name: "purple", rgb: [0x80, 0x00, 0x80] },
    Color { name: "magenta", rgb: [0xff, 0x00, 0xff] },
    Color { name: "orchid", rgb: [0xda, 0x70, 0xd6] },
    Color { name: "hotpink", rgb: [0xff, 0x69, 0xb4] },
    Color { name: "deeppink", rgb: [0xff, 0x14, 0x93] },
    Color { name: "pink", rgb: [0xff, 0xc0, 0xcb] },
    Color { name: "brown", rgb: [0xa5, 0x2a, 0x2a] },
    Color { name: "sienna", rgb: [0xa0, 0x52, 0x2d] },
    Color { name: "chocolate", rgb: [0xd2, 0x69, 0x1e] },
    Color { name: "peru", rgb: [0xcd, 0x85, 0x3f] },
    Color { name: "tan", rgb: [0xd2, 0xb4, 0x8c] },
    Color { name: "silver", rgb: [0xc0, 0xc0, 0xc0] },
    Color { name: "gray", rgb: [0x80, 0x80, 0x80] },
    Color { name: "white", rgb: [0xff, 0xff, 0xff] },
];

/// Draws a random color from the pick table.
pub fn pick(rng: &mut impl Rng) -> Color {
    PALETTE[rng.gen_range(0..PALETTE.len())]
}

/// Resolves a color name, including `black`.
pub fn lookup(name: &str) -> Option<Color> {
    if name == BLACK.name {
        return Some(BLACK);
    }
    PALETTE.iter().copied().find(|c| c.name == name)
}

/// A gradient over a fixed list of color stops.
///
/// Sampling at `t = 0` returns the first stop exactly, `t = 1` the last;
/// in between the two neighboring stops are linearly interpolated.
#[derive(Debug, Clone)]
pub struct Colormap {
    stops: Vec<Color>,
}

impl Colormap {
    /// An empty stop list falls back to a single black stop.
    pub fn new(stops: Vec<Color>) -> Self {
        let stops = if stops.is_empty() { vec![BLACK] } else { stops };
        Self { stops }
    }

    /// Builds a colormap from `count` random palette picks.
    pub fn random(rng: &mut impl Rng, count: usize) -> Self {
        Self::new((0..count.max(1)).map(|_| pick(rng)).collect())
    }

    pub fn sample(&self, t: f64) -> [u8; 3] {
        let last = self.stops.len() - 1;
        if last == 0 {
            return self.stops[0].rgb;
        }
        let scaled = t.clamp(0.0, 1.0) * last as f64;
        let lower = (scaled.floor() as usize).min(last - 1);
        let frac = scaled - lower as f64;
        let a = self.stops[lower].rgb;
        let b = self.stops[lower + 1].rgb;
        let mut rgb = [0u8; 3];
        for channel in 0..3 {
            let blended =
                f64::from(a[channel]) + (f64::from(b[channel]) - f64::from(a[channel])) * frac;
            rgb[channel] = blended.round() as u8;
        }
        rgb
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn sampling_hits_the_exact_end_stops() {
        let map = Colormap::new(vec![
            Color { name: "a", rgb: [10, 20, 30] },
            Color { name: "b", rgb: [200, 100, 0] },
            Color { name: "c", rgb: [0, 255, 60] },
        ]);
        assert_eq!(map.sample(0.0), [10, 20, 30]);
        assert_eq!(map.sample(1.0), [0, 255, 60]);
    }

    #[test]
    fn sampling_interpolates_between_stops() {
        let map = Colormap::new(vec![
            Color { name: "a", rgb: [0, 0, 0] },
            Color { name: "b", rgb: [100, 200, 50] },
        ]);
        assert_eq!(map.sample(0.5), [50, 100, 25]);
    }

    #[test]
    fn out_of_range_samples_clamp() {
        let map = Colormap::new(vec![
            Color { name: "a", rgb: [1, 2, 3] },
            Color { name: "b", rgb: [4, 5, 6] },
        ]);
        assert_eq!(map.sample(-3.0), [1, 2, 3]);
        assert_eq!(map.sample(42.0), [4, 5, 6]);
    }

    #[test]
    fn empty_stop_lists_fall_back_to_a_single_stop() {
        let map = Colormap::new(Vec::new());
        assert_eq!(map.sample(0.0), BLACK.rgb);
        assert_eq!(map.sample(0.7), BLACK.rgb);
        assert_eq!(map.sample(1.0), BLACK.rgb);
    }

    #[test]
    fn picks_never_return_black() {
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..500 {
            assert_ne!(pick(&mut rng), BLACK);
        }
    }

    #[test]
    fn lookup_resolves_names() {
        assert_eq!(lookup("black"), Some(BLACK));
        assert_eq!(lookup("white").map(|c| c.rgb), Some([0xff, 0xff, 0xff]));
        assert!(lookup("blurple").is_none());
    }
}
