use super::{Color, Rgba8};

/// Collapses the samples of one multisampled pixel into a single value.
pub trait Resolve: Copy {
    fn resolve(samples: &[Self]) -> Self;
}

impl Resolve for Color {
    fn resolve(samples: &[Self]) -> Self {
        if samples.is_empty() {
            return Color::transparent();
        }
        let k = 1.0 / samples.len() as f32;
        samples.iter().fold(Color::transparent(), |acc, s| {
            Color::from_premul(acc.r + s.r * k, acc.g + s.g * k, acc.b + s.b * k, acc.a + s.a * k)
        })
    }
}

impl Resolve for Rgba8 {
    fn resolve(samples: &[Self]) -> Self {
        if samples.is_empty() {
            return [0; 4];
        }
        let n = samples.len() as u32;
        core::array::from_fn(|i| {
            let sum: u32 = samples.iter().map(|s| s[i] as u32).sum();
            ((sum + n / 2) / n) as u8
        })
    }
}

impl Resolve for f32 {
    fn resolve(samples: &[Self]) -> Self {
        if samples.is_empty() {
            return 0.0;
        }
        samples.iter().sum::<f32>() / samples.len() as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn averages_colors() {
        let out = Color::resolve(&[Color::white(), Color::transparent()]);
        assert_eq!(out, Color::from_premul(0.5, 0.5, 0.5, 0.5));
    }

    #[test]
    fn averages_bytes_with_rounding() {
        assert_eq!(Rgba8::resolve(&[[255, 0, 1, 255], [0, 0, 2, 255]]), [128, 0, 2, 255]);
    }

    #[test]
    fn single_sample_is_identity() {
        assert_eq!(f32::resolve(&[0.25]), 0.25);
    }
}
