use std::path::Path;

use anyhow::{Context, Result};
use fits_driver::{write_image, Dim1, Dim2, Pixel, PixelBuffer};

fn gaussian(x: f64, mu: f64, sigma: f64, amplitude: f64) -> f64 {
    amplitude * (-(x - mu).powi(2) / (2.0 * sigma.powi(2))).exp()
}

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// 1-D, 64-bit: three emission lines on a flat continuum.
fn spectrum(rng: &mut SimpleRng) -> Result<PixelBuffer<f64, Dim1>> {
    let lines = [(420.0, 6.0, 3.0), (486.0, 4.0, 5.5), (656.0, 8.0, 9.0)];
    let data: Vec<f64> = (0..1024)
        .map(|i| {
            let wl = 300.0 + i as f64 * 0.5;
            let signal: f64 = lines
                .iter()
                .map(|&(mu, sigma, amp)| gaussian(wl, mu, sigma, amp))
                .sum();
            1.0 + signal + rng.gauss(0.0, 0.05)
        })
        .collect();
    Ok(PixelBuffer::from_vec(Dim1 { x: 1024 }, data)?)
}

/// 2-D, 32-bit: a handful of stars over sky noise, with a dead column
/// marked undefined.
fn star_field(rng: &mut SimpleRng) -> Result<PixelBuffer<f32, Dim2>> {
    let shape = Dim2 { x: 256, y: 192 };
    let stars = [(40.0, 30.0, 1.8, 900.0), (128.0, 96.0, 2.5, 2500.0), (200.0, 150.0, 1.2, 400.0)];
    let dead_column = 77;

    let mut img: PixelBuffer<f32, Dim2> = PixelBuffer::new(shape);
    img.alloc()?;
    for (i, px) in img.as_mut_slice().iter_mut().enumerate() {
        let (x, y) = (i % shape.x, i / shape.x);
        if x == dead_column {
            *px = f32::null_value();
            continue;
        }
        let star: f64 = stars
            .iter()
            .map(|&(cx, cy, sigma, amp)| {
                let r = ((x as f64 - cx).powi(2) + (y as f64 - cy).powi(2)).sqrt();
                gaussian(r, 0.0, sigma, amp)
            })
            .sum();
        *px = (100.0 + star + rng.gauss(0.0, 3.0)) as f32;
    }
    Ok(img)
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let spectrum_path = Path::new("sample_spectrum.fits");
    write_image(spectrum_path, &spectrum(&mut rng)?)
        .with_context(|| format!("writing {}", spectrum_path.display()))?;
    println!("Wrote 1024-pixel 64-bit spectrum to {}", spectrum_path.display());

    let field_path = Path::new("sample_field.fits");
    write_image(field_path, &star_field(&mut rng)?)
        .with_context(|| format!("writing {}", field_path.display()))?;
    println!("Wrote 256x192 32-bit star field to {}", field_path.display());

    Ok(())
}
