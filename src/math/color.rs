/// Linear RGB triple in [0, 1]
pub type Rgb = [f32; 3];

pub const CYAN: u32 = 0x00ffff;
pub const MAGENTA: u32 = 0xff00ff;
pub const YELLOW: u32 = 0xffff00;

/// Unpack a 0xRRGGBB literal
pub const fn hex_to_rgb(hex: u32) -> Rgb {
    [
        ((hex >> 16) & 0xff) as f32 / 255.0,
        ((hex >> 8) & 0xff) as f32 / 255.0,
        (hex & 0xff) as f32 / 255.0,
    ]
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * 6.0 * (2.0 / 3.0 - t)
    } else {
        p
    }
}

/// Hue, saturation and lightness all in [0, 1]; hue wraps
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Rgb {
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        return [l, l, l];
    }

    let q = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    [
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    ]
}

pub fn mix(a: Rgb, b: Rgb, t: f32) -> Rgb {
    [
        a[0] + (b[0] - a[0]) * t,
        a[1] + (b[1] - a[1]) * t,
        a[2] + (b[2] - a[2]) * t,
    ]
}

/// Channel-wise mean, used for link colors between two nodes
pub fn average(a: Rgb, b: Rgb) -> Rgb {
    mix(a, b, 0.5)
}

/// Rec.601 luma
pub fn luminance(c: Rgb) -> f32 {
    c[0] * 0.299 + c[1] * 0.587 + c[2] * 0.114
}
