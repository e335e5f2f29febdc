//! Named color-space conversions used by `ctransform` and `set_argument`.

use slvm_core::Color;

/// Convert `c` from `space` to RGB. `None` for an unknown space.
pub fn to_rgb(space: &str, c: Color) -> Option<Color> {
    Some(match space {
        "rgb" | "" => c,
        "hsv" => hsv_to_rgb(c),
        "hsl" => hsl_to_rgb(c),
        "xyz" | "XYZ" => mul3(&XYZ_TO_RGB, c),
        "yiq" | "YIQ" => mul3(&YIQ_TO_RGB, c),
        _ => return None,
    })
}

/// Convert RGB `c` into `space`. `None` for an unknown space.
pub fn from_rgb(space: &str, c: Color) -> Option<Color> {
    Some(match space {
        "rgb" | "" => c,
        "hsv" => rgb_to_hsv(c),
        "hsl" => rgb_to_hsl(c),
        "xyz" | "XYZ" => mul3(&RGB_TO_XYZ, c),
        "yiq" | "YIQ" => mul3(&RGB_TO_YIQ, c),
        _ => return None,
    })
}

const RGB_TO_XYZ: [[f32; 3]; 3] = [
    [0.412_453, 0.357_580, 0.180_423],
    [0.212_671, 0.715_160, 0.072_169],
    [0.019_334, 0.119_193, 0.950_227],
];

const XYZ_TO_RGB: [[f32; 3]; 3] = [
    [3.240_479, -1.537_150, -0.498_535],
    [-0.969_256, 1.875_992, 0.041_556],
    [0.055_648, -0.204_043, 1.057_311],
];

const RGB_TO_YIQ: [[f32; 3]; 3] = [
    [0.299, 0.587, 0.114],
    [0.596, -0.275, -0.321],
    [0.212, -0.523, 0.311],
];

const YIQ_TO_RGB: [[f32; 3]; 3] = [
    [1.0, 0.956, 0.621],
    [1.0, -0.272, -0.647],
    [1.0, -1.105, 1.702],
];

fn mul3(m: &[[f32; 3]; 3], c: Color) -> Color {
    Color::new(
        m[0][0] * c.r + m[0][1] * c.g + m[0][2] * c.b,
        m[1][0] * c.r + m[1][1] * c.g + m[1][2] * c.b,
        m[2][0] * c.r + m[2][1] * c.g + m[2][2] * c.b,
    )
}

fn rgb_to_hsv(c: Color) -> Color {
    let max = c.r.max(c.g).max(c.b);
    let min = c.r.min(c.g).min(c.b);
    let delta = max - min;
    let s = if max > 0.0 { delta / max } else { 0.0 };
    Color::new(hue(c, max, delta), s, max)
}

fn hsv_to_rgb(c: Color) -> Color {
    let (h, s, v) = (c.r, c.g, c.b);
    if s <= 0.0 {
        return Color::splat(v);
    }
    let h = (h - h.floor()) * 6.0;
    let sector = h.floor();
    let f = h - sector;
    let p = v * (1.0 - s);
    let q = v * (1.0 - s * f);
    let t = v * (1.0 - s * (1.0 - f));
    match sector as i32 {
        0 => Color::new(v, t, p),
        1 => Color::new(q, v, p),
        2 => Color::new(p, v, t),
        3 => Color::new(p, q, v),
        4 => Color::new(t, p, v),
        _ => Color::new(v, p, q),
    }
}

fn rgb_to_hsl(c: Color) -> Color {
    let max = c.r.max(c.g).max(c.b);
    let min = c.r.min(c.g).min(c.b);
    let delta = max - min;
    let l = (max + min) * 0.5;
    let s = if delta == 0.0 {
        0.0
    } else if l <= 0.5 {
        delta / (max + min)
    } else {
        delta / (2.0 - max - min)
    };
    Color::new(hue(c, max, delta), s, l)
}

fn hsl_to_rgb(c: Color) -> Color {
    let (h, s, l) = (c.r, c.g, c.b);
    if s <= 0.0 {
        return Color::splat(l);
    }
    let m2 = if l <= 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let m1 = 2.0 * l - m2;
    Color::new(
        hsl_channel(m1, m2, h + 1.0 / 3.0),
        hsl_channel(m1, m2, h),
        hsl_channel(m1, m2, h - 1.0 / 3.0),
    )
}

fn hsl_channel(m1: f32, m2: f32, h: f32) -> f32 {
    let h = h - h.floor();
    if h < 1.0 / 6.0 {
        m1 + (m2 - m1) * h * 6.0
    } else if h < 0.5 {
        m2
    } else if h < 2.0 / 3.0 {
        m1 + (m2 - m1) * (2.0 / 3.0 - h) * 6.0
    } else {
        m1
    }
}

// Hue in [0, 1).
fn hue(c: Color, max: f32, delta: f32) -> f32 {
    if delta == 0.0 {
        return 0.0;
    }
    let h = if max == c.r {
        (c.g - c.b) / delta
    } else if max == c.g {
        2.0 + (c.b - c.r) / delta
    } else {
        4.0 + (c.r - c.g) / delta
    };
    let h = h / 6.0;
    if h < 0.0 { h + 1.0 } else { h }
}
