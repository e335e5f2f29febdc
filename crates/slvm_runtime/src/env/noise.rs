//! Gradient noise and cell noise for `GridEnv`.
//!
//! Both map 1 to 4 coordinates into [0, 1]. Multi-channel results evaluate
//! each channel at a shifted domain so the channels are uncorrelated.

const PERM: [u8; 512] = {
    const P: [u8; 256] = [
        151, 160, 137, 91, 90, 15, 131, 13, 201, 95, 96, 53, 194, 233, 7, 225, 140, 36, 103, 30,
        69, 142, 8, 99, 37, 240, 21, 10, 23, 190, 6, 148, 247, 120, 234, 75, 0, 26, 197, 62, 94,
        252, 219, 203, 117, 35, 11, 32, 57, 177, 33, 88, 237, 149, 56, 87, 174, 20, 125, 136, 171,
        168, 68, 175, 74, 165, 71, 134, 139, 48, 27, 166, 77, 146, 158, 231, 83, 111, 229, 122, 60,
        211, 133, 230, 220, 105, 92, 41, 55, 46, 245, 40, 244, 102, 143, 54, 65, 25, 63, 161, 1,
        216, 80, 73, 209, 76, 132, 187, 208, 89, 18, 169, 200, 196, 135, 130, 116, 188, 159, 86,
        164, 100, 109, 198, 173, 186, 3, 64, 52, 217, 226, 250, 124, 123, 5, 202, 38, 147, 118,
        126, 255, 82, 85, 212, 207, 206, 59, 227, 47, 16, 58, 17, 182, 189, 28, 42, 223, 183, 170,
        213, 119, 248, 152, 2, 44, 154, 163, 70, 221, 153, 101, 155, 167, 43, 172, 9, 129, 22, 39,
        253, 19, 98, 108, 110, 79, 113, 224, 232, 178, 185, 112, 104, 218, 246, 97, 228, 251, 34,
        242, 193, 238, 210, 144, 12, 191, 179, 162, 241, 81, 51, 145, 235, 249, 14, 239, 107, 49,
        192, 214, 31, 181, 199, 106, 157, 184, 84, 204, 176, 115, 121, 50, 45, 127, 4, 150, 254,
        138, 236, 205, 93, 222, 114, 67, 29, 24, 72, 243, 141, 128, 195, 78, 66, 215, 61, 156, 180,
    ];
    let mut table = [0u8; 512];
    let mut i = 0;
    while i < 512 {
        table[i] = P[i & 255];
        i += 1;
    }
    table
};

// Per-channel domain shifts for color and point noise.
const CHANNEL_SHIFT: [f32; 3] = [0.0, 19.34, 47.81];

#[inline]
fn fade(t: f32) -> f32 {
    t * t * t * (t * (t * 6.0 - 15.0) + 10.0)
}

#[inline]
fn lerp(t: f32, a: f32, b: f32) -> f32 {
    a + t * (b - a)
}

#[inline]
fn perm(v: i32) -> i32 {
    i32::from(PERM[(v & 255) as usize])
}

#[inline]
fn grad1(hash: i32, x: f32) -> f32 {
    if hash & 1 == 0 { x } else { -x }
}

#[inline]
fn grad2(hash: i32, x: f32, y: f32) -> f32 {
    match hash & 3 {
        0 => x + y,
        1 => -x + y,
        2 => x - y,
        _ => -x - y,
    }
}

#[inline]
fn grad3(hash: i32, x: f32, y: f32, z: f32) -> f32 {
    let h = hash & 15;
    let u = if h < 8 { x } else { y };
    let v = if h < 4 {
        y
    } else if h == 12 || h == 14 {
        x
    } else {
        z
    };
    (if h & 1 == 0 { u } else { -u }) + (if h & 2 == 0 { v } else { -v })
}

fn perlin1(x: f32) -> f32 {
    let xi = x.floor() as i32;
    let xf = x - x.floor();
    lerp(fade(xf), grad1(perm(xi), xf), grad1(perm(xi + 1), xf - 1.0))
}

fn perlin2(x: f32, y: f32) -> f32 {
    let (xi, yi) = (x.floor() as i32, y.floor() as i32);
    let (xf, yf) = (x - x.floor(), y - y.floor());
    let (u, v) = (fade(xf), fade(yf));
    let aa = perm(perm(xi) + yi);
    let ab = perm(perm(xi) + yi + 1);
    let ba = perm(perm(xi + 1) + yi);
    let bb = perm(perm(xi + 1) + yi + 1);
    lerp(
        v,
        lerp(u, grad2(aa, xf, yf), grad2(ba, xf - 1.0, yf)),
        lerp(u, grad2(ab, xf, yf - 1.0), grad2(bb, xf - 1.0, yf - 1.0)),
    )
}

fn perlin3(x: f32, y: f32, z: f32) -> f32 {
    let (xi, yi, zi) = (x.floor() as i32, y.floor() as i32, z.floor() as i32);
    let (xf, yf, zf) = (x - x.floor(), y - y.floor(), z - z.floor());
    let (u, v, w) = (fade(xf), fade(yf), fade(zf));
    let a = perm(xi) + yi;
    let aa = perm(a) + zi;
    let ab = perm(a + 1) + zi;
    let b = perm(xi + 1) + yi;
    let ba = perm(b) + zi;
    let bb = perm(b + 1) + zi;
    lerp(
        w,
        lerp(
            v,
            lerp(u, grad3(perm(aa), xf, yf, zf), grad3(perm(ba), xf - 1.0, yf, zf)),
            lerp(u, grad3(perm(ab), xf, yf - 1.0, zf), grad3(perm(bb), xf - 1.0, yf - 1.0, zf)),
        ),
        lerp(
            v,
            lerp(
                u,
                grad3(perm(aa + 1), xf, yf, zf - 1.0),
                grad3(perm(ba + 1), xf - 1.0, yf, zf - 1.0),
            ),
            lerp(
                u,
                grad3(perm(ab + 1), xf, yf - 1.0, zf - 1.0),
                grad3(perm(bb + 1), xf - 1.0, yf - 1.0, zf - 1.0),
            ),
        ),
    )
}

// Fourth dimension: blend two 3D slices whose domains are offset by the
// lattice cell along w.
fn perlin4(x: f32, y: f32, z: f32, w: f32) -> f32 {
    let wi = w.floor() as i32;
    let wf = w - w.floor();
    let offset = |cell: i32| perm(cell) as f32 * 0.618;
    let lo = perlin3(x + offset(wi), y, z);
    let hi = perlin3(x + offset(wi + 1), y, z);
    lerp(fade(wf), lo, hi)
}

/// Gradient noise in [0, 1] for channel `channel` (0 for float results).
pub(crate) fn noise(coords: &[f32], channel: usize) -> f32 {
    let shift = CHANNEL_SHIFT[channel % 3];
    let c = |i: usize| coords.get(i).copied().unwrap_or(0.0) + shift;
    let n = match coords.len() {
        0 | 1 => perlin1(c(0)),
        2 => perlin2(c(0), c(1)),
        3 => perlin3(c(0), c(1), c(2)),
        _ => perlin4(c(0), c(1), c(2), c(3)),
    };
    (0.5 + 0.5 * n).clamp(0.0, 1.0)
}

/// Value in [0, 1) that is constant over each unit lattice cell.
pub(crate) fn cellnoise(coords: &[f32], channel: usize) -> f32 {
    let mut h = perm(channel as i32 * 71);
    for &c in coords {
        h = perm(h + c.floor() as i32);
        h = perm(h + (c.floor() as i32 >> 8));
    }
    let lo = h;
    let hi = perm(lo + 113);
    ((hi << 8) | lo) as f32 / 65536.0
}
