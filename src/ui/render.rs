use crate::commands::Interpolation;

// ---------------------------------------------------------------------------
// CPU blit into the softbuffer framebuffer (u32 per pixel, 0x00RRGGBB).
// ---------------------------------------------------------------------------

/// Pack RGB into softbuffer u32 format: 0x00RRGGBB.
pub fn rgb(r: u8, g: u8, b: u8) -> u32 {
    (r as u32) << 16 | (g as u32) << 8 | b as u32
}

fn unpack_rgb(v: u32) -> (u8, u8, u8) {
    ((v >> 16) as u8, (v >> 8) as u8, v as u8)
}

/// Sample the source at integer coordinates, RGBA.
fn texel(src: &[u8], src_w: u32, src_h: u32, x: u32, y: u32) -> (u32, u32, u32, u32) {
    let x = x.min(src_w - 1);
    let y = y.min(src_h - 1);
    let i = (y as usize * src_w as usize + x as usize) * 4;
    (
        src[i] as u32,
        src[i + 1] as u32,
        src[i + 2] as u32,
        src[i + 3] as u32,
    )
}

fn sample_nearest(src: &[u8], src_w: u32, src_h: u32, sx: f32, sy: f32) -> (u32, u32, u32, u32) {
    texel(src, src_w, src_h, sx as u32, sy as u32)
}

fn sample_bilinear(src: &[u8], src_w: u32, src_h: u32, sx: f32, sy: f32) -> (u32, u32, u32, u32) {
    let x = (sx - 0.5).max(0.0);
    let y = (sy - 0.5).max(0.0);
    let x0 = x as u32;
    let y0 = y as u32;
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let p00 = texel(src, src_w, src_h, x0, y0);
    let p10 = texel(src, src_w, src_h, x0 + 1, y0);
    let p01 = texel(src, src_w, src_h, x0, y0 + 1);
    let p11 = texel(src, src_w, src_h, x0 + 1, y0 + 1);

    let lerp = |a: u32, b: u32, t: f32| a as f32 + (b as f32 - a as f32) * t;
    let blend = |c00, c10, c01, c11| {
        lerp(lerp(c00, c10, fx) as u32, lerp(c01, c11, fx) as u32, fy) as u32
    };

    (
        blend(p00.0, p10.0, p01.0, p11.0),
        blend(p00.1, p10.1, p01.1, p11.1),
        blend(p00.2, p10.2, p01.2, p11.2),
        blend(p00.3, p10.3, p01.3, p11.3),
    )
}

/// Draw the image scaled by `scale` with its (rotated, flipped) top-left at
/// (x0, y0). `rotation` counts clockwise quarter-turns; flips apply in the
/// rotated frame. Source pixels with alpha blend over the existing buffer.
#[allow(clippy::too_many_arguments)]
pub fn blit_image(
    dst: &mut [u32],
    dst_w: u32,
    dst_h: u32,
    src: &[u8],
    src_w: u32,
    src_h: u32,
    x0: f32,
    y0: f32,
    scale: f32,
    rotation: u8,
    flip_h: bool,
    flip_v: bool,
    interpolation: Interpolation,
) {
    let (draw_w, draw_h) = if rotation % 2 == 1 {
        (src_h as f32 * scale, src_w as f32 * scale)
    } else {
        (src_w as f32 * scale, src_h as f32 * scale)
    };

    let dx_start = x0.max(0.0) as u32;
    let dy_start = y0.max(0.0) as u32;
    let dx_end = (((x0 + draw_w).ceil()).max(0.0) as u32).min(dst_w);
    let dy_end = (((y0 + draw_h).ceil()).max(0.0) as u32).min(dst_h);

    let inv_scale = 1.0 / scale;
    // Unrotated dims in the rotated frame.
    let (rot_w, rot_h) = if rotation % 2 == 1 {
        (src_h as f32, src_w as f32)
    } else {
        (src_w as f32, src_h as f32)
    };

    for dy in dy_start..dy_end {
        for dx in dx_start..dx_end {
            let mut vx = (dx as f32 - x0) * inv_scale;
            let mut vy = (dy as f32 - y0) * inv_scale;

            if flip_h {
                vx = rot_w - vx - 1.0;
            }
            if flip_v {
                vy = rot_h - vy - 1.0;
            }

            // Map the rotated-frame point back to source coordinates.
            let (sx, sy) = match rotation % 4 {
                0 => (vx, vy),
                1 => (vy, src_h as f32 - 1.0 - vx), // 90 CW
                2 => (src_w as f32 - 1.0 - vx, src_h as f32 - 1.0 - vy),
                _ => (src_w as f32 - 1.0 - vy, vx), // 270 CW
            };

            if sx < 0.0 || sy < 0.0 || sx >= src_w as f32 || sy >= src_h as f32 {
                continue;
            }

            let (r, g, b, a) = match interpolation {
                Interpolation::Nearest => sample_nearest(src, src_w, src_h, sx, sy),
                Interpolation::Bilinear => sample_bilinear(src, src_w, src_h, sx, sy),
            };

            let di = dy as usize * dst_w as usize + dx as usize;
            if a == 255 {
                dst[di] = rgb(r as u8, g as u8, b as u8);
            } else if a > 0 {
                let inv = 255 - a;
                let (dr, dg, db) = unpack_rgb(dst[di]);
                let br = ((r * a + dr as u32 * inv) / 255) as u8;
                let bg = ((g * a + dg as u32 * inv) / 255) as u8;
                let bb = ((b * a + db as u32 * inv) / 255) as u8;
                dst[di] = rgb(br, bg, bb);
            }
        }
    }
}
