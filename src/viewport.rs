// ---------------------------------------------------------------------------
// Viewport transform: pure scale/origin arithmetic for pan, zoom, rotate
// and flip. The window shell owns the single live ViewportState and feeds
// raw event data in; nothing here touches winit.
// ---------------------------------------------------------------------------

/// Multiplier applied per zoom tick.
pub const ZOOM_STEP: f32 = 1.25;
/// Zoom clamp bounds.
pub const MIN_SCALE: f32 = 0.0001;
pub const MAX_SCALE: f32 = 1000.0;

/// Placement of the image in window client coordinates.
/// `origin` is the top-left corner of the scaled image; `fitted` records
/// whether the placement still satisfies the fit-to-window invariant, so a
/// window resize knows to refit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportState {
    pub scale: f32,
    pub origin: (f32, f32),
    pub fitted: bool,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self {
            scale: 1.0,
            origin: (0.0, 0.0),
            fitted: false,
        }
    }
}

/// Scale the image to the largest size fully contained in the client
/// rectangle and center it.
pub fn fit_to_window(img_w: f32, img_h: f32, client_w: f32, client_h: f32) -> ViewportState {
    let scale = (client_w / img_w).min(client_h / img_h);
    ViewportState {
        scale,
        origin: (
            (client_w - img_w * scale) / 2.0,
            (client_h - img_h * scale) / 2.0,
        ),
        fitted: true,
    }
}

/// Center the image at 1:1 pixel scale.
pub fn actual_size(img_w: f32, img_h: f32, client_w: f32, client_h: f32) -> ViewportState {
    ViewportState {
        scale: 1.0,
        origin: ((client_w - img_w) / 2.0, (client_h - img_h) / 2.0),
        fitted: false,
    }
}

/// Translate the origin by a drag delta.
pub fn pan(state: ViewportState, dx: f32, dy: f32) -> ViewportState {
    ViewportState {
        scale: state.scale,
        origin: (state.origin.0 + dx, state.origin.1 + dy),
        fitted: false,
    }
}

/// One zoom tick toward or away from `pivot` (window coordinates).
///
/// The image point under the pivot stays fixed on screen:
///   origin' = origin + (1 - scale'/scale) * (pivot - origin)
pub fn zoom(state: ViewportState, pivot: (f32, f32), zoom_in: bool) -> ViewportState {
    let new_scale = if zoom_in {
        state.scale * ZOOM_STEP
    } else {
        state.scale / ZOOM_STEP
    }
    .clamp(MIN_SCALE, MAX_SCALE);

    let factor = 1.0 - new_scale / state.scale;
    ViewportState {
        scale: new_scale,
        origin: (
            state.origin.0 + factor * (pivot.0 - state.origin.0),
            state.origin.1 + factor * (pivot.1 - state.origin.1),
        ),
        fitted: false,
    }
}

/// Quarter-turn about the window center. `img_w`/`img_h` are the displayed
/// dimensions *before* the turn; the caller swaps its effective dimensions
/// afterward. A fitted view is simply refit with the swapped dimensions.
pub fn rotate_quarter(
    state: ViewportState,
    clockwise: bool,
    img_w: f32,
    img_h: f32,
    client_w: f32,
    client_h: f32,
) -> ViewportState {
    if state.fitted {
        return fit_to_window(img_h, img_w, client_w, client_h);
    }

    let cx = client_w / 2.0;
    let cy = client_h / 2.0;
    let off_x = state.origin.0 - cx;
    let off_y = state.origin.1 - cy;

    // (x, y) -> (-y, x) about the center, then shift by the scaled edge that
    // became the rotated image's leading edge.
    let origin = if clockwise {
        (cx - off_y - img_w * state.scale, cy + off_x)
    } else {
        (cx + off_y, cy - off_x - img_h * state.scale)
    };

    ViewportState {
        scale: state.scale,
        origin,
        fitted: false,
    }
}

/// Mirror the origin about the window's vertical centerline. Geometry is
/// unchanged while fitted (the image is centered already).
pub fn flip_horizontal(state: ViewportState, img_w: f32, client_w: f32) -> ViewportState {
    if state.fitted {
        return state;
    }
    ViewportState {
        origin: (client_w - state.origin.0 - img_w * state.scale, state.origin.1),
        ..state
    }
}

/// Mirror the origin about the window's horizontal centerline.
pub fn flip_vertical(state: ViewportState, img_h: f32, client_h: f32) -> ViewportState {
    if state.fitted {
        return state;
    }
    ViewportState {
        origin: (state.origin.0, client_h - state.origin.1 - img_h * state.scale),
        ..state
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    const EPS: f32 = 1e-3;

    #[test]
    fn fit_wide_image_in_square_window() {
        let vp = fit_to_window(100.0, 50.0, 200.0, 200.0);
        assert_abs_diff_eq!(vp.scale, 2.0, epsilon = EPS);
        assert_abs_diff_eq!(vp.origin.0, 0.0, epsilon = EPS);
        assert_abs_diff_eq!(vp.origin.1, 50.0, epsilon = EPS);
        assert!(vp.fitted);
    }

    #[test]
    fn fit_contains_image_and_touches_one_axis() {
        for &(iw, ih, cw, ch) in &[
            (640.0_f32, 480.0_f32, 1280.0_f32, 720.0_f32),
            (3000.0, 2000.0, 800.0, 600.0),
            (10.0, 1000.0, 500.0, 500.0),
            (1.0, 1.0, 321.0, 97.0),
        ] {
            let vp = fit_to_window(iw, ih, cw, ch);
            let w = iw * vp.scale;
            let h = ih * vp.scale;
            assert!(vp.origin.0 >= -EPS && vp.origin.1 >= -EPS);
            assert!(vp.origin.0 + w <= cw + EPS);
            assert!(vp.origin.1 + h <= ch + EPS);
            let touches_x = (w - cw).abs() < EPS;
            let touches_y = (h - ch).abs() < EPS;
            assert!(touches_x || touches_y, "fit must touch on one axis");
        }
    }

    #[test]
    fn actual_size_centers_at_unit_scale() {
        let vp = actual_size(100.0, 50.0, 200.0, 200.0);
        assert_abs_diff_eq!(vp.scale, 1.0, epsilon = EPS);
        assert_abs_diff_eq!(vp.origin.0, 50.0, epsilon = EPS);
        assert_abs_diff_eq!(vp.origin.1, 75.0, epsilon = EPS);
        assert!(!vp.fitted);
    }

    #[test]
    fn pan_moves_origin_and_clears_fitted() {
        let vp = fit_to_window(100.0, 100.0, 200.0, 200.0);
        let vp = pan(vp, 15.0, -7.5);
        assert_abs_diff_eq!(vp.origin.0, 15.0, epsilon = EPS);
        assert_abs_diff_eq!(vp.origin.1, -7.5, epsilon = EPS);
        assert!(!vp.fitted);
    }

    #[test]
    fn zoom_keeps_pivot_point_fixed() {
        let vp = ViewportState {
            scale: 1.0,
            origin: (30.0, 40.0),
            fitted: false,
        };
        let pivot = (120.0, 85.0);
        // Image-space point under the pivot before the zoom.
        let ix = (pivot.0 - vp.origin.0) / vp.scale;
        let iy = (pivot.1 - vp.origin.1) / vp.scale;

        let vp2 = zoom(vp, pivot, true);
        assert_abs_diff_eq!(vp2.origin.0 + ix * vp2.scale, pivot.0, epsilon = EPS);
        assert_abs_diff_eq!(vp2.origin.1 + iy * vp2.scale, pivot.1, epsilon = EPS);
        assert!(!vp2.fitted);
    }

    #[test]
    fn zoom_in_then_out_restores_state() {
        let start = ViewportState {
            scale: 1.5,
            origin: (-20.0, 33.0),
            fitted: false,
        };
        let pivot = (400.0, 300.0);
        let mut vp = start;
        for _ in 0..5 {
            vp = zoom(vp, pivot, true);
        }
        for _ in 0..5 {
            vp = zoom(vp, pivot, false);
        }
        assert_abs_diff_eq!(vp.scale, start.scale, epsilon = EPS);
        assert_abs_diff_eq!(vp.origin.0, start.origin.0, epsilon = EPS);
        assert_abs_diff_eq!(vp.origin.1, start.origin.1, epsilon = EPS);
    }

    #[test]
    fn zoom_scale_never_leaves_clamp_bounds() {
        let mut vp = ViewportState::default();
        for _ in 0..200 {
            vp = zoom(vp, (0.0, 0.0), true);
            assert!(vp.scale <= MAX_SCALE && vp.scale >= MIN_SCALE);
        }
        assert_abs_diff_eq!(vp.scale, MAX_SCALE, epsilon = EPS);
        for _ in 0..400 {
            vp = zoom(vp, (0.0, 0.0), false);
            assert!(vp.scale <= MAX_SCALE && vp.scale >= MIN_SCALE);
        }
        assert!(vp.scale >= MIN_SCALE);
    }

    #[test]
    fn four_clockwise_quarter_turns_restore_origin() {
        let start = ViewportState {
            scale: 0.5,
            origin: (37.0, -12.0),
            fitted: false,
        };
        let (cw_px, ch_px) = (800.0, 600.0);
        // 200x120 image at scale 0.5; dims swap with each turn.
        let mut dims = (200.0_f32, 120.0_f32);
        let mut vp = start;
        for _ in 0..4 {
            vp = rotate_quarter(vp, true, dims.0, dims.1, cw_px, ch_px);
            dims = (dims.1, dims.0);
        }
        assert_abs_diff_eq!(vp.origin.0, start.origin.0, epsilon = EPS);
        assert_abs_diff_eq!(vp.origin.1, start.origin.1, epsilon = EPS);
        assert_abs_diff_eq!(vp.scale, start.scale, epsilon = EPS);
    }

    #[test]
    fn clockwise_then_anticlockwise_is_identity() {
        let start = ViewportState {
            scale: 2.0,
            origin: (5.0, 9.0),
            fitted: false,
        };
        let vp = rotate_quarter(start, true, 100.0, 80.0, 640.0, 480.0);
        let vp = rotate_quarter(vp, false, 80.0, 100.0, 640.0, 480.0);
        assert_abs_diff_eq!(vp.origin.0, start.origin.0, epsilon = EPS);
        assert_abs_diff_eq!(vp.origin.1, start.origin.1, epsilon = EPS);
    }

    #[test]
    fn rotate_while_fitted_refits_with_swapped_dims() {
        let vp = fit_to_window(100.0, 50.0, 200.0, 200.0);
        let vp = rotate_quarter(vp, true, 100.0, 50.0, 200.0, 200.0);
        // Swapped: 50x100 in 200x200 -> scale 2, centered horizontally.
        assert_abs_diff_eq!(vp.scale, 2.0, epsilon = EPS);
        assert_abs_diff_eq!(vp.origin.0, 50.0, epsilon = EPS);
        assert_abs_diff_eq!(vp.origin.1, 0.0, epsilon = EPS);
        assert!(vp.fitted);
    }

    #[test]
    fn flip_horizontal_twice_is_identity() {
        let start = ViewportState {
            scale: 1.25,
            origin: (42.0, 17.0),
            fitted: false,
        };
        let vp = flip_horizontal(start, 300.0, 1024.0);
        assert_abs_diff_eq!(
            vp.origin.0,
            1024.0 - start.origin.0 - 300.0 * start.scale,
            epsilon = EPS
        );
        let vp = flip_horizontal(vp, 300.0, 1024.0);
        assert_abs_diff_eq!(vp.origin.0, start.origin.0, epsilon = EPS);
        assert_abs_diff_eq!(vp.origin.1, start.origin.1, epsilon = EPS);
    }

    #[test]
    fn flip_while_fitted_is_noop() {
        let vp = fit_to_window(100.0, 50.0, 200.0, 200.0);
        assert_eq!(flip_horizontal(vp, 100.0, 200.0), vp);
        assert_eq!(flip_vertical(vp, 50.0, 200.0), vp);
    }

    #[test]
    fn flip_vertical_mirrors_y_only() {
        let start = ViewportState {
            scale: 1.0,
            origin: (10.0, 20.0),
            fitted: false,
        };
        let vp = flip_vertical(start, 100.0, 480.0);
        assert_abs_diff_eq!(vp.origin.0, start.origin.0, epsilon = EPS);
        assert_abs_diff_eq!(vp.origin.1, 480.0 - 20.0 - 100.0, epsilon = EPS);
    }
}
