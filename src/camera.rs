//! Viewport camera
//!
//! Three behaviors, all driven by polling elapsed time each tick rather
//! than by completion callbacks:
//!
//! - `Follow`: keep the player centered, clamped to the level bounds
//! - `Pan`: after a respawn, glide from where the player died back to the
//!   spawn point with an exponential ease-out, then resume following
//! - `Shake`: the game-over flourish; the view keeps following but gets a
//!   decaying jitter until the timer runs out

#[derive(Debug, Clone, Copy, PartialEq)]
enum CameraMode {
    Follow,
    Pan {
        from_x: f32,
        from_y: f32,
        to_x: f32,
        to_y: f32,
        elapsed_ms: f32,
        duration_ms: f32,
    },
    Shake {
        elapsed_ms: f32,
        duration_ms: f32,
        magnitude: f32,
    },
}

pub struct Camera {
    /// Top-left corner of the viewport in world pixels
    pub x: f32,
    pub y: f32,
    view_w: f32,
    view_h: f32,
    bounds_w: f32,
    bounds_h: f32,
    mode: CameraMode,
}

fn ease_out_expo(t: f32) -> f32 {
    if t >= 1.0 {
        1.0
    } else {
        1.0 - (2.0_f32).powf(-10.0 * t)
    }
}

impl Camera {
    pub fn new(view_w: f32, view_h: f32, bounds_w: f32, bounds_h: f32) -> Self {
        Camera {
            x: 0.0,
            y: 0.0,
            view_w,
            view_h,
            bounds_w,
            bounds_h,
            mode: CameraMode::Follow,
        }
    }

    fn clamp(&self, x: f32, y: f32) -> (f32, f32) {
        let max_x = (self.bounds_w - self.view_w).max(0.0);
        let max_y = (self.bounds_h - self.view_h).max(0.0);
        (x.clamp(0.0, max_x), y.clamp(0.0, max_y))
    }

    /// Where the viewport's top-left lands when centered on `center`.
    pub fn follow_position(&self, center: (f32, f32)) -> (f32, f32) {
        self.clamp(center.0 - self.view_w / 2.0, center.1 - self.view_h / 2.0)
    }

    pub fn update(&mut self, dt: f32, target_center: (f32, f32)) {
        let dt_ms = dt * 1000.0;

        match &mut self.mode {
            CameraMode::Follow => {
                let (x, y) = self.follow_position(target_center);
                self.x = x;
                self.y = y;
            }
            CameraMode::Pan {
                from_x,
                from_y,
                to_x,
                to_y,
                elapsed_ms,
                duration_ms,
            } => {
                *elapsed_ms += dt_ms;
                let t = (*elapsed_ms / *duration_ms).min(1.0);
                let eased = ease_out_expo(t);
                self.x = *from_x + (*to_x - *from_x) * eased;
                self.y = *from_y + (*to_y - *from_y) * eased;

                if t >= 1.0 {
                    self.mode = CameraMode::Follow;
                }
            }
            CameraMode::Shake {
                elapsed_ms,
                duration_ms,
                ..
            } => {
                *elapsed_ms += dt_ms;
                if *elapsed_ms >= *duration_ms {
                    self.mode = CameraMode::Follow;
                }
                let (x, y) = self.follow_position(target_center);
                self.x = x;
                self.y = y;
            }
        }
    }

    /// Glides the viewport from wherever it is now to the follow position
    /// for `to_center`. Following is suspended until the glide completes.
    pub fn start_pan(&mut self, to_center: (f32, f32), duration_ms: f32) {
        let (to_x, to_y) = self.follow_position(to_center);
        self.mode = CameraMode::Pan {
            from_x: self.x,
            from_y: self.y,
            to_x,
            to_y,
            elapsed_ms: 0.0,
            duration_ms,
        };
    }

    pub fn start_shake(&mut self, magnitude: f32, duration_ms: f32) {
        self.mode = CameraMode::Shake {
            elapsed_ms: 0.0,
            duration_ms,
            magnitude,
        };
    }

    #[allow(dead_code)] // Reserved for future state queries
    pub fn is_following(&self) -> bool {
        self.mode == CameraMode::Follow
    }

    fn shake_offset(&self) -> (f32, f32) {
        if let CameraMode::Shake {
            elapsed_ms,
            duration_ms,
            magnitude,
        } = self.mode
        {
            // Jitter fades out as the timer runs down
            let decay = 1.0 - (elapsed_ms / duration_ms).min(1.0);
            let dx = (elapsed_ms * 0.09).sin() * magnitude * decay;
            let dy = (elapsed_ms * 0.13).cos() * magnitude * decay;
            (dx, dy)
        } else {
            (0.0, 0.0)
        }
    }

    /// World-to-screen offset to add to every drawn position.
    pub fn offset(&self) -> (i32, i32) {
        let (sx, sy) = self.shake_offset();
        (-(self.x + sx) as i32, -(self.y + sy) as i32)
    }
}
