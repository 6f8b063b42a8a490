//! Closed-form transforms lifted from the scene graph
//!
//! The physics only needs two places in the stadium: where the pitcher lets
//! go of the ball, and where the bat is during a swing. Both are rebuilt
//! from the same chain of transforms the scene draws with.

use std::f32::consts::{FRAC_PI_4, PI};

use glam::{Mat4, Vec3};

fn translate(x: f32, y: f32, z: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(x, y, z))
}

fn scale(x: f32, y: f32, z: f32) -> Mat4 {
    Mat4::from_scale(Vec3::new(x, y, z))
}

/// Field origin: home plate corner of the diamond
pub fn field_transform() -> Mat4 {
    Mat4::from_rotation_y(-FRAC_PI_4) * translate(20.0, 0.0, 20.0)
}

/// Pitcher's mound
pub fn mound_transform() -> Mat4 {
    let home_dirt = field_transform()
        * scale(0.75, 0.5, 0.75)
        * translate(-25.0, -20.0, -25.0)
        * scale(6.0, 1.0, 6.0);
    home_dirt * translate(-4.5, 0.0, -4.5) * scale(1.0, 3.0, 1.0)
}

/// Pitcher's throwing arm
pub fn pitching_arm_transform() -> Mat4 {
    let head = mound_transform()
        * scale(1.0 / 6.0, 1.0 / 3.0, 1.0 / 6.0)
        * translate(0.0, 9.5, 0.0)
        * Mat4::from_rotation_y(15.0);
    let torso = head * translate(0.0, -2.25, 0.0) * scale(1.0, 1.25, 1.0);
    torso * scale(1.0, 1.0, 0.5) * translate(0.0, 0.0, 3.0)
}

/// Where a pitch is emplaced (the ball inherits the arm's scale)
pub fn release_transform() -> Mat4 {
    pitching_arm_transform() * translate(-4.0, -2.0, -9.0)
}

/// The batter, shuffled sideways by `batting_x`, turned into the swing
pub fn batter_transform(batting_x: f32, swing_elapsed: Option<f32>) -> Mat4 {
    let stance = translate(batting_x, -6.0, 3.0) * Mat4::from_rotation_y(-1.0);
    match swing_elapsed {
        Some(d) => stance * Mat4::from_rotation_y(-0.1 - (d * 8.1).cos()),
        None => stance,
    }
}

/// Bat transform for a swing `swing_elapsed` seconds old (`None` when resting)
pub fn bat_transform(batting_x: f32, swing_elapsed: Option<f32>) -> Mat4 {
    let batter = batter_transform(batting_x, swing_elapsed);
    // Grip: pivot at the hands, tilt the barrel back over the shoulder
    let grip = translate(0.0, 1.0, -2.0)
        * translate(0.0, -2.3, 0.0)
        * Mat4::from_rotation_x(0.5)
        * Mat4::from_rotation_z(-0.3)
        * translate(0.0, 2.3, 0.0)
        * scale(2.7, 1.5, 2.7);

    match swing_elapsed {
        // Wind-up
        Some(d) if d < PI / 40.0 => {
            batter
                * translate(0.0, -1.2, -2.0)
                * Mat4::from_rotation_x(-0.62 - 0.5 * (d * 15.0 + PI).cos())
                * Mat4::from_rotation_y(-1.9 * (d * 15.0).cos() + 2.0)
                * translate(0.0, 1.5, 2.0)
                * grip
        }
        // Follow-through
        Some(d) => {
            let sweep = ((d - PI / 12.0) * 10.0).sin();
            batter
                * translate(0.0, -1.2, -2.0)
                * Mat4::from_rotation_x(-1.12)
                * Mat4::from_rotation_y(3.9)
                * Mat4::from_axis_angle(Vec3::new(1.0, 1.0, 0.0).normalize(), sweep)
                * translate(0.0, 1.5, 2.0)
                * grip
        }
        None => batter * translate(0.0, -1.2, -2.0) * translate(0.0, 1.2, 2.0) * grip,
    }
}

/// Collision proxy riding the bat barrel
pub fn bat_proxy_transform(batting_x: f32, swing_elapsed: Option<f32>) -> Mat4 {
    bat_transform(batting_x, swing_elapsed)
        * translate(0.0, 1.0, 0.0)
        * Mat4::from_rotation_x(1.5708)
}
