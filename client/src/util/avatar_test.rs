use super::*;

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn speaking_beats_listening() {
    assert_eq!(AvatarMode::from_flags(true, true), AvatarMode::Speaking);
    assert_eq!(AvatarMode::from_flags(true, false), AvatarMode::Listening);
    assert_eq!(AvatarMode::from_flags(false, false), AvatarMode::Idle);
}

#[test]
fn expression_keywords() {
    assert_eq!(Expression::detect("Saya SENANG bisa membantu"), Expression::Happy);
    assert_eq!(Expression::detect("jangan kecewa ya"), Expression::Sad);
    assert_eq!(Expression::detect("kenapa kesal?"), Expression::Angry);
    assert_eq!(Expression::detect("fotosintesis"), Expression::Normal);
}

#[test]
fn happy_wins_over_sad() {
    assert_eq!(Expression::detect("sedih tapi senang"), Expression::Happy);
}

#[test]
fn palettes() {
    assert_eq!(Expression::Normal.palette(), (0x48ffda, 0xff9aa2));
    assert_eq!(Expression::Angry.palette(), (0xff0000, 0xff0000));
}

#[test]
fn idle_at_time_zero_is_at_rest() {
    let p = pose(0.0, AvatarMode::Idle, Expression::Normal);
    assert!(close(p.bob, 0.0));
    assert!(close(p.eye_glow, 0.35));
    assert!(close(p.mouth_scale, 1.0));
    assert!(close(p.tilt, 0.0));
}

#[test]
fn speaking_animates_mouth_and_arms() {
    let t = 0.3;
    let p = pose(t, AvatarMode::Speaking, Expression::Normal);
    assert!(p.mouth_scale > 1.0 && p.mouth_scale <= 1.5);
    assert!(close(p.left_arm, -p.right_arm));
    assert!(close(p.left_antenna, 0.0));
}

#[test]
fn angry_speaking_glows_brighter() {
    let t = 1.0;
    let normal = pose(t, AvatarMode::Speaking, Expression::Normal);
    let angry = pose(t, AvatarMode::Speaking, Expression::Angry);
    assert!(close(angry.eye_glow - normal.eye_glow, 0.35));
}

#[test]
fn listening_blinks_tips_and_keeps_idle_bob() {
    let t = 0.7;
    let idle = pose(t, AvatarMode::Idle, Expression::Normal);
    let listening = pose(t, AvatarMode::Listening, Expression::Normal);
    assert!(close(idle.bob, listening.bob));
    assert!(listening.left_tip_glow >= 0.1 && listening.left_tip_glow <= 1.0);
    assert!(!close(listening.tilt, 0.0));
}
