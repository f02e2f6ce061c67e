//! 2D canvas renderer for the voice page avatar.
//!
//! SYSTEM CONTEXT
//! ==============
//! `AvatarStage` owns a `<canvas>` and calls [`start`] once it is mounted.
//! The loop reads the current mode and expression on every animation frame
//! and draws the robot from [`pose`](super::avatar::pose).
//!
//! DESIGN
//! ======
//! The rAF callback reschedules itself through a shared holder and drops
//! itself once the owner's `alive` flag is cleared. A lost 2D context pauses
//! drawing and resumes after a short delay, mirroring how the browser
//! restores canvas backing stores. Both transitions are reported to the
//! owner so the page can show a notice while drawing is paused.

use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use super::avatar::{AvatarMode, Expression};

/// Delay before drawing resumes after `contextlost`.
pub const CONTEXT_RESTORE_DELAY_MS: u64 = 600;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ContextEvent {
    Lost,
    Resumed,
}

#[cfg(feature = "hydrate")]
mod draw {
    use std::f64::consts::PI;

    use wasm_bindgen::JsValue;
    use web_sys::CanvasRenderingContext2d;

    use crate::util::avatar::{Expression, Pose};
    use crate::util::color::{brighten, css_hex, css_rgba};

    const SHELL: &str = "#e6ebf2";
    const SHELL_SHADE: &str = "#c3ccd8";
    const FACE: &str = "#18202c";
    const TIP: u32 = 0x48ffda;

    fn disc(ctx: &CanvasRenderingContext2d, x: f64, y: f64, r: f64) -> Result<(), JsValue> {
        ctx.begin_path();
        ctx.arc(x, y, r, 0.0, 2.0 * PI)?;
        ctx.fill();
        Ok(())
    }

    /// Draw one frame centered in a `width` x `height` backing store.
    pub fn robot(
        ctx: &CanvasRenderingContext2d,
        width: f64,
        height: f64,
        pose: &Pose,
        expression: Expression,
    ) -> Result<(), JsValue> {
        let s = width.min(height) * 0.2;
        let (eye, mouth) = expression.palette();

        ctx.clear_rect(0.0, 0.0, width, height);
        ctx.save();
        ctx.translate(width * 0.5, height * 0.58 + pose.bob * s)?;
        ctx.rotate(pose.sway)?;

        // Arms
        for (side, swing) in [(-1.0, pose.left_arm), (1.0, pose.right_arm)] {
            ctx.save();
            ctx.translate(side * 0.95 * s, 0.05 * s)?;
            ctx.rotate(swing * side)?;
            ctx.set_fill_style_str(SHELL_SHADE);
            ctx.fill_rect(-0.12 * s, 0.0, 0.24 * s, 0.85 * s);
            ctx.restore();
        }

        // Body
        ctx.save();
        ctx.rotate(pose.body_pitch)?;
        ctx.set_fill_style_str(SHELL);
        ctx.fill_rect(-0.85 * s, -0.15 * s, 1.7 * s, 1.45 * s);
        ctx.set_fill_style_str(&css_rgba(eye, 0.25 + pose.eye_glow * 0.3));
        disc(ctx, 0.0, 0.45 * s, 0.16 * s)?;
        ctx.restore();

        // Head
        ctx.save();
        ctx.translate(0.0, -0.7 * s)?;
        ctx.rotate(pose.tilt)?;

        for (side, swing, glow) in [
            (-1.0, pose.left_antenna, pose.left_tip_glow),
            (1.0, pose.right_antenna, pose.right_tip_glow),
        ] {
            ctx.save();
            ctx.translate(side * 0.42 * s, -0.5 * s)?;
            ctx.rotate(swing)?;
            ctx.set_stroke_style_str(SHELL_SHADE);
            ctx.set_line_width(0.06 * s);
            ctx.begin_path();
            ctx.move_to(0.0, 0.0);
            ctx.line_to(0.0, -0.35 * s);
            ctx.stroke();
            ctx.set_fill_style_str(&css_rgba(TIP, glow));
            disc(ctx, 0.0, -0.42 * s, 0.08 * s)?;
            ctx.restore();
        }

        ctx.set_fill_style_str(SHELL);
        ctx.fill_rect(-0.75 * s, -0.5 * s, 1.5 * s, 1.0 * s);
        ctx.set_fill_style_str(FACE);
        ctx.fill_rect(-0.6 * s, -0.36 * s, 1.2 * s, 0.72 * s);

        ctx.set_shadow_color(&css_hex(eye));
        ctx.set_shadow_blur((pose.eye_glow * 24.0).max(0.0));
        ctx.set_fill_style_str(&css_hex(brighten(eye, 0.7 + pose.eye_glow * 0.3)));
        disc(ctx, -0.25 * s, -0.06 * s, 0.1 * s)?;
        disc(ctx, 0.25 * s, -0.06 * s, 0.1 * s)?;
        ctx.set_shadow_blur(0.0);

        let mouth_h = 0.06 * s * pose.mouth_scale;
        ctx.set_fill_style_str(&css_hex(mouth));
        ctx.fill_rect(-0.18 * s, 0.2 * s - mouth_h * 0.5, 0.36 * s, mouth_h);

        ctx.restore();
        ctx.restore();
        Ok(())
    }
}

#[cfg(feature = "hydrate")]
mod frame_loop {
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;

    use gloo_timers::future::sleep;
    use leptos::task::spawn_local;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

    use super::{CONTEXT_RESTORE_DELAY_MS, ContextEvent, draw};
    use crate::util::avatar::{AvatarMode, Expression, pose};

    type FrameHolder = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

    fn context_2d(canvas: &HtmlCanvasElement) -> Option<CanvasRenderingContext2d> {
        canvas.get_context("2d").ok().flatten()?.dyn_into::<CanvasRenderingContext2d>().ok()
    }

    /// Match the backing store to the element size; returns it in device px.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn sync_size(canvas: &HtmlCanvasElement) -> (f64, f64) {
        let dpr = web_sys::window().map_or(1.0, |w| w.device_pixel_ratio()).max(1.0);
        let width = (f64::from(canvas.client_width()) * dpr).round().max(1.0) as u32;
        let height = (f64::from(canvas.client_height()) * dpr).round().max(1.0) as u32;
        if canvas.width() != width {
            canvas.set_width(width);
        }
        if canvas.height() != height {
            canvas.set_height(height);
        }
        (f64::from(width), f64::from(height))
    }

    fn schedule(holder: &FrameHolder) {
        let Some(window) = web_sys::window() else {
            return;
        };
        if let Some(cb) = holder.borrow().as_ref() {
            let _ = window.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }

    pub fn start<F, N>(canvas: HtmlCanvasElement, current: F, on_context: N, alive: Arc<AtomicBool>)
    where
        F: Fn() -> (AvatarMode, Expression) + 'static,
        N: Fn(ContextEvent) + 'static,
    {
        let paused = Rc::new(Cell::new(false));
        let on_context = Rc::new(on_context);

        let lost_paused = Rc::clone(&paused);
        let lost_alive = Arc::clone(&alive);
        let lost_cb = Closure::wrap(Box::new(move |event: web_sys::Event| {
            event.prevent_default();
            log::warn!("avatar canvas context lost; resuming in {CONTEXT_RESTORE_DELAY_MS}ms");
            lost_paused.set(true);
            on_context(ContextEvent::Lost);
            let paused = Rc::clone(&lost_paused);
            let alive = Arc::clone(&lost_alive);
            let on_context = Rc::clone(&on_context);
            spawn_local(async move {
                sleep(Duration::from_millis(CONTEXT_RESTORE_DELAY_MS)).await;
                if alive.load(Ordering::Relaxed) {
                    paused.set(false);
                    on_context(ContextEvent::Resumed);
                }
            });
        }) as Box<dyn FnMut(web_sys::Event)>);
        let _ = canvas.add_event_listener_with_callback("contextlost", lost_cb.as_ref().unchecked_ref());
        let mut lost_cb = Some(lost_cb);

        let holder: FrameHolder = Rc::new(RefCell::new(None));
        let holder_for_cb = Rc::clone(&holder);
        let origin = Cell::new(None::<f64>);
        let cb = Closure::wrap(Box::new(move |ts: f64| {
            if !alive.load(Ordering::Relaxed) {
                if let Some(cb) = lost_cb.take() {
                    let _ = canvas.remove_event_listener_with_callback("contextlost", cb.as_ref().unchecked_ref());
                }
                holder_for_cb.borrow_mut().take();
                return;
            }
            if !paused.get()
                && let Some(ctx) = context_2d(&canvas)
            {
                let start = origin.get().unwrap_or(ts);
                origin.set(Some(start));
                let (mode, expression) = current();
                let (width, height) = sync_size(&canvas);
                let frame_pose = pose((ts - start) / 1000.0, mode, expression);
                if let Err(err) = draw::robot(&ctx, width, height, &frame_pose, expression) {
                    log::debug!("avatar draw failed: {err:?}");
                }
            }
            schedule(&holder_for_cb);
        }) as Box<dyn FnMut(f64)>);

        *holder.borrow_mut() = Some(cb);
        schedule(&holder);
    }
}

/// Run the avatar animation on `canvas` until `alive` is cleared.
///
/// `current` is polled once per frame for the mode and expression to draw;
/// `on_context` hears when drawing pauses for a lost context and resumes.
#[cfg(feature = "hydrate")]
pub fn start<F, N>(canvas: web_sys::HtmlCanvasElement, current: F, on_context: N, alive: Arc<AtomicBool>)
where
    F: Fn() -> (AvatarMode, Expression) + 'static,
    N: Fn(ContextEvent) + 'static,
{
    frame_loop::start(canvas, current, on_context, alive);
}

#[cfg(not(feature = "hydrate"))]
pub fn start<C, F, N>(_canvas: C, _current: F, _on_context: N, _alive: Arc<AtomicBool>)
where
    F: Fn() -> (AvatarMode, Expression) + 'static,
    N: Fn(ContextEvent) + 'static,
{
}
