use std::io::Write;

use anyhow::{Context, Result};
use glide_config::GlideConfig;
use glide_motion::{
    Curve, Easing, FrameScheduler, RealtimeScheduler, Transition, TransitionOptions,
    TransitionState,
};

/// Render progress as `[#####.....] 0.50`. Overshoot clamps the bar, not the number.
fn render_bar(progress: f64, width: usize) -> String {
    let filled = (progress.clamp(0.0, 1.0) * width as f64).round() as usize;
    format!(
        "[{}{}] {:.2}",
        "#".repeat(filled),
        ".".repeat(width - filled),
        progress
    )
}

/// Deliver wake-ups until `cycles` cycles have completed, then pause.
fn drive_cycles<S: FrameScheduler>(transition: &mut Transition<S>, cycles: u32) {
    while transition.cycles() < cycles {
        let state = transition.state();
        if !(state.is_running() || state == TransitionState::Scheduled) {
            break;
        }
        match transition.scheduler_mut().next_wake(f64::INFINITY) {
            Some(wake) => transition.dispatch(wake),
            None => break,
        }
    }
    transition.pause();
}

fn main() -> Result<()> {
    let _ = env_logger::try_init();

    let config = GlideConfig::load();
    log::info!(
        "glide-demo ease={} duration={}ms delay={}ms loop={} fps={} reverse={}",
        config.transition.ease,
        config.transition.duration_ms,
        config.transition.delay_ms,
        config.transition.looping,
        config.demo.frame_rate,
        config.demo.reverse
    );

    let easing: Easing = config
        .transition
        .ease
        .parse()
        .with_context(|| format!("invalid ease in config: {}", config.transition.ease))?;
    let mut curve = Curve::from(easing);
    if config.demo.reverse {
        curve = curve.reversed();
    }

    let options = TransitionOptions::default()
        .with_ease(curve)
        .with_duration(config.transition.duration_ms)
        .with_delay(config.transition.delay_ms)
        .with_looping(config.transition.looping);
    let mut transition = Transition::new(
        options,
        RealtimeScheduler::with_frame_rate(config.demo.frame_rate),
    );

    let width = config.demo.width;
    transition.on_change(move |progress| {
        let mut out = std::io::stdout();
        let _ = write!(out, "\r{}", render_bar(progress, width));
        let _ = out.flush();
    });
    transition.on_ended(|| println!());

    for run in 0..config.demo.runs {
        log::info!("run {}/{}", run + 1, config.demo.runs);
        transition.run(None, None);
        if config.transition.looping {
            drive_cycles(&mut transition, config.demo.loop_cycles);
            println!();
        } else {
            transition.advance_until(f64::INFINITY);
        }
    }

    Ok(())
}
