use anyhow::Result;
use clap::Args;
use enlarge_core::animation::Effect;
use enlarge_core::config::EnlargerConfig;
use enlarge_core::geometry::{Rect, Size, Viewport};
use enlarge_core::machine::ZoomMachine;
use enlarge_core::tween::SceneAnimation;
use tracing::{debug, info, warn};

use super::{parse_rect, parse_size, parse_viewport, StaticLayout};

#[derive(Args)]
pub struct SimulateArgs {
    /// Thumbnail box as x,y,w,h
    #[arg(long, value_parser = parse_rect, default_value = "10,10,100,50")]
    pub thumbnail: Rect,

    /// Natural size of the enlarged asset as WIDTHxHEIGHT
    #[arg(long, value_parser = parse_size, default_value = "1000x500")]
    pub natural: Size,

    /// Window size as WIDTHxHEIGHT
    #[arg(long, value_parser = parse_viewport, default_value = "800x600")]
    pub viewport: Viewport,

    /// Resize the window to WIDTHxHEIGHT once the clone is open
    #[arg(long, value_parser = parse_viewport)]
    pub resize: Option<Viewport>,

    /// Drag the open clone vertically by this many pixels before closing
    #[arg(long, allow_hyphen_values = true)]
    pub drag: Option<f32>,

    /// Frames per second of the simulated clock
    #[arg(long, default_value = "60")]
    pub fps: u32,

    /// Print every Nth frame while animating (0 prints only settled states)
    #[arg(long, default_value = "10")]
    pub every: usize,

    /// Give up waiting for an animation after this many frames
    #[arg(long, default_value = "600")]
    pub max_frames: usize,
}

struct Session<'a> {
    machine: ZoomMachine,
    scene: SceneAnimation,
    layout: StaticLayout,
    args: &'a SimulateArgs,
    dt: f32,
    clock: usize,
    close_requested: bool,
}

impl Session<'_> {
    fn feed(&mut self, label: &str, effects: Vec<Effect>) {
        info!(event = label, effects = effects.len(), phase = %self.machine.phase());
        println!("[{:>5}] {:<16} phase={}", self.clock, label, self.machine.phase());
        for effect in &effects {
            debug!(?effect, "Effect");
            match effect {
                Effect::RequestClose => self.close_requested = true,
                Effect::MountClone { source } => println!("        mount clone from {source}"),
                Effect::ScrollLock(locked) => println!("        scroll lock {locked}"),
                Effect::SubscribeResize => println!("        resize listener on"),
                Effect::UnsubscribeResize => println!("        resize listener off"),
                other => {
                    self.scene.apply(other);
                }
            }
        }
    }

    /// Advance the clock until every spring rests, forwarding rest actions to the machine.
    fn settle(&mut self) {
        for frame in 0..self.args.max_frames {
            self.clock += 1;
            if let Some(action) = self.scene.step(self.dt) {
                self.print_frame();
                let effects = self.machine.animation_rest(action);
                self.feed("animation rest", effects);
            } else if self.args.every > 0 && frame % self.args.every == 0 {
                self.print_frame();
            }
            if self.scene.is_at_rest() {
                self.print_frame();
                return;
            }
        }
        println!("        (not at rest after {} frames)", self.args.max_frames);
    }

    fn print_frame(&self) {
        let clone = self.scene.clone.current();
        let rect = clone.visual_rect();
        println!(
            "[{:>5}]   clone x={:8.2} y={:8.2} w={:8.2} h={:8.2} a={:.2}  \
             thumb={:.2} backdrop={:.2}",
            self.clock,
            rect.x,
            rect.y,
            rect.w,
            rect.h,
            clone.opacity,
            self.scene.thumbnail.value(),
            self.scene.backdrop.value(),
        );
    }
}

pub fn run(args: &SimulateArgs, config: &EnlargerConfig) -> Result<()> {
    let natural = args.natural.validated()?;
    let mut session = Session {
        machine: ZoomMachine::new(config.clone(), "enlarged"),
        scene: SceneAnimation::new(&config.spring),
        layout: StaticLayout {
            thumbnail: Some(args.thumbnail),
            viewport: args.viewport,
        },
        args,
        dt: 1.0 / args.fps.max(1) as f32,
        clock: 0,
        close_requested: false,
    };

    let effects = session.machine.set_zoomed(true, &session.layout);
    session.feed("zoom", effects);
    let effects = session.machine.clone_loaded(natural, &session.layout)?;
    session.feed("clone loaded", effects);
    session.settle();

    if let Some(viewport) = args.resize {
        session.layout.viewport = viewport;
        let effects = session.machine.viewport_resized(&session.layout);
        session.feed("resize", effects);
        session.settle();
    }

    if let Some(dy) = args.drag {
        const STEPS: usize = 8;
        for i in 1..=STEPS {
            let effects = session.machine.drag_move(0.0, dy * i as f32 / STEPS as f32);
            session.feed("drag move", effects);
            session.scene.step(session.dt);
            session.clock += 1;
        }
        session.print_frame();
        let effects = session.machine.drag_release(0.0, dy);
        session.feed("drag release", effects);
        if !session.close_requested {
            session.settle();
        }
    }

    if session.close_requested || args.drag.is_none() {
        let effects = session.machine.set_zoomed(false, &session.layout);
        session.feed("close", effects);
        session.settle();
    }

    if !session.machine.phase().is_closed() {
        warn!(phase = %session.machine.phase(), "Session did not return to Closed");
    }
    println!(
        "Final phase: {} (scroll locked: {}, resize listener: {})",
        session.machine.phase(),
        session.machine.is_scroll_locked(),
        session.machine.is_resize_subscribed()
    );

    Ok(())
}
