use anyhow::Result;
use clap::Args;
use enlarge_core::config::EnlargerConfig;
use enlarge_core::drag::DragInterpreter;

#[derive(Args)]
pub struct DragArgs {
    /// Vertical offsets to evaluate (comma-separated)
    #[arg(
        long,
        value_delimiter = ',',
        allow_hyphen_values = true,
        default_value = "-400,-21,-20,0,20,21,200,400,800"
    )]
    pub dy: Vec<f32>,

    /// Horizontal offset applied to every sample
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    pub dx: f32,

    /// Rendered clone height in pixels
    #[arg(long, default_value = "400")]
    pub height: f32,
}

pub fn run(args: &DragArgs, config: &EnlargerConfig) -> Result<()> {
    let interpreter = DragInterpreter::new(config.drag);
    crate::summary::print_drag_header(interpreter.config());

    for &dy in &args.dy {
        let frame = interpreter.on_move(args.dx, dy, args.height);
        let decision = interpreter.on_release(dy);
        crate::summary::print_drag_row(dy, &frame, decision);
    }

    Ok(())
}
