use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use enlarge_core::asset;
use enlarge_core::config::EnlargerConfig;
use enlarge_core::geometry::{Rect, Size, Viewport};
use enlarge_core::machine::Placement;

use super::{parse_rect, parse_size, parse_viewport};

#[derive(Args)]
pub struct TargetArgs {
    /// Thumbnail box as x,y,w,h
    #[arg(long, value_parser = parse_rect, default_value = "10,10,100,50")]
    pub thumbnail: Rect,

    /// Natural size of the enlarged asset as WIDTHxHEIGHT
    #[arg(long, value_parser = parse_size, conflicts_with = "image")]
    pub natural: Option<Size>,

    /// Read the natural size from an image file instead
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Window size as WIDTHxHEIGHT
    #[arg(long, value_parser = parse_viewport, default_value = "800x600")]
    pub viewport: Viewport,

    /// Override the configured viewport padding
    #[arg(long)]
    pub padding: Option<f32>,
}

pub fn run(args: &TargetArgs, config: &EnlargerConfig) -> Result<()> {
    let natural = match (&args.image, args.natural) {
        (Some(path), _) => asset::natural_size(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        (None, Some(size)) => size.validated()?,
        (None, None) => bail!("Either --natural or --image is required"),
    };
    let padding = args.padding.unwrap_or(config.layout.padding);

    let placement = Placement::compute(args.thumbnail, natural, args.viewport, padding);
    crate::summary::print_placement(&placement, natural, args.viewport, padding);

    Ok(())
}
