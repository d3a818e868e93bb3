use std::path::Path;

use console::Style;
use pano_core::finalize::StitchStats;
use pano_core::pipeline::config::{CanvasSizing, StitchConfig};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    warn: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            warn: Style::new().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_stitch_summary(config: &StitchConfig, input: &Path, output: &Path) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Panorama Stitch"));
    println!(
        "  {}",
        s.title
            .apply_to("\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}")
    );
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Input"),
        s.path.apply_to(input.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(output.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Strategy"),
        s.method.apply_to(&config.strategy)
    );
    println!();

    let p = &config.projection;
    println!("  {}", s.header.apply_to("Projection"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("FOV"),
        s.value.apply_to(format!("{}\u{b0}", p.hfov_deg))
    );
    let sizing = match p.sizing {
        CanvasSizing::Native => "native".to_string(),
        CanvasSizing::WidthPx(px) => format!("{px} px"),
        CanvasSizing::PixelsPerDegree(ppd) => format!("{ppd} px/\u{b0}"),
    };
    println!(
        "    {:<12}{}",
        s.label.apply_to("Canvas"),
        s.value.apply_to(sizing)
    );
    match p.blend_width_px {
        Some(px) => println!(
            "    {:<12}{}",
            s.label.apply_to("Blend"),
            s.value.apply_to(format!("{px} px"))
        ),
        None => println!(
            "    {:<12}{}",
            s.label.apply_to("Blend"),
            s.value.apply_to("full feather")
        ),
    }
    println!(
        "    {:<12}{}",
        s.label.apply_to("Exposure"),
        s.value
            .apply_to(if p.exposure_normalize { "normalize" } else { "as captured" })
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Hole budget"),
        s.value.apply_to(format!("{:.1}%", p.max_hole_fraction * 100.0))
    );
    println!();
}

pub fn print_result_summary(stats: &StitchStats) {
    let s = Styles::new();

    println!();
    println!("  {}", s.header.apply_to("Result"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Coverage"),
        s.value.apply_to(format!("{:.2}%", stats.coverage_percent))
    );
    if stats.hole_count > 0 {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Holes"),
            s.warn.apply_to(format!(
                "{} px repaired ({:.2}%)",
                stats.hole_count,
                stats.hole_fraction * 100.0
            ))
        );
    }
    println!(
        "    {:<12}{}",
        s.label.apply_to("Frames"),
        s.value.apply_to(stats.frames_used)
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Seams"),
        s.value.apply_to(format!(
            "{} blended, mean score {:.3}",
            stats.seam_scores.len(),
            stats.mean_seam_score
        ))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Output"),
        s.value.apply_to(format!(
            "{}x{} (from {} canvas columns)",
            stats.crop_width, stats.canvas_height, stats.canvas_width
        ))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Elapsed"),
        s.value.apply_to(format!("{} ms", stats.elapsed_ms))
    );
    println!();
}
