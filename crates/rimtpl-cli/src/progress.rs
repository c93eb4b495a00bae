use color_eyre::eyre::Result;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

const LABEL: &str = "Collecting tags";

/// Progress bar on stdout; indicatif hides it when stdout is not a terminal.
pub fn collecting_bar() -> Result<ProgressBar> {
    let pb = ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::stdout());
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{msg} [{bar:40.cyan/blue}] {pos}/{len}")?
            .progress_chars("#>-"),
    );
    pb.set_message(LABEL);
    Ok(pb)
}

pub fn advance(pb: &ProgressBar, current: usize, total: usize) {
    pb.set_length(total as u64);
    pb.set_position(current as u64);
}
