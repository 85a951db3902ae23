use crate::utils::ProgressStyleTemplate;
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget};
use std::borrow::Cow;
use std::time::Duration;

/// One spinner per conversion phase.
pub trait MultiProgressPhases {
    fn phases(hidden: bool) -> Self;
    fn start_phase(&self, message: impl Into<Cow<'static, str>>) -> ProgressBar;
}

impl MultiProgressPhases for MultiProgress {
    fn phases(hidden: bool) -> Self {
        if hidden {
            MultiProgress::with_draw_target(ProgressDrawTarget::hidden())
        } else {
            MultiProgress::new()
        }
    }

    fn start_phase(&self, message: impl Into<Cow<'static, str>>) -> ProgressBar {
        let pb = self.add(ProgressBar::new_spinner());
        pb.set_style(ProgressStyleTemplate::only_message());
        pb.set_message(message);
        pb.enable_steady_tick(Duration::from_millis(100));
        pb
    }
}

pub trait PhaseFinish {
    fn complete(&self, message: impl Into<Cow<'static, str>>);
}

impl PhaseFinish for ProgressBar {
    fn complete(&self, message: impl Into<Cow<'static, str>>) {
        self.set_style(ProgressStyleTemplate::done());
        self.finish_with_message(message);
    }
}
