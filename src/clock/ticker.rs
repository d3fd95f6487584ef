use crate::{
    animation::ease::Ease,
    foundation::core::{Fps, FrameIndex},
    foundation::error::{RevealError, RevealResult},
};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
/// Host animation status.
pub enum ClockStatus {
    /// Not started, or reset to the beginning.
    #[default]
    Idle,
    /// Ticking.
    Running,
    /// Reached the end of the run.
    Completed,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
/// One reading of the host clock.
pub struct ClockSample {
    /// Normalized progress in `[0, 1]`.
    pub progress: f64,
    /// Status at the time of the reading.
    pub status: ClockStatus,
}

impl ClockSample {
    /// Build a sample, rejecting non-finite progress.
    pub fn new(progress: f64, status: ClockStatus) -> RevealResult<Self> {
        if !progress.is_finite() {
            return Err(RevealError::validation("clock progress must be finite"));
        }
        Ok(Self {
            progress: progress.clamp(0.0, 1.0),
            status,
        })
    }

    /// Running sample at `progress`, `Completed` once progress reaches 1.
    pub fn at(progress: f64) -> Self {
        let progress = if progress.is_finite() {
            progress.clamp(0.0, 1.0)
        } else {
            0.0
        };
        let status = if progress >= 1.0 {
            ClockStatus::Completed
        } else if progress <= 0.0 {
            ClockStatus::Idle
        } else {
            ClockStatus::Running
        };
        Self { progress, status }
    }

    /// Apply an easing curve to the progress, keeping the status.
    pub fn eased(self, ease: Ease) -> Self {
        Self {
            progress: ease.apply(self.progress),
            ..self
        }
    }
}

/// Progress source driven by the host render loop.
pub trait Clock {
    /// Current reading.
    fn sample(&self) -> ClockSample;
}

#[derive(Clone, Copy, Debug)]
/// Clock over a fixed number of frames at a given frame rate.
pub struct FrameClock {
    fps: Fps,
    duration_frames: u64,
    frame: FrameIndex,
}

impl FrameClock {
    /// Build a clock covering `duration_frames` frames.
    pub fn new(fps: Fps, duration_frames: u64) -> RevealResult<Self> {
        if duration_frames == 0 {
            return Err(RevealError::validation("FrameClock duration must be > 0"));
        }
        Ok(Self {
            fps,
            duration_frames,
            frame: FrameIndex(0),
        })
    }

    /// Build a clock lasting `secs` seconds.
    pub fn from_secs(fps: Fps, secs: f64) -> RevealResult<Self> {
        Self::new(fps, fps.secs_to_frames_ceil(secs))
    }

    /// Total frames in one run.
    pub fn duration_frames(&self) -> u64 {
        self.duration_frames
    }

    /// Frame rate.
    pub fn fps(&self) -> Fps {
        self.fps
    }

    /// Current frame.
    pub fn frame(&self) -> FrameIndex {
        self.frame
    }

    /// Jump to `frame`, clamped to the run.
    pub fn seek(&mut self, frame: FrameIndex) {
        self.frame = FrameIndex(frame.0.min(self.duration_frames));
    }

    /// Advance one frame; stays put once completed.
    pub fn tick(&mut self) {
        self.seek(FrameIndex(self.frame.0.saturating_add(1)));
    }

    /// Rewind to frame 0.
    pub fn rewind(&mut self) {
        self.frame = FrameIndex(0);
    }
}

impl Clock for FrameClock {
    fn sample(&self) -> ClockSample {
        ClockSample::at(self.frame.0 as f64 / self.duration_frames as f64)
    }
}

#[derive(Clone, Copy, Debug, Default)]
/// Host-driven clock: whatever was last set.
pub struct ManualClock {
    current: ClockSample,
}

impl ManualClock {
    /// Idle clock at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set progress, deriving the status.
    pub fn set_progress(&mut self, progress: f64) {
        self.current = ClockSample::at(progress);
    }

    /// Set an explicit sample.
    pub fn set(&mut self, sample: ClockSample) {
        self.current = sample;
    }
}

impl Clock for ManualClock {
    fn sample(&self) -> ClockSample {
        self.current
    }
}

#[derive(Clone, Copy, Debug, Default)]
/// Turns consecutive clock samples into restart signals.
///
/// A restart is reported only when the clock comes back to the start of the run: progress
/// drops to zero, or the status turns `Idle`, after having advanced. Scrubbing backwards
/// within the run is not a restart; hosts that loop without passing through zero call
/// `RevealEngine::restart` instead.
pub struct RestartDetector {
    last: Option<ClockSample>,
}

impl RestartDetector {
    /// Detector that has seen nothing yet.
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the next sample; returns true when it starts a new run.
    pub fn observe(&mut self, sample: ClockSample) -> bool {
        let restarted = match self.last {
            None => false,
            Some(prev) => {
                let at_start = sample.progress <= 0.0 || sample.status == ClockStatus::Idle;
                let advanced = prev.progress > sample.progress
                    || (prev.status != ClockStatus::Idle && sample.status == ClockStatus::Idle);
                at_start && advanced
            }
        };
        self.last = Some(sample);
        restarted
    }

    /// Forget the previous sample.
    pub fn reset(&mut self) {
        self.last = None;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/clock/ticker.rs"]
mod tests;
