use std::{rc::Rc, sync::Arc};

use crate::{
    animation::ease::Ease,
    clock::ticker::{ClockSample, ClockStatus, RestartDetector},
    config::model::RevealConfig,
    diag::recorder::{DiagnosticEvent, DiagnosticSink},
    engine::listener::{ListenerId, Listeners, RevealListener},
    foundation::core::PathIndex,
    foundation::error::{RevealError, RevealResult},
    order::policy::{OrderPolicy, effective_policy, sort_segments},
    paint::mapper::{DrawInstruction, PaintMode, Weighting, map_progress},
    paint::painter::{PaintStyle, Painter},
    range::partition::{Partition, Partitioner, VisibleRange},
    sequence::sequencer::{CompletionEvent, CompletionSequencer, SequencerState},
    source::model::{Drawing, PathSegment},
    source::parse::{Source, parse},
};

/// Paint decisions for one frame, borrowed from the engine.
#[derive(Debug)]
pub struct FramePlan<'a> {
    /// Eased progress the plan was computed for.
    pub progress: f64,
    /// Positions drawn fully, in render order.
    pub background: &'a [usize],
    /// Foreground segments drawn this frame, in render order.
    pub foreground: Vec<DrawInstruction>,
    /// Highest path index completed through, as reported by the mapper.
    pub highest_completed: Option<PathIndex>,
    segments: &'a [PathSegment],
    style: PaintStyle,
}

impl<'a> FramePlan<'a> {
    /// Segment at a render position.
    pub fn segment(&self, position: usize) -> &'a PathSegment {
        &self.segments[position]
    }

    /// Paint background fully, then the foreground at its fractions.
    pub fn paint(&self, painter: &mut dyn Painter) -> RevealResult<()> {
        for &pos in self.background {
            painter.paint(&self.segments[pos], 1.0, &self.style)?;
        }
        for d in &self.foreground {
            painter.paint(&self.segments[d.position], d.fraction, &self.style)?;
        }
        Ok(())
    }
}

/// Lifecycle coordinator: owns ordering, partitioning, mapping and completion sequencing and
/// re-derives them when inputs change.
///
/// Single-threaded. Each frame is `begin_frame` → paint → `end_frame`; completion events are
/// only delivered by `end_frame`.
pub struct RevealEngine {
    drawing: Arc<Drawing>,
    source_generation: u64,

    requested_policy: OrderPolicy,
    mode: PaintMode,
    weighting: Weighting,
    ease: Ease,
    style: PaintStyle,
    range: Option<VisibleRange>,

    ordered: Vec<PathSegment>,
    ordered_key: Option<(u64, OrderPolicy)>,
    generation: u64,
    partitioner: Partitioner,

    sequencer: CompletionSequencer,
    restart: RestartDetector,
    listeners: Listeners,
    diagnostics: Option<Box<dyn DiagnosticSink>>,
}

impl std::fmt::Debug for RevealEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RevealEngine")
            .field("elements", &self.drawing.elements.len())
            .field("segments", &self.ordered.len())
            .field("requested_policy", &self.requested_policy)
            .field("mode", &self.mode)
            .field("weighting", &self.weighting)
            .field("range", &self.range)
            .field("state", &self.sequencer.state())
            .field("listeners", &self.listeners)
            .finish()
    }
}

impl RevealEngine {
    /// Engine over an empty drawing with the non-range options of `config`.
    pub fn new(config: &RevealConfig) -> RevealResult<Self> {
        config.validate()?;
        let mut engine = Self {
            drawing: Arc::new(Drawing::default()),
            source_generation: 0,
            requested_policy: config.order_policy(),
            mode: config.mode,
            weighting: config.weighting,
            ease: config.ease,
            style: config.stroke,
            range: None,
            ordered: Vec::new(),
            ordered_key: None,
            generation: 0,
            partitioner: Partitioner::new(),
            sequencer: CompletionSequencer::new(),
            restart: RestartDetector::new(),
            listeners: Listeners::default(),
            diagnostics: None,
        };
        engine.resync()?;
        Ok(engine)
    }

    /// Engine over `drawing` with every option of `config`, including its range.
    pub fn from_config(config: &RevealConfig, drawing: Drawing) -> RevealResult<Self> {
        let mut engine = Self::new(config)?;
        engine.set_drawing_with_range(drawing, config.range)?;
        Ok(engine)
    }

    /// Route diagnostics to `sink`.
    pub fn set_diagnostics(&mut self, sink: Box<dyn DiagnosticSink>) {
        self.diagnostics = Some(sink);
    }

    /// Stop emitting diagnostics, returning the previous sink.
    pub fn take_diagnostics(&mut self) -> Option<Box<dyn DiagnosticSink>> {
        self.diagnostics.take()
    }

    fn emit(&mut self, event: DiagnosticEvent) {
        if let Some(sink) = self.diagnostics.as_mut() {
            sink.record(&event);
        }
    }

    /// Parse `source` and swap the drawing in. On any failure the previous state stays.
    #[tracing::instrument(skip(self, source))]
    pub fn load(&mut self, source: &Source) -> RevealResult<()> {
        let drawing = parse(source)?;
        self.set_drawing(drawing)
    }

    /// Swap in a new drawing, keeping the current range.
    ///
    /// Fails with [`RevealError::RangeInvalid`] when the current range does not fit the new
    /// drawing; use [`RevealEngine::set_drawing_with_range`] to change both at once.
    pub fn set_drawing(&mut self, drawing: Drawing) -> RevealResult<()> {
        self.set_drawing_with_range(drawing, self.range)
    }

    /// Swap in a new drawing and range atomically.
    #[tracing::instrument(skip(self, drawing), fields(elements = drawing.elements.len()))]
    pub fn set_drawing_with_range(
        &mut self,
        drawing: Drawing,
        range: Option<VisibleRange>,
    ) -> RevealResult<()> {
        if let Some(r) = range {
            self.check_range(r, drawing.max_path_index())?;
        }
        self.emit(DiagnosticEvent::SourceReplaced {
            elements: drawing.elements.len(),
            segments: drawing.segments.len(),
        });
        self.drawing = Arc::new(drawing);
        self.source_generation += 1;
        self.range = range;
        self.resync()?;
        Ok(())
    }

    fn check_range(&mut self, r: VisibleRange, max: Option<PathIndex>) -> RevealResult<()> {
        r.validate(max).inspect_err(|_| {
            tracing::warn!(start = r.start, end = r.end, ?max, "visible range rejected");
            self.emit(DiagnosticEvent::RangeRejected {
                range: r,
                max_path_index: max,
            });
        })
    }

    /// Assign or clear the visible range. Invalid ranges are rejected and change nothing.
    pub fn set_range(&mut self, range: Option<VisibleRange>) -> RevealResult<()> {
        if let Some(r) = range {
            self.check_range(r, self.drawing.max_path_index())?;
        }
        self.range = range;
        self.resync()?;
        Ok(())
    }

    /// Request an ordering policy. It may be overridden while the mode forces original order.
    pub fn set_order(&mut self, policy: OrderPolicy) -> RevealResult<()> {
        self.requested_policy = policy;
        self.resync()?;
        Ok(())
    }

    /// Request an ordering policy by name; unknown names fall back to original order.
    pub fn set_order_name(&mut self, name: &str) -> RevealResult<()> {
        let policy = OrderPolicy::from_name(name);
        if OrderPolicy::parse_strict(name).is_none() {
            self.emit(DiagnosticEvent::PolicyFallback {
                requested: name.to_string(),
                used: policy,
            });
        }
        self.set_order(policy)
    }

    /// Switch between one-by-one and all-at-once reveal.
    pub fn set_mode(&mut self, mode: PaintMode) -> RevealResult<()> {
        self.mode = mode;
        self.resync()?;
        Ok(())
    }

    /// Switch time distribution. Both weightings are prepared with the partition.
    pub fn set_weighting(&mut self, weighting: Weighting) {
        self.weighting = weighting;
    }

    /// Change the progress curve.
    pub fn set_ease(&mut self, ease: Ease) {
        self.ease = ease;
    }

    /// Change the stroke overrides handed to the painter.
    pub fn set_style(&mut self, style: PaintStyle) -> RevealResult<()> {
        style.validate()?;
        self.style = style;
        Ok(())
    }

    /// Re-derive ordering and partition from the current inputs.
    ///
    /// Only work whose inputs changed is redone; with unchanged inputs this is a no-op.
    /// Returns true when anything was rebuilt.
    #[tracing::instrument(skip(self))]
    pub fn resync(&mut self) -> RevealResult<bool> {
        let policy = self.effective_policy();
        let key = (self.source_generation, policy);
        let mut changed = false;
        if self.ordered_key != Some(key) {
            self.ordered = sort_segments(&self.drawing.segments, policy);
            self.ordered_key = Some(key);
            self.generation += 1;
            changed = true;
            tracing::debug!(policy = policy.name(), generation = self.generation, "re-sorted");
        }
        changed |= self.partitioner.update(
            &self.ordered,
            self.generation,
            self.range,
            self.drawing.max_path_index(),
        )?;
        if changed {
            self.emit(DiagnosticEvent::Resync {
                generation: self.generation,
                policy,
            });
        }
        Ok(changed)
    }

    /// Start a new run: completion state goes back to idle, ordering and partition are kept.
    pub fn restart(&mut self) {
        self.restart.reset();
        self.begin_run();
    }

    fn begin_run(&mut self) {
        self.sequencer.reset();
        tracing::debug!(run = self.sequencer.run(), "run restarted");
        self.emit(DiagnosticEvent::Restart {
            run: self.sequencer.run(),
        });
    }

    /// Stop the current run. Pending events are discarded and none fire until a restart.
    pub fn dispose(&mut self) {
        self.sequencer.dispose();
    }

    /// Subscribe a listener; the same `Rc` subscribes once.
    pub fn subscribe(&mut self, listener: Rc<dyn RevealListener>) -> ListenerId {
        self.listeners.subscribe(listener)
    }

    /// Unsubscribe a listener.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }

    /// Evaluate one frame: detect restarts, map progress, queue completion events.
    ///
    /// Evaluating the same sample twice queues nothing new.
    pub fn begin_frame(&mut self, sample: ClockSample) -> RevealResult<FramePlan<'_>> {
        if !sample.progress.is_finite() {
            return Err(RevealError::validation("clock progress must be finite"));
        }
        if self.restart.observe(sample) {
            self.begin_run();
        }

        let eased = sample.eased(self.ease);
        let empty;
        let partition = match self.partitioner.current() {
            Some(p) => p,
            None => {
                empty = Partition::compute(&[], None);
                &empty
            }
        };
        let plan = map_progress(
            &self.ordered,
            partition,
            eased.progress,
            self.weighting,
            self.mode,
        );
        let bounds = partition
            .min_foreground_index()
            .zip(partition.max_foreground_index());
        let background_len = partition.background.len();

        let obs = self.sequencer.observe(plan.highest_completed, bounds);
        if sample.status == ClockStatus::Completed {
            self.sequencer.clock_completed();
        }
        if let Some((reported, clamped_to)) = obs.clamped {
            self.emit(DiagnosticEvent::IndexClamped {
                reported,
                clamped_to,
            });
        }
        self.emit(DiagnosticEvent::Frame {
            run: self.sequencer.run(),
            progress: eased.progress,
            background: background_len,
            drawn: plan.foreground.len(),
            highest_completed: plan.highest_completed,
        });

        let background = self
            .partitioner
            .current()
            .map(|p| p.background.as_slice())
            .unwrap_or(&[]);
        Ok(FramePlan {
            progress: eased.progress,
            background,
            foreground: plan.foreground,
            highest_completed: plan.highest_completed,
            segments: &self.ordered,
            style: self.style,
        })
    }

    /// Post-frame hook: drain queued completion events and deliver them to listeners.
    pub fn end_frame(&mut self) -> Vec<CompletionEvent> {
        let events = self.sequencer.flush();
        if !events.is_empty() {
            self.listeners.dispatch(&events, &self.drawing);
        }
        events
    }

    /// `begin_frame`, paint with `painter`, then `end_frame`.
    pub fn render_frame(
        &mut self,
        sample: ClockSample,
        painter: &mut dyn Painter,
    ) -> RevealResult<Vec<CompletionEvent>> {
        self.begin_frame(sample)?.paint(painter)?;
        Ok(self.end_frame())
    }

    /// Current drawing.
    pub fn drawing(&self) -> &Arc<Drawing> {
        &self.drawing
    }

    /// Segments in render order.
    pub fn ordered_segments(&self) -> &[PathSegment] {
        &self.ordered
    }

    /// Current partition, if one has been computed.
    pub fn partition(&self) -> Option<&Partition> {
        self.partitioner.current()
    }

    /// Current visible range.
    pub fn range(&self) -> Option<VisibleRange> {
        self.range
    }

    /// Policy as requested by the host.
    pub fn requested_policy(&self) -> OrderPolicy {
        self.requested_policy
    }

    /// Policy actually used for render order.
    pub fn effective_policy(&self) -> OrderPolicy {
        effective_policy(self.requested_policy, self.mode)
    }

    /// Current paint mode.
    pub fn mode(&self) -> PaintMode {
        self.mode
    }

    /// Current weighting.
    pub fn weighting(&self) -> Weighting {
        self.weighting
    }

    /// Highest path index whose completion was emitted this run.
    pub fn last_completed(&self) -> Option<PathIndex> {
        self.sequencer.last_completed()
    }

    /// Completion state of the current run.
    pub fn sequencer_state(&self) -> SequencerState {
        self.sequencer.state()
    }

    /// Current run epoch.
    pub fn run(&self) -> u64 {
        self.sequencer.run()
    }

    /// Segment list generation; bumps whenever the render order is rebuilt.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
#[path = "../../tests/unit/engine/coordinator.rs"]
mod tests;
