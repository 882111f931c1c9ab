//! Several bands side by side, sharing one set of gradients and one message
//! channel.
//!
//! Each band owns a [`CarouselState`] for what is shown and an
//! [`InteractionController`] for how presses move it. Timers for every band
//! post into the same channel, addressed by band id, and
//! [`TimePicker::handle_message`] routes them back.

use std::time::Duration;

use carousel::{
    CarouselState, Edge, InteractionController, MessageEnvelope, PointerEvent, RampState, Tick,
    TimerContext, TimerHandle, VisibleSlice,
};
use futures::{Stream, StreamExt};
use shade::{GradientSpec, Highlight, Ramp, Rim, ShadeInputs, synthesize};
use tokio::sync::mpsc;

use crate::band::{BandRole, hour_labels, minute_labels};
use crate::config::{BandConfig, BandSettings, BandSpec, PickerConfig, PickerSettings};
use crate::error::{PickerError, Result};
use crate::measure::WidthCache;

/// Offset added on every ambient rotation tick.
pub const AMBIENT_STEP: f64 = 0.1;
pub const AMBIENT_PERIOD: Duration = Duration::from_millis(100);

/// Messages that travel through the picker's channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerMessage {
    Tick(Tick),
    Ambient,
}

impl From<Tick> for PickerMessage {
    fn from(tick: Tick) -> Self {
        PickerMessage::Tick(tick)
    }
}

pub type PickerSender = mpsc::UnboundedSender<MessageEnvelope<PickerMessage>>;
pub type PickerReceiver = mpsc::UnboundedReceiver<MessageEnvelope<PickerMessage>>;

pub fn channel() -> (PickerSender, PickerReceiver) {
    mpsc::unbounded_channel()
}

/// A pointer event on one band.
///
/// `Release` is applied to every band, whichever one it names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerInput {
    pub band: BandRole,
    pub event: PointerEvent,
}

/// The value a band has come to rest on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub role: BandRole,
    /// Index into the band's items.
    pub index: usize,
    /// Day index (0 is the first weekday supplied), hour, or minute (0 while
    /// minutes are switched off).
    pub value: u32,
}

/// A band moved, or finished moving.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandChange {
    pub role: BandRole,
    /// Normalized offset after the change.
    pub offset: f64,
    /// Set when a gesture has just ended.
    pub settled: Option<Selection>,
}

type BandController = InteractionController<TimerContext<PickerMessage>>;

/// One band of the picker.
pub struct PickerBand {
    placement: BandSpec,
    settings: BandSettings,
    state: CarouselState,
    controller: BandController,
    widths: WidthCache,
}

impl PickerBand {
    fn new(
        placement: BandSpec,
        settings: BandSettings,
        context: TimerContext<PickerMessage>,
    ) -> Self {
        let state = CarouselState::new(settings.items.clone(), settings.spacing);
        let controller = InteractionController::new(context.with_band_id(placement.role.id()), 0.0);

        Self {
            placement,
            settings,
            state,
            controller,
            widths: WidthCache::new(),
        }
    }

    pub fn role(&self) -> BandRole {
        self.placement.role
    }

    pub fn placement(&self) -> &BandSpec {
        &self.placement
    }

    pub fn settings(&self) -> &BandSettings {
        &self.settings
    }

    pub fn state(&self) -> &CarouselState {
        &self.state
    }

    pub fn layout(&self) -> VisibleSlice<'_> {
        self.state.layout()
    }

    pub fn is_busy(&self) -> bool {
        self.controller.is_busy()
    }

    /// Width in terminal cells.
    pub fn width(&mut self) -> usize {
        self.widths.width(self.state.items())
    }

    pub fn ramp_state(&self, edge: Edge) -> RampState {
        self.controller.ramp_state(edge)
    }

    /// Ramp to draw over `edge`, if any.
    pub fn highlight<'g>(&self, edge: Edge, gradients: &'g GradientSpec) -> Option<&'g Ramp> {
        let rim = match edge {
            Edge::Top => Rim::Top,
            Edge::Bottom => Rim::Bottom,
        };
        match self.ramp_state(edge) {
            RampState::None => None,
            RampState::Hover => Some(gradients.rim(rim, Highlight::Hover)),
            RampState::Press => Some(gradients.rim(rim, Highlight::Press)),
        }
    }

    fn selection(&self, minutes_interval: Option<u32>) -> Selection {
        let index = self.state.selected_index();
        let value = match self.placement.role {
            BandRole::Minutes => minutes_interval.map_or(0, |interval| index as u32 * interval),
            BandRole::Weekdays | BandRole::Hours => index as u32,
        };
        Selection {
            role: self.placement.role,
            index,
            value,
        }
    }

    /// Runs `action` on the controller and reports what it did to the band.
    fn apply<F>(&mut self, minutes_interval: Option<u32>, action: F) -> Option<BandChange>
    where
        F: FnOnce(&mut BandController) -> Option<f64>,
    {
        let was_busy = self.controller.is_busy();
        let moved = action(&mut self.controller);
        let settled = was_busy && !self.controller.is_busy();
        if moved.is_none() && !settled {
            return None;
        }

        self.state.set_offset(self.controller.offset());
        if settled {
            // Rebase so the controller's offset stays within one lap.
            self.controller.set_offset(self.state.offset());
        }

        Some(BandChange {
            role: self.placement.role,
            offset: self.state.offset(),
            settled: settled.then(|| self.selection(minutes_interval)),
        })
    }

    /// Move by `delta` unless a gesture owns the offset.
    fn nudge(&mut self, delta: f64) -> Option<BandChange> {
        if self.controller.is_busy() {
            return None;
        }
        let before = self.state.offset();
        self.state.set_offset(before + delta);
        self.controller.set_offset(self.state.offset());
        (self.state.offset() != before).then(|| BandChange {
            role: self.placement.role,
            offset: self.state.offset(),
            settled: None,
        })
    }

    fn place(&mut self, offset: f64) -> bool {
        if !self.controller.set_offset(offset) {
            return false;
        }
        self.state.set_offset(offset);
        true
    }
}

/// A row of bands showing a day and time.
pub struct TimePicker {
    settings: PickerSettings,
    bands: Vec<PickerBand>,
    gradients: GradientSpec,
    context: TimerContext<PickerMessage>,
    ambient: Option<TimerHandle>,
}

impl TimePicker {
    /// Builds the bands `config` asks for. Timers post into `sender`.
    pub fn new(config: &PickerConfig, sender: PickerSender) -> Self {
        let settings = config.sanitize();
        let context = TimerContext::new(sender);
        let gradients = synthesize(&settings.colors);

        let bands = settings
            .bands
            .iter()
            .map(|placement| {
                let band_settings = band_settings(&settings, placement);
                PickerBand::new(placement.clone(), band_settings, context.clone())
            })
            .collect();

        Self {
            settings,
            bands,
            gradients,
            context,
            ambient: None,
        }
    }

    pub fn settings(&self) -> &PickerSettings {
        &self.settings
    }

    pub fn bands(&self) -> &[PickerBand] {
        &self.bands
    }

    pub fn band(&self, role: BandRole) -> Option<&PickerBand> {
        self.bands.iter().find(|band| band.role() == role)
    }

    pub fn band_mut(&mut self, role: BandRole) -> Option<&mut PickerBand> {
        self.bands.iter_mut().find(|band| band.role() == role)
    }

    pub fn gradients(&self) -> &GradientSpec {
        &self.gradients
    }

    /// `None` when minutes are switched off.
    pub fn minutes_interval(&self) -> Option<u32> {
        self.settings.minutes_interval
    }

    /// Replace the colors. Returns false if nothing changed.
    pub fn set_colors(&mut self, colors: ShadeInputs) -> bool {
        if colors == self.settings.colors {
            return false;
        }
        self.gradients = synthesize(&colors);
        self.settings.colors = colors;
        true
    }

    /// Replace the weekday names, keeping the band's position.
    pub fn set_weekdays<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.settings.weekdays = names.into_iter().map(Into::into).collect();

        let settings = &self.settings;
        if let Some(band) = self.bands.iter_mut().find(|band| band.role() == BandRole::Weekdays) {
            let offset = band.state.offset();
            band.settings = band_settings(settings, &band.placement);
            band.state = CarouselState::new(band.settings.items.clone(), band.settings.spacing)
                .with_offset(offset);
            band.widths.invalidate();
        }
    }

    /// Turn idle bands to a day and time.
    ///
    /// Minutes are rounded to the nearest interval step.
    pub fn set_time(&mut self, weekday: usize, hour: u32, minute: u32) {
        let minutes_step = self
            .settings
            .minutes_interval
            .map_or(0.0, |interval| (minute as f64 / interval as f64).round());

        for band in &mut self.bands {
            let offset = match band.role() {
                BandRole::Weekdays => weekday as f64,
                BandRole::Hours => hour as f64,
                BandRole::Minutes => minutes_step,
            };
            if !band.place(offset) {
                log::debug!("{} busy, time not applied", band.role());
            }
        }
    }

    /// Where every band currently points.
    pub fn selection(&self) -> Vec<Selection> {
        let interval = self.settings.minutes_interval;
        self.bands.iter().map(|band| band.selection(interval)).collect()
    }

    pub fn handle_pointer(&mut self, input: PointerInput) -> Result<Vec<BandChange>> {
        let interval = self.settings.minutes_interval;

        if input.event == PointerEvent::Release {
            return Ok(self
                .bands
                .iter_mut()
                .filter_map(|band| {
                    band.apply(interval, |controller| {
                        controller.handle_pointer(PointerEvent::Release)
                    })
                })
                .collect());
        }

        let band = self
            .band_mut(input.band)
            .ok_or_else(|| PickerError::UnknownBand(input.band.id().to_string()))?;
        Ok(band
            .apply(interval, |controller| controller.handle_pointer(input.event))
            .into_iter()
            .collect())
    }

    pub fn handle_message(
        &mut self,
        envelope: MessageEnvelope<PickerMessage>,
    ) -> Result<Vec<BandChange>> {
        match envelope.message {
            PickerMessage::Ambient => Ok(self.rotate()),
            PickerMessage::Tick(tick) => {
                let interval = self.settings.minutes_interval;
                let band_id = envelope.band_id.unwrap_or_default();
                let band = self
                    .bands
                    .iter_mut()
                    .find(|band| band.role().id() == band_id)
                    .ok_or(PickerError::UnknownBand(band_id))?;
                Ok(band
                    .apply(interval, |controller| controller.handle_tick(tick))
                    .into_iter()
                    .collect())
            }
        }
    }

    /// Start turning every idle band by [`AMBIENT_STEP`] each
    /// [`AMBIENT_PERIOD`]. Hours turn backwards.
    pub fn start_ambient(&mut self) {
        if self.ambient.is_none() {
            log::debug!("ambient rotation started");
            let handle = self.context.set_interval(AMBIENT_PERIOD, || PickerMessage::Ambient);
            self.ambient = Some(handle);
        }
    }

    pub fn stop_ambient(&mut self) {
        if self.ambient.take().is_some() {
            log::debug!("ambient rotation stopped");
        }
    }

    pub fn is_ambient_running(&self) -> bool {
        self.ambient.is_some()
    }

    fn rotate(&mut self) -> Vec<BandChange> {
        self.bands
            .iter_mut()
            .filter_map(|band| {
                let delta = AMBIENT_STEP * band.role().direction_sign();
                band.nudge(delta)
            })
            .collect()
    }

    /// Process pointer input and timer messages until `input` ends.
    ///
    /// Every band change is passed to `on_change`. Input naming a band the
    /// picker does not show is logged and skipped.
    pub async fn run<St, F>(&mut self, mut receiver: PickerReceiver, mut input: St, mut on_change: F)
    where
        St: Stream<Item = PointerInput> + Unpin,
        F: FnMut(&BandChange),
    {
        loop {
            tokio::select! {
                maybe_input = input.next() => {
                    match maybe_input {
                        Some(pointer) => match self.handle_pointer(pointer) {
                            Ok(changes) => changes.iter().for_each(&mut on_change),
                            Err(err) => log::warn!("pointer input dropped: {err}"),
                        },
                        None => break, // Input ended
                    }
                }

                Some(envelope) = receiver.recv() => {
                    log::trace!("picker received {:?} from {:?}", envelope.message, envelope.source);
                    match self.handle_message(envelope) {
                        Ok(changes) => changes.iter().for_each(&mut on_change),
                        Err(err) => log::warn!("message dropped: {err}"),
                    }
                }
            }
        }
    }
}

fn band_settings(settings: &PickerSettings, placement: &BandSpec) -> BandSettings {
    let items = match placement.role {
        BandRole::Weekdays => settings.weekdays.clone(),
        BandRole::Hours => hour_labels(),
        BandRole::Minutes => minute_labels(settings.minutes_interval),
    };

    BandConfig {
        items,
        spacing: placement.spacing.or(settings.spacing),
        radius: settings.radius,
        font_size: settings.font_size.clone(),
        padding: placement.padding.clone(),
    }
    .sanitize()
}
