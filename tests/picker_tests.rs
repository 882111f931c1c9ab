//! TimePicker Integration Tests
//!
//! Tests for band assembly, routing of pointer input and timer messages, and
//! the ambient rotation.

use std::time::Duration;

use barrel_picker::band::NO_MINUTES;
use barrel_picker::picker::{AMBIENT_STEP, PickerReceiver};
use barrel_picker::{
    BandChange, BandRole, DisplayEntry, PickerConfig, PickerError, PickerMessage, PointerInput,
    Selection, TimePicker, channel,
};
use carousel::{Edge, MessageEnvelope, PointerEvent, RampState, Source};
use shade::ShadeInputs;

const WEEK: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

fn picker(config: PickerConfig) -> (TimePicker, PickerReceiver) {
    let (sender, receiver) = channel();
    (TimePicker::new(&config, sender), receiver)
}

fn week_config() -> PickerConfig {
    PickerConfig::new().with_weekdays(WEEK)
}

fn press(band: BandRole, edge: Edge) -> PointerInput {
    PointerInput {
        band,
        event: PointerEvent::mouse_down(edge),
    }
}

fn release() -> PointerInput {
    PointerInput {
        band: BandRole::Weekdays,
        event: PointerEvent::Release,
    }
}

fn ambient() -> MessageEnvelope<PickerMessage> {
    MessageEnvelope::new(PickerMessage::Ambient, None, Source::Interval)
}

/// Feed timer messages back into the picker until a band settles.
async fn settle(picker: &mut TimePicker, receiver: &mut PickerReceiver) -> Selection {
    loop {
        let envelope = receiver.recv().await.expect("picker keeps the channel open");
        let changes = picker.handle_message(envelope).expect("band exists");
        if let Some(selection) = changes.iter().find_map(|change| change.settled) {
            return selection;
        }
    }
}

fn render(picker: &TimePicker, role: BandRole) -> String {
    let band = picker.band(role).expect("band is displayed");
    let slice = band.layout();
    slice
        .iter()
        .enumerate()
        .map(|(position, entry)| {
            let marker = if position == slice.before() {
                '>'
            } else if entry.hidden {
                'x'
            } else {
                '-'
            };
            format!("{marker}{}", entry.item)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// =============================================================================
// Assembly
// =============================================================================

#[test]
fn default_picker_has_three_bands() {
    let (picker, _receiver) = picker(week_config());
    let roles: Vec<BandRole> = picker.bands().iter().map(|band| band.role()).collect();

    assert_eq!(roles, BandRole::ALL.to_vec());
    assert_eq!(picker.band(BandRole::Hours).map(|b| b.state().items().len()), Some(24));
    assert_eq!(picker.band(BandRole::Minutes).map(|b| b.state().items().len()), Some(60));
}

#[test]
fn hours_band_at_rest() {
    let (picker, _receiver) = picker(week_config());

    insta::assert_snapshot!(render(&picker, BandRole::Hours), @r"
    x21
    -22
    -23
    >00
    -01
    -02
    ");
}

#[test]
fn missing_weekdays_show_placeholder() {
    let (picker, _receiver) = picker(PickerConfig::new());
    let band = picker.band(BandRole::Weekdays).expect("weekdays shown by default");

    assert_eq!(band.state().items()[4], "- missing -");
    assert_eq!(band.settings().spacing, 6.0);
}

#[test]
fn band_settings_follow_picker_config() {
    let (mut picker, _receiver) = picker(
        week_config()
            .with_radius(2.5)
            .with_font_size("4vmin")
            .with_spacing(5.0)
            .with_display([
                DisplayEntry::new("hours").with_padding("0 0.2em"),
                DisplayEntry::new("minutes").with_spacing(12.0),
            ]),
    );

    let hours = picker.band(BandRole::Hours).expect("hours shown");
    assert_eq!(hours.settings().radius, 2.5);
    assert_eq!(hours.settings().font_size, "4vmin");
    assert_eq!(hours.settings().spacing, 5.0);
    assert_eq!(hours.settings().padding.as_deref(), Some("0 0.2em"));

    let minutes = picker.band_mut(BandRole::Minutes).expect("minutes shown");
    assert_eq!(minutes.settings().spacing, 12.0);
    assert_eq!(minutes.width(), 3);
    assert!(picker.band(BandRole::Weekdays).is_none());
}

#[test]
fn set_colors_recomputes_only_on_change() {
    let colors = ShadeInputs::new().with_base("#336699");
    let (mut picker, _receiver) = picker(week_config().with_colors(colors.clone()));
    let before = picker.gradients().clone();

    assert!(!picker.set_colors(colors));
    assert!(picker.set_colors(ShadeInputs::new().with_base("#993366")));
    assert_ne!(picker.gradients(), &before);
}

#[test]
fn set_weekdays_keeps_position() {
    let (mut picker, _receiver) = picker(week_config());
    picker.set_time(3, 0, 0);
    picker.set_weekdays(["dim.", "lun.", "mar.", "mer.", "jeu.", "ven.", "sam."]);

    let band = picker.band(BandRole::Weekdays).expect("weekdays shown");
    assert_eq!(band.state().selected(), "mer.");
}

// =============================================================================
// Time and Selection
// =============================================================================

#[test]
fn set_time_rounds_minutes_to_interval() {
    let (mut picker, _receiver) = picker(week_config().with_minutes_interval(5.0));

    picker.set_time(2, 13, 37);

    assert_eq!(
        picker.selection(),
        vec![
            Selection { role: BandRole::Weekdays, index: 2, value: 2 },
            Selection { role: BandRole::Hours, index: 13, value: 13 },
            Selection { role: BandRole::Minutes, index: 7, value: 35 },
        ]
    );
}

#[test]
fn zero_interval_switches_minutes_off() {
    let (mut picker, _receiver) = picker(week_config().with_minutes_interval(0.0));
    picker.set_time(1, 9, 45);

    let minutes = picker.band(BandRole::Minutes).expect("minutes band still shown");
    assert_eq!(minutes.state().items(), [NO_MINUTES.to_string()]);
    assert_eq!(picker.minutes_interval(), None);
    assert_eq!(
        picker.selection()[2],
        Selection { role: BandRole::Minutes, index: 0, value: 0 }
    );
}

// =============================================================================
// Pointer Routing
// =============================================================================

#[tokio::test(start_paused = true)]
async fn click_settles_on_next_value() {
    let (mut picker, mut receiver) = picker(week_config().with_minutes_interval(15.0));

    let changes = picker.handle_pointer(press(BandRole::Minutes, Edge::Bottom)).unwrap();
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].settled, None);

    picker.handle_pointer(release()).unwrap();
    let selection = settle(&mut picker, &mut receiver).await;

    assert_eq!(
        selection,
        Selection { role: BandRole::Minutes, index: 1, value: 15 }
    );
    assert!(!picker.band(BandRole::Minutes).unwrap().is_busy());
}

#[tokio::test(start_paused = true)]
async fn click_top_wraps_backwards() {
    let (mut picker, mut receiver) = picker(week_config());

    picker.handle_pointer(press(BandRole::Weekdays, Edge::Top)).unwrap();
    picker.handle_pointer(release()).unwrap();
    let selection = settle(&mut picker, &mut receiver).await;

    assert_eq!(selection.index, 6);
    assert_eq!(picker.band(BandRole::Weekdays).unwrap().state().selected(), "Sat");
}

#[tokio::test(start_paused = true)]
async fn release_reaches_every_band() {
    let (mut picker, mut receiver) = picker(week_config());

    picker
        .handle_pointer(PointerInput { band: BandRole::Hours, event: PointerEvent::Enter(Edge::Bottom) })
        .unwrap();
    picker.handle_pointer(press(BandRole::Hours, Edge::Bottom)).unwrap();
    assert_eq!(
        picker.band(BandRole::Hours).unwrap().ramp_state(Edge::Bottom),
        RampState::Press
    );

    // Released over the weekdays band, far from where the press started.
    picker.handle_pointer(release()).unwrap();
    assert_eq!(
        picker.band(BandRole::Hours).unwrap().ramp_state(Edge::Bottom),
        RampState::Hover
    );

    let selection = settle(&mut picker, &mut receiver).await;
    assert_eq!(selection.value, 1);

    tokio::time::sleep(Duration::from_secs(3)).await;
    assert!(receiver.try_recv().is_err(), "auto-repeat outlived the release");
}

#[tokio::test(start_paused = true)]
async fn hover_and_press_pick_highlights() {
    let (mut picker, _receiver) = picker(week_config());

    picker
        .handle_pointer(PointerInput { band: BandRole::Hours, event: PointerEvent::Enter(Edge::Top) })
        .unwrap();
    let gradients = picker.gradients().clone();
    let hours = picker.band(BandRole::Hours).unwrap();
    assert_eq!(hours.highlight(Edge::Top, &gradients), Some(&gradients.top_hover));
    assert_eq!(hours.highlight(Edge::Bottom, &gradients), None);

    picker.handle_pointer(press(BandRole::Hours, Edge::Top)).unwrap();
    let hours = picker.band(BandRole::Hours).unwrap();
    assert_eq!(hours.highlight(Edge::Top, &gradients), Some(&gradients.top_press));
}

#[test]
fn input_for_hidden_band_is_rejected() {
    let (mut picker, _receiver) = picker(week_config().with_display(["hours"]));

    assert_eq!(
        picker.handle_pointer(press(BandRole::Minutes, Edge::Top)),
        Err(PickerError::UnknownBand("minutes".into()))
    );
}

#[test]
fn tick_for_unknown_band_is_rejected() {
    let (mut picker, _receiver) = picker(week_config());
    let tick = carousel::Tick { generation: 1, kind: carousel::TickKind::SubStep };
    let envelope = MessageEnvelope::new(PickerMessage::Tick(tick), Some("seconds"), Source::Timer);

    assert_eq!(
        picker.handle_message(envelope),
        Err(PickerError::UnknownBand("seconds".into()))
    );
}

// =============================================================================
// Ambient Rotation
// =============================================================================

#[test]
fn ambient_turns_hours_backwards() {
    let (mut picker, _receiver) = picker(week_config());

    for _ in 0..5 {
        picker.handle_message(ambient()).unwrap();
    }

    let offset = |role| picker.band(role).unwrap().state().offset();
    assert!((offset(BandRole::Weekdays) - 5.0 * AMBIENT_STEP).abs() < 1e-9);
    assert!((offset(BandRole::Minutes) - 0.5).abs() < 1e-9);
    assert!((offset(BandRole::Hours) - 23.5).abs() < 1e-9);
}

#[tokio::test(start_paused = true)]
async fn ambient_skips_busy_bands() {
    let (mut picker, _receiver) = picker(week_config());

    picker.handle_pointer(press(BandRole::Minutes, Edge::Bottom)).unwrap();
    let changes: Vec<BandChange> = picker.handle_message(ambient()).unwrap();
    let roles: Vec<BandRole> = changes.iter().map(|change| change.role).collect();

    assert_eq!(roles, vec![BandRole::Weekdays, BandRole::Hours]);
}

#[tokio::test(start_paused = true)]
async fn ambient_interval_ticks_every_100ms() {
    let (mut picker, mut receiver) = picker(week_config());
    let started = tokio::time::Instant::now();

    picker.start_ambient();
    assert!(picker.is_ambient_running());
    for _ in 0..3 {
        let envelope = receiver.recv().await.unwrap();
        assert_eq!(envelope.message, PickerMessage::Ambient);
        picker.handle_message(envelope).unwrap();
    }
    assert_eq!(started.elapsed(), Duration::from_millis(300));

    picker.stop_ambient();
    assert!(!picker.is_ambient_running());
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert!(receiver.try_recv().is_err());
}

// =============================================================================
// Event Loop
// =============================================================================

#[tokio::test(start_paused = true)]
async fn run_drives_bands_until_input_ends() {
    let (mut picker, receiver) = picker(week_config());
    let (input_tx, input_rx) = futures::channel::mpsc::unbounded();
    let mut changes: Vec<BandChange> = Vec::new();

    input_tx.unbounded_send(press(BandRole::Hours, Edge::Bottom)).unwrap();
    input_tx.unbounded_send(release()).unwrap();

    let driver = picker.run(receiver, input_rx, |change| changes.push(*change));
    let closer = async move {
        tokio::time::sleep(Duration::from_secs(2)).await;
        drop(input_tx);
    };
    tokio::join!(driver, closer);

    let settled: Vec<Selection> = changes.iter().filter_map(|change| change.settled).collect();
    assert_eq!(
        settled,
        vec![Selection { role: BandRole::Hours, index: 1, value: 1 }]
    );
    assert_eq!(changes.last().map(|change| change.offset), Some(1.0));
}
