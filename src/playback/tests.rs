use crate::core::DataSeries;
use crate::input::KeyCommand;
use crate::playback::{length_mismatch, LoopControl, PlaybackController, PlaybackState};
use crate::plot::PlotView;
use crate::video::testing::FakeSource;

fn series(displacement: &[f64], load: &[f64]) -> DataSeries {
    DataSeries::from_rows(
        displacement
            .iter()
            .zip(load)
            .map(|(&d, &l)| (Some(d), Some(l))),
    )
}

fn controller(frames: usize, displacement: &[f64], load: &[f64]) -> PlaybackController<FakeSource> {
    let data = series(displacement, load);
    let plot = PlotView::new(&data).expect("non-empty series");
    PlaybackController::new(FakeSource::new(frames), data, plot)
}

fn three_frame_controller() -> PlaybackController<FakeSource> {
    controller(3, &[0.0, 1.0, 2.0], &[10.0, 20.0, 30.0])
}

#[test]
fn test_starts_paused_on_first_frame() {
    let c = three_frame_controller();
    assert_eq!(c.state(), PlaybackState::Paused);
    assert_eq!(c.current_frame(), 0);
    assert_eq!(c.trackbar_position(), 0);
    assert_eq!(c.displayed().map(|d| d.index), Some(0));
    assert_eq!(c.plot().marker().x, 0.0);
}

#[test]
fn test_toggle_is_an_involution() {
    let mut c = three_frame_controller();
    let original = c.state();
    c.toggle_pause();
    assert_eq!(c.state(), PlaybackState::Playing);
    c.toggle_pause();
    assert_eq!(c.state(), original);
}

#[test]
fn test_seek_displays_frame_and_moves_marker() {
    let mut c = three_frame_controller();
    c.on_seek(2);

    assert_eq!(c.current_frame(), 2);
    assert_eq!(c.trackbar_position(), 2);
    assert_eq!(c.displayed().map(|d| d.index), Some(2));
    assert_eq!(c.displayed().unwrap().frame.rgba()[0], 2);
    assert_eq!(c.plot().marker().x, 2.0);
    assert_eq!(c.plot().marker().y_min, 10.0);
    assert_eq!(c.plot().marker().y_max, 30.0);
}

#[test]
fn test_tick_while_playing_advances_one_frame() {
    let mut c = three_frame_controller();
    c.on_seek(0);
    assert_eq!(c.handle_key(KeyCommand::TogglePause), LoopControl::Continue);
    assert_eq!(c.state(), PlaybackState::Playing);

    assert!(c.on_tick());
    assert_eq!(c.current_frame(), 1);
    assert_eq!(c.displayed().map(|d| d.index), Some(1));
    assert_eq!(c.plot().marker().x, 1.0);
    assert_eq!(c.trackbar_position(), 1);
}

#[test]
fn test_tick_does_not_reenter_seek() {
    let mut c = three_frame_controller();
    c.toggle_pause();
    c.on_tick();

    // initial frame, then exactly one decode for the advance
    assert_eq!(c.source().reads, vec![0, 1]);
}

#[test]
fn test_tick_while_paused_is_noop() {
    let mut c = three_frame_controller();
    assert!(!c.on_tick());
    assert_eq!(c.current_frame(), 0);
    assert_eq!(c.source().reads, vec![0]);
}

#[test]
fn test_tick_stops_at_last_frame() {
    let mut c = three_frame_controller();
    c.toggle_pause();
    assert!(c.on_tick());
    assert!(c.on_tick());
    assert!(!c.on_tick());
    assert_eq!(c.current_frame(), 2);
    assert_eq!(c.state(), PlaybackState::Playing);
}

#[test]
fn test_seek_while_playing() {
    let mut c = three_frame_controller();
    c.toggle_pause();
    c.on_seek(2);
    assert_eq!(c.current_frame(), 2);
    assert_eq!(c.plot().marker().x, 2.0);
    assert_eq!(c.state(), PlaybackState::Playing);
}

#[test]
fn test_seek_past_end_is_clamped() {
    let mut c = three_frame_controller();
    c.on_seek(99);
    assert_eq!(c.current_frame(), 2);
    assert_eq!(c.trackbar_position(), 2);
}

#[test]
fn test_frames_beyond_data_keep_marker() {
    let mut c = controller(5, &[0.0, 1.0, 2.0], &[10.0, 20.0, 30.0]);
    c.on_seek(2);
    assert_eq!(c.plot().marker().x, 2.0);

    c.on_seek(4);
    assert_eq!(c.displayed().map(|d| d.index), Some(4));
    assert_eq!(c.plot().marker().x, 2.0);
    assert!(c.current_sample().is_none());

    c.toggle_pause();
    c.on_seek(3);
    assert!(c.on_tick());
    assert_eq!(c.plot().marker().x, 2.0);
}

#[test]
fn test_decode_failure_keeps_previous_frame() {
    let data = series(&[0.0, 1.0, 2.0], &[10.0, 20.0, 30.0]);
    let plot = PlotView::new(&data).unwrap();
    let mut source = FakeSource::new(3);
    source.failing = vec![1];
    let mut c = PlaybackController::new(source, data, plot);

    let generation = c.display_generation();
    c.on_seek(1);
    assert_eq!(c.current_frame(), 1);
    assert_eq!(c.displayed().map(|d| d.index), Some(0));
    assert_eq!(c.display_generation(), generation);
    assert_eq!(c.plot().marker().x, 1.0);
}

#[test]
fn test_quit_releases_video() {
    let mut c = three_frame_controller();
    c.toggle_pause();
    assert_eq!(c.handle_key(KeyCommand::Quit), LoopControl::Exit);
    assert!(!c.is_open());
    assert_eq!(c.source().released, 1);
    assert!(!c.on_tick());
}

#[test]
fn test_seek_after_quit_is_noop() {
    let mut c = three_frame_controller();
    c.quit();
    c.on_seek(2);
    assert_eq!(c.current_frame(), 0);
    assert_eq!(c.plot().marker().x, 0.0);
    assert_eq!(c.source().reads, vec![0]);
}

#[test]
fn test_closed_source_shows_nothing() {
    let data = series(&[0.0, 1.0], &[1.0, 2.0]);
    let plot = PlotView::new(&data).unwrap();
    let mut source = FakeSource::new(2);
    source.open = false;
    let mut c = PlaybackController::new(source, data, plot);

    assert!(c.displayed().is_none());
    c.on_seek(1);
    assert!(c.displayed().is_none());
    assert_eq!(c.current_frame(), 0);
}

#[test]
fn test_current_sample() {
    let mut c = three_frame_controller();
    c.on_seek(1);
    assert_eq!(c.current_sample(), Some((1.0, 20.0)));
}

#[test]
fn test_length_mismatch() {
    assert!(length_mismatch(3, 3).is_none());
    assert!(length_mismatch(2, 3).unwrap().contains("stays put"));
    assert!(length_mismatch(5, 3).unwrap().contains("never shown"));
}
