use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Gauge, Paragraph, Row, Table};

use ratatui::crossterm::event::{KeyCode, KeyEventKind};

use crate::assessment::types::{ThresholdSample, MAX_THRESHOLD, MIN_THRESHOLD, TEST_FREQUENCIES};
use crate::audio::tone::{Ear, ToneSynth};
use crate::config::AudioConfig;
use crate::tui::event::{AppEvent, EventHandler};
use crate::tui::widgets::level::LevelWidget;
use crate::tui::Tui;

/// Interactive state for one ear's frequency sweep.
struct SweepState {
    index: usize,
    volume: f32,
    playing: bool,
    samples: Vec<ThresholdSample>,
}

/// Run the threshold sweep for one ear.
///
/// One tone per test frequency: the tone starts automatically, the listener
/// adjusts volume until just barely audible and confirms with Enter, which
/// records `{frequency, threshold}` and advances. Returns `None` if the
/// listener aborts mid-sweep.
pub fn run(
    terminal: &mut Tui,
    synth: &ToneSynth,
    ear: Ear,
    audio: &AudioConfig,
) -> anyhow::Result<Option<Vec<ThresholdSample>>> {
    let events = EventHandler::new();

    let mut state = SweepState {
        index: 0,
        volume: audio.start_volume,
        playing: true,
        samples: Vec::with_capacity(TEST_FREQUENCIES.len()),
    };

    synth.start_looping_tone(TEST_FREQUENCIES[0] as f32, state.volume, ear);

    loop {
        terminal.draw(|frame| {
            render_sweep(frame, frame.area(), &state, ear, synth.is_available());
        })?;

        match events.next()? {
            AppEvent::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Up | KeyCode::Char('+') | KeyCode::Char('=') => {
                    state.volume = (state.volume + audio.volume_step).min(MAX_THRESHOLD);
                    if state.playing {
                        synth.set_volume(state.volume);
                    }
                }
                KeyCode::Down | KeyCode::Char('-') => {
                    state.volume = (state.volume - audio.volume_step).max(MIN_THRESHOLD);
                    if state.playing {
                        synth.set_volume(state.volume);
                    }
                }
                KeyCode::Char(' ') | KeyCode::Char('p') => {
                    if state.playing {
                        synth.stop_tone();
                        state.playing = false;
                    } else {
                        synth.start_looping_tone(
                            TEST_FREQUENCIES[state.index] as f32,
                            state.volume,
                            ear,
                        );
                        state.playing = true;
                    }
                }
                KeyCode::Enter => {
                    state.samples.push(ThresholdSample::new(
                        TEST_FREQUENCIES[state.index],
                        state.volume,
                    ));

                    if state.index + 1 < TEST_FREQUENCIES.len() {
                        state.index += 1;
                        state.volume = audio.start_volume;
                        state.playing = true;
                        // Restart rather than retune so each frequency
                        // begins from the same reference level.
                        synth.start_looping_tone(
                            TEST_FREQUENCIES[state.index] as f32,
                            state.volume,
                            ear,
                        );
                    } else {
                        synth.stop_tone();
                        return Ok(Some(state.samples));
                    }
                }
                KeyCode::Esc | KeyCode::Char('q') => {
                    synth.stop_tone();
                    return Ok(None);
                }
                _ => {}
            },
            AppEvent::Tick | AppEvent::Resize(_, _) => {}
            _ => {}
        }
    }
}

fn render_sweep(
    frame: &mut ratatui::Frame,
    area: Rect,
    state: &SweepState,
    ear: Ear,
    audio_available: bool,
) {
    let title = match ear {
        Ear::Left => " Hearing Check — Left Ear ",
        Ear::Right => " Hearing Check — Right Ear ",
    };
    let outer = Block::default().title(title).borders(Borders::ALL);
    let inner = outer.inner(area);
    frame.render_widget(outer, area);

    let rows = Layout::vertical([
        Constraint::Length(3), // progress
        Constraint::Length(2), // frequency + instruction
        Constraint::Length(3), // level gauge
        Constraint::Min(3),    // recorded thresholds
        Constraint::Length(2), // key hints + audio note
    ])
    .split(inner);

    // Sweep progress
    let done = state.index;
    let total = TEST_FREQUENCIES.len();
    let progress = Gauge::default()
        .block(Block::default().title(" Progress ").borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Cyan))
        .label(format!("{} of {}", state.index + 1, total))
        .ratio(done as f64 / total as f64);
    frame.render_widget(progress, rows[0]);

    // Current frequency + instruction
    let frequency = TEST_FREQUENCIES[state.index];
    let status = Paragraph::new(vec![
        Line::from(format!("  Testing frequency: {frequency} Hz")),
        Line::from(Span::styled(
            "  Adjust the volume until you can just barely hear the tone, then press Enter.",
            Style::default().fg(Color::Gray),
        )),
    ]);
    frame.render_widget(status, rows[1]);

    frame.render_widget(LevelWidget::new(state.volume, state.playing), rows[2]);

    // Recorded thresholds so far
    if !state.samples.is_empty() {
        let table_rows: Vec<Row> = state
            .samples
            .iter()
            .map(|s| {
                Row::new(vec![
                    format!("  {} Hz", s.frequency),
                    format!("{:.0}%", s.threshold * 100.0),
                ])
            })
            .collect();

        let table = Table::new(table_rows, [Constraint::Length(12), Constraint::Length(8)])
            .header(
                Row::new(vec!["  Frequency", "Threshold"])
                    .style(Style::default().add_modifier(Modifier::BOLD)),
            )
            .block(Block::default().title(" Recorded ").borders(Borders::ALL));
        frame.render_widget(table, rows[3]);
    }

    // Key hints
    let mut hint = vec![
        Span::styled(
            "  [↑/↓]",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" volume  "),
        Span::styled(
            "[Space]",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw(if state.playing { " pause  " } else { " play  " }),
        Span::styled(
            "[Enter]",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" confirm  "),
        Span::styled("[Esc]", Style::default().fg(Color::Red)),
        Span::raw(" abort"),
    ];
    if !audio_available {
        hint.push(Span::styled(
            "   audio unavailable — running silent",
            Style::default().fg(Color::Red),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(hint)), rows[4]);
}
