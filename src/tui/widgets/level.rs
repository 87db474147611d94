use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, Borders, LineGauge, Widget};

/// Output-level gauge for the sweep screen: shows the tone amplitude the
/// listener is adjusting, colored by how loud it is.
pub struct LevelWidget {
    volume: f32,
    playing: bool,
}

impl LevelWidget {
    pub fn new(volume: f32, playing: bool) -> Self {
        Self { volume, playing }
    }
}

impl Widget for LevelWidget {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let ratio = self.volume.clamp(0.0, 1.0) as f64;

        let color = if !self.playing {
            Color::DarkGray
        } else if ratio < 0.35 {
            Color::Green
        } else if ratio < 0.7 {
            Color::Yellow
        } else {
            Color::Red
        };

        let label = if self.playing {
            format!("{:.0}%", self.volume * 100.0)
        } else {
            "paused".to_string()
        };

        LineGauge::default()
            .block(
                Block::default()
                    .title(" Tone level ")
                    .borders(Borders::ALL),
            )
            .filled_style(Style::default().fg(color))
            .ratio(ratio)
            .label(label)
            .render(area, buf);
    }
}
