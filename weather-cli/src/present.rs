use std::{
    io::{self, Write},
    time::Duration,
};

use weather_core::{
    Endpoint, Widget,
    render::{render_card, render_notice},
};

const TITLE_DELAY: Duration = Duration::from_millis(600);
const BORDER_STEP: Duration = Duration::from_millis(6);
const LINE_STEP: Duration = Duration::from_millis(120);
const CARD_WIDTH: usize = 40;

/// Writes the widget to the terminal, with optional pauses that stand in for
/// the fade and draw-in effects.
#[derive(Debug, Clone, Copy)]
pub struct Presenter {
    animate: bool,
}

impl Presenter {
    pub fn new(animate: bool) -> Self {
        Self { animate }
    }

    async fn pause(&self, step: Duration) {
        if self.animate {
            tokio::time::sleep(step).await;
        }
    }

    pub async fn title(&self, line: &str) {
        self.pause(TITLE_DELAY).await;
        println!();
        println!("{line}");
        println!();
    }

    pub fn pending(&self, city: &str, endpoint: Endpoint) {
        println!("Fetching weather for {city} ({endpoint})...");
    }

    /// Flush pending notifications, then the card if there is one.
    pub async fn show(&self, widget: &mut Widget) -> io::Result<()> {
        for notice in widget.drain_notices() {
            println!("{}", render_notice(&notice));
        }

        if let Some(result) = widget.result() {
            let card = render_card(result);
            self.reveal(&card).await?;
        }

        Ok(())
    }

    async fn reveal(&self, lines: &[String]) -> io::Result<()> {
        self.border('╭', '╮').await?;
        for line in lines {
            self.pause(LINE_STEP).await;
            println!("│ {line}");
        }
        self.border('╰', '╯').await
    }

    async fn border(&self, left: char, right: char) -> io::Result<()> {
        let mut out = io::stdout();
        write!(out, "{left}")?;
        for _ in 0..CARD_WIDTH {
            write!(out, "─")?;
            if self.animate {
                out.flush()?;
                self.pause(BORDER_STEP).await;
            }
        }
        writeln!(out, "{right}")?;
        out.flush()
    }
}
