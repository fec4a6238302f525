use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};
use std::fmt::Display;
use std::io::IsTerminal;

pub struct Ui {
    quiet: bool,
}

impl Ui {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn section<'a, I, V>(&self, title: &str, rows: I)
    where
        I: IntoIterator<Item = (&'a str, V)>,
        V: Display,
    {
        if self.quiet {
            return;
        }
        let rows: Vec<(String, String)> = rows
            .into_iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect();
        if rows.is_empty() {
            return;
        }

        println!("{title}");
        let key_width = rows.iter().map(|(k, _)| k.len()).max().unwrap_or(0);
        for (key, value) in rows {
            println!("  {:>key_width$}: {value}", key);
        }
    }

    /// Progress bar over `total` edges, drawn on stderr. Hidden when quiet or
    /// when stderr is not a terminal.
    pub fn edge_progress(&self, total: usize) -> ProgressBar {
        if self.quiet || !std::io::stderr().is_terminal() {
            return ProgressBar::hidden();
        }
        let bar = ProgressBar::with_draw_target(Some(total as u64), ProgressDrawTarget::stderr());
        match ProgressStyle::with_template("[color] [{elapsed_precise}] {wide_bar:.green/white} {pos}/{len}") {
            Ok(style) => bar.set_style(style),
            Err(_) => bar.set_style(ProgressStyle::default_bar()),
        }
        bar
    }
}
