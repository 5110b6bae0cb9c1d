use std::env;

use color_eyre::owo_colors::OwoColorize;

const TITLE_RULE: &str = "====================";

pub struct Style {
    enabled: bool,
}

impl Style {
    pub fn new(force_no_color: bool, is_tty: bool) -> Self {
        let env_no_color = env::var_os("NO_COLOR").is_some();
        Self {
            enabled: !(force_no_color || env_no_color) && is_tty,
        }
    }

    pub fn title(&self, text: &str) -> String {
        let line = format!("{TITLE_RULE} {text} {TITLE_RULE}");
        if !self.enabled {
            return line;
        }
        line.yellow().bold().to_string()
    }

    pub fn success(&self, text: &str) -> String {
        let line = format!("✔ {text}");
        if !self.enabled {
            return line;
        }
        line.green().bold().to_string()
    }
}
