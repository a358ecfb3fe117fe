use crate::clipboard::Clipboard;
use crate::duration::format_duration;
use crate::storage::PreferenceStore;
use crate::theme::{Theme, ThemeController};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::time::{Duration, Instant};

pub const COPY_LABEL: &str = "Copy";
pub const COPIED_LABEL: &str = "Copied!";

const OUTPUT_FLASH: Duration = Duration::from_millis(300);

pub struct App<S, C> {
    pub input: String,
    pub result: String,
    pub theme: Theme,
    pub should_quit: bool,
    themes: ThemeController<S>,
    clipboard: C,
    system_dark: bool,
    copied_flash: Duration,
    copied_until: Option<Instant>,
    flash_until: Option<Instant>,
}

impl<S: PreferenceStore, C: Clipboard> App<S, C> {
    pub fn new(
        themes: ThemeController<S>,
        clipboard: C,
        system_dark: bool,
        copied_flash: Duration,
    ) -> Result<Self> {
        let theme = themes.effective(system_dark)?;
        Ok(Self {
            input: String::new(),
            result: String::new(),
            theme,
            should_quit: false,
            themes,
            clipboard,
            system_dark,
            copied_flash,
            copied_until: None,
            flash_until: None,
        })
    }

    pub fn copy_label(&self) -> &'static str {
        if self.copied_until.is_some() {
            COPIED_LABEL
        } else {
            COPY_LABEL
        }
    }

    pub fn is_flashing(&self) -> bool {
        self.flash_until.is_some()
    }

    pub fn handle_key(&mut self, key: KeyEvent, now: Instant) -> Result<()> {
        if key.kind == KeyEventKind::Release {
            return Ok(());
        }
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Char('y') if ctrl => self.copy_result(now),
            KeyCode::Char('t') if ctrl => self.toggle_theme()?,
            KeyCode::Char(c) if !ctrl => self.input.push(c),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Enter => self.calculate_and_copy(now),
            _ => {}
        }
        Ok(())
    }

    pub fn calculate_and_copy(&mut self, now: Instant) {
        self.result = format_duration(&self.input);
        self.flash_until = Some(now + OUTPUT_FLASH);
        tracing::debug!(input = %self.input, result = %self.result, "calculated");

        if !self.result.trim().is_empty() {
            let text = self.result.clone();
            let _ = self.try_copy(&text);
            self.copied_until = Some(now + self.copied_flash);
        }
    }

    /// Copies whatever is shown; the acknowledgment only appears if the write went through.
    pub fn copy_result(&mut self, now: Instant) {
        let text = self.result.trim().to_string();
        if text.is_empty() {
            return;
        }
        if self.try_copy(&text) {
            self.copied_until = Some(now + self.copied_flash);
        }
    }

    fn try_copy(&mut self, text: &str) -> bool {
        match self.clipboard.write_text(text) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(error = %e, "clipboard write failed");
                false
            }
        }
    }

    pub fn toggle_theme(&mut self) -> Result<()> {
        self.theme = self.themes.toggle(self.system_dark)?;
        tracing::info!(theme = %self.theme, "theme toggled");
        Ok(())
    }

    pub fn on_system_scheme_change(&mut self, system_dark: bool) -> Result<()> {
        if system_dark == self.system_dark {
            return Ok(());
        }
        self.system_dark = system_dark;
        if let Some(theme) = self.themes.on_system_change(system_dark)? {
            tracing::info!(theme = %theme, "following system color scheme");
            self.theme = theme;
        }
        Ok(())
    }

    pub fn tick(&mut self, now: Instant) {
        if self.copied_until.is_some_and(|until| now >= until) {
            self.copied_until = None;
        }
        if self.flash_until.is_some_and(|until| now >= until) {
            self.flash_until = None;
        }
    }
}
