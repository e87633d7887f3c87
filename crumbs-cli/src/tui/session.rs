use crumbs_core::{EventSource, MenuEvent, Selection};
use ratatui::{Terminal, backend::Backend, style::Style, widgets::Widget};

use crate::app::{Action, AppMode, AppState};
use crate::ui::{AppLayout, Footer, Header, HelpView, MenuView, SummaryBar, Theme};

use super::event::{AppEvent, EventHandler};
use super::handler::handle_key;

/// Terminal-backed event source: draws the menu, then waits for a key that
/// means something to the selection state machine
pub struct TuiSession<'a, B: Backend> {
    terminal: &'a mut Terminal<B>,
    state: AppState,
    events: EventHandler,
    theme: Theme,
    error: Option<color_eyre::Report>,
}

impl<'a, B: Backend> TuiSession<'a, B> {
    pub fn new(terminal: &'a mut Terminal<B>, state: AppState) -> Self {
        Self {
            terminal,
            state,
            events: EventHandler::new(100),
            theme: Theme::default(),
            error: None,
        }
    }

    /// Terminal failure that ended the session early, if any
    pub fn take_error(&mut self) -> Option<color_eyre::Report> {
        self.error.take()
    }

    fn draw(&mut self, selection: &Selection) -> color_eyre::Result<()> {
        let state = &mut self.state;
        let theme = &self.theme;

        self.terminal.draw(|frame| {
            let area = frame.area();
            let layout = AppLayout::new(area);

            frame
                .buffer_mut()
                .set_style(area, Style::default().bg(theme.bg));

            state.visible_height = layout.list.height as usize;
            state.ensure_visible(selection.cursor());

            Header::new(state, selection.len(), theme).render(layout.header, frame.buffer_mut());
            SummaryBar::new(selection, theme).render(layout.summary, frame.buffer_mut());
            MenuView::new(selection, state.scroll_offset, theme)
                .render(layout.list, frame.buffer_mut());

            if state.mode == AppMode::Help {
                HelpView::new(theme).render(area, frame.buffer_mut());
            }

            Footer::new(state.mode, state.dry_run, theme).render(layout.footer, frame.buffer_mut());
        })?;
        Ok(())
    }
}

impl<B: Backend> EventSource for TuiSession<'_, B> {
    fn next_event(&mut self, selection: &Selection) -> Option<MenuEvent> {
        loop {
            if let Err(e) = self.draw(selection) {
                self.error = Some(e);
                return None;
            }

            match self.events.next() {
                Ok(AppEvent::Key(key)) => match handle_key(key, self.state.mode) {
                    Action::Menu(event) => return Some(event),
                    Action::ShowHelp => self.state.show_help(),
                    Action::HideHelp => self.state.hide_help(),
                    Action::Tick => {}
                },
                // Redrawn on the next pass
                Ok(AppEvent::Resize) | Ok(AppEvent::Tick) => {}
                Err(e) => {
                    self.error = Some(e);
                    return None;
                }
            }
        }
    }
}
